//! Plain-text rendering of the storefront: the grid and each overlay.

use std::fmt::Write as _;

use rust_decimal::Decimal;
use storefront_core::{CatalogState, FilterDraft, Overlay, Product, Storefront};

/// `P 1250.50`: peso marker and two decimal places.
pub(crate) fn money(amount: Decimal) -> String {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    format!("P {rounded}")
}

/// The cart total as money, or the reason it cannot be shown.
fn total(shop: &Storefront) -> String {
    shop.subtotal()
        .map_or_else(|err| format!("unavailable ({err})"), money)
}

fn plural(count: u64, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}

/// The product grid, or the load state when there is nothing to show.
pub(crate) fn grid(shop: &Storefront) -> String {
    match shop.state() {
        CatalogState::Loading => return "Loading products...".to_string(),
        CatalogState::Failed(message) => return format!("Error: {message}"),
        CatalogState::Ready => {}
    }

    let visible = shop.visible_products();
    let mut out = String::from("Explore Items");
    if !shop.filter().is_empty() {
        let _ = write!(
            out,
            " ({} of {} shown)",
            visible.len(),
            shop.catalog().len()
        );
    }
    out.push('\n');

    if visible.is_empty() {
        out.push_str("  No products match the current filters.\n");
        return out;
    }
    for product in visible {
        let _ = write!(out, "  [{}] {}  P {}", product.id, product.name, product.price_text);
        if !product.tags.is_empty() {
            let _ = write!(out, "  #{}", product.tags.join(" #"));
        }
        out.push('\n');
    }
    out
}

/// The detail overlay for one product.
pub(crate) fn detail(product: &Product) -> String {
    let mut out = format!("{}\nP {}\n", product.name, product.price_text);
    if !product.tags.is_empty() {
        out.push_str("Tags:\n");
        for tag in &product.tags {
            let _ = writeln!(out, "  - {tag}");
        }
    }
    if let Some(thumbnail) = &product.thumbnail {
        let _ = writeln!(out, "Thumbnail: {thumbnail}");
    }
    for image in &product.images {
        let _ = writeln!(out, "Image: {image}");
    }
    out
}

/// The cart overlay.
pub(crate) fn cart(shop: &Storefront) -> String {
    let count = shop.cart().total_quantity();
    let mut out = format!("Shopping Cart\n{}\n", plural(count, "item", "items"));
    if shop.cart().is_empty() {
        out.push_str("Your cart is empty\n");
        return out;
    }
    for (product, quantity) in shop.cart().resolved(shop.catalog()) {
        let _ = writeln!(
            out,
            "  [{}] {}  P {}  x{quantity}",
            product.id, product.name, product.price_text
        );
    }
    let _ = writeln!(out, "Total: {}", total(shop));
    out
}

/// The checkout confirmation overlay.
pub(crate) fn checkout(shop: &Storefront) -> String {
    let mut out = format!(
        "Confirm Payment\n{}\nTotal Amount: {}\nEnter the business password with `pay <password>`.\n",
        plural(shop.cart().total_quantity(), "item", "items"),
        total(shop)
    );
    if let Some(error) = shop.checkout_error() {
        let _ = writeln!(out, "Error: {error}");
    }
    out
}

/// The filter overlay: current draft bounds and the tag list.
pub(crate) fn filter(draft: &FilterDraft, tags: &[String]) -> String {
    let bound = |b: Option<Decimal>| b.map_or_else(|| "-".to_string(), money);
    let mut out = format!(
        "Filter Products\nPrice Range: {} to {}\n",
        bound(draft.price_min()),
        bound(draft.price_max())
    );
    if !tags.is_empty() {
        out.push_str("Tags:\n");
        for tag in tags {
            let mark = if draft.selected_tags().contains(tag) { "x" } else { " " };
            let _ = writeln!(out, "  [{mark}] {tag}");
        }
    }
    out.push_str("Use `min`, `max`, `tag`, then `apply` or `clear`.\n");
    out
}

/// Whatever is on screen right now: the open overlay, else the grid.
pub(crate) fn screen(shop: &Storefront) -> String {
    match shop.overlay() {
        Overlay::None => grid(shop),
        Overlay::ProductDetail(_) => shop.selected_product().map_or_else(String::new, detail),
        Overlay::Cart => cart(shop),
        Overlay::Checkout => checkout(shop),
        Overlay::Filter => shop
            .filter_draft()
            .map(|draft| filter(draft, &shop.all_tags()))
            .unwrap_or_default(),
    }
}
