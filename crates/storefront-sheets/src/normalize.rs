//! Mapping from sheet rows to [`storefront_core::Product`].
//!
//! Column layout: `name, thumbnail, tags, price, image_1, image_2`. A
//! product's id is its 1-based position in the fetched range, counted before
//! blank rows are skipped, so ids stay stable while the sheet has gaps.

use rust_decimal::Decimal;
use storefront_core::{parse_price, parse_tags, Product, ProductId};

const COL_NAME: usize = 0;
const COL_THUMBNAIL: usize = 1;
const COL_TAGS: usize = 2;
const COL_PRICE: usize = 3;
const COL_IMAGES: [usize; 2] = [4, 5];

/// Converts every usable row into a product, in sheet order.
#[must_use]
pub fn products_from_rows(rows: Vec<Vec<String>>) -> Vec<Product> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let id = u32::try_from(index + 1).ok()?;
            product_from_row(ProductId(id), &row)
        })
        .collect()
}

/// Builds one product, or `None` when the row has no name.
fn product_from_row(id: ProductId, row: &[String]) -> Option<Product> {
    let name = cell(row, COL_NAME)?;

    let price_text = cell(row, COL_PRICE).unwrap_or_default();
    let price = parse_price(&price_text).unwrap_or_else(|| {
        tracing::warn!(product_id = %id, price = %price_text, "unparseable price, treating as zero");
        Decimal::ZERO
    });

    Some(Product {
        id,
        name,
        thumbnail: cell(row, COL_THUMBNAIL),
        tags: cell(row, COL_TAGS)
            .map(|raw| parse_tags(&raw))
            .unwrap_or_default(),
        price_text,
        price,
        images: COL_IMAGES.iter().filter_map(|&col| cell(row, col)).collect(),
    })
}

/// Trimmed cell text; `None` for missing or blank cells.
fn cell(row: &[String], col: usize) -> Option<String> {
    row.get(col)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
