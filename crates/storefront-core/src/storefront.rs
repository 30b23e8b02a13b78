//! The page shell: catalog, cart, applied filter and the open overlay.
//!
//! Everything the user sees is derived from this one value. Handlers take
//! `&mut self`, so two actions can never interleave.

use std::future::Future;

use chrono::Utc;
use rust_decimal::Decimal;

use crate::cart::Cart;
use crate::error::ShopError;
use crate::filter::{all_tags, FilterDraft, ProductFilter};
use crate::order::{verify_password, Order};
use crate::products::{Catalog, Product, ProductId};

/// Read side: where the product table comes from.
pub trait CatalogSource {
    /// Fetches the full product list.
    fn fetch_products(&self) -> impl Future<Output = Result<Vec<Product>, ShopError>> + Send;
}

/// Write side: where confirmed orders go.
pub trait OrderSink {
    /// Records `order` once. Callers never retry.
    fn submit_order(&self, order: &Order) -> impl Future<Output = Result<(), ShopError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogState {
    Loading,
    Ready,
    /// The last fetch failed; the message is shown in place of the grid.
    Failed(String),
}

/// The modal surface currently shown above the grid, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    ProductDetail(ProductId),
    Cart,
    Checkout,
    Filter,
}

pub struct Storefront {
    catalog: Catalog,
    state: CatalogState,
    cart: Cart,
    filter: ProductFilter,
    overlay: Overlay,
    filter_draft: Option<FilterDraft>,
    checkout_error: Option<String>,
    checkout_password: Option<String>,
    last_order: Option<Order>,
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("state", &self.state)
            .field("products", &self.catalog.len())
            .field("cart", &self.cart)
            .field("filter", &self.filter)
            .field("overlay", &self.overlay)
            .field("checkout_error", &self.checkout_error)
            .field(
                "checkout_password",
                &self.checkout_password.as_ref().map(|_| "[redacted]"),
            )
            .field("last_order", &self.last_order.as_ref().map(|o| &o.order_id))
            .finish_non_exhaustive()
    }
}

impl Storefront {
    #[must_use]
    pub fn new(checkout_password: Option<String>) -> Self {
        Self {
            catalog: Catalog::default(),
            state: CatalogState::Loading,
            cart: Cart::new(),
            filter: ProductFilter::default(),
            overlay: Overlay::None,
            filter_draft: None,
            checkout_error: None,
            checkout_password,
            last_order: None,
        }
    }

    /// Replaces the catalog with a fresh fetch from `source`.
    ///
    /// On any failure, including an empty result, the catalog is cleared and
    /// the shell enters [`CatalogState::Failed`]. Cart lines whose product
    /// disappeared are dropped.
    ///
    /// # Errors
    ///
    /// Returns the fetch error, or [`ShopError::EmptyCatalog`].
    pub async fn load<S: CatalogSource>(&mut self, source: &S) -> Result<usize, ShopError> {
        self.state = CatalogState::Loading;
        tracing::info!("fetching products");

        let result = match source.fetch_products().await {
            Ok(products) if products.is_empty() => Err(ShopError::EmptyCatalog),
            other => other,
        };

        match result {
            Ok(products) => {
                self.catalog = Catalog::new(products);
                self.state = CatalogState::Ready;
                let dropped = self.cart.retain_known(&self.catalog);
                if dropped > 0 {
                    tracing::warn!(dropped, "dropped cart lines for products no longer listed");
                }
                if let Overlay::ProductDetail(id) = self.overlay {
                    if !self.catalog.contains(id) {
                        self.overlay = Overlay::None;
                    }
                }
                tracing::info!(count = self.catalog.len(), "products loaded");
                Ok(self.catalog.len())
            }
            Err(err) => {
                tracing::error!(error = %err, "product fetch failed");
                self.catalog = Catalog::default();
                self.cart.clear();
                self.overlay = Overlay::None;
                self.state = CatalogState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    #[must_use]
    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn filter(&self) -> &ProductFilter {
        &self.filter
    }

    #[must_use]
    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    #[must_use]
    pub fn last_order(&self) -> Option<&Order> {
        self.last_order.as_ref()
    }

    #[must_use]
    pub fn checkout_error(&self) -> Option<&str> {
        self.checkout_error.as_deref()
    }

    /// Products shown in the grid under the applied filter.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        self.filter.apply(&self.catalog)
    }

    #[must_use]
    pub fn all_tags(&self) -> Vec<String> {
        all_tags(&self.catalog)
    }

    /// # Errors
    ///
    /// Returns [`ShopError::AmountOverflow`] if the cart total does not fit.
    pub fn subtotal(&self) -> Result<Decimal, ShopError> {
        self.cart.subtotal(&self.catalog)
    }

    /// Opens the detail overlay for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::UnknownProduct`] if `id` is not in the catalog.
    pub fn select_product(&mut self, id: ProductId) -> Result<&Product, ShopError> {
        let product = self.catalog.get(id).ok_or(ShopError::UnknownProduct(id))?;
        self.overlay = Overlay::ProductDetail(id);
        Ok(product)
    }

    /// The product behind the open detail overlay.
    #[must_use]
    pub fn selected_product(&self) -> Option<&Product> {
        match self.overlay {
            Overlay::ProductDetail(id) => self.catalog.get(id),
            _ => None,
        }
    }

    /// Adds one unit of `id` to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::UnknownProduct`] if `id` is not in the catalog.
    pub fn add_to_cart(&mut self, id: ProductId) -> Result<(), ShopError> {
        if !self.catalog.contains(id) {
            return Err(ShopError::UnknownProduct(id));
        }
        self.cart.add(id);
        tracing::debug!(product_id = %id, "added to cart");
        Ok(())
    }

    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) {
        self.cart.set_quantity(id, quantity);
        self.close_checkout_if_empty();
    }

    pub fn increment(&mut self, id: ProductId) {
        self.cart.increment(id);
    }

    pub fn decrement(&mut self, id: ProductId) {
        self.cart.decrement(id);
        self.close_checkout_if_empty();
    }

    pub fn remove_from_cart(&mut self, id: ProductId) {
        self.cart.remove(id);
        self.close_checkout_if_empty();
    }

    pub fn open_cart(&mut self) {
        self.overlay = Overlay::Cart;
    }

    /// Opens the filter overlay with a draft of the applied filter.
    pub fn open_filter(&mut self) {
        self.filter_draft = Some(FilterDraft::from_filter(&self.filter));
        self.overlay = Overlay::Filter;
    }

    /// The draft being edited, while the filter overlay is open.
    #[must_use]
    pub fn filter_draft(&self) -> Option<&FilterDraft> {
        if self.overlay == Overlay::Filter {
            self.filter_draft.as_ref()
        } else {
            None
        }
    }

    pub fn filter_draft_mut(&mut self) -> Option<&mut FilterDraft> {
        if self.overlay == Overlay::Filter {
            self.filter_draft.as_mut()
        } else {
            None
        }
    }

    /// Commits the draft and closes the filter overlay. The current search
    /// text is kept. Does nothing if the overlay is not open.
    pub fn apply_filter(&mut self) {
        if self.overlay != Overlay::Filter {
            return;
        }
        if let Some(draft) = self.filter_draft.take() {
            self.filter = ProductFilter {
                search: self.filter.search.take(),
                ..draft.build()
            };
        }
        self.overlay = Overlay::None;
    }

    /// Drops price and tag constraints and closes the filter overlay. The
    /// search text is kept.
    pub fn clear_filter(&mut self) {
        let search = self.filter.search.take();
        self.filter = ProductFilter {
            search,
            ..ProductFilter::default()
        };
        self.filter_draft = None;
        if self.overlay == Overlay::Filter {
            self.overlay = Overlay::None;
        }
    }

    pub fn set_search(&mut self, text: &str) {
        self.filter.set_search(text);
    }

    /// Opens the checkout overlay.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::EmptyCart`] if there is nothing to check out.
    pub fn begin_checkout(&mut self) -> Result<(), ShopError> {
        if self.cart.is_empty() {
            return Err(ShopError::EmptyCart);
        }
        self.checkout_error = None;
        self.overlay = Overlay::Checkout;
        Ok(())
    }

    /// Confirms the cart with the shared password and hands the order to `sink`.
    ///
    /// A wrong password never reaches the sink and leaves the cart as it was.
    /// On success the cart is cleared and the overlay closed.
    ///
    /// # Errors
    ///
    /// - [`ShopError::EmptyCart`] if the cart is empty.
    /// - [`ShopError::InvalidPassword`] if the password does not match.
    /// - [`ShopError::Submit`] if the sink failed; the cart is kept.
    pub async fn checkout<K: OrderSink>(
        &mut self,
        sink: &K,
        password: &str,
    ) -> Result<Order, ShopError> {
        let result = self.try_checkout(sink, password).await;
        match &result {
            Ok(order) => {
                tracing::info!(
                    order_id = %order.order_id,
                    subtotal = %order.subtotal,
                    "order submitted"
                );
                self.cart.clear();
                self.checkout_error = None;
                self.overlay = Overlay::None;
                self.last_order = Some(order.clone());
            }
            Err(err) => {
                self.checkout_error = Some(err.to_string());
            }
        }
        result
    }

    async fn try_checkout<K: OrderSink>(
        &self,
        sink: &K,
        password: &str,
    ) -> Result<Order, ShopError> {
        if self.cart.is_empty() {
            return Err(ShopError::EmptyCart);
        }
        if !verify_password(self.checkout_password.as_deref(), password) {
            tracing::warn!("checkout rejected: invalid password");
            return Err(ShopError::InvalidPassword);
        }
        let order = Order::from_cart(&self.cart, &self.catalog, Utc::now())?;
        sink.submit_order(&order).await.inspect_err(|err| {
            tracing::error!(order_id = %order.order_id, error = %err, "order submission failed");
        })?;
        Ok(order)
    }

    /// Dismisses whichever overlay is open, discarding filter drafts and
    /// checkout errors.
    pub fn close_overlay(&mut self) {
        self.overlay = Overlay::None;
        self.filter_draft = None;
        self.checkout_error = None;
    }

    fn close_checkout_if_empty(&mut self) {
        if self.overlay == Overlay::Checkout && self.cart.is_empty() {
            self.overlay = Overlay::Cart;
            self.checkout_error = None;
        }
    }
}

#[cfg(test)]
#[path = "storefront_test.rs"]
mod tests;
