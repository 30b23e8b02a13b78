//! Session cart: product ids with per-line quantities.
//!
//! Lines hold only the product id. Names and prices are always resolved
//! against the shell's [`Catalog`] so the cart never diverges from it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ShopError;
use crate::products::{Catalog, Product, ProductId};

/// One product plus its requested quantity. `quantity` is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `product_id`, incrementing the existing line if present.
    pub fn add(&mut self, product_id: ProductId) {
        match self.line_mut(product_id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine {
                product_id,
                quantity: 1,
            }),
        }
    }

    /// Sets the quantity of an existing line. A quantity of zero or less
    /// removes the line. Unknown ids are ignored.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.line_mut(product_id) {
            line.quantity = quantity;
        }
    }

    pub fn increment(&mut self, product_id: ProductId) {
        if let Some(quantity) = self.quantity_of(product_id) {
            self.set_quantity(product_id, i64::from(quantity) + 1);
        }
    }

    pub fn decrement(&mut self, product_id: ProductId) {
        if let Some(quantity) = self.quantity_of(product_id) {
            self.set_quantity(product_id, i64::from(quantity) - 1);
        }
    }

    pub fn remove(&mut self, product_id: ProductId) {
        self.lines.retain(|line| line.product_id != product_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Drops lines whose product is no longer in `catalog`.
    ///
    /// Returns the number of lines removed.
    pub fn retain_known(&mut self, catalog: &Catalog) -> usize {
        let before = self.lines.len();
        self.lines.retain(|line| catalog.contains(line.product_id));
        before - self.lines.len()
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn quantity_of(&self, product_id: ProductId) -> Option<u32> {
        self.lines
            .iter()
            .find(|line| line.product_id == product_id)
            .map(|line| line.quantity)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of price × quantity over every line that resolves in `catalog`.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::AmountOverflow`] if the total does not fit in a
    /// [`Decimal`].
    pub fn subtotal(&self, catalog: &Catalog) -> Result<Decimal, ShopError> {
        self.resolved(catalog)
            .try_fold(Decimal::ZERO, |total, (product, quantity)| {
                product
                    .price
                    .checked_mul(Decimal::from(quantity))
                    .and_then(|line| total.checked_add(line))
            })
            .ok_or(ShopError::AmountOverflow)
    }

    /// Pairs each line with its catalog product, skipping unresolvable ids.
    pub fn resolved<'a>(
        &'a self,
        catalog: &'a Catalog,
    ) -> impl Iterator<Item = (&'a Product, u32)> + 'a {
        self.lines.iter().filter_map(move |line| {
            catalog
                .get(line.product_id)
                .map(|product| (product, line.quantity))
        })
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
    }
}

#[cfg(test)]
#[path = "cart_test.rs"]
mod tests;
