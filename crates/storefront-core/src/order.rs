//! Order snapshots produced at checkout.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::cart::Cart;
use crate::error::ShopError;
use crate::products::Catalog;

/// Write-once summary of a confirmed cart, sent to the order sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    pub timestamp: DateTime<Utc>,
    /// Human-readable lines, e.g. `"Honda Car Wheels x2, Prime Wheels x1"`.
    pub items: String,
    pub total_quantity: u64,
    /// Always carries two decimal places.
    pub subtotal: Decimal,
}

impl Order {
    /// Snapshots `cart` against `catalog` at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`ShopError::EmptyCart`] when no cart line resolves to a product,
    /// or [`ShopError::AmountOverflow`] when the subtotal cannot be computed.
    pub fn from_cart(
        cart: &Cart,
        catalog: &Catalog,
        now: DateTime<Utc>,
    ) -> Result<Self, ShopError> {
        let lines: Vec<String> = cart
            .resolved(catalog)
            .map(|(product, quantity)| format!("{} x{quantity}", product.name))
            .collect();
        if lines.is_empty() {
            return Err(ShopError::EmptyCart);
        }

        let total_quantity = cart
            .resolved(catalog)
            .map(|(_, quantity)| u64::from(quantity))
            .sum();

        let mut subtotal = cart.subtotal(catalog)?.round_dp(2);
        subtotal.rescale(2);

        Ok(Self {
            order_id: generate_order_id(now),
            timestamp: now,
            items: lines.join(", "),
            total_quantity,
            subtotal,
        })
    }
}

/// `ORD-<yyyymmddHHMMSS>-<8 hex chars>`.
fn generate_order_id(now: DateTime<Utc>) -> String {
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(8).collect();
    format!("ORD-{}-{suffix}", now.format("%Y%m%d%H%M%S"))
}

/// Compares a submitted checkout password with the configured one in
/// constant time. No configured password means nothing is accepted.
#[must_use]
pub fn verify_password(expected: Option<&str>, submitted: &str) -> bool {
    match expected {
        Some(expected) => submitted.as_bytes().ct_eq(expected.as_bytes()).into(),
        None => false,
    }
}
