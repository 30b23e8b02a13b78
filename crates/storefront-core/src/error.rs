use thiserror::Error;

use crate::products::ProductId;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// User-facing failures of a single storefront action.
///
/// None of these are fatal: the shell shows the message inline and the
/// session carries on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShopError {
    /// The catalog source could not be reached or answered with garbage.
    #[error("failed to load products: {0}")]
    Fetch(String),

    /// The catalog source answered successfully but with no products.
    #[error("no products found")]
    EmptyCatalog,

    #[error("product {0} not found")]
    UnknownProduct(ProductId),

    #[error("your cart is empty")]
    EmptyCart,

    #[error("invalid password")]
    InvalidPassword,

    /// The order sink refused or failed to record the order.
    #[error("failed to submit order: {0}")]
    Submit(String),

    /// Price × quantity overflowed the money type.
    #[error("cart total is too large")]
    AmountOverflow,

    #[error("invalid price \"{0}\"")]
    InvalidPrice(String),
}
