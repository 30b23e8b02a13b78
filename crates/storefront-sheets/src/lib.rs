//! HTTP adapters for the spreadsheet-backed storefront: the values API the
//! catalog is read from and the script endpoint orders are written to.

pub mod client;
pub mod error;
pub mod normalize;
pub mod orders;
pub mod types;

pub use client::SheetsClient;
pub use error::SheetsError;
pub use normalize::products_from_rows;
pub use orders::OrderClient;
pub use types::{OrderResponse, ValueRange};
