pub mod app_config;
pub mod cart;
pub mod config;
pub mod error;
pub mod filter;
pub mod order;
pub mod products;
pub mod storefront;

pub use app_config::{AppConfig, Environment};
pub use cart::{Cart, CartLine};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, ShopError};
pub use filter::{all_tags, FilterDraft, ProductFilter};
pub use order::{verify_password, Order};
pub use products::{parse_price, parse_tags, Catalog, Product, ProductId};
pub use storefront::{CatalogSource, CatalogState, OrderSink, Overlay, Storefront};
