mod render;
mod session;

use clap::{Args, Parser, Subcommand};
use storefront_core::{ProductId, Storefront};
use storefront_sheets::{OrderClient, SheetsClient};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(about = "Spreadsheet-backed storefront")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List products, optionally filtered
    Products(FilterArgs),
    /// Show one product's details
    Product {
        /// Product id (its row position in the sheet)
        id: u32,
    },
    /// List every tag used in the catalog
    Tags,
    /// Start an interactive shopping session (the default)
    Shop,
}

#[derive(Debug, Args, Default)]
struct FilterArgs {
    /// Minimum price, inclusive
    #[arg(long)]
    min: Option<String>,

    /// Maximum price, inclusive
    #[arg(long)]
    max: Option<String>,

    /// Show products carrying any of these tags (repeatable)
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Case-insensitive text to look for in product names
    #[arg(long)]
    search: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = storefront_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");

    let cli = Cli::parse();

    let sheets = SheetsClient::new(&config)?;
    let orders = OrderClient::new(&config)?;
    let mut shop = Storefront::new(config.checkout_password.clone());

    // A failed load is shown as the shell's error state, not a process failure.
    let _ = shop.load(&sheets).await;

    match cli.command {
        Some(Commands::Products(args)) => {
            if let Err(err) = apply_filter_args(&mut shop, &args) {
                eprintln!("Error: {err}");
            }
            println!("{}", render::grid(&shop));
        }
        Some(Commands::Product { id }) => match shop.select_product(ProductId(id)) {
            Ok(product) => println!("{}", render::detail(product)),
            Err(err) => println!("Error: {err}"),
        },
        Some(Commands::Tags) => {
            for tag in shop.all_tags() {
                println!("{tag}");
            }
        }
        Some(Commands::Shop) | None => session::run(&mut shop, &sheets, &orders).await?,
    }

    Ok(())
}

/// Applies command-line filter flags the same way the filter overlay would.
fn apply_filter_args(
    shop: &mut Storefront,
    args: &FilterArgs,
) -> Result<(), storefront_core::ShopError> {
    if let Some(search) = &args.search {
        shop.set_search(search);
    }
    shop.open_filter();
    if let Some(draft) = shop.filter_draft_mut() {
        draft.set_price_min(args.min.as_deref().unwrap_or_default())?;
        draft.set_price_max(args.max.as_deref().unwrap_or_default())?;
        for tag in &args.tags {
            draft.toggle_tag(tag);
        }
    }
    shop.apply_filter();
    Ok(())
}
