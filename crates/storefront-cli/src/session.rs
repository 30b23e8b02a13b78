//! Interactive shopping session.
//!
//! Each input line is parsed as a command with clap in multicall mode, run
//! against the [`Storefront`], and answered with the resulting screen. Action
//! failures are printed inline and the session continues.

use clap::{Parser, Subcommand};
use storefront_core::{CatalogSource, OrderSink, Overlay, ProductId, ShopError, Storefront};
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::render;

#[derive(Debug, Parser)]
#[command(multicall = true)]
pub(crate) struct SessionLine {
    #[command(subcommand)]
    pub(crate) command: SessionCommand,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub(crate) enum SessionCommand {
    /// Show the product grid
    #[command(alias = "ls")]
    List,
    /// Open a product's detail overlay
    Show { id: u32 },
    /// Add one unit of a product to the cart
    Add { id: u32 },
    /// Set a cart line's quantity; zero or less removes it
    Qty {
        id: u32,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Increase a cart line by one
    Inc { id: u32 },
    /// Decrease a cart line by one
    Dec { id: u32 },
    /// Remove a line from the cart
    #[command(alias = "rm")]
    Remove { id: u32 },
    /// Open the cart overlay
    Cart,
    /// Search product names; no text clears the search
    Search { text: Vec<String> },
    /// Open the filter overlay
    Filter,
    /// Set the minimum price in the open filter; no value clears it
    Min { value: Option<String> },
    /// Set the maximum price in the open filter; no value clears it
    Max { value: Option<String> },
    /// Toggle a tag in the open filter
    Tag {
        #[arg(required = true)]
        tag: Vec<String>,
    },
    /// Apply the open filter
    Apply,
    /// Clear price and tag filters
    Clear,
    /// Open the checkout overlay
    Checkout,
    /// Confirm the payment with the business password (the rest of the line)
    Pay {
        #[arg(allow_hyphen_values = true)]
        password: String,
    },
    /// Close the open overlay
    #[command(alias = "back")]
    Close,
    /// Fetch the catalog again
    Reload,
    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

/// Result of running one command.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Step {
    pub(crate) output: String,
    pub(crate) quit: bool,
}

impl Step {
    fn show(output: String) -> Self {
        Self {
            output,
            quit: false,
        }
    }
}

/// Runs one command against the shell.
pub(crate) async fn execute<S, K>(
    shop: &mut Storefront,
    source: &S,
    sink: &K,
    command: SessionCommand,
) -> Step
where
    S: CatalogSource,
    K: OrderSink,
{
    let result: Result<Option<String>, ShopError> = match command {
        SessionCommand::Quit => {
            return Step {
                output: "Goodbye.".to_string(),
                quit: true,
            }
        }
        SessionCommand::List => {
            shop.close_overlay();
            Ok(None)
        }
        SessionCommand::Show { id } => shop.select_product(ProductId(id)).map(|_| None),
        SessionCommand::Add { id } => shop
            .add_to_cart(ProductId(id))
            .map(|()| Some(format!("Added product {id} to cart."))),
        SessionCommand::Qty { id, quantity } => {
            shop.set_quantity(ProductId(id), quantity);
            Ok(None)
        }
        SessionCommand::Inc { id } => {
            shop.increment(ProductId(id));
            Ok(None)
        }
        SessionCommand::Dec { id } => {
            shop.decrement(ProductId(id));
            Ok(None)
        }
        SessionCommand::Remove { id } => {
            shop.remove_from_cart(ProductId(id));
            Ok(None)
        }
        SessionCommand::Cart => {
            shop.open_cart();
            Ok(None)
        }
        SessionCommand::Search { text } => {
            shop.set_search(&text.join(" "));
            shop.close_overlay();
            Ok(None)
        }
        SessionCommand::Filter => {
            shop.open_filter();
            Ok(None)
        }
        SessionCommand::Min { value } => edit_draft(shop, |draft| {
            draft.set_price_min(value.as_deref().unwrap_or_default())
        }),
        SessionCommand::Max { value } => edit_draft(shop, |draft| {
            draft.set_price_max(value.as_deref().unwrap_or_default())
        }),
        SessionCommand::Tag { tag } => edit_draft(shop, |draft| {
            draft.toggle_tag(&tag.join(" "));
            Ok(())
        }),
        SessionCommand::Apply => {
            if shop.overlay() == Overlay::Filter {
                shop.apply_filter();
                Ok(None)
            } else {
                Ok(Some("Open the filter first with `filter`.".to_string()))
            }
        }
        SessionCommand::Clear => {
            shop.clear_filter();
            Ok(None)
        }
        SessionCommand::Checkout => shop.begin_checkout().map(|()| None),
        SessionCommand::Pay { password } => {
            if shop.overlay() == Overlay::Checkout {
                shop.checkout(sink, &password).await.map(|order| {
                    Some(format!(
                        "Payment confirmed. Order {} for {} recorded.",
                        order.order_id,
                        render::money(order.subtotal)
                    ))
                })
            } else {
                Ok(Some("Open checkout first with `checkout`.".to_string()))
            }
        }
        SessionCommand::Close => {
            shop.close_overlay();
            Ok(None)
        }
        SessionCommand::Reload => shop
            .load(source)
            .await
            .map(|count| Some(format!("Loaded {count} products."))),
    };

    let screen = render::screen(shop);
    let output = match result {
        Ok(Some(note)) => format!("{note}\n{screen}"),
        Ok(None) => screen,
        Err(err) => format!("Error: {err}\n{screen}"),
    };
    Step::show(output)
}

fn edit_draft<F>(shop: &mut Storefront, edit: F) -> Result<Option<String>, ShopError>
where
    F: FnOnce(&mut storefront_core::FilterDraft) -> Result<(), ShopError>,
{
    match shop.filter_draft_mut() {
        Some(draft) => edit(draft).map(|()| None),
        None => Ok(Some("Open the filter first with `filter`.".to_string())),
    }
}

/// Parses one input line. Blank lines yield `Ok(None)`.
///
/// `pay` takes the rest of the line verbatim, so a password may contain
/// spaces or start with `-`.
pub(crate) fn parse_line(line: &str) -> Result<Option<SessionCommand>, clap::Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if let Some((head, rest)) = line.split_once(char::is_whitespace) {
        if head == "pay" {
            return SessionLine::try_parse_from(["pay", rest.trim_start()])
                .map(|parsed| Some(parsed.command));
        }
    }
    SessionLine::try_parse_from(line.split_whitespace()).map(|parsed| Some(parsed.command))
}

/// Reads commands from stdin until `quit` or end of input.
pub(crate) async fn run<S, K>(shop: &mut Storefront, source: &S, sink: &K) -> anyhow::Result<()>
where
    S: CatalogSource,
    K: OrderSink,
{
    let mut stdout = tokio::io::stdout();
    write_out(&mut stdout, &render::screen(shop)).await?;
    write_out(&mut stdout, "Type `help` for commands.\n> ").await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(command)) => {
                let step = execute(shop, source, sink, command).await;
                write_out(&mut stdout, &step.output).await?;
                if step.quit {
                    write_out(&mut stdout, "\n").await?;
                    return Ok(());
                }
            }
            Err(err) => write_out(&mut stdout, &err.render().to_string()).await?,
        }
        write_out(&mut stdout, "\n> ").await?;
    }
    Ok(())
}

async fn write_out<W: AsyncWrite + Unpin>(out: &mut W, text: &str) -> std::io::Result<()> {
    out.write_all(text.as_bytes()).await?;
    out.flush().await
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
