//! RocketShoes CLI - manage the persisted cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! rocketshoes show
//!
//! # Add one unit of product 3
//! rocketshoes add 3
//!
//! # Set product 3 to 2 units
//! rocketshoes set 3 2
//!
//! # Remove product 3
//! rocketshoes remove 3
//!
//! # Use another config file, print JSON
//! rocketshoes --config ./cart.toml --json show
//! ```
//!
//! A rejected operation prints its message on stderr and leaves the cart
//! unchanged; the exit status is still 0. Only setup failures (bad config,
//! unusable data directory) exit non-zero.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use rocketshoes_cart::{CartConfig, CartStore, HttpCatalog};
use rocketshoes_core::{validation::parse_product_id, ProductId};
use rocketshoes_storage::FileStorage;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod render;

use render::{render_cart, CartResponse};

#[derive(Parser)]
#[command(name = "rocketshoes")]
#[command(author, version, about = "RocketShoes cart tools")]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print the cart as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart
    Show,
    /// Add one unit of a product
    Add {
        #[arg(value_parser = product_id)]
        product_id: ProductId,
    },
    /// Remove a product from the cart
    Remove {
        #[arg(value_parser = product_id)]
        product_id: ProductId,
    },
    /// Set the amount of a product already in the cart
    Set {
        #[arg(value_parser = product_id)]
        product_id: ProductId,

        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

fn product_id(raw: &str) -> Result<ProductId, String> {
    parse_product_id(raw).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Used when `RUST_LOG` is unset or unparseable.
const DEFAULT_LOG_FILTER: &str = "info,rocketshoes=debug";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    log_subscriber(filter).init();
}

/// Logs go to stderr, next to user notifications; stdout carries the cart.
fn log_subscriber(filter: EnvFilter) -> impl tracing::Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish()
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CartConfig::load(cli.config)?;
    let storage = FileStorage::open(config.data_dir()?)?;
    let catalog = HttpCatalog::from_settings(&config.catalog)?;

    let store = CartStore::open(
        Arc::new(storage),
        Arc::new(catalog),
        Arc::new(|message: &str| eprintln!("{message}")),
        config.store_options(),
    );

    // Rejections were already reported through the sink.
    let _ = match cli.command {
        Commands::Show => Ok(()),
        Commands::Add { product_id } => store.add_product(product_id).await,
        Commands::Remove { product_id } => store.remove_product(product_id),
        Commands::Set { product_id, amount } => {
            store.update_product_amount(product_id, amount).await
        }
    };

    let cart = store.cart();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&CartResponse::from(&cart))?);
    } else {
        print!("{}", render_cart(&cart));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_default_log_filter() {
        let subscriber = log_subscriber(EnvFilter::new(DEFAULT_LOG_FILTER));
        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "rocketshoes_cart::store", Level::DEBUG));
            assert!(!tracing::enabled!(target: "rocketshoes_cart::store", Level::TRACE));
            assert!(tracing::enabled!(target: "hyper::client", Level::INFO));
            assert!(!tracing::enabled!(target: "hyper::client", Level::DEBUG));
        });
    }

    #[test]
    fn test_log_filter_override() {
        let subscriber = log_subscriber(EnvFilter::new("warn"));
        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "rocketshoes_cart::store", Level::WARN));
            assert!(!tracing::enabled!(target: "rocketshoes_cart::store", Level::INFO));
        });
    }

    #[test]
    fn test_parse_product_id_arg() {
        assert_eq!(product_id("7"), Ok(ProductId::new(7)));
        assert!(product_id("0").is_err());
        assert!(product_id("abc").is_err());
    }
}
