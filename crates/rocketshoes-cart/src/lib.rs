//! # rocketshoes-cart: Cart Store for RocketShoes
//!
//! The client-side shopping cart: an in-memory list of entries, kept in step
//! with durable storage and validated against the remote catalog.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart Store Architecture                         │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                         CartStore                                │  │
//! │  │                                                                  │  │
//! │  │  add_product / remove_product / update_product_amount            │  │
//! │  │  cart() / totals() / subscribe()                                 │  │
//! │  └───────┬───────────────────┬───────────────────────┬──────────────┘  │
//! │          ▼                   ▼                       ▼                  │
//! │  ┌────────────────┐  ┌────────────────────┐  ┌──────────────────────┐  │
//! │  │ProductCatalog- │  │ PersistenceLayer   │  │ NotificationSink     │  │
//! │  │Client          │  │ (rocketshoes-      │  │                      │  │
//! │  │                │  │  storage)          │  │ TracingNotifier      │  │
//! │  │ HttpCatalog    │  │ MemoryStorage      │  │ any Fn(&str)         │  │
//! │  │ InMemoryCatalog│  │ FileStorage        │  │                      │  │
//! │  └────────────────┘  └────────────────────┘  └──────────────────────┘  │
//! │                                                                         │
//! │  Subscribers receive every committed cart through a watch channel.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`catalog`] - Catalog trait and in-memory catalog
//! - [`config`] - TOML/env configuration and user messages
//! - [`error`] - Cart, catalog, and config errors
//! - [`http`] - Catalog client over the REST API
//! - [`notify`] - Notification sinks
//! - [`store`] - The `CartStore`
//!
//! ## Usage
//! ```rust,no_run
//! use std::sync::Arc;
//! use rocketshoes_cart::{CartConfig, CartStore, HttpCatalog, TracingNotifier};
//! use rocketshoes_core::ProductId;
//! use rocketshoes_storage::FileStorage;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CartConfig::load(None)?;
//! let store = CartStore::open(
//!     Arc::new(FileStorage::open(config.data_dir()?)?),
//!     Arc::new(HttpCatalog::from_settings(&config.catalog)?),
//!     Arc::new(TracingNotifier),
//!     config.store_options(),
//! );
//!
//! store.add_product(ProductId::new(1)).await?;
//! println!("{} items", store.totals().total_quantity);
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod notify;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::{InMemoryCatalog, ProductCatalogClient};
pub use config::{CartConfig, CatalogSettings, Messages, StorageSettings};
pub use error::{
    CartError, CartResult, CatalogError, CatalogResult, ConfigError, ConfigResult, Operation,
};
pub use http::HttpCatalog;
pub use notify::{NotificationSink, TracingNotifier};
pub use store::{CartStore, StoreOptions};
