//! # rocketshoes-core: Pure Cart Logic for RocketShoes
//!
//! This crate is the **heart** of the RocketShoes cart. It contains the cart
//! rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      RocketShoes Cart Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Storefront UI / CLI                            │   │
//! │  │     Product grid ──► Cart page ──► Amount controls              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                rocketshoes-cart (CartStore)                     │   │
//! │  │     add_product, remove_product, update_product_amount          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ rocketshoes-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │ ProductId │  │   Money   │  │ CartState │  │  amounts  │  │   │
//! │  │   │ CartEntry │  │  parsing  │  │ CartTotals│  │  ids/keys │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductId, CartEntry, StockInfo, etc.)
//! - [`cart`] - The copy-on-write cart snapshot and its totals
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use rocketshoes_core::{CartEntry, CartState, DisplayFields, ProductId};
//!
//! let cart = CartState::new()
//!     .with_entry(CartEntry::new(ProductId::new(5), DisplayFields::default(), 1))
//!     .unwrap()
//!     .with_entry(CartEntry::new(ProductId::new(2), DisplayFields::default(), 1))
//!     .unwrap();
//!
//! // Entries are always ordered by product id
//! let ids: Vec<u64> = cart.entries().iter().map(|e| e.product_id.get()).collect();
//! assert_eq!(ids, vec![2, 5]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartState, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key the cart is persisted under.
///
/// Matches the key the storefront has always written to local storage, so a
/// cart saved before this crate existed is picked up on first load.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Smallest amount an entry may hold. An entry never sits at zero; it is
/// removed instead.
pub const MIN_ENTRY_AMOUNT: i64 = 1;
