//! # Cart Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Caller input   │  │     Catalog     │  │      Persistence        │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidAmount  │  │ ProductNotFound │  │  PersistenceFailure     │ │
//! │  │  ProductNotIn   │  │ OutOfStock      │  │                         │ │
//! │  │    Cart         │  │ TransientLookup │  │                         │ │
//! │  │                 │  │    Failure      │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  Every CartError is terminal at the CartStore boundary: it is logged,  │
//! │  turned into a user message, and handed to the NotificationSink.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use rocketshoes_core::{CoreError, ProductId};
use rocketshoes_storage::StorageError;
use thiserror::Error;

use crate::config::Messages;

// =============================================================================
// Operation
// =============================================================================

/// The three cart mutations. Selects which user message a failure maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
    UpdateAmount,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Add => write!(f, "add_product"),
            Operation::Remove => write!(f, "remove_product"),
            Operation::UpdateAmount => write!(f, "update_product_amount"),
        }
    }
}

// =============================================================================
// Catalog Error
// =============================================================================

/// Failures of the product catalog collaborator.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog has no such product (HTTP 404 or missing stub).
    #[error("Product {0} not found in catalog")]
    NotFound(ProductId),

    /// Network failure, timeout, or non-success status.
    #[error("Catalog request failed: {0}")]
    Transport(String),

    /// The response body couldn't be decoded.
    #[error("Unexpected catalog response: {0}")]
    Decode(String),
}

/// Result type alias for catalog lookups.
pub type CatalogResult<T> = Result<T, CatalogError>;

// =============================================================================
// Cart Error
// =============================================================================

/// Why a cart operation was rejected.
#[derive(Debug, Error)]
pub enum CartError {
    /// The catalog response carried no valid identifier for the product.
    #[error("Product {0} not found")]
    ProductNotFound(ProductId),

    /// The operation targets a product the cart doesn't hold.
    #[error("Product {0} is not in the cart")]
    ProductNotInCart(ProductId),

    /// Requested amount is below 1.
    #[error("Invalid amount {amount} for product {product_id}")]
    InvalidAmount { product_id: ProductId, amount: i64 },

    /// Stock can't cover the requested amount.
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    OutOfStock {
        product_id: ProductId,
        available: i64,
        requested: i64,
    },

    /// Any other catalog or stock lookup failure.
    #[error("Lookup failed for product {product_id}: {source}")]
    TransientLookupFailure {
        product_id: ProductId,
        #[source]
        source: CatalogError,
    },

    /// The next cart couldn't be written; it was not published either.
    #[error("Failed to persist cart: {0}")]
    PersistenceFailure(#[from] StorageError),
}

impl CartError {
    /// Maps a cart rule violation raised while applying `amount` to `product_id`.
    pub(crate) fn from_core(err: CoreError, product_id: ProductId, amount: i64) -> Self {
        match err {
            CoreError::EntryNotFound(id) => CartError::ProductNotInCart(id),
            CoreError::Validation(_) | CoreError::InvalidPrice { .. } => {
                CartError::InvalidAmount { product_id, amount }
            }
        }
    }

    /// The message shown to the user when `operation` fails with this error.
    ///
    /// ## Mapping
    /// ```text
    /// OutOfStock (any operation) ──► messages.out_of_stock
    /// anything else during Add ────► messages.add_failed
    /// anything else during Remove ─► messages.remove_failed
    /// anything else during Update ─► messages.update_failed
    /// ```
    pub fn user_message<'a>(&self, operation: Operation, messages: &'a Messages) -> &'a str {
        if matches!(self, CartError::OutOfStock { .. }) {
            return &messages.out_of_stock;
        }
        match operation {
            Operation::Add => &messages.add_failed,
            Operation::Remove => &messages.remove_failed,
            Operation::UpdateAmount => &messages.update_failed,
        }
    }
}

/// Result type alias for cart operations.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Config Error
// =============================================================================

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to write config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No config path available on this platform")]
    NoConfigPath,
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rocketshoes_core::ValidationError;

    #[test]
    fn test_user_messages() {
        let messages = Messages::default();
        let id = ProductId::new(5);

        let out_of_stock = CartError::OutOfStock {
            product_id: id,
            available: 1,
            requested: 2,
        };
        assert_eq!(
            out_of_stock.user_message(Operation::Add, &messages),
            "Quantidade solicitada fora de estoque"
        );
        assert_eq!(
            out_of_stock.user_message(Operation::UpdateAmount, &messages),
            "Quantidade solicitada fora de estoque"
        );

        let not_in_cart = CartError::ProductNotInCart(id);
        assert_eq!(
            not_in_cart.user_message(Operation::Remove, &messages),
            "Erro na remoção do produto"
        );
        assert_eq!(
            not_in_cart.user_message(Operation::UpdateAmount, &messages),
            "Erro na alteração de quantidade do produto"
        );
        assert_eq!(
            CartError::ProductNotFound(id).user_message(Operation::Add, &messages),
            "Erro na adição do produto"
        );
    }

    #[test]
    fn test_from_core() {
        let id = ProductId::new(3);

        let err = CartError::from_core(CoreError::EntryNotFound(id), id, 2);
        assert!(matches!(err, CartError::ProductNotInCart(p) if p == id));

        let validation = ValidationError::MustBePositive {
            field: "amount".to_string(),
            value: 0,
        };
        let err = CartError::from_core(CoreError::Validation(validation), id, 0);
        assert!(matches!(err, CartError::InvalidAmount { amount: 0, .. }));
    }

    #[test]
    fn test_error_display() {
        let err = CartError::TransientLookupFailure {
            product_id: ProductId::new(8),
            source: CatalogError::Transport("connection refused".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Lookup failed for product 8: Catalog request failed: connection refused"
        );
        assert_eq!(Operation::UpdateAmount.to_string(), "update_product_amount");
    }
}
