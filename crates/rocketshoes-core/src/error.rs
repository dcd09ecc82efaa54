//! # Error Types
//!
//! Domain-specific error types for rocketshoes-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rocketshoes-core errors (this file)                                   │
//! │  ├── CoreError        - Cart rule violations                           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  rocketshoes-storage errors (separate crate)                           │
//! │  └── StorageError     - Persistence failures                           │
//! │                                                                         │
//! │  rocketshoes-cart errors (separate crate)                              │
//! │  ├── CatalogError     - Product/stock lookup failures                  │
//! │  └── CartError        - What the store reports to the user             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CartError → NotificationSink      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Cart rule errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No entry for the product exists in the cart snapshot.
    #[error("Product {0} is not in the cart")]
    EntryNotFound(ProductId),

    /// A price display field could not be read as a decimal amount.
    #[error("Invalid price '{value}': {reason}")]
    InvalidPrice { value: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before any cart rule runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be at least one.
    #[error("{field} must be at least 1, got {value}")]
    MustBePositive { field: String, value: i64 },

    /// Invalid format (e.g. a non-numeric product id).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
