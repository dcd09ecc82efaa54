//! # Validation Module
//!
//! Input validation for cart operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Caller (UI / CLI argument parsing)                           │
//! │  └── Type checks (is it a number at all?)                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Business rules: amount ≥ 1, id > 0, non-empty storage key         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Remote stock check (CartStore)                               │
//! │  └── Requested amount ≤ available stock                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rocketshoes_core::validation::{validate_amount, parse_product_id};
//!
//! assert!(validate_amount(1).is_ok());
//! assert!(validate_amount(0).is_err());
//! assert_eq!(parse_product_id("5").unwrap().get(), 5);
//! ```

use crate::error::ValidationError;
use crate::types::ProductId;
use crate::MIN_ENTRY_AMOUNT;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates an entry amount.
///
/// ## Rules
/// - Must be at least 1 (an entry is removed, never kept at zero)
pub fn validate_amount(amount: i64) -> ValidationResult<i64> {
    if amount < MIN_ENTRY_AMOUNT {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
            value: amount,
        });
    }
    Ok(amount)
}

/// Parses a product id typed by a user (CLI argument, query string).
///
/// ## Rules
/// - Must be a base-10 integer
/// - Must be greater than zero
pub fn parse_product_id(raw: &str) -> ValidationResult<ProductId> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: "product_id".to_string(),
        });
    }

    let id: u64 = raw.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "product_id".to_string(),
        reason: format!("'{}' is not a positive integer", raw),
    })?;

    if id == 0 {
        return Err(ValidationError::MustBePositive {
            field: "product_id".to_string(),
            value: 0,
        });
    }

    Ok(ProductId::new(id))
}

/// Validates the key the cart is stored under.
pub fn validate_storage_key(key: &str) -> ValidationResult<()> {
    if key.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "storage key".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
