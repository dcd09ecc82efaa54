//! # Storage Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / serde_json::Error                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageError (this module) ← Adds the key and categorization          │
//! │       │                                                                 │
//! │       ├──► on load: logged, cart starts empty                           │
//! │       │                                                                 │
//! │       └──► on save: CartError::PersistenceFailure, nothing published   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Persistence failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The cart could not be encoded.
    #[error("Failed to encode cart: {0}")]
    Encode(#[from] serde_json::Error),

    /// A key that cannot be stored (empty).
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    /// The in-memory map lock was poisoned by a panicking writer.
    #[error("Storage lock poisoned")]
    LockPoisoned,
}

impl StorageError {
    pub(crate) fn io(key: &str, source: std::io::Error) -> Self {
        StorageError::Io {
            key: key.to_string(),
            source,
        }
    }
}

/// Convenience type alias for Results with StorageError.
pub type StorageResult<T> = Result<T, StorageError>;
