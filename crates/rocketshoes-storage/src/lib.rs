//! # rocketshoes-storage: Persistence Layer for the RocketShoes Cart
//!
//! Durable key-value storage that survives restarts, plus the repository that
//! encodes the cart into it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Persistence Flow                            │
//! │                                                                         │
//! │  CartStore (commit after a successful mutation)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                rocketshoes-storage (THIS CRATE)                 │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐    ┌──────────────────┐                    │   │
//! │  │   │ CartRepository │───►│ PersistenceLayer │                    │   │
//! │  │   │ (repository.rs)│    │ (backend.rs)     │                    │   │
//! │  │   │                │    │                  │                    │   │
//! │  │   │ CartState⇄JSON │    │ MemoryStorage    │                    │   │
//! │  │   │ fixed cart key │    │ FileStorage      │                    │   │
//! │  │   └────────────────┘    └──────────────────┘                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  <data dir>/%40RocketShoes%3Acart.json                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use rocketshoes_core::CartState;
//! use rocketshoes_storage::{CartRepository, MemoryStorage};
//!
//! let repo = CartRepository::new(Arc::new(MemoryStorage::new()), "@RocketShoes:cart");
//! assert!(repo.load().is_empty());
//!
//! repo.save(&CartState::new()).unwrap();
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod error;
pub mod file;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::{MemoryStorage, PersistenceLayer};
pub use error::{StorageError, StorageResult};
pub use file::FileStorage;
pub use repository::CartRepository;
