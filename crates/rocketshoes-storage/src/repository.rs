//! # Cart Repository
//!
//! Encodes the cart into a `PersistenceLayer` under one fixed key.
//!
//! ## Persisted Format
//! A JSON array of entries, ordered by product id:
//! ```json
//! [
//!   { "productId": 2, "amount": 1, "title": "Tênis VR Caminhada", "price": 139.9 },
//!   { "productId": 5, "amount": 3, "title": "Tênis Adidas Duramo", "price": 219.9 }
//! ]
//! ```

use std::sync::Arc;

use rocketshoes_core::CartState;
use tracing::{debug, warn};

use crate::backend::PersistenceLayer;
use crate::error::StorageResult;

/// Loads and saves the cart.
#[derive(Clone)]
pub struct CartRepository {
    storage: Arc<dyn PersistenceLayer>,
    key: String,
}

impl CartRepository {
    pub fn new(storage: Arc<dyn PersistenceLayer>, key: impl Into<String>) -> Self {
        CartRepository {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the persisted cart.
    ///
    /// Never fails: a missing value, a read error, or text that doesn't
    /// decode all yield an empty cart (logged).
    pub fn load(&self) -> CartState {
        let raw = match self.storage.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "No persisted cart, starting empty");
                return CartState::new();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read persisted cart, starting empty");
                return CartState::new();
            }
        };

        match decode(&raw) {
            Ok(cart) => {
                debug!(key = %self.key, entries = cart.len(), "Persisted cart loaded");
                cart
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Persisted cart is unreadable, starting empty");
                CartState::new()
            }
        }
    }

    /// Writes `cart` under the repository key.
    pub fn save(&self, cart: &CartState) -> StorageResult<()> {
        let raw = encode(cart)?;
        self.storage.write(&self.key, &raw)
    }
}

impl std::fmt::Debug for CartRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartRepository")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// Serializes a cart to its persisted text.
pub fn encode(cart: &CartState) -> StorageResult<String> {
    Ok(serde_json::to_string(cart)?)
}

/// Parses persisted text. Entries are normalized on the way in.
pub fn decode(raw: &str) -> Result<CartState, serde_json::Error> {
    serde_json::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryStorage;
    use crate::file::FileStorage;
    use crate::StorageError;
    use rocketshoes_core::{CartEntry, DisplayFields, ProductId, CART_STORAGE_KEY};

    fn sample_cart() -> CartState {
        let shoe = |id: u64, amount: i64| {
            CartEntry::new(
                ProductId::new(id),
                DisplayFields::default()
                    .with("title", format!("Tênis {}", id))
                    .with("price", 139.9)
                    .with("image", format!("https://cdn.example.com/{}.jpg", id)),
                amount,
            )
        };
        CartState::new()
            .with_entry(shoe(5, 2))
            .unwrap()
            .with_entry(shoe(2, 1))
            .unwrap()
    }

    /// Storage whose writes always fail.
    struct BrokenStorage;

    impl PersistenceLayer for BrokenStorage {
        fn read(&self, key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::io(
                key,
                std::io::Error::new(std::io::ErrorKind::Other, "disk gone"),
            ))
        }

        fn write(&self, key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::io(
                key,
                std::io::Error::new(std::io::ErrorKind::Other, "disk gone"),
            ))
        }
    }

    #[test]
    fn test_load_missing_is_empty() {
        let repo = CartRepository::new(Arc::new(MemoryStorage::new()), CART_STORAGE_KEY);
        assert!(repo.load().is_empty());
    }

    #[test]
    fn test_load_unparseable_is_empty() {
        let storage = MemoryStorage::with_value(CART_STORAGE_KEY, "{not json");
        let repo = CartRepository::new(Arc::new(storage), CART_STORAGE_KEY);
        assert!(repo.load().is_empty());

        let storage = MemoryStorage::with_value(CART_STORAGE_KEY, "{\"productId\": 1}");
        let repo = CartRepository::new(Arc::new(storage), CART_STORAGE_KEY);
        assert!(repo.load().is_empty());
    }

    #[test]
    fn test_load_read_error_is_empty() {
        let repo = CartRepository::new(Arc::new(BrokenStorage), CART_STORAGE_KEY);
        assert!(repo.load().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let repo = CartRepository::new(Arc::new(MemoryStorage::new()), CART_STORAGE_KEY);
        let cart = sample_cart();

        repo.save(&cart).unwrap();
        assert_eq!(repo.load(), cart);
    }

    #[test]
    fn test_round_trip_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let cart = sample_cart();

        let storage = FileStorage::open(dir.path()).unwrap();
        CartRepository::new(Arc::new(storage), CART_STORAGE_KEY)
            .save(&cart)
            .unwrap();

        let reopened = FileStorage::open(dir.path()).unwrap();
        let loaded = CartRepository::new(Arc::new(reopened), CART_STORAGE_KEY).load();
        assert_eq!(loaded, cart);
    }

    #[test]
    fn test_encoded_entries_are_sorted() {
        let raw = encode(&sample_cart()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

        let ids: Vec<u64> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["productId"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![2, 5]);
    }

    #[test]
    fn test_legacy_storefront_format() {
        let legacy = r#"[{"id":3,"title":"Tênis","price":99.9,"image":"x.jpg","amount":2}]"#;
        let cart = decode(legacy).unwrap();

        let entry = cart.get(ProductId::new(3)).unwrap();
        assert_eq!(entry.amount, 2);
        assert_eq!(entry.display.title(), Some("Tênis"));

        let rewritten = encode(&cart).unwrap();
        assert!(rewritten.contains("\"productId\":3"));
        assert!(!rewritten.contains("\"id\""));
    }

    #[test]
    fn test_entry_with_both_id_fields_still_loads() {
        let raw = r#"[{"productId":3,"id":3,"amount":1},{"productId":5,"amount":2}]"#;
        let storage = MemoryStorage::with_value(CART_STORAGE_KEY, raw);
        let cart = CartRepository::new(Arc::new(storage), CART_STORAGE_KEY).load();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get(ProductId::new(3)).unwrap().amount, 1);
    }

    #[test]
    fn test_save_propagates_write_failure() {
        let repo = CartRepository::new(Arc::new(BrokenStorage), CART_STORAGE_KEY);
        assert!(matches!(
            repo.save(&sample_cart()),
            Err(StorageError::Io { .. })
        ));
    }
}
