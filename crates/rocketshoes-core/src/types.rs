//! # Domain Types
//!
//! Core domain types used throughout the RocketShoes cart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ ProductDetails  │   │   CartEntry     │   │   StockInfo     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (optional)  │──►│  product_id     │   │  product_id     │       │
//! │  │  display fields │──►│  display fields │   │  available_amt  │       │
//! │  └─────────────────┘   │  amount (≥ 1)   │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │                                                                         │
//! │  Catalog response ──► cart entry (amount 1) ──► persisted as JSON      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Display Fields
//! The cart never interprets product attributes (title, price, image). They
//! travel from the catalog response into the entry and out to storage
//! untouched, flattened next to `productId` and `amount`.

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::money::Money;

// =============================================================================
// Product Id
// =============================================================================

/// Catalog identifier of a product. Unique key of an entry within a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    #[inline]
    pub const fn new(id: u64) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Display Fields
// =============================================================================

/// Keys owned by the entry itself. They are never carried as display fields,
/// otherwise a flattened entry would serialize the same key twice.
const RESERVED_KEYS: [&str; 3] = ["id", "productId", "amount"];

/// Opaque product attributes passed through the cart unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayFields(Map<String, Value>);

impl DisplayFields {
    /// Wraps a JSON object, dropping keys the entry owns.
    pub fn from_map(mut map: Map<String, Value>) -> Self {
        for key in RESERVED_KEYS {
            map.remove(key);
        }
        DisplayFields(map)
    }

    /// Adds or replaces a field. Reserved keys are ignored.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if !RESERVED_KEYS.contains(&key.as_str()) {
            self.0.insert(key, value.into());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Product title, when the catalog supplied one.
    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    pub fn image(&self) -> Option<&str> {
        self.0.get("image").and_then(Value::as_str)
    }

    /// Unit price read from the `price` field.
    ///
    /// Returns `None` if the field is missing or isn't a decimal number.
    pub fn price(&self) -> Option<Money> {
        self.0.get("price").and_then(|v| Money::from_json(v).ok())
    }
}

// =============================================================================
// Product Details
// =============================================================================

/// A product as returned by the catalog.
///
/// `id` is `None` when the response carries no usable identifier (missing,
/// zero, negative, or not a number). The store treats that as "product not
/// found".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDetails {
    #[serde(
        default,
        deserialize_with = "lenient_product_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<ProductId>,

    #[serde(flatten)]
    pub display: DisplayFields,
}

impl ProductDetails {
    pub fn new(id: ProductId, display: DisplayFields) -> Self {
        ProductDetails {
            id: Some(id),
            display,
        }
    }
}

/// Accepts any JSON value for `id`, keeping it only if it is a positive integer.
fn lenient_product_id<'de, D>(deserializer: D) -> Result<Option<ProductId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(Value::as_u64)
        .filter(|id| *id > 0)
        .map(ProductId))
}

// =============================================================================
// Stock Info
// =============================================================================

/// Remote stock snapshot for one product. Read-only; never persisted.
///
/// The stock endpoint answers `{ "id": 1, "amount": 3 }`; the camelCase names
/// are accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockInfo {
    #[serde(alias = "id")]
    pub product_id: ProductId,

    #[serde(alias = "amount")]
    pub available_amount: i64,
}

impl StockInfo {
    pub fn new(product_id: ProductId, available_amount: i64) -> Self {
        StockInfo {
            product_id,
            available_amount,
        }
    }

    /// Checks whether `requested` units can be held in a cart.
    #[inline]
    pub fn covers(&self, requested: i64) -> bool {
        self.available_amount >= requested
    }
}

// =============================================================================
// Cart Entry
// =============================================================================

/// One product's presence in the cart.
///
/// ## Persisted Shape
/// ```json
/// { "productId": 5, "amount": 2, "title": "Tênis", "price": 139.9, "image": "..." }
/// ```
/// Entries written by older storefront builds used `id` instead of
/// `productId`; both are read. When an entry carries both, `productId` wins
/// and `id` is dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    pub product_id: ProductId,

    pub amount: i64,

    #[serde(flatten)]
    pub display: DisplayFields,
}

impl CartEntry {
    pub fn new(product_id: ProductId, display: DisplayFields, amount: i64) -> Self {
        CartEntry {
            product_id,
            display: DisplayFields::from_map(display.0),
            amount,
        }
    }

    /// Creates the entry for a product added for the first time (amount 1).
    pub fn from_product(product_id: ProductId, details: ProductDetails) -> Self {
        CartEntry::new(product_id, details.display, crate::MIN_ENTRY_AMOUNT)
    }

    /// Returns a copy holding `amount`, all other fields unchanged.
    pub fn with_amount(&self, amount: i64) -> Self {
        CartEntry {
            amount,
            ..self.clone()
        }
    }

    /// Unit price × amount, when the entry carries a readable price.
    pub fn line_total(&self) -> Option<Money> {
        self.display.price().map(|p| p.multiply_quantity(self.amount))
    }
}

impl<'de> Deserialize<'de> for CartEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;

        let product_id = match fields.remove("productId") {
            Some(id) => id,
            None => fields
                .remove("id")
                .ok_or_else(|| de::Error::missing_field("productId"))?,
        };
        let product_id = ProductId::deserialize(product_id).map_err(de::Error::custom)?;

        let amount = fields
            .remove("amount")
            .ok_or_else(|| de::Error::missing_field("amount"))?;
        let amount = i64::deserialize(amount).map_err(de::Error::custom)?;

        Ok(CartEntry {
            product_id,
            amount,
            display: DisplayFields::from_map(fields),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_details_with_id() {
        let details: ProductDetails = serde_json::from_value(json!({
            "id": 5,
            "title": "Tênis de Caminhada",
            "price": 179.9,
            "image": "https://example.com/5.jpg"
        }))
        .unwrap();

        assert_eq!(details.id, Some(ProductId::new(5)));
        assert_eq!(details.display.title(), Some("Tênis de Caminhada"));
        assert!(details.display.get("id").is_none());
    }

    #[test]
    fn test_product_details_without_usable_id() {
        let empty: ProductDetails = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.id, None);

        let text: ProductDetails = serde_json::from_value(json!({"id": "five"})).unwrap();
        assert_eq!(text.id, None);

        let zero: ProductDetails = serde_json::from_value(json!({"id": 0})).unwrap();
        assert_eq!(zero.id, None);
    }

    #[test]
    fn test_stock_info_wire_shape() {
        let stock: StockInfo = serde_json::from_value(json!({"id": 3, "amount": 2})).unwrap();
        assert_eq!(stock, StockInfo::new(ProductId::new(3), 2));
        assert!(stock.covers(2));
        assert!(!stock.covers(3));

        let camel: StockInfo =
            serde_json::from_value(json!({"productId": 3, "availableAmount": 0})).unwrap();
        assert_eq!(camel.available_amount, 0);
    }

    #[test]
    fn test_entry_serializes_flat() {
        let display = DisplayFields::default().with("title", "Tênis").with("price", 139.9);
        let entry = CartEntry::new(ProductId::new(1), display, 2);

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({"productId": 1, "amount": 2, "title": "Tênis", "price": 139.9})
        );
    }

    #[test]
    fn test_entry_reads_legacy_id_field() {
        let entry: CartEntry = serde_json::from_value(json!({
            "id": 4,
            "amount": 3,
            "title": "Tênis Olympikus"
        }))
        .unwrap();

        assert_eq!(entry.product_id, ProductId::new(4));
        assert_eq!(entry.amount, 3);
        assert_eq!(entry.display.title(), Some("Tênis Olympikus"));
    }

    #[test]
    fn test_entry_with_both_id_fields_prefers_product_id() {
        let entry: CartEntry = serde_json::from_value(json!({
            "productId": 4,
            "id": 9,
            "amount": 2,
            "title": "Tênis Olympikus"
        }))
        .unwrap();

        assert_eq!(entry.product_id, ProductId::new(4));
        assert!(entry.display.get("id").is_none());

        let text = serde_json::to_string(&entry).unwrap();
        assert!(!text.contains("\"id\""));
    }

    #[test]
    fn test_entry_requires_id_and_amount() {
        assert!(serde_json::from_value::<CartEntry>(json!({"amount": 1})).is_err());
        assert!(serde_json::from_value::<CartEntry>(json!({"productId": 1})).is_err());
        assert!(serde_json::from_value::<CartEntry>(json!({"productId": "x", "amount": 1})).is_err());
        assert!(serde_json::from_value::<CartEntry>(json!([1, 2])).is_err());
    }

    #[test]
    fn test_reserved_keys_are_not_display_fields() {
        let mut map = Map::new();
        map.insert("amount".to_string(), json!(10));
        map.insert("title".to_string(), json!("Tênis"));

        let entry = CartEntry::new(ProductId::new(1), DisplayFields::from_map(map), 1);
        assert!(entry.display.get("amount").is_none());
        assert_eq!(serde_json::to_value(&entry).unwrap()["amount"], json!(1));
    }

    #[test]
    fn test_line_total() {
        let display = DisplayFields::default().with("price", 139.9);
        let entry = CartEntry::new(ProductId::new(1), display, 3);
        assert_eq!(entry.line_total(), Some(Money::from_cents(41970)));

        let no_price = CartEntry::new(ProductId::new(2), DisplayFields::default(), 3);
        assert_eq!(no_price.line_total(), None);
    }
}
