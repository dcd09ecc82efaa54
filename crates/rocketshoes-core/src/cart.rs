//! # Cart Snapshot
//!
//! The cart as an immutable value.
//!
//! ## Copy-on-Write
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Snapshot Transitions                            │
//! │                                                                         │
//! │  Operation               Method                 Result                  │
//! │  ─────────               ──────                 ──────                  │
//! │                                                                         │
//! │  New product ──────────► with_entry(entry) ───► new snapshot, inserted  │
//! │                                                  in product id order    │
//! │                                                                         │
//! │  Change amount ────────► with_amount(id, n) ──► new snapshot, entry     │
//! │                                                  amount replaced        │
//! │                                                                         │
//! │  Remove product ───────► without(id) ─────────► new snapshot, entry     │
//! │                                                  excluded               │
//! │                                                                         │
//! │  NOTE: the receiver is never modified. Observers holding the old       │
//! │        snapshot keep seeing exactly what they were handed.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartEntry, ProductId};
use crate::validation::validate_amount;

/// The shopping cart.
///
/// ## Invariants
/// - Entries are unique by `product_id`
/// - Every amount is ≥ 1
/// - Entries are sorted by `product_id` ascending
///
/// Every constructor upholds these, including deserialization, so a
/// `CartState` that exists is always valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CartState {
    entries: Vec<CartEntry>,
}

impl CartState {
    /// Creates an empty cart.
    pub fn new() -> Self {
        CartState::default()
    }

    /// Builds a cart from untrusted entries (e.g. read back from storage).
    ///
    /// ## Normalization
    /// - Entries with amount < 1 are dropped
    /// - For duplicate product ids, the first occurrence wins
    /// - The result is sorted by product id
    pub fn from_entries(entries: Vec<CartEntry>) -> Self {
        let mut kept: Vec<CartEntry> = Vec::with_capacity(entries.len());
        for entry in entries {
            if validate_amount(entry.amount).is_err() {
                continue;
            }
            if kept.iter().any(|e| e.product_id == entry.product_id) {
                continue;
            }
            kept.push(entry);
        }
        kept.sort_by_key(|e| e.product_id);
        CartState { entries: kept }
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<CartEntry> {
        self.entries
    }

    pub fn get(&self, product_id: ProductId) -> Option<&CartEntry> {
        self.position(product_id).ok().map(|i| &self.entries[i])
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.position(product_id).is_ok()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all entry amounts, saturating at `i64::MAX`.
    pub fn total_quantity(&self) -> i64 {
        self.entries
            .iter()
            .fold(0i64, |total, e| total.saturating_add(e.amount))
    }

    /// Returns a new cart with `entry` inserted, replacing any entry with the
    /// same product id.
    pub fn with_entry(&self, entry: CartEntry) -> CoreResult<Self> {
        validate_amount(entry.amount)?;

        let mut entries = self.entries.clone();
        match self.position(entry.product_id) {
            Ok(i) => entries[i] = entry,
            Err(i) => entries.insert(i, entry),
        }
        Ok(CartState { entries })
    }

    /// Returns a new cart where the entry for `product_id` holds `amount`.
    ///
    /// ## Errors
    /// - `Validation` if amount < 1
    /// - `EntryNotFound` if the product isn't in the cart
    pub fn with_amount(&self, product_id: ProductId, amount: i64) -> CoreResult<Self> {
        validate_amount(amount)?;

        let index = self
            .position(product_id)
            .map_err(|_| CoreError::EntryNotFound(product_id))?;

        let mut entries = self.entries.clone();
        entries[index] = entries[index].with_amount(amount);
        Ok(CartState { entries })
    }

    /// Returns a new cart without the entry for `product_id`.
    pub fn without(&self, product_id: ProductId) -> CoreResult<Self> {
        let index = self
            .position(product_id)
            .map_err(|_| CoreError::EntryNotFound(product_id))?;

        let mut entries = self.entries.clone();
        entries.remove(index);
        Ok(CartState { entries })
    }

    /// Calculates the derived totals shown next to the cart.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }

    fn position(&self, product_id: ProductId) -> Result<usize, usize> {
        self.entries.binary_search_by_key(&product_id, |e| e.product_id)
    }
}

impl<'de> Deserialize<'de> for CartState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<CartEntry>::deserialize(deserializer).map(CartState::from_entries)
    }
}

/// Cart totals summary for rendering.
///
/// Entries whose `price` field is missing or unreadable count towards
/// `item_count` and `total_quantity` but not towards `subtotal`;
/// `unpriced_entries` says how many were skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub subtotal: Money,
    pub unpriced_entries: usize,
}

impl From<&CartState> for CartTotals {
    fn from(cart: &CartState) -> Self {
        let mut subtotal = Money::zero();
        let mut unpriced_entries = 0;
        for entry in cart.entries() {
            match entry.line_total() {
                Some(line) => subtotal += line,
                None => unpriced_entries += 1,
            }
        }

        CartTotals {
            item_count: cart.len(),
            total_quantity: cart.total_quantity(),
            subtotal,
            unpriced_entries,
        }
    }
}
