//! # Cart Store
//!
//! Owns the in-memory cart and every mutation of it.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Cart Operation                                │
//! │                                                                         │
//! │  1. Snapshot the current cart (at invocation)                          │
//! │  2. Validate / consult catalog and stock (may await)                   │
//! │  3. Compute the next cart from the snapshot                            │
//! │  4. Commit:  persist ──► publish          (under the commit lock)      │
//! │                                                                         │
//! │  Any failure in 2-4:                                                   │
//! │     log ──► NotificationSink(user message) ──► return Err              │
//! │     cart unchanged, nothing persisted, nothing published               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! Overlapping operations are not serialized. Each computes its result from
//! the snapshot it captured, so the last one to commit wins; an earlier
//! commit can be overwritten. Persist and publish of one commit are never
//! interleaved with another's.

use std::sync::{Arc, Mutex, PoisonError};

use rocketshoes_core::{
    validation::validate_amount, CartEntry, CartState, CartTotals, ProductId, CART_STORAGE_KEY,
};
use rocketshoes_storage::{CartRepository, PersistenceLayer};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::catalog::ProductCatalogClient;
use crate::config::Messages;
use crate::error::{CartError, CartResult, CatalogError, Operation};
use crate::notify::NotificationSink;

/// Options for opening a `CartStore`.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Key the cart is persisted under.
    pub storage_key: String,
    pub messages: Messages,
}

impl Default for StoreOptions {
    fn default() -> Self {
        StoreOptions {
            storage_key: CART_STORAGE_KEY.to_string(),
            messages: Messages::default(),
        }
    }
}

/// The shopping cart: current state, its mutations, and its subscribers.
pub struct CartStore {
    repository: CartRepository,
    catalog: Arc<dyn ProductCatalogClient>,
    notifier: Arc<dyn NotificationSink>,
    messages: Messages,
    state_tx: watch::Sender<CartState>,
    commit_lock: Mutex<()>,
}

impl CartStore {
    /// Opens the store, restoring the persisted cart.
    ///
    /// Missing or unreadable persisted data yields an empty cart.
    pub fn open(
        storage: Arc<dyn PersistenceLayer>,
        catalog: Arc<dyn ProductCatalogClient>,
        notifier: Arc<dyn NotificationSink>,
        options: StoreOptions,
    ) -> Self {
        let repository = CartRepository::new(storage, options.storage_key);
        let initial = repository.load();
        info!(key = %repository.key(), entries = initial.len(), "Cart store opened");

        let (state_tx, _) = watch::channel(initial);

        CartStore {
            repository,
            catalog,
            notifier,
            messages: options.messages,
            state_tx,
            commit_lock: Mutex::new(()),
        }
    }

    /// Current cart.
    pub fn cart(&self) -> CartState {
        self.state_tx.borrow().clone()
    }

    /// Totals of the current cart.
    pub fn totals(&self) -> CartTotals {
        self.state_tx.borrow().totals()
    }

    /// Receives every committed cart.
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.state_tx.subscribe()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Adds one unit of a product.
    ///
    /// A product already in the cart goes through the amount update with
    /// `amount + 1` (and its failure messages). A new product is looked up
    /// in the catalog and added with amount 1; stock is not checked.
    pub async fn add_product(&self, product_id: ProductId) -> CartResult<()> {
        debug!(%product_id, "add_product");
        let snapshot = self.cart();

        if let Some(entry) = snapshot.get(product_id) {
            let result = match entry.amount.checked_add(1) {
                Some(next_amount) => {
                    self.next_with_amount(&snapshot, product_id, next_amount)
                        .await
                }
                None => Err(CartError::InvalidAmount {
                    product_id,
                    amount: entry.amount,
                }),
            };
            return self.settle(Operation::UpdateAmount, product_id, result);
        }

        let result = self.next_with_new_product(&snapshot, product_id).await;
        self.settle(Operation::Add, product_id, result)
    }

    /// Removes a product's entry.
    pub fn remove_product(&self, product_id: ProductId) -> CartResult<()> {
        debug!(%product_id, "remove_product");
        let result = self
            .cart()
            .without(product_id)
            .map_err(|e| CartError::from_core(e, product_id, 0));
        self.settle(Operation::Remove, product_id, result)
    }

    /// Sets a product's amount after checking stock.
    pub async fn update_product_amount(&self, product_id: ProductId, amount: i64) -> CartResult<()> {
        debug!(%product_id, amount, "update_product_amount");
        let snapshot = self.cart();
        let result = self.next_with_amount(&snapshot, product_id, amount).await;
        self.settle(Operation::UpdateAmount, product_id, result)
    }

    // =========================================================================
    // Next-state computation
    // =========================================================================

    async fn next_with_new_product(
        &self,
        snapshot: &CartState,
        product_id: ProductId,
    ) -> CartResult<CartState> {
        let details = self
            .catalog
            .get_product(product_id)
            .await
            .map_err(|source| match source {
                CatalogError::NotFound(_) => CartError::ProductNotFound(product_id),
                source => CartError::TransientLookupFailure { product_id, source },
            })?;

        // The response must identify the product that was asked for.
        if details.id != Some(product_id) {
            return Err(CartError::ProductNotFound(product_id));
        }

        snapshot
            .with_entry(CartEntry::from_product(product_id, details))
            .map_err(|e| CartError::from_core(e, product_id, 1))
    }

    async fn next_with_amount(
        &self,
        snapshot: &CartState,
        product_id: ProductId,
        amount: i64,
    ) -> CartResult<CartState> {
        if validate_amount(amount).is_err() {
            return Err(CartError::InvalidAmount { product_id, amount });
        }
        if !snapshot.contains(product_id) {
            return Err(CartError::ProductNotInCart(product_id));
        }

        let stock = self
            .catalog
            .get_stock(product_id)
            .await
            .map_err(|source| CartError::TransientLookupFailure { product_id, source })?;

        if !stock.covers(amount) {
            return Err(CartError::OutOfStock {
                product_id,
                available: stock.available_amount,
                requested: amount,
            });
        }

        snapshot
            .with_amount(product_id, amount)
            .map_err(|e| CartError::from_core(e, product_id, amount))
    }

    // =========================================================================
    // Commit / failure reporting
    // =========================================================================

    fn settle(
        &self,
        operation: Operation,
        product_id: ProductId,
        result: CartResult<CartState>,
    ) -> CartResult<()> {
        match result.and_then(|next| self.commit(next)) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.report(operation, product_id, &err);
                Err(err)
            }
        }
    }

    /// Persists `next`, then publishes it. Nothing is published if the
    /// write fails.
    fn commit(&self, next: CartState) -> CartResult<()> {
        let _guard = self.commit_lock.lock().unwrap_or_else(PoisonError::into_inner);

        self.repository.save(&next)?;

        let entries = next.len();
        let quantity = next.total_quantity();
        self.state_tx.send_replace(next);
        info!(entries, quantity, "Cart committed");
        Ok(())
    }

    fn report(&self, operation: Operation, product_id: ProductId, err: &CartError) {
        match err {
            CartError::PersistenceFailure(_) => {
                error!(%operation, %product_id, error = %err, "Cart could not be saved")
            }
            _ => warn!(%operation, %product_id, error = %err, "Cart operation rejected"),
        }
        self.notifier
            .report_error(err.user_message(operation, &self.messages));
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("repository", &self.repository)
            .field("cart", &*self.state_tx.borrow())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
