//! # Product Catalog
//!
//! The remote source of product details and stock levels.
//!
//! ```text
//! CartStore ──► ProductCatalogClient
//!                 ├── HttpCatalog      GET {base}/products/{id}, GET {base}/stock/{id}
//!                 └── InMemoryCatalog  fixed products and stock, for tests and demos
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use rocketshoes_core::{ProductDetails, ProductId, StockInfo};

use crate::error::{CatalogError, CatalogResult};

/// Read-only access to the product catalog.
#[async_trait]
pub trait ProductCatalogClient: Send + Sync {
    /// Fetches display details for one product.
    async fn get_product(&self, product_id: ProductId) -> CatalogResult<ProductDetails>;

    /// Fetches how many units of one product are in stock.
    async fn get_stock(&self, product_id: ProductId) -> CatalogResult<StockInfo>;
}

/// Catalog held in memory.
///
/// Products are stored as they would come back from the API, so a stub can
/// return details with no usable `id`. Setting it offline makes every lookup
/// fail with a transport error.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<HashMap<ProductId, ProductDetails>>,
    stock: RwLock<HashMap<ProductId, i64>>,
    offline: AtomicBool,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        InMemoryCatalog::default()
    }

    /// Adds a product with its stock level.
    pub fn with_product(self, details: ProductDetails, available: i64) -> Self {
        if let Some(id) = details.id {
            self.set_stock(id, available);
            self.insert_product(id, details);
        }
        self
    }

    /// Stores `details` as the response for `product_id`, whatever its `id`.
    pub fn insert_product(&self, product_id: ProductId, details: ProductDetails) {
        if let Ok(mut products) = self.products.write() {
            products.insert(product_id, details);
        }
    }

    pub fn set_stock(&self, product_id: ProductId, available: i64) {
        if let Ok(mut stock) = self.stock.write() {
            stock.insert(product_id, available);
        }
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> CatalogResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(CatalogError::Transport("catalog is offline".to_string()));
        }
        Ok(())
    }
}

fn poisoned() -> CatalogError {
    CatalogError::Transport("catalog lock poisoned".to_string())
}

#[async_trait]
impl ProductCatalogClient for InMemoryCatalog {
    async fn get_product(&self, product_id: ProductId) -> CatalogResult<ProductDetails> {
        self.check_online()?;
        let products = self.products.read().map_err(|_| poisoned())?;
        products
            .get(&product_id)
            .cloned()
            .ok_or(CatalogError::NotFound(product_id))
    }

    async fn get_stock(&self, product_id: ProductId) -> CatalogResult<StockInfo> {
        self.check_online()?;
        let stock = self.stock.read().map_err(|_| poisoned())?;
        stock
            .get(&product_id)
            .map(|available| StockInfo::new(product_id, *available))
            .ok_or(CatalogError::NotFound(product_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocketshoes_core::DisplayFields;

    fn sneaker(id: u64) -> ProductDetails {
        ProductDetails::new(
            ProductId::new(id),
            DisplayFields::default().with("title", "Tênis de Caminhada"),
        )
    }

    #[tokio::test]
    async fn test_lookup() {
        let catalog = InMemoryCatalog::new().with_product(sneaker(1), 3);

        let details = catalog.get_product(ProductId::new(1)).await.unwrap();
        assert_eq!(details.id, Some(ProductId::new(1)));

        let stock = catalog.get_stock(ProductId::new(1)).await.unwrap();
        assert_eq!(stock.available_amount, 3);

        assert!(matches!(
            catalog.get_product(ProductId::new(9)).await,
            Err(CatalogError::NotFound(_))
        ));
        assert!(matches!(
            catalog.get_stock(ProductId::new(9)).await,
            Err(CatalogError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_offline() {
        let catalog = InMemoryCatalog::new().with_product(sneaker(1), 3);
        catalog.set_offline(true);
        assert!(matches!(
            catalog.get_product(ProductId::new(1)).await,
            Err(CatalogError::Transport(_))
        ));

        catalog.set_offline(false);
        assert!(catalog.get_stock(ProductId::new(1)).await.is_ok());
    }

    #[tokio::test]
    async fn test_response_without_id() {
        let catalog = InMemoryCatalog::new();
        catalog.insert_product(ProductId::new(4), ProductDetails::default());

        let details = catalog.get_product(ProductId::new(4)).await.unwrap();
        assert_eq!(details.id, None);
    }
}
