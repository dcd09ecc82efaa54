//! # HTTP Catalog
//!
//! `ProductCatalogClient` over the storefront's REST API.
//!
//! ## Endpoints
//! ```text
//! GET {base_url}/products/{id}  ──►  { "id": 1, "title": "...", "price": 179.9, "image": "..." }
//! GET {base_url}/stock/{id}     ──►  { "id": 1, "amount": 3 }
//! ```
//!
//! ## Status Mapping
//! ```text
//! 2xx ──────────────► decode body (failure = Decode)
//! 404 ──────────────► NotFound
//! other / no reply ─► Transport
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use rocketshoes_core::{ProductDetails, ProductId, StockInfo};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::catalog::ProductCatalogClient;
use crate::config::CatalogSettings;
use crate::error::{CatalogError, CatalogResult};

/// Catalog client backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> CatalogResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(HttpCatalog { client, base_url })
    }

    pub fn from_settings(settings: &CatalogSettings) -> CatalogResult<Self> {
        Self::new(settings.base_url.clone(), settings.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn product_url(&self, product_id: ProductId) -> String {
        format!("{}/products/{}", self.base_url, product_id)
    }

    fn stock_url(&self, product_id: ProductId) -> String {
        format!("{}/stock/{}", self.base_url, product_id)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        product_id: ProductId,
    ) -> CatalogResult<T> {
        debug!(%url, "Catalog request");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        check_status(resp.status(), product_id)?;

        resp.json()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))
    }
}

fn check_status(status: StatusCode, product_id: ProductId) -> CatalogResult<()> {
    if status == StatusCode::NOT_FOUND {
        return Err(CatalogError::NotFound(product_id));
    }
    if !status.is_success() {
        return Err(CatalogError::Transport(format!("HTTP {}", status.as_u16())));
    }
    Ok(())
}

#[async_trait]
impl ProductCatalogClient for HttpCatalog {
    async fn get_product(&self, product_id: ProductId) -> CatalogResult<ProductDetails> {
        self.get_json(self.product_url(product_id), product_id).await
    }

    async fn get_stock(&self, product_id: ProductId) -> CatalogResult<StockInfo> {
        self.get_json(self.stock_url(product_id), product_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let catalog = HttpCatalog::new("http://localhost:3333/", Duration::from_secs(5)).unwrap();
        assert_eq!(catalog.base_url(), "http://localhost:3333");
        assert_eq!(
            catalog.product_url(ProductId::new(7)),
            "http://localhost:3333/products/7"
        );
        assert_eq!(
            catalog.stock_url(ProductId::new(7)),
            "http://localhost:3333/stock/7"
        );
    }

    #[test]
    fn test_check_status() {
        let id = ProductId::new(2);
        assert!(check_status(StatusCode::OK, id).is_ok());
        assert!(matches!(
            check_status(StatusCode::NOT_FOUND, id),
            Err(CatalogError::NotFound(p)) if p == id
        ));
        assert!(matches!(
            check_status(StatusCode::INTERNAL_SERVER_ERROR, id),
            Err(CatalogError::Transport(msg)) if msg == "HTTP 500"
        ));
    }

    #[test]
    fn test_from_settings() {
        let catalog = HttpCatalog::from_settings(&CatalogSettings::default()).unwrap();
        assert_eq!(catalog.base_url(), "http://localhost:3333");
    }

    #[test]
    fn test_response_bodies() {
        let product: ProductDetails = serde_json::from_str(
            r#"{"id":1,"title":"Tênis de Caminhada Leve Confortável","price":179.9,"image":"https://cdn/1.jpg"}"#,
        )
        .unwrap();
        assert_eq!(product.id, Some(ProductId::new(1)));
        assert_eq!(product.display.title(), Some("Tênis de Caminhada Leve Confortável"));

        let stock: StockInfo = serde_json::from_str(r#"{"id":1,"amount":3}"#).unwrap();
        assert_eq!(stock, StockInfo::new(ProductId::new(1), 3));
    }
}
