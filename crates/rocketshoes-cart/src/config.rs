//! # Cart Configuration
//!
//! Where the cart lives, which catalog it talks to, and what the user is told
//! when something goes wrong.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ROCKETSHOES_API_URL=http://localhost:3333                          │
//! │     ROCKETSHOES_DATA_DIR=/var/lib/rocketshoes                          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/rocketshoes/cart.toml (Linux)                            │
//! │     ~/Library/Application Support/com.rocketshoes.cart/cart.toml       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # cart.toml
//! [storage]
//! key = "@RocketShoes:cart"
//! dir = "/home/me/.local/share/rocketshoes"
//!
//! [catalog]
//! base_url = "http://localhost:3333"
//! timeout_secs = 10
//!
//! [messages]
//! out_of_stock = "Quantidade solicitada fora de estoque"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use rocketshoes_core::{validation::validate_storage_key, CART_STORAGE_KEY};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::store::StoreOptions;

// =============================================================================
// Messages
// =============================================================================

/// User-facing failure messages, one per outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub add_failed: String,
    pub remove_failed: String,
    pub update_failed: String,
    pub out_of_stock: String,
}

impl Default for Messages {
    fn default() -> Self {
        Messages {
            add_failed: "Erro na adição do produto".to_string(),
            remove_failed: "Erro na remoção do produto".to_string(),
            update_failed: "Erro na alteração de quantidade do produto".to_string(),
            out_of_stock: "Quantidade solicitada fora de estoque".to_string(),
        }
    }
}

// =============================================================================
// Storage Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Key the cart is stored under.
    #[serde(default = "default_storage_key")]
    pub key: String,

    /// Directory for file storage. Falls back to the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

fn default_storage_key() -> String {
    CART_STORAGE_KEY.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            key: default_storage_key(),
            dir: None,
        }
    }
}

// =============================================================================
// Catalog Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Root of the product API (`/products/{id}`, `/stock/{id}`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CatalogSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// =============================================================================
// Cart Config
// =============================================================================

/// Complete configuration for a cart deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub messages: Messages,
}

impl CartConfig {
    /// Loads configuration from file, then environment, then validates.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading cart config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Like `load`, but falls back to defaults on any failure.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load cart config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Writes the configuration as TOML, creating parent directories.
    pub fn save(&self, path: &std::path::Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        info!(?path, "Cart config saved");
        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        validate_storage_key(&self.storage.key)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        let url = &self.catalog.base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "Catalog URL must start with http:// or https://, got: {}",
                url
            )));
        }

        if self.catalog.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Directory for file storage: the configured one, else the platform
    /// data directory.
    pub fn data_dir(&self) -> ConfigResult<PathBuf> {
        if let Some(dir) = &self.storage.dir {
            return Ok(dir.clone());
        }
        directories::ProjectDirs::from("com", "rocketshoes", "cart")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(ConfigError::NoConfigPath)
    }

    /// Options for opening a `CartStore` with this configuration.
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            storage_key: self.storage.key.clone(),
            messages: self.messages.clone(),
        }
    }

    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "rocketshoes", "cart")
            .map(|dirs| dirs.config_dir().join("cart.toml"))
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("ROCKETSHOES_CART_KEY") {
            debug!(key = %key, "Overriding storage key from environment");
            self.storage.key = key;
        }

        if let Some(dir) = lookup("ROCKETSHOES_DATA_DIR") {
            debug!(dir = %dir, "Overriding data dir from environment");
            self.storage.dir = Some(PathBuf::from(dir));
        }

        if let Some(url) = lookup("ROCKETSHOES_API_URL") {
            debug!(url = %url, "Overriding catalog URL from environment");
            self.catalog.base_url = url;
        }

        if let Some(timeout) = lookup("ROCKETSHOES_API_TIMEOUT") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.catalog.timeout_secs = secs,
                Err(_) => warn!(timeout = %timeout, "Ignoring unparseable catalog timeout"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = CartConfig::default();
        assert_eq!(config.storage.key, "@RocketShoes:cart");
        assert_eq!(config.catalog.base_url, "http://localhost:3333");
        assert_eq!(config.catalog.timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = CartConfig::default();

        config.storage.key = "  ".to_string();
        assert!(config.validate().is_err());

        config.storage.key = "cart".to_string();
        config.catalog.base_url = "ftp://catalog".to_string();
        assert!(config.validate().is_err());

        config.catalog.base_url = "https://api.rocketshoes.dev".to_string();
        assert!(config.validate().is_ok());

        config.catalog.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config: CartConfig = toml::from_str(
            r#"
            [catalog]
            base_url = "http://10.0.0.5:3333"

            [messages]
            out_of_stock = "Out of stock"
            "#,
        )
        .unwrap();

        assert_eq!(config.catalog.base_url, "http://10.0.0.5:3333");
        assert_eq!(config.catalog.timeout_secs, 10);
        assert_eq!(config.storage.key, "@RocketShoes:cart");
        assert_eq!(config.messages.out_of_stock, "Out of stock");
        assert_eq!(config.messages.add_failed, "Erro na adição do produto");
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("ROCKETSHOES_CART_KEY", "@Test:cart"),
            ("ROCKETSHOES_DATA_DIR", "/tmp/rocketshoes"),
            ("ROCKETSHOES_API_URL", "http://catalog:3333"),
            ("ROCKETSHOES_API_TIMEOUT", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = CartConfig::default();
        config.apply_overrides(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.storage.key, "@Test:cart");
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/rocketshoes"));
        assert_eq!(config.catalog.base_url, "http://catalog:3333");
        assert_eq!(config.catalog.timeout_secs, 10);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.toml");

        let mut config = CartConfig::default();
        config.catalog.timeout_secs = 3;
        config.save(&path).unwrap();

        let loaded = CartConfig::load(Some(path)).unwrap();
        assert_eq!(loaded.catalog.timeout_secs, 3);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.toml");
        std::fs::write(&path, "[catalog]\ntimeout_secs = 0\n").unwrap();

        assert!(matches!(
            CartConfig::load(Some(path.clone())),
            Err(ConfigError::Invalid(_))
        ));
        assert_eq!(CartConfig::load_or_default(Some(path)).catalog.timeout_secs, 10);
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&CartConfig::default()).unwrap();
        assert!(toml_str.contains("[storage]"));
        assert!(toml_str.contains("[catalog]"));
        assert!(toml_str.contains("[messages]"));
    }
}
