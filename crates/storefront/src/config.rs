//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `BAZAAR_DATA_PATH` - Storage file (default: `.bazaar/storage.json`)
//! - `BAZAAR_CATALOG_PATH` - Catalog JSON file (default: built-in catalog)
//! - `BAZAAR_MAX_PRICE` - Price filter ceiling used when the slider is unset (default: 3000)
//! - `BAZAAR_ADMIN_USERNAME` - Admin login name (default: admin)
//! - `BAZAAR_ADMIN_PASSWORD` - Admin login password (default: 12345)

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use bazaar_core::Price;

const DEFAULT_DATA_PATH: &str = ".bazaar/storage.json";
const DEFAULT_MAX_PRICE: i64 = 3000;
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "12345";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// File backing the key-value store
    pub data_path: PathBuf,
    /// Catalog file; `None` uses the embedder's built-in catalog
    pub catalog_path: Option<PathBuf>,
    /// Ceiling applied when the price control is missing or unreadable
    pub max_price: Price,
    /// Admin dashboard credentials
    pub admin: AdminCredentials,
}

/// Fixed admin credentials.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: SecretString,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl AdminCredentials {
    /// Whether the supplied pair matches. Both sides are compared exactly.
    #[must_use]
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password.expose_secret() == password
    }
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            password: SecretString::from(DEFAULT_ADMIN_PASSWORD),
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            catalog_path: None,
            max_price: Price::new(DEFAULT_MAX_PRICE),
            admin: AdminCredentials::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_path = lookup("BAZAAR_DATA_PATH").map_or(defaults.data_path, PathBuf::from);
        let catalog_path = lookup("BAZAAR_CATALOG_PATH").map(PathBuf::from);
        let max_price = match lookup("BAZAAR_MAX_PRICE") {
            Some(raw) => raw.trim().parse::<i64>().map(Price::new).map_err(|e| {
                ConfigError::InvalidEnvVar("BAZAAR_MAX_PRICE".to_string(), e.to_string())
            })?,
            None => defaults.max_price,
        };
        let admin = AdminCredentials {
            username: lookup("BAZAAR_ADMIN_USERNAME").unwrap_or(defaults.admin.username),
            password: lookup("BAZAAR_ADMIN_PASSWORD")
                .map_or(defaults.admin.password, SecretString::from),
        };

        Ok(Self {
            data_path,
            catalog_path,
            max_price,
            admin,
        })
    }
}
