//! CLI command implementations.
//!
//! - [`shop`] - products, cart, checkout and order history
//! - [`admin`] - admin login and dashboard

pub mod admin;
pub mod shop;

use thiserror::Error;

use bazaar_storefront::config::ConfigError;
use bazaar_storefront::models::{Catalog, CatalogError};
use bazaar_storefront::storage::{FileStore, StorageError};
use bazaar_storefront::{AppError, AppState, Notice, Reply, StorefrontConfig};

/// Catalog used when `BAZAAR_CATALOG_PATH` is not set.
const DEFAULT_CATALOG: &str = include_str!("../../catalog.json");

/// Errors that can occur while running a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Storage file could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// A storefront command failed.
    #[error("{0}")]
    App(#[from] AppError),

    /// The command was refused; the message has already been shown.
    #[error("{0}")]
    Refused(String),
}

/// Load configuration, open the storage file and build the storefront.
///
/// # Errors
///
/// Returns `CliError` if configuration, storage or catalog loading fails.
pub fn open_state() -> Result<AppState<FileStore>, CliError> {
    let config = StorefrontConfig::from_env()?;
    let store = FileStore::open(&config.data_path)?;
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(path)?,
        None => Catalog::from_json(DEFAULT_CATALOG)?,
    };
    tracing::debug!(
        data_path = %store.path().display(),
        products = catalog.len(),
        "Storefront ready"
    );

    let mut app = AppState::new(config, catalog, store)?;
    app.cart_mut().subscribe(|cart| {
        tracing::info!(
            lines = cart.len(),
            items = cart.item_count(),
            total = %cart.total(),
            "Cart updated"
        );
    });
    Ok(app)
}

/// Print a reply's fragment to stdout and its notice to stderr.
///
/// # Errors
///
/// Returns `CliError::Refused` if the reply carries an error notice, so the
/// process exits non-zero.
#[allow(clippy::print_stdout, clippy::print_stderr)]
pub fn emit(reply: Reply) -> Result<(), CliError> {
    if let Some(html) = &reply.html {
        println!("{html}");
    }
    match reply.notice {
        Some(Notice::Info(message)) => {
            eprintln!("{message}");
            Ok(())
        }
        Some(Notice::Error(message)) => Err(CliError::Refused(message)),
        None => Ok(()),
    }
}
