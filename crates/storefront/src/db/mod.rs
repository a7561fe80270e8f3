//! Persistence operations over the key-value store.
//!
//! # Records
//!
//! - `cart` - the current cart, see [`cart`]
//! - `orders` - the append-only order log, see [`orders`]
//! - `adminLoggedIn` - admin session flag, see [`settings`]
//!
//! Each record is written whole. Nothing here caches; callers hold the
//! in-memory copy.

pub mod cart;
pub mod orders;
pub mod settings;

use thiserror::Error;

use crate::storage::StorageError;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The storage backend failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
