//! Cart persistence.

use super::RepositoryError;
use crate::models::{Cart, CartItem};
use crate::storage::{KeyValueStore, keys, load_collection, save_collection};

/// Load the stored cart.
///
/// Absent or malformed data yields an empty cart.
///
/// # Errors
///
/// Returns `RepositoryError::Storage` if the backend cannot be read.
pub fn load_cart<S>(store: &S) -> Result<Cart, RepositoryError>
where
    S: KeyValueStore + ?Sized,
{
    let items: Vec<CartItem> = load_collection(store, keys::CART)?;
    Ok(Cart::from_items(items))
}

/// Persist the whole cart.
///
/// # Errors
///
/// Returns `RepositoryError::Storage` if the write fails.
pub fn save_cart<S>(store: &mut S, cart: &Cart) -> Result<(), RepositoryError>
where
    S: KeyValueStore + ?Sized,
{
    save_collection(store, keys::CART, cart.items())?;
    Ok(())
}
