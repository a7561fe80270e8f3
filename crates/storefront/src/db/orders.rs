//! Order log persistence.
//!
//! The log is append-only from the storefront's point of view; the only
//! other write is [`replace_orders`], used to roll back a checkout whose
//! cart write failed.

use super::RepositoryError;
use crate::models::Order;
use crate::storage::{KeyValueStore, keys, load_collection, read_collection, save_collection};

/// All recorded orders, oldest first.
///
/// # Errors
///
/// Returns `RepositoryError::Storage` if the backend cannot be read.
pub fn list_orders<S>(store: &S) -> Result<Vec<Order>, RepositoryError>
where
    S: KeyValueStore + ?Sized,
{
    Ok(load_collection(store, keys::ORDERS)?)
}

/// Append `order` and persist the log. Returns the log as it was before.
///
/// A stored log that does not parse is left alone rather than overwritten.
///
/// # Errors
///
/// Returns `RepositoryError::Storage` if reading or writing fails, including
/// `StorageError::Malformed` for an unreadable log; the stored log is
/// unchanged in that case.
pub fn append_order<S>(store: &mut S, order: Order) -> Result<Vec<Order>, RepositoryError>
where
    S: KeyValueStore + ?Sized,
{
    let previous: Vec<Order> = read_collection(&*store, keys::ORDERS)?;
    let mut orders = previous.clone();
    orders.push(order);
    save_collection(store, keys::ORDERS, &orders)?;
    Ok(previous)
}

/// Overwrite the whole log.
///
/// # Errors
///
/// Returns `RepositoryError::Storage` if the write fails.
pub fn replace_orders<S>(store: &mut S, orders: &[Order]) -> Result<(), RepositoryError>
where
    S: KeyValueStore + ?Sized,
{
    save_collection(store, keys::ORDERS, orders)?;
    Ok(())
}
