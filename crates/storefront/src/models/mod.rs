//! Domain models for the storefront.
//!
//! - [`cart`] - cart lines and the insertion-ordered cart
//! - [`order`] - immutable order records
//! - [`catalog`] - static product catalog

pub mod cart;
pub mod catalog;
pub mod order;

pub use cart::{Cart, CartItem};
pub use catalog::{Catalog, CatalogEntry, CatalogError};
pub use order::Order;

use serde::{Deserialize, Deserializer};

/// Read a JSON `null` as the field type's default.
///
/// Stored records written by the browser script carry `null` wherever a
/// value was missing (an absent data attribute, a `NaN` price).
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
