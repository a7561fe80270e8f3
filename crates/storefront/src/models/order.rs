//! Placed orders.

use serde::{Deserialize, Serialize};

use bazaar_core::{OrderId, Price};

use super::cart::CartItem;
use super::null_as_default;

/// An order recorded at checkout.
///
/// `items` is an owned copy of the cart taken when the order was placed, so
/// later cart changes never reach it. Orders are appended to the order log
/// and never edited afterwards.
///
/// Serialized camelCase; the short field names written by earlier versions
/// (`name`, `payment`, `date`) are accepted on read, and `null` in any text
/// field or in `items` reads as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Creation time in milliseconds since the epoch.
    pub id: OrderId,
    #[serde(default, alias = "name", deserialize_with = "null_as_default")]
    pub customer_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default, alias = "payment", deserialize_with = "null_as_default")]
    pub payment_method: String,
    /// Display-formatted total, e.g. `₹500`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: String,
    /// Local time of placement, display-formatted.
    #[serde(default, alias = "date", deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<CartItem>,
}

impl Order {
    /// Σ price × quantity over the order's items.
    ///
    /// Recomputed from the snapshot; `total` is only the text shown at
    /// checkout time.
    #[must_use]
    pub fn items_total(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Σ quantity over the order's items.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}
