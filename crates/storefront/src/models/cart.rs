//! Cart lines and the cart itself.

use serde::{Deserialize, Serialize};

use bazaar_core::{Price, ProductId};

use super::null_as_default;

const fn default_quantity() -> u32 {
    1
}

/// A single cart line.
///
/// Serialized camelCase. Older stored carts name the image field `img`,
/// which is still accepted on read, and may hold `null` for the name,
/// price or image; those read as empty, zero and empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product identity; at most one line per id.
    pub id: ProductId,
    /// Product name shown in the cart.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Unit price.
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: Price,
    /// Image URL.
    #[serde(default, alias = "img", deserialize_with = "null_as_default")]
    pub image: String,
    /// Number of units, always at least 1 in a live cart.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl CartItem {
    /// Price of this line (`price × quantity`).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// The user's in-progress selection, in insertion order.
///
/// Invariants: one line per product id, and every line has `quantity >= 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from stored lines, restoring the invariants.
    ///
    /// Lines sharing an id are merged into the first occurrence and
    /// zero-quantity lines are dropped.
    #[must_use]
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.quantity == 0 {
                continue;
            }
            match cart.items.iter_mut().find(|line| line.id == item.id) {
                Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Add one unit of `item`.
    ///
    /// An existing line with the same id has its quantity incremented;
    /// otherwise the item is appended with quantity 1. Returns the line's new
    /// quantity.
    pub fn add(&mut self, mut item: CartItem) -> u32 {
        if let Some(line) = self.items.iter_mut().find(|line| line.id == item.id) {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }
        item.quantity = 1;
        self.items.push(item);
        1
    }

    /// Remove the line for `id`, if present.
    pub fn remove_by_id(&mut self, id: &ProductId) -> Option<CartItem> {
        let index = self.items.iter().position(|line| &line.id == id)?;
        Some(self.items.remove(index))
    }

    /// Remove the line at `index`. Out-of-range indices are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<CartItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Σ price × quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Σ quantity over all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
