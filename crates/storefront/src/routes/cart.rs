//! Cart rendering.
//!
//! The listing is regenerated from the cart on every call, in insertion
//! order, with the total recomputed from scratch.

use askama::Template;
use tracing::instrument;

use crate::error::Result;
use crate::models::{Cart, CartItem};

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub index: usize,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .enumerate()
                .map(|(index, item)| CartItemView::new(index, item))
                .collect(),
            total: cart.total().to_string(),
            item_count: cart.item_count(),
        }
    }
}

impl CartItemView {
    fn new(index: usize, item: &CartItem) -> Self {
        Self {
            id: item.id.to_string(),
            index,
            name: item.name.clone(),
            image: item.image.clone(),
            quantity: item.quantity,
            price: item.price.to_string(),
            line_price: item.line_total().to_string(),
        }
    }
}

/// Cart items fragment template.
#[derive(Template)]
#[template(path = "cart/items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Render the cart listing.
///
/// # Errors
///
/// Returns `AppError::Render` if the template fails.
#[instrument(skip_all, fields(lines = cart.len()))]
pub fn render(cart: &Cart) -> Result<String> {
    Ok(CartItemsTemplate {
        cart: CartView::from(cart),
    }
    .render()?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bazaar_core::{Price, ProductId};

    use super::*;

    fn item(id: &str, name: &str, price: i64) -> CartItem {
        CartItem {
            id: ProductId::from(id),
            name: name.to_string(),
            price: Price::new(price),
            image: format!("/img/{id}.png"),
            quantity: 1,
        }
    }

    #[test]
    fn test_empty_cart_shows_placeholder() {
        let html = render(&Cart::new()).unwrap();
        assert!(html.contains("Your cart is empty."));
        assert!(html.contains("₹0"));
        assert_eq!(CartView::from(&Cart::new()).total, "₹0");
    }

    #[test]
    fn test_lines_and_total() {
        let mut cart = Cart::new();
        cart.add(item("p1", "Shoe", 500));
        cart.add(item("p1", "Shoe", 500));
        cart.add(item("p2", "Hat", 300));

        let view = CartView::from(&cart);
        assert_eq!(view.total, "₹1300");
        assert_eq!(view.item_count, 3);
        assert_eq!(view.items[0].line_price, "₹1000");

        let html = render(&cart).unwrap();
        assert!(html.contains("₹500 × 2"));
        assert!(html.contains("₹300 × 1"));
        assert!(html.contains("₹1300"));
        assert!(!html.contains("Your cart is empty."));
        let shoe = html.find("Shoe").unwrap();
        let hat = html.find("Hat").unwrap();
        assert!(shoe < hat);
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut cart = Cart::new();
        cart.add(item("p1", "Shoe", 500));
        assert_eq!(render(&cart).unwrap(), render(&cart).unwrap());
    }

    #[test]
    fn test_names_are_escaped() {
        let mut cart = Cart::new();
        cart.add(item("p1", "<script>alert(1)</script>", 1));
        let html = render(&cart).unwrap();
        assert!(!html.contains("<script>"));
    }
}
