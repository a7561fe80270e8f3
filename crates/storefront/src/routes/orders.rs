//! Customer order history.

use askama::Template;
use tracing::instrument;

use crate::error::Result;
use crate::models::{CartItem, Order};

/// Order line display data for templates.
#[derive(Clone)]
pub struct OrderLineView {
    pub name: String,
    pub price: String,
    pub quantity: u32,
}

/// Order display data for templates.
#[derive(Clone)]
pub struct OrderView {
    pub id: String,
    pub customer_name: String,
    pub address: String,
    pub payment_method: String,
    pub total: String,
    pub created_at: String,
    pub items: Vec<OrderLineView>,
}

impl From<&CartItem> for OrderLineView {
    fn from(item: &CartItem) -> Self {
        Self {
            name: item.name.clone(),
            price: item.price.to_string(),
            quantity: item.quantity,
        }
    }
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            customer_name: order.customer_name.clone(),
            address: order.address.clone(),
            payment_method: order.payment_method.clone(),
            total: order.total.clone(),
            created_at: order.created_at.clone(),
            items: order.items.iter().map(OrderLineView::from).collect(),
        }
    }
}

/// Order history template.
#[derive(Template)]
#[template(path = "orders/list.html")]
pub struct OrdersListTemplate {
    pub orders: Vec<OrderView>,
}

/// Render every order, oldest first.
///
/// # Errors
///
/// Returns `AppError::Render` if the template fails.
#[instrument(skip_all, fields(orders = orders.len()))]
pub fn render(orders: &[Order]) -> Result<String> {
    Ok(OrdersListTemplate {
        orders: orders.iter().map(OrderView::from).collect(),
    }
    .render()?)
}
