//! Admin dashboard and login form.

use askama::Template;
use tracing::instrument;

use super::orders::OrderView;
use crate::error::Result;
use crate::models::Order;
use crate::services::admin::OrderStats;

/// Summary figures for the dashboard header.
#[derive(Clone)]
pub struct StatsView {
    pub total_orders: usize,
    pub total_products: u64,
    pub total_revenue: String,
}

impl From<OrderStats> for StatsView {
    fn from(stats: OrderStats) -> Self {
        Self {
            total_orders: stats.total_orders,
            total_products: stats.total_products,
            total_revenue: stats.total_revenue.grouped(),
        }
    }
}

/// Admin dashboard template.
#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct AdminDashboardTemplate {
    pub stats: StatsView,
    pub orders: Vec<OrderView>,
}

/// Admin login template.
#[derive(Template)]
#[template(path = "admin/login.html")]
pub struct AdminLoginTemplate {
    /// Empty when there is nothing to report.
    pub error: String,
}

/// Render the dashboard over the full order log.
///
/// # Errors
///
/// Returns `AppError::Render` if the template fails.
#[instrument(skip_all, fields(orders = orders.len()))]
pub fn render_dashboard(orders: &[Order]) -> Result<String> {
    Ok(AdminDashboardTemplate {
        stats: OrderStats::from_orders(orders).into(),
        orders: orders.iter().map(OrderView::from).collect(),
    }
    .render()?)
}

/// Render the login form, optionally with an error message.
///
/// # Errors
///
/// Returns `AppError::Render` if the template fails.
pub fn render_login(error: Option<&str>) -> Result<String> {
    Ok(AdminLoginTemplate {
        error: error.unwrap_or_default().to_string(),
    }
    .render()?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bazaar_core::{OrderId, Price, ProductId};

    use super::*;
    use crate::models::CartItem;

    fn order(id: i64, price: i64, quantity: u32) -> Order {
        Order {
            id: OrderId::new(id),
            customer_name: "Ravi".to_string(),
            address: "Flat 4, MG Road".to_string(),
            payment_method: "UPI".to_string(),
            total: Price::new(price).times(quantity).to_string(),
            created_at: String::new(),
            items: vec![CartItem {
                id: ProductId::from("p1"),
                name: "Shoe".to_string(),
                price: Price::new(price),
                image: String::new(),
                quantity,
            }],
        }
    }

    #[test]
    fn test_dashboard_stats() {
        let html = render_dashboard(&[order(1, 500, 2), order(2, 100, 1)]).unwrap();
        assert!(html.contains(r#"<p id="totalOrders">2</p>"#));
        assert!(html.contains(r#"<p id="totalProducts">3</p>"#));
        assert!(html.contains(r#"<p id="totalRevenue">₹1,100</p>"#));
        assert!(html.contains("Shoe - ₹500 × 2"));
        // Admin cards omit the shipping address.
        assert!(!html.contains("MG Road"));
    }

    #[test]
    fn test_dashboard_without_orders() {
        let html = render_dashboard(&[]).unwrap();
        assert!(html.contains("No orders available."));
        assert!(html.contains(r#"<p id="totalRevenue">₹0</p>"#));
    }

    #[test]
    fn test_login_error() {
        let html = render_login(Some("Invalid username or password!")).unwrap();
        assert!(html.contains("Invalid username or password!"));
        let html = render_login(None).unwrap();
        assert!(html.contains(r#"<p id="loginError"></p>"#));
    }
}
