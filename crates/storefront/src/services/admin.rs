//! Admin login and order reporting.
//!
//! The login is a plain comparison against configured constants and the
//! session is a flag in storage. It keeps casual visitors off the dashboard
//! and nothing more.

use bazaar_core::Price;

use crate::config::AdminCredentials;
use crate::db;
use crate::error::{AppError, Result};
use crate::models::Order;
use crate::storage::KeyValueStore;

/// Admin login against fixed credentials.
#[derive(Debug, Clone)]
pub struct AdminAuth {
    credentials: AdminCredentials,
}

impl AdminAuth {
    #[must_use]
    pub const fn new(credentials: AdminCredentials) -> Self {
        Self { credentials }
    }

    /// Check the trimmed credentials and start an admin session.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidCredentials` on mismatch, with no session
    /// flag written, or `AppError::Repository` if the flag cannot be stored.
    pub fn login<S>(&self, store: &mut S, username: &str, password: &str) -> Result<()>
    where
        S: KeyValueStore + ?Sized,
    {
        if !self.credentials.matches(username.trim(), password.trim()) {
            tracing::warn!(username = username.trim(), "Admin login rejected");
            return Err(AppError::InvalidCredentials);
        }
        db::settings::set_admin_logged_in(store)?;
        tracing::info!("Admin logged in");
        Ok(())
    }

    /// End the admin session.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if the flag cannot be removed.
    pub fn logout<S>(&self, store: &mut S) -> Result<()>
    where
        S: KeyValueStore + ?Sized,
    {
        db::settings::clear_admin_logged_in(store)?;
        tracing::info!("Admin logged out");
        Ok(())
    }

    /// Whether an admin session is active.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if the flag cannot be read.
    pub fn is_logged_in<S>(&self, store: &S) -> Result<bool>
    where
        S: KeyValueStore + ?Sized,
    {
        Ok(db::settings::is_admin_logged_in(store)?)
    }
}

/// Aggregates over the order log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderStats {
    pub total_orders: usize,
    /// Σ quantity over every item of every order.
    pub total_products: u64,
    /// Σ price × quantity over every item of every order.
    pub total_revenue: Price,
}

impl OrderStats {
    #[must_use]
    pub fn from_orders(orders: &[Order]) -> Self {
        Self {
            total_orders: orders.len(),
            total_products: orders.iter().map(Order::item_count).sum(),
            total_revenue: orders.iter().map(Order::items_total).sum(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use bazaar_core::{OrderId, ProductId};

    use super::*;
    use crate::models::CartItem;
    use crate::storage::{MemoryStore, keys};

    fn order(id: i64, lines: &[(i64, u32)]) -> Order {
        Order {
            id: OrderId::new(id),
            customer_name: "Asha".to_string(),
            address: "12 Lane".to_string(),
            payment_method: "COD".to_string(),
            total: String::new(),
            created_at: String::new(),
            items: lines
                .iter()
                .enumerate()
                .map(|(i, &(price, quantity))| CartItem {
                    id: ProductId::new(format!("p{i}")),
                    name: format!("Item {i}"),
                    price: Price::new(price),
                    image: String::new(),
                    quantity,
                })
                .collect(),
        }
    }

    #[test]
    fn test_stats() {
        let orders = vec![order(1, &[(500, 2)]), order(2, &[(100, 1)])];
        let stats = OrderStats::from_orders(&orders);
        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.total_products, 3);
        assert_eq!(stats.total_revenue, Price::new(1_100));
    }

    #[test]
    fn test_stats_empty() {
        assert_eq!(OrderStats::from_orders(&[]), OrderStats::default());
    }

    #[test]
    fn test_login_trims_and_sets_flag() {
        let auth = AdminAuth::new(AdminCredentials::default());
        let mut store = MemoryStore::new();
        auth.login(&mut store, " admin ", "12345\n").unwrap();
        assert!(auth.is_logged_in(&store).unwrap());
        auth.logout(&mut store).unwrap();
        assert!(!auth.is_logged_in(&store).unwrap());
    }

    #[test]
    fn test_bad_login_sets_nothing() {
        let auth = AdminAuth::new(AdminCredentials {
            username: "owner".to_string(),
            password: SecretString::from("s3cret"),
        });
        let mut store = MemoryStore::new();
        let err = auth.login(&mut store, "owner", "wrong").unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
        assert_eq!(store.get(keys::ADMIN_LOGGED_IN).unwrap(), None);
    }
}
