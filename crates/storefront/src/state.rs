//! Application state and command dispatch.
//!
//! [`AppState`] owns the storage backend, the catalog, the cart store and
//! the checkout flow. Every user action arrives as a [`Command`] and runs to
//! completion before the next one; the result is a [`Reply`] carrying an
//! optional notice and an optional rendered fragment.

use tracing::instrument;

use bazaar_core::ProductId;

use crate::config::StorefrontConfig;
use crate::db;
use crate::error::{AppError, Result};
use crate::models::{Catalog, Order};
use crate::routes;
use crate::services::admin::AdminAuth;
use crate::services::cart::CartStore;
use crate::services::checkout::{CheckoutFlow, CheckoutForm, CheckoutState, Clock, SystemClock};
use crate::services::filter::{FilterControls, FilterCriteria};
use crate::services::theme::Theme;
use crate::storage::KeyValueStore;

/// A user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search, category or price control changed.
    Filter(FilterControls),
    /// "Add to Cart" on a product card.
    AddToCart(ProductId),
    /// "Remove" on a cart line, by product id.
    RemoveFromCart(ProductId),
    /// "Remove" on a cart line, by displayed position.
    RemoveAt(usize),
    ViewCart,
    OpenCheckout,
    CancelCheckout,
    SubmitCheckout(CheckoutForm),
    ViewOrders,
    AdminLogin { username: String, password: String },
    AdminLogout,
    ViewAdmin,
    ToggleTheme,
}

/// Message surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Info(msg) | Self::Error(msg) => msg,
        }
    }
}

/// Outcome of a command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub notice: Option<Notice>,
    pub html: Option<String>,
}

impl Reply {
    #[must_use]
    pub const fn html(html: String) -> Self {
        Self {
            notice: None,
            html: Some(html),
        }
    }

    #[must_use]
    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }

    #[must_use]
    pub fn error(message: String) -> Self {
        Self {
            notice: Some(Notice::Error(message)),
            html: None,
        }
    }

    /// Whether the command was refused.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.notice, Some(Notice::Error(_)))
    }
}

/// Storefront state for one browser session.
pub struct AppState<S> {
    config: StorefrontConfig,
    catalog: Catalog,
    store: S,
    cart: CartStore,
    checkout: CheckoutFlow,
    admin: AdminAuth,
    theme: Theme,
    clock: Box<dyn Clock>,
}

impl<S: KeyValueStore> AppState<S> {
    /// Create a new application state, loading the stored cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if the store cannot be read.
    pub fn new(config: StorefrontConfig, catalog: Catalog, store: S) -> Result<Self> {
        let cart = CartStore::load(&store)?;
        let admin = AdminAuth::new(config.admin.clone());
        Ok(Self {
            config,
            catalog,
            store,
            cart,
            checkout: CheckoutFlow::new(),
            admin,
            theme: Theme::default(),
            clock: Box::new(SystemClock),
        })
    }

    /// Replace the time source used for order ids and timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consume the state, returning the storage backend.
    pub fn into_store(self) -> S {
        self.store
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Mutable cart store, for registering subscribers.
    pub const fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    #[must_use]
    pub const fn checkout_state(&self) -> CheckoutState {
        self.checkout.state()
    }

    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// The order log as stored.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Repository` if the store cannot be read.
    pub fn orders(&self) -> Result<Vec<Order>> {
        Ok(db::orders::list_orders(&self.store)?)
    }

    /// Run one command.
    ///
    /// User errors (empty cart at checkout, blank form fields, wrong admin
    /// credentials, unknown product) come back as an error notice with no
    /// state change.
    ///
    /// # Errors
    ///
    /// Returns `AppError` only for storage or rendering failures.
    #[instrument(skip_all)]
    pub fn dispatch(&mut self, command: Command) -> Result<Reply> {
        match self.handle(command) {
            Ok(reply) => Ok(reply),
            Err(e) if e.is_user_facing() => {
                tracing::info!(error = %e, "Command refused");
                Ok(Reply::error(e.user_message()))
            }
            Err(e) => {
                tracing::error!(error = %e, "Command failed");
                Err(e)
            }
        }
    }

    fn handle(&mut self, command: Command) -> Result<Reply> {
        match command {
            Command::Filter(controls) => {
                let criteria = FilterCriteria::from_controls(&controls, self.config.max_price);
                Ok(Reply::html(routes::products::render(&self.catalog, &criteria)?))
            }
            Command::AddToCart(id) => {
                let entry = self
                    .catalog
                    .get(&id)
                    .ok_or_else(|| AppError::ProductNotFound(id.clone()))?;
                let item = entry.to_cart_item();
                let name = item.name.clone();
                self.cart.add(&mut self.store, item)?;
                Ok(self
                    .render_cart()?
                    .with_notice(Notice::Info(format!("{name} added to cart!"))))
            }
            Command::RemoveFromCart(id) => {
                self.cart.remove(&mut self.store, &id)?;
                self.render_cart()
            }
            Command::RemoveAt(index) => {
                self.cart.remove_at(&mut self.store, index)?;
                self.render_cart()
            }
            Command::ViewCart => self.render_cart(),
            Command::OpenCheckout => {
                self.checkout.open(&self.cart)?;
                Ok(Reply::default())
            }
            Command::CancelCheckout => {
                self.checkout.cancel();
                Ok(Reply::default())
            }
            Command::SubmitCheckout(form) => {
                let order = self.checkout.submit(
                    &form,
                    &mut self.cart,
                    &mut self.store,
                    self.clock.as_ref(),
                )?;
                Ok(self.render_cart()?.with_notice(Notice::Info(format!(
                    "🎉 Thank you, {}! Your order has been placed successfully.\n\nYou can view it in \"Your Orders\".",
                    order.customer_name
                ))))
            }
            Command::ViewOrders => Ok(Reply::html(routes::orders::render(&self.orders()?)?)),
            Command::AdminLogin { username, password } => {
                match self.admin.login(&mut self.store, &username, &password) {
                    Ok(()) => self.render_admin(),
                    Err(AppError::InvalidCredentials) => {
                        let message = AppError::InvalidCredentials.user_message();
                        Ok(Reply::html(routes::admin::render_login(Some(&message))?)
                            .with_notice(Notice::Error(message)))
                    }
                    Err(e) => Err(e),
                }
            }
            Command::AdminLogout => {
                self.admin.logout(&mut self.store)?;
                Ok(Reply::html(routes::admin::render_login(None)?))
            }
            Command::ViewAdmin => self.render_admin(),
            Command::ToggleTheme => {
                let theme = self.theme.toggle();
                tracing::debug!(?theme, "Theme toggled");
                Ok(Reply::default().with_notice(Notice::Info(theme.button_label().to_string())))
            }
        }
    }

    fn render_cart(&self) -> Result<Reply> {
        Ok(Reply::html(routes::cart::render(self.cart.cart())?))
    }

    fn render_admin(&self) -> Result<Reply> {
        if self.admin.is_logged_in(&self.store)? {
            Ok(Reply::html(routes::admin::render_dashboard(&self.orders()?)?))
        } else {
            Ok(Reply::html(routes::admin::render_login(None)?))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};

    use bazaar_core::PaymentMethod;

    use super::*;
    use crate::services::checkout::FixedClock;
    use crate::storage::{MemoryStore, keys};

    fn state() -> AppState<MemoryStore> {
        let catalog = Catalog::from_json(
            r#"[
                {"id":"p1","title":"Shoe","price":500,"category":"footwear"},
                {"id":"p2","title":"Hat","price":300,"category":"accessory"}
            ]"#,
        )
        .unwrap();
        AppState::new(StorefrontConfig::default(), catalog, MemoryStore::new())
            .unwrap()
            .with_clock(FixedClock(Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()))
    }

    fn checkout_form(name: &str) -> CheckoutForm {
        CheckoutForm {
            name: name.to_string(),
            address: "12 Lane".to_string(),
            payment_method: PaymentMethod::CashOnDelivery,
        }
    }

    #[test]
    fn test_add_to_cart_notice() {
        let mut app = state();
        let reply = app.dispatch(Command::AddToCart(ProductId::from("p1"))).unwrap();
        assert_eq!(reply.notice, Some(Notice::Info("Shoe added to cart!".to_string())));
        assert!(reply.html.unwrap().contains("₹500"));
    }

    #[test]
    fn test_unknown_product_is_refused() {
        let mut app = state();
        let reply = app.dispatch(Command::AddToCart(ProductId::from("p9"))).unwrap();
        assert!(reply.is_error());
        assert!(app.cart().cart().is_empty());
    }

    #[test]
    fn test_open_checkout_on_empty_cart() {
        let mut app = state();
        let reply = app.dispatch(Command::OpenCheckout).unwrap();
        assert_eq!(
            reply.notice.unwrap().message(),
            "Your cart is empty! Add some products first."
        );
        assert_eq!(app.checkout_state(), CheckoutState::Idle);
        assert_eq!(app.store().get(keys::CART).unwrap(), None);
        assert_eq!(app.store().get(keys::ORDERS).unwrap(), None);
    }

    #[test]
    fn test_full_checkout() {
        let mut app = state();
        app.dispatch(Command::AddToCart(ProductId::from("p1"))).unwrap();
        app.dispatch(Command::OpenCheckout).unwrap();
        assert_eq!(app.checkout_state(), CheckoutState::FormOpen);

        let reply = app
            .dispatch(Command::SubmitCheckout(checkout_form("Asha")))
            .unwrap();
        assert!(reply.notice.unwrap().message().starts_with("🎉 Thank you, Asha!"));
        assert!(reply.html.unwrap().contains("Your cart is empty."));

        let orders = app.orders().unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].total, "₹500");
        assert!(app.cart().cart().is_empty());
    }

    #[test]
    fn test_invalid_form_keeps_form_open() {
        let mut app = state();
        app.dispatch(Command::AddToCart(ProductId::from("p1"))).unwrap();
        app.dispatch(Command::OpenCheckout).unwrap();
        let reply = app
            .dispatch(Command::SubmitCheckout(checkout_form("  ")))
            .unwrap();
        assert!(reply.is_error());
        assert_eq!(app.checkout_state(), CheckoutState::FormOpen);
        assert!(app.orders().unwrap().is_empty());
    }

    #[test]
    fn test_admin_flow() {
        let mut app = state();
        let reply = app.dispatch(Command::ViewAdmin).unwrap();
        assert!(reply.html.unwrap().contains("adminLoginForm"));

        let reply = app
            .dispatch(Command::AdminLogin {
                username: "admin".to_string(),
                password: "nope".to_string(),
            })
            .unwrap();
        assert!(reply.is_error());
        assert!(reply.html.unwrap().contains("Invalid username or password!"));

        let reply = app
            .dispatch(Command::AdminLogin {
                username: "admin".to_string(),
                password: "12345".to_string(),
            })
            .unwrap();
        assert!(reply.html.unwrap().contains("No orders available."));

        let reply = app.dispatch(Command::AdminLogout).unwrap();
        assert!(reply.html.unwrap().contains("adminLoginForm"));
    }

    #[test]
    fn test_toggle_theme() {
        let mut app = state();
        let reply = app.dispatch(Command::ToggleTheme).unwrap();
        assert_eq!(app.theme(), Theme::Dark);
        assert_eq!(reply.notice.unwrap().message(), "☀️ Light");
    }
}
