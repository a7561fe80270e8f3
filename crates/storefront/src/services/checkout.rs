//! Checkout flow.
//!
//! ```text
//! Idle --open (cart not empty)--> FormOpen
//! FormOpen --cancel--> Idle
//! FormOpen --submit (valid form)--> Submitted --> Idle
//! ```
//!
//! Submission is the only durable commit in the storefront. The order is
//! appended to the log first, then the cart is cleared; if clearing the cart
//! cannot be persisted the log is put back, so either both happen or neither.

use core::fmt;

use chrono::{DateTime, Local, Utc};

use bazaar_core::{OrderId, PaymentMethod};

use crate::db;
use crate::error::{AppError, Result};
use crate::models::Order;
use crate::services::cart::CartStore;
use crate::storage::KeyValueStore;

/// Display format of an order's `createdAt`.
const CREATED_AT_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Where the checkout flow is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutState {
    #[default]
    Idle,
    FormOpen,
    /// Transient while an order is being committed.
    Submitted,
}

impl fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::FormOpen => "open",
            Self::Submitted => "submitting",
        })
    }
}

/// Shipping and payment details as entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutForm {
    pub name: String,
    pub address: String,
    pub payment_method: PaymentMethod,
}

impl CheckoutForm {
    /// Trimmed name and address, or the first blank field.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidCheckoutForm` naming the blank field.
    pub fn validate(&self) -> Result<(&str, &str)> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidCheckoutForm("name"));
        }
        let address = self.address.trim();
        if address.is_empty() {
            return Err(AppError::InvalidCheckoutForm("address"));
        }
        Ok((name, address))
    }
}

/// The checkout state machine.
#[derive(Debug, Default)]
pub struct CheckoutFlow {
    state: CheckoutState,
}

impl CheckoutFlow {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: CheckoutState::Idle,
        }
    }

    #[must_use]
    pub const fn state(&self) -> CheckoutState {
        self.state
    }

    /// Open the checkout form.
    ///
    /// Re-opening an open form is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `AppError::EmptyCart` if the cart has no lines; the flow stays
    /// idle.
    pub fn open(&mut self, cart: &CartStore) -> Result<()> {
        if cart.cart().is_empty() {
            tracing::info!("Checkout refused: cart is empty");
            return Err(AppError::EmptyCart);
        }
        self.state = CheckoutState::FormOpen;
        Ok(())
    }

    /// Close the form, discarding input. The cart is untouched.
    pub fn cancel(&mut self) {
        if self.state == CheckoutState::FormOpen {
            tracing::debug!("Checkout cancelled");
        }
        self.state = CheckoutState::Idle;
    }

    /// Place an order from the current cart.
    ///
    /// On success the order has been appended and persisted, the cart has
    /// been cleared and persisted, and the flow is idle again.
    ///
    /// # Errors
    ///
    /// - `AppError::InvalidTransition` if the form is not open.
    /// - `AppError::InvalidCheckoutForm` if name or address is blank; the
    ///   form stays open.
    /// - `AppError::EmptyCart` if the cart was emptied while the form was
    ///   open; the flow returns to idle.
    /// - `AppError::Repository` if storage fails; nothing is committed and
    ///   the form stays open.
    pub fn submit<S>(
        &mut self,
        form: &CheckoutForm,
        cart: &mut CartStore,
        store: &mut S,
        clock: &dyn Clock,
    ) -> Result<Order>
    where
        S: KeyValueStore + ?Sized,
    {
        if self.state != CheckoutState::FormOpen {
            return Err(AppError::InvalidTransition {
                action: "submit",
                state: self.state,
            });
        }
        let (name, address) = form.validate()?;
        if cart.cart().is_empty() {
            self.state = CheckoutState::Idle;
            return Err(AppError::EmptyCart);
        }

        self.state = CheckoutState::Submitted;
        match commit(name, address, form.payment_method, cart, store, clock) {
            Ok(order) => {
                self.state = CheckoutState::Idle;
                tracing::info!(
                    order_id = %order.id,
                    items = order.items.len(),
                    total = %order.total,
                    "Order placed"
                );
                Ok(order)
            }
            Err(e) => {
                self.state = CheckoutState::FormOpen;
                Err(e)
            }
        }
    }
}

fn commit<S>(
    name: &str,
    address: &str,
    payment_method: PaymentMethod,
    cart: &mut CartStore,
    store: &mut S,
    clock: &dyn Clock,
) -> Result<Order>
where
    S: KeyValueStore + ?Sized,
{
    let existing = db::orders::list_orders(&*store)?;
    let now = clock.now();
    let order = Order {
        id: next_order_id(now, &existing),
        customer_name: name.to_owned(),
        address: address.to_owned(),
        payment_method: payment_method.as_str().to_owned(),
        total: cart.cart().total().to_string(),
        created_at: now
            .with_timezone(&Local)
            .format(CREATED_AT_FORMAT)
            .to_string(),
        items: cart.cart().items().to_vec(),
    };

    let previous = db::orders::append_order(store, order.clone())?;

    if let Err(e) = cart.clear(store) {
        tracing::error!(order_id = %order.id, error = %e, "Failed to clear cart, rolling back order");
        if let Err(rollback) = db::orders::replace_orders(store, &previous) {
            tracing::error!(order_id = %order.id, error = %rollback, "Order rollback failed");
        }
        return Err(e.into());
    }

    Ok(order)
}

/// Millisecond timestamp, bumped past the newest existing id if needed.
fn next_order_id(now: DateTime<Utc>, existing: &[Order]) -> OrderId {
    let candidate = now.timestamp_millis();
    let id = existing
        .iter()
        .map(|order| order.id.as_i64())
        .max()
        .map_or(candidate, |last| candidate.max(last.saturating_add(1)));
    OrderId::new(id)
}
