//! Page handlers for the storefront.
//!
//! Each handler is a pure function of state that renders an askama
//! template. Commands reach them through [`crate::state::AppState::dispatch`].
//!
//! # Page Structure
//!
//! ```text
//! # Products
//! Filter                       - Product grid with visibility applied
//!
//! # Cart
//! AddToCart / RemoveFromCart   - Cart items fragment
//! ViewCart                     - Cart items fragment
//!
//! # Checkout
//! OpenCheckout / CancelCheckout
//! SubmitCheckout               - Cart items fragment (now empty)
//!
//! # Orders
//! ViewOrders                   - Customer order history
//!
//! # Admin
//! AdminLogin / ViewAdmin       - Dashboard, or login form when logged out
//! AdminLogout                  - Login form
//! ```

pub mod admin;
pub mod cart;
pub mod orders;
pub mod products;
