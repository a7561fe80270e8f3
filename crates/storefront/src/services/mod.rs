//! Storefront services.
//!
//! - [`filter`] - catalog visibility from search, category and price controls
//! - [`cart`] - the cart store: in-memory cart, persistence and subscribers
//! - [`checkout`] - checkout state machine and order placement
//! - [`admin`] - admin login and order statistics
//! - [`theme`] - light/dark display mode

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod filter;
pub mod theme;
