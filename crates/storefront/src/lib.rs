//! Bazaar Storefront library.
//!
//! Client-side storefront behaviour as a library: catalog filtering, a cart
//! persisted in a key-value store, a checkout flow that records orders, and
//! an admin dashboard over the recorded orders.
//!
//! # Architecture
//!
//! - [`storage`] - string-keyed store standing in for browser local storage
//! - [`db`] - repositories that (de)serialize collections into the store
//! - [`services`] - filter, cart store, checkout state machine, admin
//! - [`routes`] - page handlers that render askama templates
//! - [`state`] - [`state::AppState`] and the [`state::Command`] dispatcher

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;

pub use config::StorefrontConfig;
pub use error::{AppError, Result};
pub use state::{AppState, Command, Notice, Reply};
