//! Integration tests for Bazaar.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bazaar-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_lifecycle` - cart mutations, persistence and rendering
//! - `checkout_flow` - order placement and snapshot immutability
//! - `admin_reporting` - admin login and order statistics
//! - `filtering` - catalog visibility
//!
//! This library holds the shared fixtures.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use chrono::{TimeZone, Utc};

use bazaar_core::PaymentMethod;
use bazaar_storefront::models::Catalog;
use bazaar_storefront::services::checkout::{CheckoutForm, FixedClock};
use bazaar_storefront::storage::{KeyValueStore, MemoryStore};
use bazaar_storefront::{AppState, StorefrontConfig};

/// Milliseconds timestamp every fixture clock is stopped at.
pub const FIXED_MILLIS: i64 = 1_700_000_000_000;

/// Three-product catalog used across tests.
pub const CATALOG_JSON: &str = r#"[
    {"id": "p1", "title": "Shoe", "price": 500, "category": "footwear", "image": "shoe.png"},
    {"id": "p2", "title": "Hat", "price": 300, "category": "accessory", "image": "hat.png"},
    {"id": "p3", "title": "Scarf", "price": 100, "category": "accessory", "image": "scarf.png"}
]"#;

#[must_use]
pub fn catalog() -> Catalog {
    Catalog::from_json(CATALOG_JSON).unwrap()
}

#[must_use]
pub fn fixed_clock() -> FixedClock {
    FixedClock(Utc.timestamp_millis_opt(FIXED_MILLIS).unwrap())
}

/// Storefront over `store` with the fixture catalog and clock.
pub fn app_with<S: KeyValueStore>(store: S) -> AppState<S> {
    AppState::new(StorefrontConfig::default(), catalog(), store)
        .unwrap()
        .with_clock(fixed_clock())
}

/// Storefront over a fresh in-memory store.
#[must_use]
pub fn app() -> AppState<MemoryStore> {
    app_with(MemoryStore::new())
}

/// A valid checkout form.
#[must_use]
pub fn form(name: &str, address: &str) -> CheckoutForm {
    CheckoutForm {
        name: name.to_string(),
        address: address.to_string(),
        payment_method: PaymentMethod::CashOnDelivery,
    }
}
