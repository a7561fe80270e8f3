//! Shopper commands.

use std::fmt::Write as _;

use bazaar_core::{PaymentMethod, Price, ProductId};
use bazaar_storefront::models::Catalog;
use bazaar_storefront::services::checkout::CheckoutForm;
use bazaar_storefront::services::filter::FilterControls;
use bazaar_storefront::storage::FileStore;
use bazaar_storefront::{AppState, Command};

use super::{CliError, emit};

/// Print the product grid with the given controls.
///
/// # Errors
///
/// Returns `CliError` if rendering fails.
pub fn products(
    app: &mut AppState<FileStore>,
    query: Option<String>,
    category: Option<String>,
    max_price: Option<String>,
) -> Result<(), CliError> {
    emit(app.dispatch(Command::Filter(FilterControls {
        query,
        category,
        max_price,
    }))?)
}

/// Print the catalog's categories and products.
#[allow(clippy::print_stdout)]
pub fn catalog(app: &AppState<FileStore>) {
    print!("{}", catalog_listing(app.catalog(), app.config().max_price));
}

/// Plain-text listing: categories, the price ceiling, then one product per line.
fn catalog_listing(catalog: &Catalog, ceiling: Price) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Categories: {}", catalog.categories().join(", "));
    let _ = writeln!(out, "Price ceiling: {ceiling}");
    for entry in catalog.entries() {
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}",
            entry.id, entry.title, entry.category, entry.price
        );
    }
    out
}

/// Print the cart.
///
/// # Errors
///
/// Returns `CliError` if rendering fails.
pub fn show_cart(app: &mut AppState<FileStore>) -> Result<(), CliError> {
    emit(app.dispatch(Command::ViewCart)?)
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns `CliError` if the product is unknown or the cart cannot be saved.
pub fn add(app: &mut AppState<FileStore>, id: ProductId) -> Result<(), CliError> {
    emit(app.dispatch(Command::AddToCart(id))?)
}

/// Remove a product's line.
///
/// # Errors
///
/// Returns `CliError` if the cart cannot be saved.
pub fn remove(app: &mut AppState<FileStore>, id: ProductId) -> Result<(), CliError> {
    emit(app.dispatch(Command::RemoveFromCart(id))?)
}

/// Remove the line at `index`.
///
/// # Errors
///
/// Returns `CliError` if the cart cannot be saved.
pub fn remove_at(app: &mut AppState<FileStore>, index: usize) -> Result<(), CliError> {
    emit(app.dispatch(Command::RemoveAt(index))?)
}

/// Open checkout and submit the form in one step.
///
/// # Errors
///
/// Returns `CliError::Refused` if the cart is empty or a field is blank.
pub fn checkout(
    app: &mut AppState<FileStore>,
    name: String,
    address: String,
    payment_method: PaymentMethod,
) -> Result<(), CliError> {
    emit(app.dispatch(Command::OpenCheckout)?)?;
    emit(app.dispatch(Command::SubmitCheckout(CheckoutForm {
        name,
        address,
        payment_method,
    }))?)
}

/// Print the order history.
///
/// # Errors
///
/// Returns `CliError` if the orders cannot be read or rendered.
pub fn orders(app: &mut AppState<FileStore>) -> Result<(), CliError> {
    emit(app.dispatch(Command::ViewOrders)?)
}
