//! Admin dashboard commands.
//!
//! # Usage
//!
//! ```bash
//! bazaar admin login -u admin -p 12345
//! bazaar admin dashboard
//! bazaar admin logout
//! ```
//!
//! # Environment Variables
//!
//! - `BAZAAR_ADMIN_USERNAME` - Expected username (default: admin)
//! - `BAZAAR_ADMIN_PASSWORD` - Expected password (default: 12345)

use bazaar_storefront::storage::FileStore;
use bazaar_storefront::{AppState, Command};

use super::{CliError, emit};

/// Log in and print the dashboard.
///
/// # Errors
///
/// Returns `CliError::Refused` if the credentials do not match.
pub fn login(
    app: &mut AppState<FileStore>,
    username: String,
    password: String,
) -> Result<(), CliError> {
    emit(app.dispatch(Command::AdminLogin { username, password })?)
}

/// End the admin session.
///
/// # Errors
///
/// Returns `CliError` if the session flag cannot be removed.
pub fn logout(app: &mut AppState<FileStore>) -> Result<(), CliError> {
    emit(app.dispatch(Command::AdminLogout)?)
}

/// Print the dashboard, or the login form when logged out.
///
/// # Errors
///
/// Returns `CliError` if the orders cannot be read or rendered.
pub fn dashboard(app: &mut AppState<FileStore>) -> Result<(), CliError> {
    emit(app.dispatch(Command::ViewAdmin)?)
}
