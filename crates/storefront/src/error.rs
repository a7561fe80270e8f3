//! Unified error handling.
//!
//! Provides a unified `AppError` type for every storefront operation. User
//! errors (an empty cart at checkout, a blank form field, wrong admin
//! credentials) are reported back as a notice by the dispatcher and never
//! change state; storage and rendering failures propagate to the caller.

use thiserror::Error;

use bazaar_core::ProductId;

use crate::db::RepositoryError;
use crate::models::CatalogError;
use crate::services::checkout::CheckoutState;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Repository operation failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Storage backend failed outside a repository call.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Template rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// Checkout was requested with nothing in the cart.
    #[error("Checkout refused: cart is empty")]
    EmptyCart,

    /// A required checkout field was blank after trimming.
    #[error("Invalid checkout form: {0} is required")]
    InvalidCheckoutForm(&'static str),

    /// Admin login did not match the configured credentials.
    #[error("Invalid admin credentials")]
    InvalidCredentials,

    /// The product is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// A checkout action arrived in a state that does not accept it.
    #[error("Cannot {action} while checkout is {state}")]
    InvalidTransition {
        action: &'static str,
        state: CheckoutState,
    },
}

impl AppError {
    /// Whether this error is the user's to fix, as opposed to a fault.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::EmptyCart
                | Self::InvalidCheckoutForm(_)
                | Self::InvalidCredentials
                | Self::ProductNotFound(_)
                | Self::InvalidTransition { .. }
        )
    }

    /// Message shown to the user.
    ///
    /// Internal error details are not exposed.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyCart => "Your cart is empty! Add some products first.".to_string(),
            Self::InvalidCheckoutForm(field) => format!("Please enter your {field}."),
            Self::InvalidCredentials => "Invalid username or password!".to_string(),
            Self::ProductNotFound(_) => "That product is no longer available.".to_string(),
            Self::InvalidTransition { .. } => "Please open checkout first.".to_string(),
            Self::Repository(_) | Self::Storage(_) | Self::Catalog(_) | Self::Render(_) => {
                "Something went wrong, please try again.".to_string()
            }
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::ProductNotFound(ProductId::from("p9"));
        assert_eq!(err.to_string(), "Product not found: p9");

        let err = AppError::InvalidCheckoutForm("address");
        assert_eq!(err.to_string(), "Invalid checkout form: address is required");

        let err = AppError::InvalidTransition {
            action: "submit",
            state: CheckoutState::Idle,
        };
        assert_eq!(err.to_string(), "Cannot submit while checkout is idle");
    }

    #[test]
    fn test_user_facing_classification() {
        assert!(AppError::EmptyCart.is_user_facing());
        assert!(AppError::InvalidCredentials.is_user_facing());
        let io = std::io::Error::other("disk full");
        assert!(!AppError::Storage(StorageError::Io(io)).is_user_facing());
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            AppError::EmptyCart.user_message(),
            "Your cart is empty! Add some products first."
        );
        assert_eq!(
            AppError::InvalidCredentials.user_message(),
            "Invalid username or password!"
        );
        let io = std::io::Error::other("disk full");
        assert!(!AppError::Storage(StorageError::Io(io)).user_message().contains("disk"));
    }
}
