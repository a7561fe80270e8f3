//! Admin session flag.
//!
//! The flag is the literal string `"true"` under `adminLoggedIn`. Any other
//! value, or no value, means logged out.

use super::RepositoryError;
use crate::storage::{KeyValueStore, keys};

const LOGGED_IN: &str = "true";

/// Whether an admin session is active.
///
/// # Errors
///
/// Returns `RepositoryError::Storage` if the backend cannot be read.
pub fn is_admin_logged_in<S>(store: &S) -> Result<bool, RepositoryError>
where
    S: KeyValueStore + ?Sized,
{
    Ok(store.get(keys::ADMIN_LOGGED_IN)?.as_deref() == Some(LOGGED_IN))
}

/// Mark the admin session active.
///
/// # Errors
///
/// Returns `RepositoryError::Storage` if the write fails.
pub fn set_admin_logged_in<S>(store: &mut S) -> Result<(), RepositoryError>
where
    S: KeyValueStore + ?Sized,
{
    store.set(keys::ADMIN_LOGGED_IN, LOGGED_IN)?;
    Ok(())
}

/// End the admin session.
///
/// # Errors
///
/// Returns `RepositoryError::Storage` if the write fails.
pub fn clear_admin_logged_in<S>(store: &mut S) -> Result<(), RepositoryError>
where
    S: KeyValueStore + ?Sized,
{
    store.remove(keys::ADMIN_LOGGED_IN)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_flag_lifecycle() {
        let mut store = MemoryStore::new();
        assert!(!is_admin_logged_in(&store).unwrap());
        set_admin_logged_in(&mut store).unwrap();
        assert!(is_admin_logged_in(&store).unwrap());
        clear_admin_logged_in(&mut store).unwrap();
        assert!(!is_admin_logged_in(&store).unwrap());
    }

    #[test]
    fn test_other_values_mean_logged_out() {
        let mut store = MemoryStore::new();
        store.set(keys::ADMIN_LOGGED_IN, "TRUE").unwrap();
        assert!(!is_admin_logged_in(&store).unwrap());
        store.set(keys::ADMIN_LOGGED_IN, "1").unwrap();
        assert!(!is_admin_logged_in(&store).unwrap());
    }
}
