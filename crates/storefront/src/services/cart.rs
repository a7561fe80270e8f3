//! The cart store.
//!
//! [`CartStore`] owns the in-memory cart. Every mutation goes through the
//! store, which persists the whole cart and then notifies subscribers. If the
//! write fails the in-memory cart is restored, so memory and storage never
//! disagree. Rendering reads [`CartStore::cart`] and is kept separate.

use std::fmt;

use bazaar_core::ProductId;

use crate::db::{self, RepositoryError};
use crate::models::{Cart, CartItem};
use crate::storage::KeyValueStore;

/// Callback invoked with the cart after each persisted mutation.
pub type CartListener = Box<dyn FnMut(&Cart)>;

/// Owner of the session's cart.
#[derive(Default)]
pub struct CartStore {
    cart: Cart,
    listeners: Vec<CartListener>,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl CartStore {
    /// Wrap an already-loaded cart.
    #[must_use]
    pub fn new(cart: Cart) -> Self {
        Self {
            cart,
            listeners: Vec::new(),
        }
    }

    /// Load the stored cart, falling back to empty on absent or bad data.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backend cannot be read.
    pub fn load<S>(store: &S) -> Result<Self, RepositoryError>
    where
        S: KeyValueStore + ?Sized,
    {
        let cart = db::cart::load_cart(store)?;
        tracing::debug!(lines = cart.len(), "Loaded cart");
        Ok(Self::new(cart))
    }

    /// Current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Register a listener called after every persisted mutation.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&Cart) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Add one unit of `item`. Returns the line's new quantity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the cart cannot be saved; the cart is
    /// left as it was.
    pub fn add<S>(&mut self, store: &mut S, item: CartItem) -> Result<u32, RepositoryError>
    where
        S: KeyValueStore + ?Sized,
    {
        let id = item.id.clone();
        let quantity = self.mutate(store, |cart| cart.add(item))?;
        tracing::info!(product_id = %id, quantity, "Added to cart");
        Ok(quantity)
    }

    /// Remove the line for `id`. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the cart cannot be saved.
    pub fn remove<S>(
        &mut self,
        store: &mut S,
        id: &ProductId,
    ) -> Result<Option<CartItem>, RepositoryError>
    where
        S: KeyValueStore + ?Sized,
    {
        if self.cart.items().iter().all(|line| &line.id != id) {
            tracing::debug!(product_id = %id, "Ignoring removal of product not in cart");
            return Ok(None);
        }
        let removed = self.mutate(store, |cart| cart.remove_by_id(id))?;
        tracing::info!(product_id = %id, "Removed from cart");
        Ok(removed)
    }

    /// Remove the line at `index`. Out-of-range indices are ignored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the cart cannot be saved.
    pub fn remove_at<S>(
        &mut self,
        store: &mut S,
        index: usize,
    ) -> Result<Option<CartItem>, RepositoryError>
    where
        S: KeyValueStore + ?Sized,
    {
        if index >= self.cart.len() {
            tracing::debug!(index, lines = self.cart.len(), "Ignoring out-of-range removal");
            return Ok(None);
        }
        let removed = self.mutate(store, |cart| cart.remove_at(index))?;
        tracing::info!(index, "Removed from cart");
        Ok(removed)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the cart cannot be saved.
    pub fn clear<S>(&mut self, store: &mut S) -> Result<(), RepositoryError>
    where
        S: KeyValueStore + ?Sized,
    {
        self.mutate(store, Cart::clear)
    }

    /// Persist the current cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the write fails.
    pub fn save<S>(&self, store: &mut S) -> Result<(), RepositoryError>
    where
        S: KeyValueStore + ?Sized,
    {
        db::cart::save_cart(store, &self.cart)
    }

    fn mutate<S, T, F>(&mut self, store: &mut S, f: F) -> Result<T, RepositoryError>
    where
        S: KeyValueStore + ?Sized,
        F: FnOnce(&mut Cart) -> T,
    {
        let before = self.cart.clone();
        let out = f(&mut self.cart);
        if let Err(e) = self.save(store) {
            tracing::error!(error = %e, "Failed to save cart, reverting");
            self.cart = before;
            return Err(e);
        }
        for listener in &mut self.listeners {
            listener(&self.cart);
        }
        Ok(out)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use bazaar_core::Price;

    use super::*;
    use crate::storage::{MemoryStore, StorageError};

    fn shoe() -> CartItem {
        CartItem {
            id: ProductId::from("p1"),
            name: "Shoe".to_string(),
            price: Price::new(500),
            image: "shoe.png".to_string(),
            quantity: 1,
        }
    }

    /// Store whose writes always fail.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("read-only")))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("read-only")))
        }
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let mut store = MemoryStore::new();
        let mut carts = CartStore::load(&store).unwrap();

        carts.add(&mut store, shoe()).unwrap();
        carts.add(&mut store, shoe()).unwrap();
        let stored = db::cart::load_cart(&store).unwrap();
        assert_eq!(stored.items()[0].quantity, 2);

        carts.remove(&mut store, &ProductId::from("p1")).unwrap();
        assert!(db::cart::load_cart(&store).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_removals_are_ignored() {
        let mut store = MemoryStore::new();
        let mut carts = CartStore::default();
        carts.add(&mut store, shoe()).unwrap();

        assert!(carts.remove_at(&mut store, 5).unwrap().is_none());
        assert!(carts.remove(&mut store, &ProductId::from("zz")).unwrap().is_none());
        assert_eq!(carts.cart().len(), 1);

        assert!(carts.remove_at(&mut store, 0).unwrap().is_some());
        assert!(carts.cart().is_empty());
        assert_eq!(carts.cart().total(), Price::ZERO);
    }

    #[test]
    fn test_failed_save_reverts_memory() {
        let mut store = ReadOnlyStore;
        let mut carts = CartStore::default();
        assert!(carts.add(&mut store, shoe()).is_err());
        assert!(carts.cart().is_empty());
    }

    #[test]
    fn test_subscribers_see_each_mutation() {
        let mut store = MemoryStore::new();
        let mut carts = CartStore::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        carts.subscribe(move |cart| sink.borrow_mut().push(cart.item_count()));

        carts.add(&mut store, shoe()).unwrap();
        carts.add(&mut store, shoe()).unwrap();
        carts.clear(&mut store).unwrap();
        // Ignored removals do not notify.
        carts.remove_at(&mut store, 0).unwrap();

        assert_eq!(*seen.borrow(), vec![1, 2, 0]);
    }
}
