//! Static product catalog.
//!
//! The catalog is supplied from outside (a JSON array of entries) and never
//! changes while the storefront runs.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use bazaar_core::{Price, ProductId};

use super::cart::CartItem;

/// Errors loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A product as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub category: String,
    #[serde(default, alias = "img")]
    pub image: String,
}

impl CatalogEntry {
    /// A quantity-1 cart line for this product.
    #[must_use]
    pub fn to_cart_item(&self) -> CartItem {
        CartItem {
            id: self.id.clone(),
            name: self.title.clone(),
            price: self.price,
            image: self.image.clone(),
            quantity: 1,
        }
    }
}

/// The full product list, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Create a catalog from entries.
    #[must_use]
    pub const fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Parse a JSON array of entries.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the JSON is not a list of entries.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Read and parse a catalog file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&raw)?;
        tracing::info!(path = %path.display(), products = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// Entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    /// Distinct categories, sorted, for the category selector.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|entry| entry.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        {"id":"p1","title":"Shoe","price":500,"category":"footwear","image":"shoe.png"},
        {"id":"p2","title":"Hat","price":300,"category":"accessory"},
        {"id":"p3","title":"Sandal","price":250,"category":"footwear"}
    ]"#;

    #[test]
    fn test_from_json_and_lookup() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        assert_eq!(catalog.len(), 3);
        let hat = catalog.get(&ProductId::from("p2")).unwrap();
        assert_eq!(hat.title, "Hat");
        assert_eq!(hat.image, "");
        assert!(catalog.get(&ProductId::from("p9")).is_none());
    }

    #[test]
    fn test_categories_are_distinct_and_sorted() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        assert_eq!(catalog.categories(), vec!["accessory", "footwear"]);
    }

    #[test]
    fn test_to_cart_item() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let line = catalog.get(&ProductId::from("p1")).unwrap().to_cart_item();
        assert_eq!(line.name, "Shoe");
        assert_eq!(line.price, Price::new(500));
        assert_eq!(line.quantity, 1);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Catalog::from_json("{}"),
            Err(CatalogError::Parse(_))
        ));
    }
}
