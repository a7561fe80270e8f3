//! Catalog filtering.
//!
//! Visibility is recomputed over the whole catalog on every control change:
//!
//! ```text
//! visible = title contains query (case-insensitive)
//!       AND (category == "all" OR category == entry.category)
//!       AND entry.price <= max_price
//! ```
//!
//! Missing controls fall back to permissive defaults: empty query, all
//! categories, and the configured price ceiling.

use bazaar_core::Price;

use crate::models::{Catalog, CatalogEntry};

/// Selector value meaning "no category restriction".
pub const ALL_CATEGORIES: &str = "all";

/// Raw control values, as read from the page. `None` means the control is
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterControls {
    pub query: Option<String>,
    pub category: Option<String>,
    pub max_price: Option<String>,
}

/// Category restriction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Exact(String),
}

impl CategoryFilter {
    /// Parse a selector value. Absent, empty and `"all"` mean no restriction.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("" | ALL_CATEGORIES) => Self::All,
            Some(category) => Self::Exact(category.to_owned()),
        }
    }

    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Exact(wanted) => wanted == category,
        }
    }
}

/// Parsed filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Search text as entered.
    query: String,
    /// Lower-cased `query`, used for matching.
    needle: String,
    pub category: CategoryFilter,
    pub max_price: Price,
}

/// One catalog entry and whether it is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility<'c> {
    pub entry: &'c CatalogEntry,
    pub visible: bool,
}

impl FilterCriteria {
    /// Criteria that show every entry priced at or below `ceiling`.
    #[must_use]
    pub const fn permissive(ceiling: Price) -> Self {
        Self {
            query: String::new(),
            needle: String::new(),
            category: CategoryFilter::All,
            max_price: ceiling,
        }
    }

    /// Parse raw control values.
    ///
    /// The max price is read like an HTML range input: leading whitespace,
    /// an optional sign, then digits, ignoring anything after. A missing or
    /// unreadable value falls back to `ceiling`.
    #[must_use]
    pub fn from_controls(controls: &FilterControls, ceiling: Price) -> Self {
        let max_price = controls
            .max_price
            .as_deref()
            .and_then(parse_leading_int)
            .map_or(ceiling, Price::new);

        let query = controls.query.clone().unwrap_or_default();
        Self {
            needle: query.to_lowercase(),
            query,
            category: CategoryFilter::parse(controls.category.as_deref()),
            max_price,
        }
    }

    /// Search text as entered, for redisplay.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether `entry` passes all three tests.
    #[must_use]
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        entry.title.to_lowercase().contains(&self.needle)
            && self.category.matches(&entry.category)
            && entry.price <= self.max_price
    }

    /// Visibility of every catalog entry, in catalog order.
    #[must_use]
    pub fn apply<'c>(&self, catalog: &'c Catalog) -> Vec<Visibility<'c>> {
        catalog
            .entries()
            .iter()
            .map(|entry| Visibility {
                entry,
                visible: self.matches(entry),
            })
            .collect()
    }
}

/// Integer prefix of `raw`, or `None` if it has no leading digits.
///
/// A digit run too long for `i64` saturates.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, trimmed.get(1..)?),
        Some(b'+') => (false, trimmed.get(1..)?),
        _ => (false, trimmed),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = rest.get(..end)?;
    if digits.is_empty() {
        return None;
    }
    // Only overflow can fail here: `digits` is non-empty ASCII digits.
    let value = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { value.saturating_neg() } else { value })
}
