//! Type-safe price representation.
//!
//! Catalog prices are whole rupees, so a price is an integer amount rather
//! than a decimal. Arithmetic saturates instead of wrapping.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use serde::{Deserialize, Serialize};

/// A price in whole currency units.
///
/// Serialized as a bare integer so stored carts stay readable by other
/// clients of the same storage.
///
/// ```
/// use bazaar_core::Price;
///
/// let line = Price::new(500).times(2);
/// assert_eq!(line.to_string(), "₹1000");
/// assert_eq!(line.grouped(), "₹1,000");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// Currency symbol prefixed to every formatted amount.
    pub const SYMBOL: &'static str = "₹";

    /// A zero price.
    pub const ZERO: Self = Self(0);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: i64) -> Self {
        Self(amount)
    }

    /// Get the amount in whole currency units.
    #[must_use]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Price of `quantity` units at this unit price.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(i64::from(quantity)))
    }

    /// Format with thousands separators, e.g. `₹1,100`.
    #[must_use]
    pub fn grouped(&self) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 4);
        if self.0 < 0 {
            out.push('-');
        }
        out.push_str(Self::SYMBOL);
        let lead = digits.len() % 3;
        for (i, ch) in digits.chars().enumerate() {
            if i != 0 && i % 3 == lead {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            write!(f, "-{}{}", Self::SYMBOL, self.0.unsigned_abs())
        } else {
            write!(f, "{}{}", Self::SYMBOL, self.0)
        }
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<i64> for Price {
    fn from(amount: i64) -> Self {
        Self(amount)
    }
}
