//! Payment method chosen at checkout.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a known payment method.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown payment method: {0}")]
pub struct PaymentMethodError(pub String);

/// Payment method offered by the checkout form's selector.
///
/// The selector only offers these values, so a submitted form always carries
/// a valid method. Placed orders store the method's label as plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    /// Cash on delivery.
    #[default]
    #[serde(rename = "COD")]
    CashOnDelivery,
    /// UPI transfer.
    #[serde(rename = "UPI")]
    Upi,
    /// Credit or debit card.
    #[serde(rename = "Card")]
    Card,
}

impl PaymentMethod {
    /// All selectable methods, in selector order.
    pub const ALL: [Self; 3] = [Self::CashOnDelivery, Self::Upi, Self::Card];

    /// The label stored on an order.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CashOnDelivery => "COD",
            Self::Upi => "UPI",
            Self::Card => "Card",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = PaymentMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| PaymentMethodError(trimmed.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("cod".parse::<PaymentMethod>().unwrap(), PaymentMethod::CashOnDelivery);
        assert_eq!(" UPI ".parse::<PaymentMethod>().unwrap(), PaymentMethod::Upi);
        assert_eq!("card".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "cheque".parse::<PaymentMethod>().unwrap_err();
        assert_eq!(err.to_string(), "unknown payment method: cheque");
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&PaymentMethod::CashOnDelivery).unwrap();
        assert_eq!(json, "\"COD\"");
    }
}
