//! Type-safe price representation in minor currency units.
//!
//! Line item prices arrive from the order lookup as integer minor units
//! (øre for DKK, cents for EUR). Keeping them integral avoids floating
//! point in the workflow core; formatting is display-only.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A price in minor currency units (e.g. øre, cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// Create a price from minor units.
    #[must_use]
    pub const fn from_minor_units(minor_units: i64) -> Self {
        Self(minor_units)
    }

    /// The amount in minor units.
    #[must_use]
    pub const fn minor_units(&self) -> i64 {
        self.0
    }

    /// Format with a currency code, e.g. `299.00 DKK`.
    ///
    /// Assumes two decimal places, which holds for every currency the
    /// portal currently serves.
    #[must_use]
    pub fn display(&self, currency: &str) -> String {
        let whole = self.0 / 100;
        let frac = (self.0 % 100).abs();
        format!("{whole}.{frac:02} {currency}")
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = (self.0 % 100).abs();
        write!(f, "{whole}.{frac:02}")
    }
}

impl From<i64> for Price {
    fn from(minor_units: i64) -> Self {
        Self(minor_units)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::from_minor_units(29900).to_string(), "299.00");
        assert_eq!(Price::from_minor_units(105).to_string(), "1.05");
        assert_eq!(Price::from_minor_units(0).to_string(), "0.00");
    }

    #[test]
    fn test_display_with_currency() {
        assert_eq!(
            Price::from_minor_units(29900).display("DKK"),
            "299.00 DKK"
        );
    }

    #[test]
    fn test_serde_transparent() {
        let price = Price::from_minor_units(29900);
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "29900");

        let parsed: Price = serde_json::from_str("29900").unwrap();
        assert_eq!(parsed, price);
    }
}
