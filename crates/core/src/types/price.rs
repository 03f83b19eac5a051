//! Presentation prices.
//!
//! Prices are stored exactly as they are displayed (`"₩149,000"`). The numeric
//! value is recovered by dropping every character that is not an ASCII digit,
//! which assumes a single currency and a grouping separator. Totals are
//! formatted back into the same shape.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Currency symbol prefixed to formatted totals.
pub const CURRENCY_SYMBOL: char = '₩';

/// Digit grouping separator used by formatted totals.
const GROUP_SEPARATOR: char = ',';

/// A display price string.
///
/// # Examples
///
/// ```
/// use vibe_bagshop_core::Price;
///
/// assert_eq!(Price::new("₩149,000").amount(), 149_000);
/// assert_eq!(Price::new("free").amount(), 0);
/// assert_eq!(Price::from_amount(2_500).as_str(), "₩2,500");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(String);

impl Price {
    /// Wrap a display string.
    #[must_use]
    pub fn new(display: impl Into<String>) -> Self {
        Self(display.into())
    }

    /// Format a whole amount as `₩` followed by comma-grouped digits.
    #[must_use]
    pub fn from_amount(amount: u64) -> Self {
        let digits = amount.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 3);
        out.push(CURRENCY_SYMBOL);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(GROUP_SEPARATOR);
            }
            out.push(c);
        }
        Self(out)
    }

    /// Numeric amount: every non-digit is dropped and the rest parsed.
    ///
    /// Returns 0 when nothing parses (no digits, or more than `u64` holds).
    #[must_use]
    pub fn amount(&self) -> u64 {
        let digits: String = self.0.chars().filter(char::is_ascii_digit).collect();
        digits.parse().unwrap_or(0)
    }

    /// Returns the display string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the price and returns its display string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Price {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Price {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_strips_symbol_and_separators() {
        assert_eq!(Price::new("₩1,000").amount(), 1_000);
        assert_eq!(Price::new("₩ 229,000원").amount(), 229_000);
    }

    #[test]
    fn test_amount_is_lossy_for_decimals() {
        // Decimal points are separators too; "$19.99" reads as 1999.
        assert_eq!(Price::new("$19.99").amount(), 1_999);
    }

    #[test]
    fn test_amount_unparsable_is_zero() {
        assert_eq!(Price::new("").amount(), 0);
        assert_eq!(Price::new("sold out").amount(), 0);
        assert_eq!(Price::new("₩99999999999999999999999").amount(), 0);
    }

    #[test]
    fn test_from_amount_groups_thousands() {
        assert_eq!(Price::from_amount(0).as_str(), "₩0");
        assert_eq!(Price::from_amount(500).as_str(), "₩500");
        assert_eq!(Price::from_amount(1_000).as_str(), "₩1,000");
        assert_eq!(Price::from_amount(149_000).as_str(), "₩149,000");
        assert_eq!(Price::from_amount(1_234_567).as_str(), "₩1,234,567");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&Price::new("₩89,000")).unwrap_or_default();
        assert_eq!(json, "\"₩89,000\"");
    }
}
