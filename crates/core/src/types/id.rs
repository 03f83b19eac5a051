//! Product identifiers.
//!
//! Catalog records carry small integer ids (1, 101, 999). Records built from
//! text shown on the page get a millisecond timestamp instead, so the id space
//! is `i64`.

use serde::{Deserialize, Serialize};

/// Identity of a product, and of the cart line holding it.
///
/// # Example
///
/// ```rust
/// # use vibe_bagshop_core::ProductId;
/// let id = ProductId::new(101);
/// assert_eq!(id.as_i64(), 101);
/// assert_eq!(serde_json::to_string(&id).unwrap(), "101");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Create a new product ID.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Create an ID from a millisecond timestamp (e.g. `Date.now()`).
    ///
    /// Fractional milliseconds are truncated.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Date.now() fits in i64 for the next 290k years
    pub fn from_timestamp_millis(millis: f64) -> Self {
        Self(millis as i64)
    }

    /// Get the underlying i64 value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl ::core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ::core::str::FromStr for ProductId {
    type Err = ::core::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<ProductId> for i64 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_timestamp_truncates() {
        let id = ProductId::from_timestamp_millis(1_760_000_000_123.9);
        assert_eq!(id.as_i64(), 1_760_000_000_123);
    }

    #[test]
    fn test_parse_from_data_attribute() {
        assert_eq!(" 42 ".parse::<ProductId>().unwrap(), ProductId::new(42));
        assert!("abc".parse::<ProductId>().is_err());
    }
}
