//! Line item quantity.

use core::fmt;
use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// The input is not an integer.
    #[error("quantity must be an integer (got {0:?})")]
    NotAnInteger(String),
    /// The input is zero or negative.
    #[error("quantity must be at least 1 (got {0})")]
    NotPositive(i64),
    /// The input does not fit the quantity range.
    #[error("quantity {0} is too large")]
    TooLarge(i64),
}

/// Number of units of one product in the cart.
///
/// Always at least 1. Stored as a plain JSON integer; a stored `0` fails to
/// deserialize.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit, the quantity used when none is given.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity, returning `None` for zero.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        match NonZeroU32::new(value) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Create a quantity from a caller-supplied signed value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is below 1 or above `u32::MAX`.
    pub fn from_signed(value: i64) -> Result<Self, QuantityError> {
        if value < 1 {
            return Err(QuantityError::NotPositive(value));
        }
        u32::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or(QuantityError::TooLarge(value))
    }

    /// Parse a quantity from form input.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not an integer or is below 1.
    pub fn parse(s: &str) -> Result<Self, QuantityError> {
        let trimmed = s.trim();
        let value = trimmed
            .parse::<i64>()
            .map_err(|_| QuantityError::NotAnInteger(trimmed.to_owned()))?;
        Self::from_signed(value)
    }

    /// Returns the quantity as a `u32`.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Add two quantities, returning `None` on overflow.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.get()).map(Self)
    }

    /// One more unit, `None` on overflow.
    #[must_use]
    pub fn increment(self) -> Option<Self> {
        self.checked_add(Self::ONE)
    }

    /// One fewer unit, `None` when already at 1.
    #[must_use]
    pub const fn decrement(self) -> Option<Self> {
        Self::new(self.get() - 1)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Quantity> for u32 {
    fn from(q: Quantity) -> Self {
        q.get()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Quantity::parse("3").unwrap().get(), 3);
        assert_eq!(Quantity::parse(" 12 ").unwrap().get(), 12);
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert_eq!(
            Quantity::parse("abc"),
            Err(QuantityError::NotAnInteger("abc".to_string()))
        );
        assert_eq!(Quantity::parse("0"), Err(QuantityError::NotPositive(0)));
        assert_eq!(Quantity::parse("-2"), Err(QuantityError::NotPositive(-2)));
        assert!(Quantity::parse("1.5").is_err());
        assert!(Quantity::parse("").is_err());
    }

    #[test]
    fn test_from_signed_too_large() {
        let big = i64::from(u32::MAX) + 1;
        assert_eq!(Quantity::from_signed(big), Err(QuantityError::TooLarge(big)));
    }

    #[test]
    fn test_decrement_stops_at_one() {
        assert_eq!(Quantity::ONE.decrement(), None);
        let two = Quantity::new(2).unwrap();
        assert_eq!(two.decrement(), Some(Quantity::ONE));
    }

    #[test]
    fn test_increment_overflow() {
        let max = Quantity::new(u32::MAX).unwrap();
        assert_eq!(max.increment(), None);
        assert_eq!(Quantity::ONE.increment().unwrap().get(), 2);
    }

    #[test]
    fn test_serde_rejects_zero() {
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert_eq!(serde_json::from_str::<Quantity>("4").unwrap().get(), 4);
        assert_eq!(serde_json::to_string(&Quantity::ONE).unwrap(), "1");
    }
}
