//! Raw input from cart controls.
//!
//! Add-to-cart buttons carry the product id, name and price as strings and an
//! optional quantity field; the row controls carry a row index and, for direct
//! edits, the typed quantity. Anything that does not parse makes the gesture a
//! no-op, so these helpers return `Result`/`Option` rather than panicking.

use std::str::FromStr;

use rust_decimal::Decimal;
use storecart_core::{
    ItemName, LabelError, ProductId, Quantity, QuantityError, UnitPriceError, validate_unit_price,
};
use thiserror::Error;

/// Why an add-to-cart request was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Empty product id or name.
    #[error(transparent)]
    Label(#[from] LabelError),

    /// The price is not a decimal number.
    #[error("invalid price: {0:?}")]
    InvalidPrice(String),

    /// The price is negative, too large, or not storable exactly.
    #[error(transparent)]
    Price(#[from] UnitPriceError),

    /// The quantity is not an integer of at least 1.
    #[error(transparent)]
    Quantity(#[from] QuantityError),
}

/// A validated add-to-cart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddItemInput {
    pub id: ProductId,
    pub name: ItemName,
    pub unit_price: Decimal,
    pub quantity: Quantity,
}

impl AddItemInput {
    /// Validate typed arguments. A missing quantity means one unit.
    ///
    /// # Errors
    ///
    /// Returns `InputError` for an empty id or name, a price rejected by
    /// [`validate_unit_price`], or a quantity below 1.
    pub fn new(
        id: &str,
        name: &str,
        unit_price: Decimal,
        quantity: Option<i64>,
    ) -> Result<Self, InputError> {
        let id = ProductId::parse(id)?;
        let name = ItemName::parse(name)?;
        let unit_price = validate_unit_price(unit_price)?;
        let quantity = quantity.map_or(Ok(Quantity::ONE), Quantity::from_signed)?;

        Ok(Self {
            id,
            name,
            unit_price,
            quantity,
        })
    }

    /// Validate string form input, as carried by an add-to-cart control.
    ///
    /// # Errors
    ///
    /// Returns `InputError` if any field fails to parse or validate.
    pub fn parse(
        id: &str,
        name: &str,
        unit_price: &str,
        quantity: Option<&str>,
    ) -> Result<Self, InputError> {
        let price = parse_price(unit_price)?;
        let quantity = quantity.map(Quantity::parse).transpose()?;
        Self::new(id, name, price, quantity.map(|q| i64::from(q.get())))
    }
}

/// Parse a decimal price such as `"9.99"`.
fn parse_price(s: &str) -> Result<Decimal, InputError> {
    let trimmed = s.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| InputError::InvalidPrice(trimmed.to_owned()))
}

/// Parse a row index carried by a remove or +/- control.
#[must_use]
pub fn parse_index(s: &str) -> Option<usize> {
    s.trim().parse().ok()
}

/// Parse a directly edited quantity. Range checks are left to the store.
#[must_use]
pub fn parse_quantity(s: &str) -> Option<i64> {
    s.trim().parse().ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults_quantity_to_one() {
        let input = AddItemInput::parse("p1", "Widget", "9.99", None).unwrap();
        assert_eq!(input.id.as_str(), "p1");
        assert_eq!(input.unit_price, Decimal::new(999, 2));
        assert_eq!(input.quantity, Quantity::ONE);
    }

    #[test]
    fn test_parse_with_quantity() {
        let input = AddItemInput::parse("p1", "Widget", " 5 ", Some("3")).unwrap();
        assert_eq!(input.unit_price, Decimal::from(5));
        assert_eq!(input.quantity.get(), 3);
    }

    #[test]
    fn test_parse_rejects_bad_price() {
        assert_eq!(
            AddItemInput::parse("p1", "Widget", "abc", None),
            Err(InputError::InvalidPrice("abc".to_string()))
        );
        assert!(AddItemInput::parse("p1", "Widget", "NaN", None).is_err());
        assert!(matches!(
            AddItemInput::parse("p1", "Widget", "-1", None),
            Err(InputError::Price(UnitPriceError::Negative(_)))
        ));
    }

    #[test]
    fn test_rejects_prices_that_cannot_be_stored() {
        assert!(matches!(
            AddItemInput::new("p1", "Max", Decimal::MAX, None),
            Err(InputError::Price(UnitPriceError::TooLarge(_)))
        ));
        assert!(matches!(
            AddItemInput::parse("p1", "Yacht", "40000000000000000000000000000", Some("2")),
            Err(InputError::Price(UnitPriceError::TooLarge(_)))
        ));
        assert!(matches!(
            AddItemInput::parse("p1", "Dust", "0.1234567890123456789", None),
            Err(InputError::Price(UnitPriceError::Imprecise(_)))
        ));
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        assert!(matches!(
            AddItemInput::parse("", "Widget", "1", None),
            Err(InputError::Label(_))
        ));
        assert!(matches!(
            AddItemInput::parse("p1", "", "1", None),
            Err(InputError::Label(_))
        ));
    }

    #[test]
    fn test_rejects_bad_quantity() {
        assert!(matches!(
            AddItemInput::parse("p1", "Widget", "1", Some("x")),
            Err(InputError::Quantity(QuantityError::NotAnInteger(_)))
        ));
        assert!(matches!(
            AddItemInput::new("p1", "Widget", Decimal::ONE, Some(0)),
            Err(InputError::Quantity(QuantityError::NotPositive(0)))
        ));
    }

    #[test]
    fn test_zero_price_is_allowed() {
        assert!(AddItemInput::new("p1", "Freebie", Decimal::ZERO, None).is_ok());
    }

    #[test]
    fn test_parse_index_and_quantity() {
        assert_eq!(parse_index("2"), Some(2));
        assert_eq!(parse_index("-1"), None);
        assert_eq!(parse_index("x"), None);
        assert_eq!(parse_quantity(" 7 "), Some(7));
        assert_eq!(parse_quantity("-3"), Some(-3));
        assert_eq!(parse_quantity(""), None);
    }
}
