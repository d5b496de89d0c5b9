//! The persisted cart line item.
//!
//! Field names on the wire are the ones existing stored carts and the checkout
//! form already use: `id`, `nombre`, `precio`, `cantidad`. The English names
//! are accepted as aliases when reading.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ItemName, ProductId, Quantity};

/// Largest accepted unit price.
///
/// Any price up to this bound times any [`Quantity`] fits in a `Decimal`.
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Why a unit price cannot be stored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitPriceError {
    #[error("unit price cannot be negative: {0}")]
    Negative(Decimal),

    #[error("unit price {0} is above the maximum")]
    TooLarge(Decimal),

    /// More significant digits than a JSON number keeps.
    #[error("unit price {0} cannot be stored exactly")]
    Imprecise(Decimal),
}

/// Check that `price` is within range and reads back unchanged after being
/// written as a JSON number.
///
/// # Errors
///
/// Returns `UnitPriceError` for a negative price, a price above
/// [`MAX_UNIT_PRICE`], or one that does not survive `f64` encoding.
pub fn validate_unit_price(price: Decimal) -> Result<Decimal, UnitPriceError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(UnitPriceError::Negative(price));
    }
    if price > MAX_UNIT_PRICE {
        return Err(UnitPriceError::TooLarge(price));
    }
    let decoded = price
        .to_f64()
        .and_then(|f| Decimal::from_str(&f.to_string()).ok());
    if decoded != Some(price) {
        return Err(UnitPriceError::Imprecise(price));
    }
    Ok(price)
}

/// One product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product identifier, unique within a cart.
    pub id: ProductId,
    /// Display label.
    #[serde(rename = "nombre", alias = "name")]
    pub name: ItemName,
    /// Price of a single unit, between zero and [`MAX_UNIT_PRICE`].
    #[serde(
        rename = "precio",
        alias = "unitPrice",
        alias = "unit_price",
        with = "unit_price"
    )]
    pub unit_price: Decimal,
    /// Number of units.
    #[serde(rename = "cantidad", alias = "quantity")]
    pub quantity: Quantity,
}

impl LineItem {
    /// Create a line item.
    #[must_use]
    pub const fn new(
        id: ProductId,
        name: ItemName,
        unit_price: Decimal,
        quantity: Quantity,
    ) -> Self {
        Self {
            id,
            name,
            unit_price,
            quantity,
        }
    }

    /// `unit_price * quantity` at full precision, `None` on overflow.
    #[must_use]
    pub fn subtotal(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity.get()))
    }
}

/// Prices travel as JSON numbers and must pass [`validate_unit_price`].
mod unit_price {
    use rust_decimal::Decimal;
    use serde::de::Error as _;
    use serde::{Deserializer, Serializer};

    use super::validate_unit_price;

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let value = rust_decimal::serde::float::deserialize(deserializer)?;
        validate_unit_price(value).map_err(D::Error::custom)
    }
}
