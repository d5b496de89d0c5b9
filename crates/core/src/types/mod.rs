//! Core types for storecart.
//!
//! This module provides type-safe wrappers for cart domain concepts.

pub mod id;
pub mod line_item;
pub mod price;
pub mod quantity;

pub use id::*;
pub use line_item::{LineItem, MAX_UNIT_PRICE, UnitPriceError, validate_unit_price};
pub use price::{CurrencyCode, CurrencyError, Price};
pub use quantity::{Quantity, QuantityError};
