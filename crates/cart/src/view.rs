//! Render-ready cart table.
//!
//! A [`CartView`] holds everything a cart page shows: one row per line with
//! its row index (the handle the remove and quantity controls send back), the
//! formatted total, and the hidden checkout field value.

use rust_decimal::Decimal;
use storecart_core::{CurrencyCode, LineItem};

use crate::store::{count, total};

/// One rendered cart row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub index: usize,
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_price: String,
}

/// Rendered cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u64,
    /// Value of the hidden checkout form field.
    pub submission: String,
}

impl CartView {
    /// Render `items` with prices in `currency`.
    ///
    /// Returns `None` if a line subtotal or the cart total overflows.
    #[must_use]
    pub fn new(items: &[LineItem], currency: CurrencyCode) -> Option<Self> {
        let rows = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                Some(CartItemView {
                    index,
                    id: item.id.to_string(),
                    name: item.name.to_string(),
                    quantity: item.quantity.get(),
                    unit_price: currency.format(item.unit_price),
                    line_price: currency.format(item.subtotal()?),
                })
            })
            .collect::<Option<Vec<_>>>()?;

        Some(Self {
            items: rows,
            total: currency.format(total(items)?),
            item_count: count(items),
            submission: serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string()),
        })
    }

    /// Create an empty cart.
    #[must_use]
    pub fn empty(currency: CurrencyCode) -> Self {
        Self {
            items: Vec::new(),
            total: currency.format(Decimal::ZERO),
            item_count: 0,
            submission: "[]".to_string(),
        }
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the "finalize purchase" action should be enabled.
    #[must_use]
    pub fn can_checkout(&self) -> bool {
        !self.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use storecart_core::{ItemName, ProductId, Quantity};

    use super::*;

    fn line(id: &str, name: &str, cents: i64, quantity: u32) -> LineItem {
        LineItem::new(
            ProductId::parse(id).unwrap(),
            ItemName::parse(name).unwrap(),
            Decimal::new(cents, 2),
            Quantity::new(quantity).unwrap(),
        )
    }

    #[test]
    fn test_empty_view() {
        let view = CartView::empty(CurrencyCode::EUR);
        assert!(view.is_empty());
        assert!(!view.can_checkout());
        assert_eq!(view.total, "0.00 €");
        assert_eq!(view.item_count, 0);
        assert_eq!(view.submission, "[]");
    }

    #[test]
    fn test_rows_and_totals() {
        let items = [line("p1", "Widget", 999, 3), line("p2", "Gadget", 500, 1)];
        let view = CartView::new(&items, CurrencyCode::EUR).unwrap();

        assert!(view.can_checkout());
        assert_eq!(view.item_count, 4);
        assert_eq!(view.total, "34.97 €");

        assert_eq!(
            view.items[0],
            CartItemView {
                index: 0,
                id: "p1".to_string(),
                name: "Widget".to_string(),
                quantity: 3,
                unit_price: "9.99 €".to_string(),
                line_price: "29.97 €".to_string(),
            }
        );
        assert_eq!(view.items[1].index, 1);
        assert_eq!(view.items[1].unit_price, "5.00 €");
    }

    #[test]
    fn test_submission_matches_stored_format() {
        let items = [line("p1", "Widget", 250, 2)];
        let view = CartView::new(&items, CurrencyCode::USD).unwrap();
        assert_eq!(
            view.submission,
            r#"[{"id":"p1","nombre":"Widget","precio":2.5,"cantidad":2}]"#
        );
        assert_eq!(view.items[0].line_price, "$5.00");
    }

    #[test]
    fn test_overflowing_line_is_not_rendered() {
        let mut item = line("p1", "Yacht", 0, 2);
        item.unit_price = Decimal::MAX;
        assert_eq!(CartView::new(&[item], CurrencyCode::EUR), None);
        assert_eq!(
            CartView::new(&[], CurrencyCode::EUR),
            Some(CartView::empty(CurrencyCode::EUR))
        );
    }
}
