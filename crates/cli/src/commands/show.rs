//! Read-only cart output on stdout.

use std::fmt::Write as _;

use storecart::{CartStore, CartView, DurableStore};

/// Print the cart table.
pub fn table<S: DurableStore>(cart: &CartStore<S>) {
    let rendered = render_table(&cart.view());

    #[allow(clippy::print_stdout)]
    {
        print!("{rendered}");
    }
}

/// Print the total item count.
pub fn count<S: DurableStore>(cart: &CartStore<S>) {
    let count = cart.total_count();

    #[allow(clippy::print_stdout)]
    {
        println!("{count}");
    }
}

/// Print the total price.
pub fn total<S: DurableStore>(cart: &CartStore<S>) {
    let total = cart.total_price();

    #[allow(clippy::print_stdout)]
    {
        println!("{total}");
    }
}

/// Print the checkout payload.
pub fn export<S: DurableStore>(cart: &CartStore<S>) {
    let payload = cart.serialize_for_submission();

    #[allow(clippy::print_stdout)]
    {
        println!("{payload}");
    }
}

/// Render a cart as a fixed-width text table.
pub fn render_table(view: &CartView) -> String {
    let mut out = String::new();

    if view.is_empty() {
        let _ = writeln!(out, "The cart is empty.");
        let _ = writeln!(out, "Total: {}", view.total);
        return out;
    }

    let name_width = view
        .items
        .iter()
        .map(|row| row.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Product".len());

    let _ = writeln!(
        out,
        "{:>3}  {:<name_width$}  {:>12}  {:>5}  {:>12}",
        "#", "Product", "Unit price", "Qty", "Subtotal"
    );
    for row in &view.items {
        let _ = writeln!(
            out,
            "{:>3}  {:<name_width$}  {:>12}  {:>5}  {:>12}",
            row.index, row.name, row.unit_price, row.quantity, row.line_price
        );
    }
    let _ = writeln!(out, "Total: {} ({} items)", view.total, view.item_count);

    out
}
