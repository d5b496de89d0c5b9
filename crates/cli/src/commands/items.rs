//! Cart mutations.
//!
//! Arguments arrive as raw strings, like form input from the storefront's
//! cart controls. Input that does not parse is logged and ignored; the cart
//! is left as it was.

use storecart::input::{AddItemInput, parse_index, parse_quantity};
use storecart::{CartStore, DurableStore};
use tracing::{info, warn};

/// Add a product. Returns the total item count afterwards.
pub fn add<S: DurableStore>(
    cart: &CartStore<S>,
    id: &str,
    name: &str,
    price: &str,
    quantity: Option<&str>,
) -> u64 {
    match AddItemInput::parse(id, name, price, quantity) {
        Ok(input) => {
            let units = input.quantity;
            let count = cart.add(input);
            info!(count, "{units} unit(s) of {name} added to the cart");
            count
        }
        Err(e) => {
            warn!(error = %e, "Product data incomplete or invalid, nothing added");
            cart.total_count()
        }
    }
}

/// Remove the line at `index`.
pub fn remove<S: DurableStore>(cart: &CartStore<S>, index: &str) -> bool {
    let Some(index) = parse_index(index) else {
        warn!(index, "Invalid row index");
        return false;
    };
    report(cart, cart.remove_item(index), "Product removed from the cart")
}

/// Set the quantity of the line at `index`.
pub fn set<S: DurableStore>(cart: &CartStore<S>, index: &str, quantity: &str) -> bool {
    let Some(index) = parse_index(index) else {
        warn!(index, "Invalid row index");
        return false;
    };
    let Some(quantity) = parse_quantity(quantity) else {
        warn!(quantity, "Invalid quantity");
        return false;
    };
    report(cart, cart.set_quantity(index, quantity), "Quantity updated")
}

/// Add one unit to the line at `index`.
pub fn increment<S: DurableStore>(cart: &CartStore<S>, index: &str) -> bool {
    let Some(index) = parse_index(index) else {
        warn!(index, "Invalid row index");
        return false;
    };
    report(cart, cart.increment_quantity(index), "Quantity increased")
}

/// Remove one unit from the line at `index`.
pub fn decrement<S: DurableStore>(cart: &CartStore<S>, index: &str) -> bool {
    let Some(index) = parse_index(index) else {
        warn!(index, "Invalid row index");
        return false;
    };
    report(cart, cart.decrement_quantity(index), "Quantity decreased")
}

/// Empty the cart.
pub fn clear<S: DurableStore>(cart: &CartStore<S>) -> bool {
    report(cart, cart.clear(), "Cart emptied")
}

fn report<S: DurableStore>(cart: &CartStore<S>, changed: bool, message: &str) -> bool {
    if changed {
        info!(count = cart.total_count(), "{message}");
    } else {
        info!("Cart unchanged");
    }
    changed
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use storecart::MemoryStore;

    use super::*;

    #[test]
    fn test_add_parses_form_input() {
        let cart = CartStore::new(MemoryStore::new());

        assert_eq!(add(&cart, "p1", "Widget", "9.99", Some("2")), 2);
        assert_eq!(add(&cart, "p1", "Widget", "9.99", None), 3);
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_add_invalid_input_is_ignored() {
        let cart = CartStore::new(MemoryStore::new());
        add(&cart, "p1", "Widget", "9.99", None);

        assert_eq!(add(&cart, "p2", "Gadget", "cheap", None), 1);
        assert_eq!(add(&cart, "p2", "Gadget", "5", Some("lots")), 1);
        assert_eq!(add(&cart, "", "Gadget", "5", None), 1);
    }

    #[test]
    fn test_row_commands() {
        let cart = CartStore::new(MemoryStore::new());
        add(&cart, "p1", "Widget", "9.99", None);
        add(&cart, "p2", "Gadget", "5.00", None);

        assert!(increment(&cart, "1"));
        assert!(set(&cart, "0", "4"));
        assert!(decrement(&cart, "0"));
        assert_eq!(cart.total_count(), 5);

        assert!(!set(&cart, "0", "0"));
        assert!(!set(&cart, "0", "many"));
        assert!(!remove(&cart, "x"));
        assert!(!remove(&cart, "9"));

        assert!(remove(&cart, "0"));
        assert_eq!(cart.total_count(), 2);

        assert!(clear(&cart));
        assert_eq!(cart.total_count(), 0);
    }
}
