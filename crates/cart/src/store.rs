//! Cart operations over a durable key-value slot.
//!
//! The cart is never cached: each operation reads the serialized cart back
//! from the store, and each mutation rewrites the whole cart before returning.
//! Nothing is reported to the caller as an error. Unreadable carts count as
//! empty, invalid arguments are ignored, and store failures are logged and
//! leave the cart as it was.
//!
//! Two operations in different processes sharing one store race with
//! last-write-wins semantics.

use rust_decimal::Decimal;
use storecart_core::{CurrencyCode, LineItem, Price, Quantity};
use tracing::instrument;

use crate::config::CartConfig;
use crate::error::Result;
use crate::events::{Listeners, SubscriptionId};
use crate::input::AddItemInput;
use crate::storage::DurableStore;
use crate::view::CartView;

/// Key the cart is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "carrito";

/// Serialized form of an empty cart.
const EMPTY_CART: &str = "[]";

/// What the store holds under the cart key.
enum Stored {
    Absent,
    Items(Vec<LineItem>),
    Malformed,
}

/// A shopping cart persisted to `S`.
#[derive(Debug)]
pub struct CartStore<S> {
    store: S,
    key: String,
    currency: CurrencyCode,
    listeners: Listeners,
}

impl<S: DurableStore> CartStore<S> {
    /// Create a cart under the default key, displaying euros.
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: DEFAULT_STORAGE_KEY.to_string(),
            currency: CurrencyCode::default(),
            listeners: Listeners::new(),
        }
    }

    /// Create a cart using the configured key and currency.
    pub fn with_config(store: S, config: &CartConfig) -> Self {
        Self::new(store)
            .with_key(config.storage_key.clone())
            .with_currency(config.currency)
    }

    /// Store the cart under `key`.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Display prices in `currency`.
    #[must_use]
    pub fn with_currency(mut self, currency: CurrencyCode) -> Self {
        self.currency = currency;
        self
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Key the cart is stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Display currency.
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Register a "cart changed" listener.
    pub fn subscribe(&mut self, listener: impl Fn() + Send + Sync + 'static) -> SubscriptionId {
        self.listeners.subscribe(listener)
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add `quantity` units (one if `None`) of a product.
    ///
    /// Merges into the existing line for `id` or appends a new line. Returns
    /// the total item count afterwards. Invalid arguments leave the cart
    /// unchanged and return the current count.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn add_item(
        &self,
        id: &str,
        name: &str,
        unit_price: Decimal,
        quantity: Option<i64>,
    ) -> u64 {
        match AddItemInput::new(id, name, unit_price, quantity) {
            Ok(input) => self.add(input),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring invalid add-to-cart request");
                self.total_count()
            }
        }
    }

    /// Add an already validated request. Returns the total item count.
    #[instrument(skip(self, input), fields(key = %self.key, id = %input.id))]
    pub fn add(&self, input: AddItemInput) -> u64 {
        let updated = self.mutate("add", |items| {
            if let Some(existing) = items.iter_mut().find(|item| item.id == input.id) {
                let Some(quantity) = existing.quantity.checked_add(input.quantity) else {
                    tracing::warn!(id = %input.id, "Quantity overflow, ignoring add");
                    return false;
                };
                existing.quantity = quantity;
                tracing::debug!(id = %input.id, quantity = %quantity, "Existing line updated");
            } else {
                tracing::debug!(id = %input.id, quantity = %input.quantity, "New line added");
                items.push(LineItem::new(
                    input.id,
                    input.name,
                    input.unit_price,
                    input.quantity,
                ));
            }
            true
        });

        updated.map_or_else(|| self.total_count(), |items| count(&items))
    }

    /// Delete the line at `index`, shifting later lines up.
    ///
    /// Returns whether the cart changed.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn remove_item(&self, index: usize) -> bool {
        self.mutate("remove", |items| {
            if index >= items.len() {
                return false;
            }
            let removed = items.remove(index);
            tracing::debug!(id = %removed.id, "Line removed");
            true
        })
        .is_some()
    }

    /// Set the quantity of the line at `index`.
    ///
    /// Quantities below 1 are rejected; the caller should restore its input
    /// from [`items`](Self::items). Returns whether the cart changed.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn set_quantity(&self, index: usize, quantity: i64) -> bool {
        let quantity = match Quantity::from_signed(quantity) {
            Ok(quantity) => quantity,
            Err(e) => {
                tracing::warn!(error = %e, "Rejected quantity change");
                return false;
            }
        };

        self.update_line(index, "set_quantity", |_| Some(quantity))
    }

    /// Add one unit to the line at `index`.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn increment_quantity(&self, index: usize) -> bool {
        self.update_line(index, "increment", Quantity::increment)
    }

    /// Remove one unit from the line at `index`, never going below 1.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn decrement_quantity(&self, index: usize) -> bool {
        self.update_line(index, "decrement", Quantity::decrement)
    }

    /// Delete the stored cart entirely.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn clear(&self) -> bool {
        match self.store.remove(&self.key) {
            Ok(()) => {
                tracing::debug!("Cart cleared");
                self.listeners.notify();
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to clear cart");
                false
            }
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Sum of all quantities. Never repairs storage.
    pub fn total_count(&self) -> u64 {
        count(&self.load_for_read())
    }

    /// Sum of line subtotals at full precision; display rounds to cents.
    pub fn total_price(&self) -> Price {
        // Loaded carts always have a total; see `read`.
        let amount = total(&self.load_for_read()).unwrap_or(Decimal::ZERO);
        Price::new(amount, self.currency)
    }

    /// JSON encoding of the cart for the checkout form.
    pub fn serialize_for_submission(&self) -> String {
        encode(&self.load_for_read()).unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to encode cart for submission");
            EMPTY_CART.to_string()
        })
    }

    /// The cart's lines, repairing a malformed stored entry.
    pub fn items(&self) -> Vec<LineItem> {
        self.load_for_render()
    }

    /// Render-ready cart table, repairing a malformed stored entry.
    pub fn view(&self) -> CartView {
        CartView::new(&self.load_for_render(), self.currency)
            .unwrap_or_else(|| CartView::empty(self.currency))
    }

    // =========================================================================
    // Load / persist
    // =========================================================================

    fn read(&self) -> Result<Stored> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Stored::Absent);
        };

        match serde_json::from_str::<Vec<LineItem>>(&raw) {
            Ok(items) if total(&items).is_some() => Ok(Stored::Items(items)),
            Ok(_) => {
                tracing::warn!(
                    key = %self.key,
                    "Stored cart total overflows, treating as empty"
                );
                Ok(Stored::Malformed)
            }
            Err(e) => {
                tracing::warn!(
                    key = %self.key,
                    error = %e,
                    "Stored cart is malformed, treating as empty"
                );
                Ok(Stored::Malformed)
            }
        }
    }

    /// Load without touching the store.
    fn load_for_read(&self) -> Vec<LineItem> {
        match self.read() {
            Ok(Stored::Items(items)) => items,
            Ok(Stored::Absent | Stored::Malformed) => Vec::new(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read cart");
                Vec::new()
            }
        }
    }

    /// Load, resetting a malformed entry to an empty cart.
    fn load_for_render(&self) -> Vec<LineItem> {
        match self.load_and_repair() {
            Ok(items) => items,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load cart");
                Vec::new()
            }
        }
    }

    fn load_and_repair(&self) -> Result<Vec<LineItem>> {
        match self.read()? {
            Stored::Items(items) => Ok(items),
            Stored::Absent => Ok(Vec::new()),
            Stored::Malformed => {
                self.store.set(&self.key, EMPTY_CART)?;
                tracing::info!(key = %self.key, "Reset malformed cart entry");
                Ok(Vec::new())
            }
        }
    }

    fn persist(&self, items: &[LineItem]) -> Result<()> {
        let encoded = encode(items)?;
        self.store.set(&self.key, &encoded)?;
        Ok(())
    }

    /// Load, apply `change`, persist and notify.
    ///
    /// `change` returns `false` to leave the cart untouched. Returns the
    /// persisted cart when something was written.
    fn mutate(
        &self,
        operation: &'static str,
        change: impl FnOnce(&mut Vec<LineItem>) -> bool,
    ) -> Option<Vec<LineItem>> {
        let mut items = match self.load_and_repair() {
            Ok(items) => items,
            Err(e) => {
                tracing::error!(operation, error = %e, "Failed to load cart");
                return None;
            }
        };

        if !change(&mut items) {
            tracing::debug!(operation, "Cart unchanged");
            return None;
        }

        if total(&items).is_none() {
            tracing::warn!(operation, "Cart total would overflow, change discarded");
            return None;
        }

        if let Err(e) = self.persist(&items) {
            tracing::error!(operation, error = %e, "Failed to save cart");
            return None;
        }

        tracing::debug!(operation, lines = items.len(), count = count(&items), "Cart saved");
        self.listeners.notify();
        Some(items)
    }

    /// Replace the quantity of the line at `index` with `next(current)`.
    ///
    /// Writing back the current quantity still persists and notifies.
    fn update_line(
        &self,
        index: usize,
        operation: &'static str,
        next: impl FnOnce(Quantity) -> Option<Quantity>,
    ) -> bool {
        self.mutate(operation, |items| {
            let Some(item) = items.get_mut(index) else {
                return false;
            };
            let Some(quantity) = next(item.quantity) else {
                return false;
            };
            item.quantity = quantity;
            true
        })
        .is_some()
    }
}

pub(crate) fn count(items: &[LineItem]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity.get())).sum()
}

/// Sum of line subtotals, `None` on overflow.
pub(crate) fn total(items: &[LineItem]) -> Option<Decimal> {
    items
        .iter()
        .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.subtotal()?))
}

fn encode(items: &[LineItem]) -> Result<String> {
    Ok(serde_json::to_string(items)?)
}
