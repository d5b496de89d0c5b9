//! Integration tests for storecart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p storecart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_properties` - Behaviour of the cart operations end to end
//! - `persistence` - File-backed storage, stored entry formats, storage failures
//!
//! This library holds the shared test doubles.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use rust_decimal::Decimal;
use storecart::{CartStore, DurableStore, MemoryStore, StoreError};

/// Price from a decimal literal such as `"9.99"`.
///
/// # Panics
///
/// Panics if `s` is not a decimal number.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// Counts "cart changed" notifications.
#[derive(Debug, Clone, Default)]
pub struct ChangeCounter(Arc<AtomicUsize>);

impl ChangeCounter {
    /// Subscribe a new counter to `cart`.
    pub fn attach<S: DurableStore>(cart: &mut CartStore<S>) -> Self {
        let counter = Self::default();
        let hits = Arc::clone(&counter.0);
        cart.subscribe(move || {
            hits.fetch_add(1, Ordering::SeqCst);
        });
        counter
    }

    /// Notifications received so far.
    #[must_use]
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// A memory store whose reads and writes can be switched off, like local
/// storage disabled by the browser.
#[derive(Debug, Default)]
pub struct SwitchableStore {
    inner: MemoryStore,
    disabled: AtomicBool,
}

impl SwitchableStore {
    /// Create an enabled, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail (`true`) or succeed again (`false`).
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::SeqCst);
    }

    /// Raw stored value, bypassing the switch.
    ///
    /// # Panics
    ///
    /// Panics if the inner store fails.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.get(key).unwrap()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.disabled.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("storage disabled".to_string()));
        }
        Ok(())
    }
}

impl DurableStore for SwitchableStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check()?;
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check()?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.check()?;
        self.inner.remove(key)
    }
}
