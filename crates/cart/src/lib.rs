//! storecart - shopping cart persisted to a local key-value slot.
//!
//! The [`CartStore`] owns no long-lived state: every operation re-reads the
//! cart from its injected [`DurableStore`], and every mutation writes the whole
//! cart back before notifying listeners.
//!
//! # Modules
//!
//! - [`store`] - Cart operations (add, remove, quantity changes, clear, reads)
//! - [`storage`] - Durable key-value slot trait with memory and file backends
//! - [`events`] - "cart changed" listener registry
//! - [`view`] - Render-ready cart table
//! - [`input`] - Parsing of raw form input from cart controls
//! - [`config`] - Environment configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod events;
pub mod input;
pub mod storage;
pub mod store;
pub mod view;

pub use config::{CartConfig, ConfigError};
pub use error::CartError;
pub use events::SubscriptionId;
pub use input::AddItemInput;
pub use storage::{DurableStore, FileStore, MemoryStore, StoreError};
pub use store::{CartStore, DEFAULT_STORAGE_KEY};
pub use view::{CartItemView, CartView};
