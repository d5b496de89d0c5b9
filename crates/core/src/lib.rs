//! storecart Core - Shared cart types.
//!
//! This crate provides the types used across all storecart components:
//! - `storecart` - Cart store, durable storage and view model
//! - `cli` - Command-line front end driving a file-backed cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! logging. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product ids, names, quantities, prices
//!   and the persisted line item record

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
