//! CLI command implementations.
//!
//! - `items` - Cart mutations driven by raw command-line input
//! - `show` - Read-only output (table, count, total, checkout payload)

pub mod items;
pub mod show;
