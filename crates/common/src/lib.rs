//! Shared identifier types used across the orders API crates.

pub mod types;

pub use types::{OrderId, ProductId};
