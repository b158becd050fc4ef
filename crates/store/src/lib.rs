//! Order persistence layer.
//!
//! Defines the entity model ([`Order`], [`OrderItem`]), the [`OrderStore`]
//! trait, and two implementations: [`PostgresOrderStore`] for production and
//! [`InMemoryOrderStore`] for tests. Creating an order writes the order row
//! and all item rows in one transaction; the caller-supplied order id is the
//! primary key, so the database is the final arbiter for duplicates.

pub mod error;
pub mod memory;
pub mod order;
pub mod postgres;
pub mod store;

pub use error::{Result, StoreError};
pub use memory::InMemoryOrderStore;
pub use order::{Order, OrderItem};
pub use postgres::PostgresOrderStore;
pub use store::OrderStore;
