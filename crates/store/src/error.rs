use common::OrderId;
use thiserror::Error;

/// Errors that can occur when interacting with the order store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An order with the same id already exists.
    ///
    /// Raised when the insert hits the orders primary key, which also covers
    /// the race where two concurrent creates pass the existence pre-check.
    #[error("Order {order_id} already exists in the store")]
    DuplicateOrder { order_id: OrderId },

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for order store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
