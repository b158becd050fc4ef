//! Order domain error types.

use common::{OrderId, ProductId};
use store::StoreError;
use thiserror::Error;

/// Errors that can occur while creating or fetching an order.
///
/// Business rejections are values, not exceptions: the HTTP layer pattern
/// matches on the variant to pick a status code.
#[derive(Debug, Error)]
pub enum OrderError {
    /// An order with this id already exists (conflict).
    #[error("Order with ID {0} already exists")]
    AlreadyExists(OrderId),

    /// The request carried no line items.
    #[error("Order must contain at least one item")]
    NoItems,

    /// One or more product ids appear more than once among the items.
    #[error("Duplicate products found: {}", format_ids(.0))]
    DuplicateProducts(Vec<ProductId>),

    /// A request field failed validation before the pipeline ran.
    #[error("{0}")]
    Validation(String),

    /// A failure from the durable store, propagated unchanged.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

fn format_ids(ids: &[ProductId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
