use async_trait::async_trait;
use common::OrderId;

use crate::{Order, Result};

/// Persistence contract for orders.
///
/// All three operations touch the durable store and surface failures
/// immediately; none retry internally.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists the order and all its items in one atomic unit of work.
    ///
    /// On any failure the unit of work is rolled back in full and the error
    /// propagates unchanged; no partial writes are visible. A primary-key
    /// collision on the order id surfaces as [`StoreError::DuplicateOrder`].
    ///
    /// Returns the persisted order with store-assigned item ids populated.
    ///
    /// [`StoreError::DuplicateOrder`]: crate::StoreError::DuplicateOrder
    async fn create_order(&self, order: Order) -> Result<Order>;

    /// Fetches an order together with its items, or `None` if absent.
    async fn get_order_by_id(&self, order_id: OrderId) -> Result<Option<Order>>;

    /// Lightweight existence check, independent of full retrieval.
    ///
    /// Used to short-circuit duplicate detection before the entity graph is
    /// constructed; the create path does not rely on it for correctness.
    async fn order_exists(&self, order_id: OrderId) -> Result<bool>;
}
