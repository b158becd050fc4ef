use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::OrderId;

use crate::{Order, OrderItem, Result, StoreError, store::OrderStore};

/// In-memory order store implementation for testing.
///
/// Stores orders in a map keyed by order id and enforces the same
/// duplicate-key rejection and atomicity the PostgreSQL implementation
/// gets from its primary key and transaction.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
    next_item_id: Arc<AtomicI64>,
}

impl InMemoryOrderStore {
    /// Creates a new empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of orders stored.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Clears all orders.
    pub async fn clear(&self) {
        self.orders.write().await.clear();
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create_order(&self, order: Order) -> Result<Order> {
        let mut orders = self.orders.write().await;

        if orders.contains_key(&order.order_id) {
            return Err(StoreError::DuplicateOrder {
                order_id: order.order_id,
            });
        }

        let items: Vec<OrderItem> = order
            .items
            .iter()
            .map(|item| OrderItem {
                id: Some(self.next_item_id.fetch_add(1, Ordering::SeqCst) + 1),
                ..item.clone()
            })
            .collect();

        let persisted = Order { items, ..order };
        orders.insert(persisted.order_id, persisted.clone());

        Ok(persisted)
    }

    async fn get_order_by_id(&self, order_id: OrderId) -> Result<Option<Order>> {
        Ok(self.orders.read().await.get(&order_id).cloned())
    }

    async fn order_exists(&self, order_id: OrderId) -> Result<bool> {
        Ok(self.orders.read().await.contains_key(&order_id))
    }
}
