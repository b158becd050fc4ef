use chrono::{DateTime, Utc};
use common::{OrderId, ProductId};
use serde::{Deserialize, Serialize};

/// A persisted order: header fields plus its owned line items.
///
/// The order id is caller-supplied; `created_at` is set once at creation
/// and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub customer_name: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

/// A line item within an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Store-assigned surrogate key; `None` until the item is persisted.
    pub id: Option<i64>,
    pub product_id: ProductId,
    pub quantity: i32,
    pub order_id: OrderId,
}

impl Order {
    /// Builds an unpersisted order, propagating the order id into every item.
    pub fn new(
        order_id: OrderId,
        customer_name: impl Into<String>,
        created_at: DateTime<Utc>,
        items: impl IntoIterator<Item = (ProductId, i32)>,
    ) -> Self {
        Self {
            order_id,
            customer_name: customer_name.into(),
            created_at,
            items: items
                .into_iter()
                .map(|(product_id, quantity)| OrderItem {
                    id: None,
                    product_id,
                    quantity,
                    order_id,
                })
                .collect(),
        }
    }

    /// Total quantity across all line items.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i64::from(i.quantity)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_propagates_order_id_into_items() {
        let order_id = OrderId::new();
        let order = Order::new(
            order_id,
            "Alice",
            Utc::now(),
            [(ProductId::new(), 2), (ProductId::new(), 3)],
        );

        assert_eq!(order.items.len(), 2);
        assert!(order.items.iter().all(|i| i.order_id == order_id));
        assert!(order.items.iter().all(|i| i.id.is_none()));
    }

    #[test]
    fn total_quantity_sums_items() {
        let order = Order::new(
            OrderId::new(),
            "Bob",
            Utc::now(),
            [(ProductId::new(), 2), (ProductId::new(), 3)],
        );
        assert_eq!(order.total_quantity(), 5);
    }
}
