//! Request and response shapes for the order endpoints.

use chrono::{DateTime, Utc};
use common::{OrderId, ProductId};
use serde::{Deserialize, Serialize};
use store::Order;

use crate::error::OrderError;

/// Maximum customer name length after trimming.
pub const MAX_CUSTOMER_NAME_LEN: usize = 100;

/// Body of `POST /orders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub order_id: OrderId,
    pub customer_name: String,
    pub items: Vec<OrderItemRequest>,
    /// Trusted verbatim when supplied; defaults to request time otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemRequest {
    pub product_id: ProductId,
    pub quantity: i32,
}

impl CreateOrderRequest {
    /// Field-level validation, run at the endpoint before the service is
    /// invoked: name bounds and per-item quantity range. Structural rules
    /// (empty item list, duplicate products) belong to the service pipeline.
    pub fn validate(&self) -> Result<(), OrderError> {
        let name = self.customer_name.trim();
        if name.is_empty() {
            return Err(OrderError::Validation(
                "CustomerName must be between 1 and 100 characters".to_string(),
            ));
        }
        if name.chars().count() > MAX_CUSTOMER_NAME_LEN {
            return Err(OrderError::Validation(
                "CustomerName must be between 1 and 100 characters".to_string(),
            ));
        }
        for item in &self.items {
            if item.quantity < 1 {
                return Err(OrderError::Validation(format!(
                    "Quantity must be at least 1 for product {}",
                    item.product_id
                )));
            }
        }
        Ok(())
    }
}

/// Body of a successful `POST /orders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub order_id: OrderId,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `GET /orders/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub order_id: OrderId,
    pub customer_name: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItemResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemResponse {
    pub product_id: ProductId,
    pub quantity: i32,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            order_id: order.order_id,
            customer_name: order.customer_name,
            created_at: order.created_at,
            items: order
                .items
                .into_iter()
                .map(|item| OrderItemResponse {
                    product_id: item.product_id,
                    quantity: item.quantity,
                })
                .collect(),
        }
    }
}
