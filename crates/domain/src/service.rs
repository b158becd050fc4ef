//! Order service: validation pipeline and persistence orchestration.

use std::collections::HashMap;

use chrono::Utc;
use common::{OrderId, ProductId};
use store::{Order, OrderStore};

use crate::dto::{CreateOrderRequest, CreateOrderResponse};
use crate::error::OrderError;

/// Service for creating and fetching orders.
///
/// Runs a single linear validation pipeline per request and delegates
/// persistence to the store. Performs no retries and swallows nothing:
/// every failure propagates unchanged to the caller.
pub struct OrderService<S: OrderStore> {
    store: S,
}

impl<S: OrderStore> OrderService<S> {
    /// Creates a new order service backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates an order from a validated request.
    ///
    /// Pipeline order matters: the existence check runs first, so a
    /// duplicate id against an otherwise-invalid item set reports a
    /// conflict, never invalid input.
    #[tracing::instrument(skip(self, request), fields(order_id = %request.order_id))]
    pub async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<CreateOrderResponse, OrderError> {
        tracing::info!(
            customer_name = %request.customer_name.trim(),
            items = request.items.len(),
            "creating order"
        );

        if self.store.order_exists(request.order_id).await? {
            tracing::warn!("order already exists");
            return Err(OrderError::AlreadyExists(request.order_id));
        }

        if request.items.is_empty() {
            return Err(OrderError::NoItems);
        }

        let duplicates = duplicated_products(&request);
        if !duplicates.is_empty() {
            return Err(OrderError::DuplicateProducts(duplicates));
        }

        let created_at = request.created_at.unwrap_or_else(Utc::now);
        let order = Order::new(
            request.order_id,
            request.customer_name.trim(),
            created_at,
            request
                .items
                .iter()
                .map(|item| (item.product_id, item.quantity)),
        );

        let persisted = self.store.create_order(order).await?;

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(
            items = persisted.items.len(),
            "order created successfully"
        );

        Ok(CreateOrderResponse {
            order_id: persisted.order_id,
            message: "Order created successfully".to_string(),
            created_at: persisted.created_at,
        })
    }

    /// Fetches an order with its items, or `None` if absent.
    #[tracing::instrument(skip(self))]
    pub async fn get_order(&self, order_id: OrderId) -> Result<Option<Order>, OrderError> {
        Ok(self.store.get_order_by_id(order_id).await?)
    }
}

/// Product ids that appear more than once among the request items,
/// sorted so the resulting message is deterministic.
fn duplicated_products(request: &CreateOrderRequest) -> Vec<ProductId> {
    let mut counts: HashMap<ProductId, usize> = HashMap::new();
    for item in &request.items {
        *counts.entry(item.product_id).or_insert(0) += 1;
    }

    let mut duplicates: Vec<ProductId> = counts
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|(id, _)| id)
        .collect();
    duplicates.sort();
    duplicates
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use store::InMemoryOrderStore;

    use crate::dto::OrderItemRequest;

    use super::*;

    fn service() -> (OrderService<InMemoryOrderStore>, InMemoryOrderStore) {
        let store = InMemoryOrderStore::new();
        (OrderService::new(store.clone()), store)
    }

    fn request(items: Vec<(ProductId, i32)>) -> CreateOrderRequest {
        CreateOrderRequest {
            order_id: OrderId::new(),
            customer_name: "Alice".to_string(),
            items: items
                .into_iter()
                .map(|(product_id, quantity)| OrderItemRequest {
                    product_id,
                    quantity,
                })
                .collect(),
            created_at: None,
        }
    }

    #[tokio::test]
    async fn creates_order_and_echoes_id_and_timestamp() {
        let (service, store) = service();
        let created_at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let mut req = request(vec![(ProductId::new(), 2), (ProductId::new(), 3)]);
        req.created_at = Some(created_at);
        let order_id = req.order_id;

        let response = service.create_order(req).await.unwrap();

        assert_eq!(response.order_id, order_id);
        assert_eq!(response.message, "Order created successfully");
        assert_eq!(response.created_at, created_at);

        let persisted = store.get_order_by_id(order_id).await.unwrap().unwrap();
        assert_eq!(persisted.items.len(), 2);
        assert_eq!(persisted.total_quantity(), 5);
    }

    #[tokio::test]
    async fn defaults_created_at_to_now_when_absent() {
        let (service, _) = service();
        let before = Utc::now();

        let response = service
            .create_order(request(vec![(ProductId::new(), 1)]))
            .await
            .unwrap();

        assert!(response.created_at >= before);
        assert!(response.created_at <= Utc::now());
    }

    #[tokio::test]
    async fn trims_customer_name() {
        let (service, store) = service();
        let mut req = request(vec![(ProductId::new(), 1)]);
        req.customer_name = "  Alice  ".to_string();
        let order_id = req.order_id;

        service.create_order(req).await.unwrap();

        let persisted = store.get_order_by_id(order_id).await.unwrap().unwrap();
        assert_eq!(persisted.customer_name, "Alice");
    }

    #[tokio::test]
    async fn rejects_duplicate_order_id_with_conflict() {
        let (service, store) = service();
        let req = request(vec![(ProductId::new(), 1)]);
        let order_id = req.order_id;

        service.create_order(req.clone()).await.unwrap();
        let err = service.create_order(req).await.unwrap_err();

        assert!(matches!(err, OrderError::AlreadyExists(id) if id == order_id));
        assert_eq!(store.order_count().await, 1);
    }

    #[tokio::test]
    async fn conflict_wins_over_invalid_items() {
        let (service, _) = service();
        let req = request(vec![(ProductId::new(), 1)]);
        let order_id = req.order_id;
        service.create_order(req).await.unwrap();

        // Same id, empty item set: the existence check must fire first
        let replay = CreateOrderRequest {
            order_id,
            customer_name: "Alice".to_string(),
            items: vec![],
            created_at: None,
        };
        let err = service.create_order(replay).await.unwrap_err();

        assert!(matches!(err, OrderError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn rejects_empty_item_list_before_store_write() {
        let (service, store) = service();

        let err = service.create_order(request(vec![])).await.unwrap_err();

        assert!(matches!(err, OrderError::NoItems));
        assert_eq!(store.order_count().await, 0);
    }

    #[tokio::test]
    async fn rejects_duplicate_products_naming_each_id() {
        let (service, store) = service();
        let repeated = ProductId::new();
        let err = service
            .create_order(request(vec![
                (repeated, 1),
                (ProductId::new(), 2),
                (repeated, 3),
            ]))
            .await
            .unwrap_err();

        let OrderError::DuplicateProducts(ids) = err else {
            panic!("expected duplicate products error");
        };
        assert_eq!(ids, vec![repeated]);
        assert_eq!(store.order_count().await, 0);
    }

    #[tokio::test]
    async fn duplicate_report_is_sorted() {
        let (service, _) = service();
        let a = ProductId::new();
        let b = ProductId::new();
        let err = service
            .create_order(request(vec![(b, 1), (a, 1), (b, 1), (a, 1)]))
            .await
            .unwrap_err();

        let OrderError::DuplicateProducts(ids) = err else {
            panic!("expected duplicate products error");
        };
        let mut expected = vec![a, b];
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn get_order_returns_none_for_unknown_id() {
        let (service, _) = service();
        assert!(service.get_order(OrderId::new()).await.unwrap().is_none());
    }

    /// Store double that simulates an insert racing past the existence
    /// pre-check: `order_exists` always answers false, so the duplicate is
    /// only caught by the store-level key check.
    #[derive(Clone)]
    struct RacingStore {
        inner: InMemoryOrderStore,
    }

    #[async_trait::async_trait]
    impl store::OrderStore for RacingStore {
        async fn create_order(&self, order: Order) -> store::Result<Order> {
            self.inner.create_order(order).await
        }

        async fn get_order_by_id(&self, order_id: OrderId) -> store::Result<Option<Order>> {
            self.inner.get_order_by_id(order_id).await
        }

        async fn order_exists(&self, _order_id: OrderId) -> store::Result<bool> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn store_level_duplicate_propagates_as_storage_error() {
        let inner = InMemoryOrderStore::new();
        let service = OrderService::new(RacingStore {
            inner: inner.clone(),
        });
        let req = request(vec![(ProductId::new(), 1)]);

        service.create_order(req.clone()).await.unwrap();
        let err = service.create_order(req).await.unwrap_err();

        // The pre-check missed it, so the database-level rejection wins
        assert!(matches!(err, OrderError::Store(_)));
        assert_eq!(inner.order_count().await, 1);
    }
}
