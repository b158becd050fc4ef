use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use common::{OrderId, ProductId};

use crate::{Order, OrderItem, Result, StoreError, store::OrderStore};

/// PostgreSQL-backed order store.
#[derive(Clone)]
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    /// Creates a new PostgreSQL order store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_item(row: PgRow) -> Result<OrderItem> {
        Ok(OrderItem {
            id: Some(row.try_get("id")?),
            product_id: ProductId::from_uuid(row.try_get::<Uuid, _>("product_id")?),
            quantity: row.try_get("quantity")?,
            order_id: OrderId::from_uuid(row.try_get::<Uuid, _>("order_id")?),
        })
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn create_order(&self, order: Order) -> Result<Order> {
        let order_id = order.order_id;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (order_id, customer_name, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(order_id.as_uuid())
        .bind(&order.customer_name)
        .bind(order.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            // A hit on the primary key means a concurrent or prior create won
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.constraint() == Some("orders_pkey")
            {
                return StoreError::DuplicateOrder { order_id };
            }
            StoreError::Database(e)
        })?;

        let mut persisted_items = Vec::with_capacity(order.items.len());
        for item in &order.items {
            let id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO order_items (product_id, quantity, order_id)
                VALUES ($1, $2, $3)
                RETURNING id
                "#,
            )
            .bind(item.product_id.as_uuid())
            .bind(item.quantity)
            .bind(order_id.as_uuid())
            .fetch_one(&mut *tx)
            .await?;

            persisted_items.push(OrderItem {
                id: Some(id),
                ..item.clone()
            });
        }

        tx.commit().await?;

        tracing::debug!(%order_id, items = persisted_items.len(), "order persisted");

        Ok(Order {
            items: persisted_items,
            ..order
        })
    }

    async fn get_order_by_id(&self, order_id: OrderId) -> Result<Option<Order>> {
        let header = sqlx::query(
            r#"
            SELECT order_id, customer_name, created_at
            FROM orders
            WHERE order_id = $1
            "#,
        )
        .bind(order_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        let Some(header) = header else {
            return Ok(None);
        };

        let item_rows = sqlx::query(
            r#"
            SELECT id, product_id, quantity, order_id
            FROM order_items
            WHERE order_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(order_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        let items = item_rows
            .into_iter()
            .map(Self::row_to_item)
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(Order {
            order_id: OrderId::from_uuid(header.try_get::<Uuid, _>("order_id")?),
            customer_name: header.try_get("customer_name")?,
            created_at: header.try_get::<DateTime<Utc>, _>("created_at")?,
            items,
        }))
    }

    async fn order_exists(&self, order_id: OrderId) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM orders WHERE order_id = $1)")
                .bind(order_id.as_uuid())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}
