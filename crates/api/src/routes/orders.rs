//! Order creation and fetch endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use domain::{CreateOrderRequest, CreateOrderResponse, OrderResponse, OrderService};
use store::OrderStore;
use uuid::Uuid;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S: OrderStore> {
    pub order_service: OrderService<S>,
}

/// POST /orders — create a new order with its line items.
///
/// Field validation runs before the service is invoked; a failure here
/// answers 400 without touching the store.
#[tracing::instrument(skip(state, req), fields(order_id = %req.order_id))]
pub async fn create<S: OrderStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<CreateOrderResponse>), ApiError> {
    tracing::info!("received order creation request");

    req.validate()?;

    let response = state.order_service.create_order(req).await?;

    tracing::info!(order_id = %response.order_id, "order created");

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /orders/:id — fetch an order with its items.
#[tracing::instrument(skip(state))]
pub async fn get<S: OrderStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = Uuid::parse_str(&id)
        .map(common::OrderId::from_uuid)
        .map_err(|e| domain::OrderError::Validation(format!("Invalid order id {id}: {e}")))?;

    let order = state
        .order_service
        .get_order(order_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Order {id} not found")))?;

    Ok(Json(OrderResponse::from(order)))
}
