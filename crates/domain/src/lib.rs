//! Domain layer for the orders API.
//!
//! This crate provides:
//! - Request/response DTOs with field validation
//! - The `OrderError` taxonomy (conflict / invalid input / storage)
//! - `OrderService`, the linear validation-and-persistence pipeline

pub mod dto;
pub mod error;
pub mod service;

pub use dto::{CreateOrderRequest, CreateOrderResponse, OrderItemRequest, OrderResponse};
pub use error::OrderError;
pub use service::OrderService;
