//! Order endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::Deserialize;

use crate::db::repos::OrderRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::MutationResult;

/// Create order request
#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: i64,
}

/// Add order line request
#[derive(Deserialize)]
pub struct AddOrderLineRequest {
    pub product_id: i64,
    pub quantity: i64,
}

/// POST /orders - open an order for a customer
async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<MutationResult>), ApiError> {
    let result = OrderRepo::new(&state.pool).create(req.customer_id).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// POST /orders/{id}/products - add a product line at the current price
async fn add_order_line(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<i64>,
    Json(req): Json<AddOrderLineRequest>,
) -> Result<(StatusCode, Json<MutationResult>), ApiError> {
    let result = OrderRepo::new(&state.pool)
        .add_product(order_id, req.product_id, req.quantity)
        .await?;
    if result.changes == 0 {
        return Err(ApiError::NotFound {
            resource: "product",
            id: req.product_id.to_string(),
        });
    }

    Ok((StatusCode::CREATED, Json(result)))
}

/// Order routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/orders", post(create_order))
        .route("/orders/{id}/products", post(add_order_line))
}
