//! Customer endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::db::repos::{
    ContactUpdate, Customer, CustomerOrderLine, CustomerRepo, CustomerWithOrders, NewCustomer,
};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{MutationResult, PasswordHash};

/// Create customer request
#[derive(Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub password: String,
}

/// Update customer query (`?email=&phone=&address=`)
#[derive(Deserialize)]
pub struct UpdateCustomerQuery {
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// GET /customers - list all customers
async fn list_customers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    let customers = CustomerRepo::new(&state.pool).list().await?;
    Ok(Json(customers))
}

/// POST /customers - register a customer
async fn create_customer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<MutationResult>), ApiError> {
    let password = req.password;
    let password_hash = tokio::task::spawn_blocking(move || PasswordHash::new(&password))
        .await
        .map_err(|e| ApiError::Internal {
            message: format!("password hashing task failed: {}", e),
        })??;

    let customer = NewCustomer {
        name: req.name,
        email: req.email,
        phone: req.phone,
        address: req.address,
        password_hash,
    };
    let result = CustomerRepo::new(&state.pool).create(&customer).await?;

    Ok((StatusCode::CREATED, Json(result)))
}

/// GET /customers/{id} - customer with their orders
async fn get_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<CustomerWithOrders>, ApiError> {
    let customer = CustomerRepo::new(&state.pool)
        .get_with_orders(id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "customer",
            id: id.to_string(),
        })?;

    Ok(Json(customer))
}

/// GET /customers/{id}/orders - ordered products for a customer
async fn list_customer_orders(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<CustomerOrderLine>>, ApiError> {
    let lines = CustomerRepo::new(&state.pool).order_lines(id).await?;
    Ok(Json(lines))
}

/// PUT /customers/{id}?email=&phone=&address= - replace contact details
async fn update_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(params): Query<UpdateCustomerQuery>,
) -> Result<(StatusCode, Json<MutationResult>), ApiError> {
    let update = ContactUpdate {
        email: params.email,
        phone: params.phone,
        address: params.address,
    };

    let result = CustomerRepo::new(&state.pool)
        .update_contact(id, &update)
        .await?;
    if result.changes == 0 {
        return Err(ApiError::NotFound {
            resource: "customer",
            id: id.to_string(),
        });
    }

    Ok((StatusCode::CREATED, Json(result)))
}

/// Customer routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route("/customers/{id}", get(get_customer).put(update_customer))
        .route("/customers/{id}/orders", get(list_customer_orders))
}
