//! Manufacturer and category endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Deserialize;

use crate::db::repos::{Category, CategoryRepo, Manufacturer, ManufacturerRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::MutationResult;

/// Create manufacturer or category request
#[derive(Deserialize)]
pub struct CreateNamedRequest {
    pub name: String,
}

/// GET /manufacturers
async fn list_manufacturers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Manufacturer>>, ApiError> {
    let manufacturers = ManufacturerRepo::new(&state.pool).list().await?;
    Ok(Json(manufacturers))
}

/// POST /manufacturers
async fn create_manufacturer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateNamedRequest>,
) -> Result<(StatusCode, Json<MutationResult>), ApiError> {
    let result = ManufacturerRepo::new(&state.pool).create(&req.name).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// GET /categories
async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = CategoryRepo::new(&state.pool).list().await?;
    Ok(Json(categories))
}

/// POST /categories
async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateNamedRequest>,
) -> Result<(StatusCode, Json<MutationResult>), ApiError> {
    let result = CategoryRepo::new(&state.pool).create(&req.name).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// Catalog routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/manufacturers",
            get(list_manufacturers).post(create_manufacturer),
        )
        .route("/categories", get(list_categories).post(create_category))
}
