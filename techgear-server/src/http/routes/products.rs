//! Product endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::db::repos::{
    CategoryProduct, CategoryStats, NewProduct, Product, ProductDetail, ProductRepo,
    ProductUpdate,
};
use crate::http::error::{ApiError, ID_MISSING, SEARCH_QUERY_MISSING};
use crate::http::server::AppState;
use crate::models::MutationResult;

/// Create product request
#[derive(Deserialize)]
pub struct CreateProductRequest {
    pub manufacturer_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
}

/// Update product query (`?name=&description=&price=&stock=`)
#[derive(Deserialize)]
pub struct UpdateProductQuery {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub name: Option<String>,
}

#[derive(Deserialize)]
pub struct DeleteQuery {
    pub id: Option<String>,
}

/// Link product to category request
#[derive(Deserialize)]
pub struct AddCategoryRequest {
    pub category_id: i64,
}

/// GET /products - list all products with manufacturer and categories
async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProductDetail>>, ApiError> {
    let products = ProductRepo::new(&state.pool).list_detailed().await?;
    Ok(Json(products))
}

/// POST /products - create a product
async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<MutationResult>), ApiError> {
    let product = NewProduct {
        manufacturer_id: req.manufacturer_id,
        name: req.name,
        description: req.description,
        price: req.price,
        stock_quantity: req.stock,
    };
    let result = ProductRepo::new(&state.pool).create(&product).await?;

    Ok((StatusCode::CREATED, Json(result)))
}

/// DELETE /products?id= - delete a product
async fn delete_product(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DeleteQuery>,
) -> Result<Json<MutationResult>, ApiError> {
    let id = params
        .id
        .as_deref()
        .and_then(|id| id.trim().parse::<i64>().ok())
        .ok_or(ApiError::MissingParameter {
            message: ID_MISSING,
        })?;

    let result = ProductRepo::new(&state.pool).delete(id).await?;
    if result.changes == 0 {
        return Err(ApiError::NotFound {
            resource: "product",
            id: id.to_string(),
        });
    }

    Ok(Json(result))
}

/// GET /products/search?name= - exact name match
async fn search_products(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Product>, ApiError> {
    let name = params
        .name
        .filter(|name| !name.is_empty())
        .ok_or(ApiError::MissingParameter {
            message: SEARCH_QUERY_MISSING,
        })?;

    let product = ProductRepo::new(&state.pool)
        .find_by_name(&name)
        .await?
        .ok_or(ApiError::NotFound {
            resource: "product",
            id: name,
        })?;

    Ok(Json(product))
}

/// GET /products/{id} - get a single product
async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ProductDetail>, ApiError> {
    let product = ProductRepo::new(&state.pool)
        .get_detailed(id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "product",
            id: id.to_string(),
        })?;

    Ok(Json(product))
}

/// PUT /products/{id}?name=&description=&price=&stock= - replace product fields
async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(params): Query<UpdateProductQuery>,
) -> Result<(StatusCode, Json<MutationResult>), ApiError> {
    let update = ProductUpdate {
        name: params.name,
        description: params.description,
        price: params.price,
        stock_quantity: params.stock,
    };

    let result = ProductRepo::new(&state.pool).update(id, &update).await?;
    if result.changes == 0 {
        return Err(ApiError::NotFound {
            resource: "product",
            id: id.to_string(),
        });
    }

    Ok((StatusCode::CREATED, Json(result)))
}

/// GET /products/stats/{id} - product count and average price for a category
async fn category_stats(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<i64>,
) -> Result<Json<CategoryStats>, ApiError> {
    let stats = ProductRepo::new(&state.pool)
        .category_stats(category_id)
        .await?;
    Ok(Json(stats))
}

/// GET /products/category/{id} - products in a category
async fn list_by_category(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<i64>,
) -> Result<Json<Vec<CategoryProduct>>, ApiError> {
    let products = ProductRepo::new(&state.pool)
        .list_by_category(category_id)
        .await?;
    Ok(Json(products))
}

/// POST /products/{id}/categories - link a product to a category
async fn add_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<AddCategoryRequest>,
) -> Result<(StatusCode, Json<MutationResult>), ApiError> {
    let result = ProductRepo::new(&state.pool)
        .add_category(id, req.category_id)
        .await?;

    Ok((StatusCode::CREATED, Json(result)))
}

/// Product routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/products",
            get(list_products).post(create_product).delete(delete_product),
        )
        .route("/products/search", get(search_products))
        .route("/products/stats/{id}", get(category_stats))
        .route("/products/category/{id}", get(list_by_category))
        .route("/products/{id}", get(get_product).put(update_product))
        .route("/products/{id}/categories", post(add_category))
}
