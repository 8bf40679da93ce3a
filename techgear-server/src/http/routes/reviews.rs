//! Review endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::db::repos::{NewReview, Review, ReviewRepo, ReviewStats};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::MutationResult;

/// Create review request
#[derive(Deserialize)]
pub struct CreateReviewRequest {
    pub product_id: i64,
    pub customer_id: i64,
    pub rating: i64,
    pub comment: Option<String>,
}

/// GET /reviews - list all reviews
async fn list_reviews(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Review>>, ApiError> {
    let reviews = ReviewRepo::new(&state.pool).list().await?;
    Ok(Json(reviews))
}

/// POST /reviews - add a review; ratings outside 1..=5 are rejected by the schema
async fn create_review(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<MutationResult>), ApiError> {
    let review = NewReview {
        product_id: req.product_id,
        customer_id: req.customer_id,
        rating: req.rating,
        comment: req.comment,
    };
    let result = ReviewRepo::new(&state.pool).create(&review).await?;

    Ok((StatusCode::CREATED, Json(result)))
}

/// GET /reviews/stats/{id} - rating summary for a product
async fn review_stats(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<i64>,
) -> Result<Json<ReviewStats>, ApiError> {
    let stats = ReviewRepo::new(&state.pool).stats(product_id).await?;
    Ok(Json(stats))
}

/// Review routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reviews", get(list_reviews).post(create_review))
        .route("/reviews/stats/{id}", get(review_stats))
}
