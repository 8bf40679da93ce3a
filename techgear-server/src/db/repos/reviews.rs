//! Review repository
//!
//! Ratings are constrained to 1..=5 by the schema; out-of-range inserts come
//! back as a check violation and leave no row behind.

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use super::DbError;
use crate::models::MutationResult;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Review {
    pub review_id: i64,
    pub product_id: i64,
    pub customer_id: i64,
    pub rating: i64,
    pub comment: Option<String>,
}

/// Review as listed under a product's stats
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewDetail {
    pub review_id: i64,
    pub customer: Option<String>,
    pub rating: i64,
    pub comment: Option<String>,
}

/// Rating summary for one product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewStats {
    pub product_id: i64,
    pub product: Option<String>,
    pub total_reviews: i64,
    pub average_rating: Option<f64>,
    pub reviews: Vec<ReviewDetail>,
}

#[derive(FromRow)]
struct ReviewStatsRow {
    product: String,
    review_id: Option<i64>,
    customer: Option<String>,
    rating: Option<i64>,
    comment: Option<String>,
    average_rating: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub product_id: i64,
    pub customer_id: i64,
    pub rating: i64,
    pub comment: Option<String>,
}

/// Review repository
pub struct ReviewRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ReviewRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Review>, DbError> {
        let reviews: Vec<Review> = sqlx::query_as(
            r#"
            SELECT review_id, product_id, customer_id, rating, comment
            FROM reviews
            ORDER BY review_id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(reviews)
    }

    pub async fn create(&self, review: &NewReview) -> Result<MutationResult, DbError> {
        let result = sqlx::query(
            "INSERT INTO reviews (product_id, customer_id, rating, comment) VALUES (?, ?, ?, ?)",
        )
        .bind(review.product_id)
        .bind(review.customer_id)
        .bind(review.rating)
        .bind(&review.comment)
        .execute(self.pool)
        .await?;

        Ok(result.into())
    }

    /// Review count, average rating and individual reviews for a product.
    ///
    /// Single statement: the average comes from a window over the joined rows.
    pub async fn stats(&self, product_id: i64) -> Result<ReviewStats, DbError> {
        let rows: Vec<ReviewStatsRow> = sqlx::query_as(
            r#"
            SELECT
                products.name AS product,
                reviews.review_id AS review_id,
                customers.name AS customer,
                reviews.rating AS rating,
                reviews.comment AS comment,
                AVG(reviews.rating) OVER () AS average_rating
            FROM products
            LEFT JOIN reviews ON reviews.product_id = products.product_id
            LEFT JOIN customers ON customers.customer_id = reviews.customer_id
            WHERE products.product_id = ?
            ORDER BY reviews.review_id
            "#,
        )
        .bind(product_id)
        .fetch_all(self.pool)
        .await?;

        let product = rows.first().map(|row| row.product.clone());
        let average_rating = rows.first().and_then(|row| row.average_rating);
        let reviews: Vec<ReviewDetail> = rows
            .into_iter()
            .filter_map(|row| {
                Some(ReviewDetail {
                    review_id: row.review_id?,
                    customer: row.customer,
                    rating: row.rating?,
                    comment: row.comment,
                })
            })
            .collect();

        Ok(ReviewStats {
            product_id,
            product,
            total_reviews: reviews.len() as i64,
            average_rating,
            reviews,
        })
    }
}
