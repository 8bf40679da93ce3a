//! Category repository

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use super::DbError;
use crate::models::MutationResult;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Category {
    pub category_id: i64,
    pub name: String,
}

/// Category repository
pub struct CategoryRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CategoryRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Category>, DbError> {
        let categories: Vec<Category> =
            sqlx::query_as("SELECT category_id, name FROM categories ORDER BY category_id")
                .fetch_all(self.pool)
                .await?;

        Ok(categories)
    }

    pub async fn create(&self, name: &str) -> Result<MutationResult, DbError> {
        let result = sqlx::query("INSERT INTO categories (name) VALUES (?)")
            .bind(name)
            .execute(self.pool)
            .await?;

        Ok(result.into())
    }
}
