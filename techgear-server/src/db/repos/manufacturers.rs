//! Manufacturer repository

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use super::DbError;
use crate::models::MutationResult;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Manufacturer {
    pub manufacturer_id: i64,
    pub name: String,
}

/// Manufacturer repository
pub struct ManufacturerRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ManufacturerRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Manufacturer>, DbError> {
        let manufacturers: Vec<Manufacturer> = sqlx::query_as(
            "SELECT manufacturer_id, name FROM manufacturers ORDER BY manufacturer_id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(manufacturers)
    }

    /// Insert a manufacturer. Duplicate names are a unique violation.
    pub async fn create(&self, name: &str) -> Result<MutationResult, DbError> {
        let result = sqlx::query("INSERT INTO manufacturers (name) VALUES (?)")
            .bind(name)
            .execute(self.pool)
            .await?;

        Ok(result.into())
    }
}
