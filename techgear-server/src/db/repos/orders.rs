//! Order repository
//!
//! Orders are built one statement at a time: a header, then one line per
//! product. Nothing here spans more than one statement.

use sqlx::SqlitePool;

use super::DbError;
use crate::models::MutationResult;

/// Order repository
pub struct OrderRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Open an order for a customer, stamped with the current time.
    pub async fn create(&self, customer_id: i64) -> Result<MutationResult, DbError> {
        let result = sqlx::query("INSERT INTO orders (customer_id) VALUES (?)")
            .bind(customer_id)
            .execute(self.pool)
            .await?;

        Ok(result.into())
    }

    /// Add a product line, capturing the product's current price.
    ///
    /// An unknown product inserts nothing (`changes == 0`); an unknown order
    /// is a foreign key violation.
    pub async fn add_product(
        &self,
        order_id: i64,
        product_id: i64,
        quantity: i64,
    ) -> Result<MutationResult, DbError> {
        let result = sqlx::query(
            r#"
            INSERT INTO orders_products (order_id, product_id, quantity, unit_price)
            SELECT ?, product_id, ?, price
            FROM products
            WHERE product_id = ?
            "#,
        )
        .bind(order_id)
        .bind(quantity)
        .bind(product_id)
        .execute(self.pool)
        .await?;

        Ok(result.into())
    }
}
