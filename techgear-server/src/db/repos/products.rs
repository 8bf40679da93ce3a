//! Product repository
//!
//! Products are the only deletable entity. Deleting one cascades to its
//! category links and reviews; order lines block the delete.

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use super::DbError;
use crate::models::MutationResult;

/// Product row as stored
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Product {
    pub product_id: i64,
    pub manufacturer_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock_quantity: i64,
}

/// Product with manufacturer and category names joined in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetail {
    pub id: i64,
    pub manufacturer: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub categories: Vec<String>,
    pub price: f64,
    pub stock_quantity: i64,
}

/// One product/category pair from the detail join
#[derive(FromRow)]
struct ProductDetailRow {
    id: i64,
    manufacturer: Option<String>,
    name: String,
    description: Option<String>,
    category: Option<String>,
    price: f64,
    stock_quantity: i64,
}

/// Product listed under a category
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct CategoryProduct {
    pub category_id: i64,
    pub category: String,
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock_quantity: i64,
}

/// Product count and average price within one category.
///
/// An unknown category yields `category: None`, zero products and no average.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    pub category_id: i64,
    pub category: Option<String>,
    pub total_products: i64,
    pub average_price: Option<f64>,
}

/// Fields for a new product
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub manufacturer_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock_quantity: i64,
}

/// Full replacement of a product's editable fields
#[derive(Debug, Clone)]
pub struct ProductUpdate {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock_quantity: i64,
}

const DETAIL_SELECT: &str = r#"
    SELECT
        products.product_id AS id,
        manufacturers.name AS manufacturer,
        products.name AS name,
        products.description AS description,
        categories.name AS category,
        products.price AS price,
        products.stock_quantity AS stock_quantity
    FROM products
    LEFT JOIN manufacturers ON products.manufacturer_id = manufacturers.manufacturer_id
    LEFT JOIN products_categories ON products.product_id = products_categories.product_id
    LEFT JOIN categories ON products_categories.category_id = categories.category_id
"#;

/// Product repository
pub struct ProductRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List every product with its manufacturer and categories.
    pub async fn list_detailed(&self) -> Result<Vec<ProductDetail>, DbError> {
        let sql = format!("{DETAIL_SELECT} ORDER BY products.product_id, categories.name");
        let rows: Vec<ProductDetailRow> = sqlx::query_as(&sql).fetch_all(self.pool).await?;

        Ok(group_detail_rows(rows))
    }

    /// Get one product with its manufacturer and categories.
    pub async fn get_detailed(&self, id: i64) -> Result<Option<ProductDetail>, DbError> {
        let sql = format!("{DETAIL_SELECT} WHERE products.product_id = ? ORDER BY categories.name");
        let rows: Vec<ProductDetailRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_all(self.pool)
            .await?;

        Ok(group_detail_rows(rows).into_iter().next())
    }

    /// Find a product by exact name.
    ///
    /// Names are not unique; the lowest id wins.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Product>, DbError> {
        let product: Option<Product> = sqlx::query_as(
            r#"
            SELECT product_id, manufacturer_id, name, description, price, stock_quantity
            FROM products
            WHERE name = ?
            ORDER BY product_id
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// List the products linked to a category.
    pub async fn list_by_category(&self, category_id: i64) -> Result<Vec<CategoryProduct>, DbError> {
        let products: Vec<CategoryProduct> = sqlx::query_as(
            r#"
            SELECT
                categories.category_id AS category_id,
                categories.name AS category,
                products.product_id AS id,
                products.name AS name,
                products.description AS description,
                products.price AS price,
                products.stock_quantity AS stock_quantity
            FROM categories
            JOIN products_categories ON products_categories.category_id = categories.category_id
            JOIN products ON products.product_id = products_categories.product_id
            WHERE categories.category_id = ?
            ORDER BY products.product_id
            "#,
        )
        .bind(category_id)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Count and average price of the products in a category.
    pub async fn category_stats(&self, category_id: i64) -> Result<CategoryStats, DbError> {
        let (category, total_products, average_price): (Option<String>, i64, Option<f64>) =
            sqlx::query_as(
                r#"
                SELECT
                    categories.name,
                    COUNT(DISTINCT products.product_id),
                    AVG(products.price)
                FROM categories
                LEFT JOIN products_categories ON products_categories.category_id = categories.category_id
                LEFT JOIN products ON products.product_id = products_categories.product_id
                WHERE categories.category_id = ?
                "#,
            )
            .bind(category_id)
            .fetch_one(self.pool)
            .await?;

        Ok(CategoryStats {
            category_id,
            category,
            total_products,
            average_price,
        })
    }

    pub async fn create(&self, product: &NewProduct) -> Result<MutationResult, DbError> {
        let result = sqlx::query(
            r#"
            INSERT INTO products (manufacturer_id, name, description, price, stock_quantity)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(product.manufacturer_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock_quantity)
        .execute(self.pool)
        .await?;

        Ok(result.into())
    }

    /// Replace name, description, price and stock. `changes` is 0 for an unknown id.
    pub async fn update(&self, id: i64, update: &ProductUpdate) -> Result<MutationResult, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = ?, description = ?, price = ?, stock_quantity = ?
            WHERE product_id = ?
            "#,
        )
        .bind(&update.name)
        .bind(&update.description)
        .bind(update.price)
        .bind(update.stock_quantity)
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(result.into())
    }

    pub async fn delete(&self, id: i64) -> Result<MutationResult, DbError> {
        let result = sqlx::query("DELETE FROM products WHERE product_id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.into())
    }

    /// Link a product to a category. Linking the same pair twice is a unique violation.
    pub async fn add_category(
        &self,
        product_id: i64,
        category_id: i64,
    ) -> Result<MutationResult, DbError> {
        let result =
            sqlx::query("INSERT INTO products_categories (product_id, category_id) VALUES (?, ?)")
                .bind(product_id)
                .bind(category_id)
                .execute(self.pool)
                .await?;

        Ok(result.into())
    }
}

/// Fold join rows (ordered by product id) into one entry per product.
fn group_detail_rows(rows: Vec<ProductDetailRow>) -> Vec<ProductDetail> {
    let mut products: Vec<ProductDetail> = Vec::new();

    for row in rows {
        if let Some(last) = products.last_mut() {
            if last.id == row.id {
                last.categories.extend(row.category);
                continue;
            }
        }

        products.push(ProductDetail {
            id: row.id,
            manufacturer: row.manufacturer,
            name: row.name,
            description: row.description,
            categories: row.category.into_iter().collect(),
            price: row.price,
            stock_quantity: row.stock_quantity,
        });
    }

    products
}
