//! Customer repository
//!
//! Password hashes are written on insert and never selected back out.

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use super::DbError;
use crate::models::{MutationResult, PasswordHash};

/// Customer record, without credential material
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Customer {
    pub customer_id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Order header as seen from its customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerOrder {
    pub order_id: i64,
    pub order_date: NaiveDateTime,
}

/// Customer with the ids and dates of their orders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerWithOrders {
    #[serde(flatten)]
    pub customer: Customer,
    pub orders: Vec<CustomerOrder>,
}

#[derive(FromRow)]
struct CustomerOrderRow {
    customer_id: i64,
    name: String,
    email: String,
    phone: Option<String>,
    address: Option<String>,
    order_id: Option<i64>,
    order_date: Option<NaiveDateTime>,
}

/// One ordered product, with the ordering customer's contact details
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct CustomerOrderLine {
    pub customer_id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub order_id: i64,
    pub product: String,
    pub price: f64,
    pub quantity: i64,
    pub unit_price: f64,
    pub order_date: NaiveDateTime,
}

/// Fields for a new customer
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub password_hash: PasswordHash,
}

/// Replacement contact details; name and password are not editable
#[derive(Debug, Clone)]
pub struct ContactUpdate {
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Customer repository
pub struct CustomerRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CustomerRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Customer>, DbError> {
        let customers: Vec<Customer> = sqlx::query_as(
            r#"
            SELECT customer_id, name, email, phone, address
            FROM customers
            ORDER BY customer_id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(customers)
    }

    /// Get a customer with their orders (LEFT JOIN, one row per order).
    pub async fn get_with_orders(&self, id: i64) -> Result<Option<CustomerWithOrders>, DbError> {
        let rows: Vec<CustomerOrderRow> = sqlx::query_as(
            r#"
            SELECT
                customers.customer_id AS customer_id,
                customers.name AS name,
                customers.email AS email,
                customers.phone AS phone,
                customers.address AS address,
                orders.order_id AS order_id,
                orders.order_date AS order_date
            FROM customers
            LEFT JOIN orders ON orders.customer_id = customers.customer_id
            WHERE customers.customer_id = ?
            ORDER BY orders.order_id
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        // LEFT JOIN yields a single all-NULL order row for a customer without orders
        let orders = rows
            .iter()
            .filter_map(|row| {
                Some(CustomerOrder {
                    order_id: row.order_id?,
                    order_date: row.order_date?,
                })
            })
            .collect();

        let Some(first) = rows.into_iter().next() else {
            return Ok(None);
        };

        Ok(Some(CustomerWithOrders {
            customer: Customer {
                customer_id: first.customer_id,
                name: first.name,
                email: first.email,
                phone: first.phone,
                address: first.address,
            },
            orders,
        }))
    }

    /// Every ordered product for a customer, oldest order first.
    pub async fn order_lines(&self, id: i64) -> Result<Vec<CustomerOrderLine>, DbError> {
        let lines: Vec<CustomerOrderLine> = sqlx::query_as(
            r#"
            SELECT
                customers.customer_id AS customer_id,
                customers.name AS name,
                customers.email AS email,
                customers.phone AS phone,
                customers.address AS address,
                orders.order_id AS order_id,
                products.name AS product,
                products.price AS price,
                orders_products.quantity AS quantity,
                orders_products.unit_price AS unit_price,
                orders.order_date AS order_date
            FROM customers
            JOIN orders ON orders.customer_id = customers.customer_id
            JOIN orders_products ON orders_products.order_id = orders.order_id
            JOIN products ON products.product_id = orders_products.product_id
            WHERE customers.customer_id = ?
            ORDER BY orders.order_id, orders_products.order_product_id
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(lines)
    }

    pub async fn create(&self, customer: &NewCustomer) -> Result<MutationResult, DbError> {
        let result = sqlx::query(
            r#"
            INSERT INTO customers (name, email, phone, address, password_hash)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(customer.password_hash.as_str())
        .execute(self.pool)
        .await?;

        Ok(result.into())
    }

    /// Replace email, phone and address.
    pub async fn update_contact(
        &self,
        id: i64,
        update: &ContactUpdate,
    ) -> Result<MutationResult, DbError> {
        let result = sqlx::query(
            "UPDATE customers SET email = ?, phone = ?, address = ? WHERE customer_id = ?",
        )
        .bind(&update.email)
        .bind(&update.phone)
        .bind(&update.address)
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(result.into())
    }
}
