//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - One parameterized statement per method
//! - Constraint violations come back as `DbError::Constraint`
//! - Lookups return `Option` / `Vec`; absence is not an error

use std::fmt;

use sqlx::error::ErrorKind;

pub mod categories;
pub mod customers;
pub mod manufacturers;
pub mod orders;
pub mod products;
pub mod reviews;

pub use categories::{Category, CategoryRepo};
pub use customers::{
    ContactUpdate, Customer, CustomerOrder, CustomerOrderLine, CustomerRepo, CustomerWithOrders,
    NewCustomer,
};
pub use manufacturers::{Manufacturer, ManufacturerRepo};
pub use orders::OrderRepo;
pub use products::{
    CategoryProduct, CategoryStats, NewProduct, Product, ProductDetail, ProductRepo,
    ProductUpdate,
};
pub use reviews::{NewReview, Review, ReviewDetail, ReviewRepo, ReviewStats};

/// Which database constraint rejected a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
    NotNull,
    Check,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unique => "unique",
            Self::ForeignKey => "foreign key",
            Self::NotNull => "not null",
            Self::Check => "check",
        };
        f.write_str(name)
    }
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    #[error("{kind} constraint violated: {message}")]
    Constraint {
        kind: ConstraintKind,
        message: String,
    },

    #[error("incompatible schema: {0}")]
    IncompatibleSchema(String),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let kind = match db_err.kind() {
                ErrorKind::UniqueViolation => Some(ConstraintKind::Unique),
                ErrorKind::ForeignKeyViolation => Some(ConstraintKind::ForeignKey),
                ErrorKind::NotNullViolation => Some(ConstraintKind::NotNull),
                ErrorKind::CheckViolation => Some(ConstraintKind::Check),
                _ => None,
            };

            if let Some(kind) = kind {
                return Self::Constraint {
                    kind,
                    message: db_err.message().to_owned(),
                };
            }
        }

        Self::Sqlx(err)
    }
}

/// In-memory pool with the full schema, for repository tests.
#[cfg(test)]
pub(crate) async fn test_pool() -> sqlx::SqlitePool {
    let pool = crate::db::create_memory_pool()
        .await
        .expect("memory pool");
    crate::db::migrations::run(&pool).await.expect("migrations");
    pool
}
