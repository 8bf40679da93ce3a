//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - The pool is passed in explicitly; there is no global handle
//! - One statement per repository method, no multi-statement transactions
//! - Rely on DB constraints and classify their violations in `DbError`
//! - "No matching row" is `None` or an empty `Vec`, never an error

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_memory_pool, create_pool};
pub use repos::*;
