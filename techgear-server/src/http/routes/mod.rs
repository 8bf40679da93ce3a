//! Route handlers organized by resource

pub mod catalog;
pub mod customers;
pub mod health;
pub mod orders;
pub mod products;
pub mod reviews;
