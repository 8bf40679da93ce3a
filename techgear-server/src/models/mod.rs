//! Shared value types used by both the data layer and the HTTP layer

pub mod mutation;
pub mod password;

pub use mutation::MutationResult;
pub use password::{PasswordError, PasswordHash};
