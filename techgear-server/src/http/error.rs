//! API error types with IntoResponse
//!
//! Missing query parameters answer 404 in plain text, the way shop clients
//! expect. Everything else is a JSON body `{"error", "message"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::{ConstraintKind, DbError};
use crate::models::PasswordError;

pub const SEARCH_QUERY_MISSING: &str = "Please enter a valid search query.";
pub const ID_MISSING: &str = "Invalid id or no id found.";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Required query parameter absent or empty (404, plain text)
    MissingParameter { message: &'static str },

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Statement rejected by a schema constraint (409 or 400)
    Constraint { kind: ConstraintKind, message: String },

    /// Database error (500, logged)
    Database(DbError),

    /// Internal error (500)
    Internal { message: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::MissingParameter { message } => {
                return (StatusCode::NOT_FOUND, *message).into_response();
            }
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": format!("{} '{}' not found", resource, id)
                }),
            ),
            Self::Constraint { kind, message } => {
                tracing::warn!(%kind, "constraint violation: {}", message);
                let status = match kind {
                    ConstraintKind::Unique | ConstraintKind::ForeignKey => StatusCode::CONFLICT,
                    ConstraintKind::NotNull | ConstraintKind::Check => StatusCode::BAD_REQUEST,
                };
                (
                    status,
                    json!({
                        "error": "constraint_violation",
                        "message": format!("{} constraint violated: {}", kind, message)
                    }),
                )
            }
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
            Self::Internal { message } => {
                tracing::error!("Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::Constraint { kind, message } => Self::Constraint { kind, message },
            _ => Self::Database(e),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(e: PasswordError) -> Self {
        Self::Internal {
            message: e.to_string(),
        }
    }
}
