//! Result of an INSERT / UPDATE / DELETE

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteQueryResult;

/// Rows touched by a mutation and the rowid of the last insert.
///
/// Serialized as `{"changes": n, "lastInsertRowid": id}`, the shape
/// existing clients of the shop API already read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResult {
    pub changes: u64,
    #[serde(rename = "lastInsertRowid")]
    pub last_insert_rowid: i64,
}

impl From<SqliteQueryResult> for MutationResult {
    fn from(result: SqliteQueryResult) -> Self {
        Self {
            changes: result.rows_affected(),
            last_insert_rowid: result.last_insert_rowid(),
        }
    }
}
