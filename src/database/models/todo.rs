use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Store-assigned identifier of a to-do item. `0` means "not yet assigned".
pub type TodoId = i64;

/// Identifier of the user owning a to-do item.
pub type UserId = i64;

/// A to-do item as stored in the `todos` table and exchanged over HTTP.
///
/// `id` and the timestamps are owned by the store; values supplied by a
/// client are ignored on create and only `id` is honoured on update/delete.
/// Every field may be omitted from a body; a missing `dueDate` is the Unix epoch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    #[serde(default)]
    pub id: TodoId,
    #[serde(default)]
    pub user_id: UserId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_complete: bool,
    #[serde(default)]
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl TodoItem {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Offset/limit window over a user's items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub offset: i64,
    pub limit: i64,
}

impl Pagination {
    pub fn new(offset: i64, limit: i64) -> Self {
        Self { offset, limit }
    }
}
