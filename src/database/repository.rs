use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{Pagination, TodoId, TodoItem, UserId};

/// Narrow contract between the to-do service and whatever stores the items.
///
/// Every method is scoped by the owning user. Soft-deleted rows are invisible
/// to all of them: they are never returned, replaced or deleted again.
#[async_trait]
pub trait TodoGateway: Send + Sync {
    /// Insert a new row. The store assigns `id`, `created_at` and `updated_at`.
    async fn create(&self, item: &TodoItem) -> Result<TodoItem, DatabaseError>;

    /// Overwrite the mutable fields of the row matching `(item.id, item.user_id)`.
    ///
    /// Returns [`DatabaseError::NotFound`] when no live row matches.
    async fn replace(&self, item: &TodoItem) -> Result<TodoItem, DatabaseError>;

    /// Mark the row matching `(item.id, item.user_id)` as deleted. Missing rows are not an error.
    async fn soft_delete(&self, item: &TodoItem) -> Result<(), DatabaseError>;

    async fn find_one(&self, id: TodoId, user_id: UserId) -> Result<TodoItem, DatabaseError>;

    /// A user's items ordered by `due_date` descending (ties: `id` descending), windowed by `page`.
    async fn find_many(
        &self,
        user_id: UserId,
        page: Pagination,
    ) -> Result<Vec<TodoItem>, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}

pub(crate) fn not_found(id: TodoId, user_id: UserId) -> DatabaseError {
    DatabaseError::NotFound(format!("todo {} for user {}", id, user_id))
}
