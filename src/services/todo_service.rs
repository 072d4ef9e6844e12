use std::sync::Arc;
use thiserror::Error;
use tracing::{error, Span};

use crate::database::manager::DatabaseError;
use crate::database::models::{Pagination, TodoId, TodoItem, UserId};
use crate::database::repository::TodoGateway;
use crate::services::validation::{validate, Clock, ValidationError};

#[derive(Debug, Error)]
pub enum TodoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no matching records found")]
    NoMatchingRecords,

    #[error(transparent)]
    Store(#[from] DatabaseError),
}

/// Validates to-do items and hands them to a [`TodoGateway`].
///
/// Holds no mutable state; clones share the same gateway.
#[derive(Clone)]
pub struct TodoService {
    gateway: Arc<dyn TodoGateway>,
    clock: Arc<dyn Clock>,
    span: Span,
}

impl TodoService {
    /// `span` is the parent of every diagnostic the service emits.
    pub fn new(gateway: Arc<dyn TodoGateway>, clock: Arc<dyn Clock>, span: Span) -> Self {
        Self { gateway, clock, span }
    }

    pub async fn add(&self, item: TodoItem) -> Result<TodoItem, TodoError> {
        validate(&item, self.clock.now())?;

        self.gateway.create(&item).await.map_err(|e| {
            error!(parent: &self.span, user_id = item.user_id, "error inserting todo: {}", e);
            TodoError::from(e)
        })
    }

    /// Full replace of the mutable fields; the caller supplies the whole item.
    pub async fn update(&self, item: TodoItem) -> Result<(), TodoError> {
        validate(&item, self.clock.now())?;

        match self.gateway.replace(&item).await {
            Ok(_) => Ok(()),
            Err(DatabaseError::NotFound(_)) => Err(TodoError::NoMatchingRecords),
            Err(e) => {
                error!(parent: &self.span, "error updating todo with id: {} with error: {}", item.id, e);
                Err(e.into())
            }
        }
    }

    pub async fn delete(&self, item: TodoItem) -> Result<(), TodoError> {
        self.gateway.soft_delete(&item).await.map_err(|e| {
            error!(parent: &self.span, "error deleting todo with id: {} with error: {}", item.id, e);
            TodoError::from(e)
        })
    }

    pub async fn get_by_id(&self, id: TodoId, user_id: UserId) -> Result<TodoItem, TodoError> {
        match self.gateway.find_one(id, user_id).await {
            Ok(item) => Ok(item),
            Err(DatabaseError::NotFound(_)) => Err(TodoError::NoMatchingRecords),
            Err(e) => {
                error!(parent: &self.span, "error attempting to find todo with id: {} with error: {}", id, e);
                Err(e.into())
            }
        }
    }

    /// A user's items, latest due date first. An empty result is not an error.
    pub async fn get_by_user_id(
        &self,
        user_id: UserId,
        page: Pagination,
    ) -> Result<Vec<TodoItem>, TodoError> {
        match self.gateway.find_many(user_id, page).await {
            Ok(items) => Ok(items),
            Err(DatabaseError::NotFound(_)) => Ok(Vec::new()),
            Err(e) => {
                error!(parent: &self.span, "error attempting to find todos for user id: {} with error: {}", user_id, e);
                Err(e.into())
            }
        }
    }

    pub async fn health(&self) -> Result<(), TodoError> {
        self.gateway.ping().await.map_err(TodoError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::InMemoryTodoRepository;
    use crate::services::validation::FixedClock;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    fn service_with(repo: InMemoryTodoRepository) -> TodoService {
        TodoService::new(Arc::new(repo), Arc::new(FixedClock(now())), Span::none())
    }

    fn todo(user_id: UserId, title: &str, due_in_days: i64) -> TodoItem {
        TodoItem {
            user_id,
            title: title.to_string(),
            description: "2%".to_string(),
            due_date: now() + Duration::days(due_in_days),
            ..Default::default()
        }
    }

    /// Gateway whose every call fails like a dropped connection.
    struct BrokenGateway;

    #[async_trait]
    impl TodoGateway for BrokenGateway {
        async fn create(&self, _: &TodoItem) -> Result<TodoItem, DatabaseError> {
            Err(DatabaseError::Sqlx(sqlx::Error::PoolClosed))
        }
        async fn replace(&self, _: &TodoItem) -> Result<TodoItem, DatabaseError> {
            Err(DatabaseError::Sqlx(sqlx::Error::PoolClosed))
        }
        async fn soft_delete(&self, _: &TodoItem) -> Result<(), DatabaseError> {
            Err(DatabaseError::Sqlx(sqlx::Error::PoolClosed))
        }
        async fn find_one(&self, _: TodoId, _: UserId) -> Result<TodoItem, DatabaseError> {
            Err(DatabaseError::Sqlx(sqlx::Error::PoolClosed))
        }
        async fn find_many(&self, _: UserId, _: Pagination) -> Result<Vec<TodoItem>, DatabaseError> {
            Err(DatabaseError::NotFound("nothing".to_string()))
        }
        async fn ping(&self) -> Result<(), DatabaseError> {
            Err(DatabaseError::Sqlx(sqlx::Error::PoolClosed))
        }
    }

    #[tokio::test]
    async fn add_then_get_returns_same_item() {
        let service = service_with(InMemoryTodoRepository::new());

        let added = service.add(todo(1, "Buy milk", 1)).await.unwrap();
        assert_ne!(added.id, 0);
        assert!(!added.is_complete);

        let fetched = service.get_by_id(added.id, 1).await.unwrap();
        assert_eq!(fetched, added);
    }

    #[tokio::test]
    async fn invalid_item_is_never_written() {
        let repo = InMemoryTodoRepository::new();
        let service = service_with(repo.clone());

        let err = service.add(todo(1, "", 1)).await.unwrap_err();
        assert!(matches!(err, TodoError::Validation(ValidationError::EmptyTitle)));

        let err = service.add(todo(1, "late", -1)).await.unwrap_err();
        assert!(matches!(err, TodoError::Validation(ValidationError::PastDueDate)));

        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn due_now_is_accepted() {
        let service = service_with(InMemoryTodoRepository::new());
        let item = TodoItem { due_date: now(), ..todo(1, "now", 0) };
        assert!(service.add(item).await.is_ok());
    }

    #[tokio::test]
    async fn update_replaces_mutable_fields() {
        let service = service_with(InMemoryTodoRepository::new());
        let added = service.add(todo(1, "Buy milk", 1)).await.unwrap();

        let changed = TodoItem {
            title: "Buy oat milk".to_string(),
            is_complete: true,
            ..added.clone()
        };
        service.update(changed).await.unwrap();

        let fetched = service.get_by_id(added.id, 1).await.unwrap();
        assert_eq!(fetched.title, "Buy oat milk");
        assert!(fetched.is_complete);
        assert_eq!(fetched.created_at, added.created_at);
    }

    #[tokio::test]
    async fn update_validates_and_requires_existing_row() {
        let service = service_with(InMemoryTodoRepository::new());
        let added = service.add(todo(1, "Buy milk", 1)).await.unwrap();

        let err = service
            .update(TodoItem { description: String::new(), ..added.clone() })
            .await
            .unwrap_err();
        assert!(matches!(err, TodoError::Validation(ValidationError::EmptyDescription)));

        let err = service.update(TodoItem { id: 999, ..added.clone() }).await.unwrap_err();
        assert!(matches!(err, TodoError::NoMatchingRecords));

        let err = service.update(TodoItem { user_id: 2, ..added }).await.unwrap_err();
        assert!(matches!(err, TodoError::NoMatchingRecords));
    }

    #[tokio::test]
    async fn delete_hides_item() {
        let service = service_with(InMemoryTodoRepository::new());
        let added = service.add(todo(1, "Buy milk", 1)).await.unwrap();

        service.delete(added.clone()).await.unwrap();

        let err = service.get_by_id(added.id, 1).await.unwrap_err();
        assert!(matches!(err, TodoError::NoMatchingRecords));

        // deleting again is not an error
        service.delete(added).await.unwrap();
    }

    #[tokio::test]
    async fn get_by_id_is_scoped_to_owner() {
        let service = service_with(InMemoryTodoRepository::new());
        let added = service.add(todo(1, "Buy milk", 1)).await.unwrap();

        let err = service.get_by_id(added.id, 2).await.unwrap_err();
        assert!(matches!(err, TodoError::NoMatchingRecords));
    }

    #[tokio::test]
    async fn get_by_user_id_orders_latest_due_first() {
        let service = service_with(InMemoryTodoRepository::new());
        for (title, days) in [("b", 2), ("c", 3), ("a", 1)] {
            service.add(todo(1, title, days)).await.unwrap();
        }

        let items = service.get_by_user_id(1, Pagination::new(0, 100)).await.unwrap();
        let titles: Vec<_> = items.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["c", "b", "a"]);

        let none = service.get_by_user_id(2, Pagination::new(0, 100)).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn store_errors_pass_through() {
        let service = TodoService::new(
            Arc::new(BrokenGateway),
            Arc::new(FixedClock(now())),
            Span::none(),
        );

        let err = service.add(todo(1, "Buy milk", 1)).await.unwrap_err();
        assert!(matches!(err, TodoError::Store(DatabaseError::Sqlx(_))));

        let err = service.get_by_id(1, 1).await.unwrap_err();
        assert!(matches!(err, TodoError::Store(_)));

        assert!(service.health().await.is_err());

        // a not-found signal on a collection query is an empty page
        let items = service.get_by_user_id(1, Pagination::new(0, 100)).await.unwrap();
        assert!(items.is_empty());
    }
}
