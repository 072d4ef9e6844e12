use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{Pagination, TodoId, TodoItem, UserId};
use crate::database::repository::{not_found, TodoGateway};

#[derive(Debug, Default)]
struct Table {
    last_id: TodoId,
    rows: BTreeMap<TodoId, TodoItem>,
}

impl Table {
    fn live_mut(&mut self, id: TodoId, user_id: UserId) -> Option<&mut TodoItem> {
        self.rows
            .get_mut(&id)
            .filter(|row| row.user_id == user_id && !row.is_deleted())
    }
}

/// In-process [`TodoGateway`]. Rows are soft-deleted exactly like the
/// PostgreSQL table so both gateways are interchangeable behind the service.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows held, including soft-deleted ones.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TodoGateway for InMemoryTodoRepository {
    async fn create(&self, item: &TodoItem) -> Result<TodoItem, DatabaseError> {
        let mut table = self.table.write().await;
        table.last_id += 1;

        let now = Utc::now();
        let row = TodoItem {
            id: table.last_id,
            created_at: Some(now),
            updated_at: Some(now),
            deleted_at: None,
            ..item.clone()
        };
        table.rows.insert(row.id, row.clone());

        Ok(row)
    }

    async fn replace(&self, item: &TodoItem) -> Result<TodoItem, DatabaseError> {
        let mut table = self.table.write().await;
        let row = table
            .live_mut(item.id, item.user_id)
            .ok_or_else(|| not_found(item.id, item.user_id))?;

        row.title = item.title.clone();
        row.description = item.description.clone();
        row.is_complete = item.is_complete;
        row.due_date = item.due_date;
        row.updated_at = Some(Utc::now());

        Ok(row.clone())
    }

    async fn soft_delete(&self, item: &TodoItem) -> Result<(), DatabaseError> {
        let mut table = self.table.write().await;
        if let Some(row) = table.live_mut(item.id, item.user_id) {
            row.deleted_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn find_one(&self, id: TodoId, user_id: UserId) -> Result<TodoItem, DatabaseError> {
        let table = self.table.read().await;
        table
            .rows
            .get(&id)
            .filter(|row| row.user_id == user_id && !row.is_deleted())
            .cloned()
            .ok_or_else(|| not_found(id, user_id))
    }

    async fn find_many(
        &self,
        user_id: UserId,
        page: Pagination,
    ) -> Result<Vec<TodoItem>, DatabaseError> {
        let table = self.table.read().await;
        let mut rows: Vec<&TodoItem> = table
            .rows
            .values()
            .filter(|row| row.user_id == user_id && !row.is_deleted())
            .collect();
        rows.sort_by(|a, b| b.due_date.cmp(&a.due_date).then(b.id.cmp(&a.id)));

        let offset = usize::try_from(page.offset.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit.max(0)).unwrap_or(usize::MAX);

        Ok(rows.into_iter().skip(offset).take(limit).cloned().collect())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
