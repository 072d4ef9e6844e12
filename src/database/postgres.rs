use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Pagination, TodoId, TodoItem, UserId};
use crate::database::repository::{not_found, TodoGateway};

const COLUMNS: &str =
    "id, user_id, title, description, is_complete, due_date, created_at, updated_at, deleted_at";

/// PostgreSQL-backed [`TodoGateway`] over the `todos` table.
#[derive(Clone)]
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TodoGateway for PgTodoRepository {
    async fn create(&self, item: &TodoItem) -> Result<TodoItem, DatabaseError> {
        let sql = format!(
            "INSERT INTO todos (user_id, title, description, is_complete, due_date, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, now(), now())
             RETURNING {}",
            COLUMNS
        );

        let row = sqlx::query_as::<_, TodoItem>(&sql)
            .bind(item.user_id)
            .bind(&item.title)
            .bind(&item.description)
            .bind(item.is_complete)
            .bind(item.due_date)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    async fn replace(&self, item: &TodoItem) -> Result<TodoItem, DatabaseError> {
        let sql = format!(
            "UPDATE todos
             SET title = $3, description = $4, is_complete = $5, due_date = $6, updated_at = now()
             WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL
             RETURNING {}",
            COLUMNS
        );

        sqlx::query_as::<_, TodoItem>(&sql)
            .bind(item.id)
            .bind(item.user_id)
            .bind(&item.title)
            .bind(&item.description)
            .bind(item.is_complete)
            .bind(item.due_date)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(item.id, item.user_id))
    }

    async fn soft_delete(&self, item: &TodoItem) -> Result<(), DatabaseError> {
        sqlx::query(
            "UPDATE todos SET deleted_at = now()
             WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL",
        )
        .bind(item.id)
        .bind(item.user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_one(&self, id: TodoId, user_id: UserId) -> Result<TodoItem, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM todos WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL",
            COLUMNS
        );

        sqlx::query_as::<_, TodoItem>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id, user_id))
    }

    async fn find_many(
        &self,
        user_id: UserId,
        page: Pagination,
    ) -> Result<Vec<TodoItem>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM todos
             WHERE user_id = $1 AND deleted_at IS NULL
             ORDER BY due_date DESC, id DESC
             LIMIT $2 OFFSET $3",
            COLUMNS
        );

        let rows = sqlx::query_as::<_, TodoItem>(&sql)
            .bind(user_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
