// handlers/todo/delete.rs - DELETE /todo handler

use axum::extract::State;

use crate::database::models::TodoItem;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::state::AppState;

pub async fn todo_delete(
    State(state): State<AppState>,
    JsonBody(todo): JsonBody<TodoItem>,
) -> ApiResult<TodoItem> {
    state.todos.delete(todo.clone()).await?;

    tracing::info!(id = todo.id, user_id = todo.user_id, "deleted todo");

    Ok(ApiResponse::created(todo))
}
