// handlers/todo/update.rs - PUT /todo handler

use axum::extract::State;

use crate::database::models::TodoItem;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::state::AppState;

/// Full replace: the body must carry every field, not just the changed ones.
pub async fn todo_update(
    State(state): State<AppState>,
    JsonBody(todo): JsonBody<TodoItem>,
) -> ApiResult<TodoItem> {
    state.todos.update(todo.clone()).await?;

    tracing::info!(id = todo.id, user_id = todo.user_id, "updated todo");

    Ok(ApiResponse::created(todo))
}
