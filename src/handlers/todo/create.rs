// handlers/todo/create.rs - POST /todo handler

use axum::extract::State;

use crate::database::models::TodoItem;
use crate::middleware::{ApiResponse, ApiResult, JsonBody};
use crate::state::AppState;

pub async fn todo_create(
    State(state): State<AppState>,
    JsonBody(todo): JsonBody<TodoItem>,
) -> ApiResult<TodoItem> {
    let created = state.todos.add(todo).await?;

    tracing::info!(id = created.id, user_id = created.user_id, "created todo");

    Ok(ApiResponse::created(created))
}
