// handlers/todo/get_by_id.rs - GET /todo?id=&userId= handler

use axum::extract::{Query, State};

use super::params::{required_id, QueryParams};
use crate::database::models::TodoItem;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

pub async fn todo_get_by_id(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> ApiResult<TodoItem> {
    let user_id = required_id(&params, "userId")?;
    let id = required_id(&params, "id")?;

    let todo = state.todos.get_by_id(id, user_id).await?;

    Ok(ApiResponse::success(todo))
}
