// handlers/todo/get_by_user_id.rs - GET /todo/get-by-user-id?userId=[&offset=][&limit=] handler

use axum::extract::{Query, State};

use super::params::{optional_count, required_id, QueryParams};
use crate::database::models::{Pagination, TodoItem};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// `offset` defaults to 0 and `limit` to the configured page size; `limit` is clamped to the maximum.
pub async fn todo_get_by_user_id(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> ApiResult<Vec<TodoItem>> {
    let user_id = required_id(&params, "userId")?;
    let offset = optional_count(&params, "offset", 0)?;
    let limit = optional_count(&params, "limit", state.api.default_page_size)?
        .min(state.api.max_page_size);

    let todos = state
        .todos
        .get_by_user_id(user_id, Pagination::new(offset, limit))
        .await?;

    Ok(ApiResponse::success(todos))
}
