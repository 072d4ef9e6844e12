// handlers/todo/model.rs - GET /todo/get-model handler

use crate::database::models::TodoItem;
use crate::middleware::ApiResponse;

/// A zero-valued item, so clients can see the wire shape.
pub async fn todo_model() -> ApiResponse<TodoItem> {
    ApiResponse::success(TodoItem::default())
}
