// handlers/system.rs - GET / and GET /health

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "todo-api",
        "version": version,
        "endpoints": {
            "create": "POST /todo",
            "update": "PUT /todo",
            "delete": "DELETE /todo",
            "get_by_id": "GET /todo?id=&userId=",
            "get_by_user_id": "GET /todo/get-by-user-id?userId=[&offset=][&limit=]",
            "model": "GET /todo/get-model",
            "health": "GET /health",
        }
    }))
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.todos.health().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                })),
            )
        }
    }
}
