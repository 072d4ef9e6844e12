use std::sync::Arc;

use crate::config::ApiConfig;
use crate::services::TodoService;

/// Shared by every handler through `axum::extract::State`.
#[derive(Clone)]
pub struct AppState {
    pub todos: TodoService,
    pub api: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(todos: TodoService, api: ApiConfig) -> Self {
        Self {
            todos,
            api: Arc::new(api),
        }
    }
}
