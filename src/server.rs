use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Request,
    http::{
        header::{ACCEPT, AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE, LINK},
        HeaderName, HeaderValue, Method,
    },
    response::{IntoResponse, Response},
    routing::get,
    Router, ServiceExt,
};
use tower::Layer;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    normalize_path::{NormalizePath, NormalizePathLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::info;

use crate::config::{AppConfig, Storage};
use crate::database::{
    DatabaseError, DatabaseManager, InMemoryTodoRepository, PgTodoRepository, TodoGateway,
};
use crate::error::ApiError;
use crate::handlers::{system, todo};
use crate::middleware::require_content_type;
use crate::services::{SystemClock, TodoService};
use crate::state::AppState;

/// Full HTTP surface with middleware, ready to serve.
///
/// Trailing slashes are trimmed before routing, so `/todo/` reaches `/todo`.
pub fn app(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .merge(todo_routes())
        .with_state(state)
        // Global middleware
        .layer(axum::middleware::from_fn(require_content_type))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store, must-revalidate"),
        ))
        .layer(CompressionLayer::new())
        .layer(cors())
        .layer(TraceLayer::new_for_http());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

fn todo_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/todo",
            get(todo::todo_get_by_id)
                .post(todo::todo_create)
                .put(todo::todo_update)
                .delete(todo::todo_delete),
        )
        .route("/todo/get-by-user-id", get(todo::todo_get_by_user_id))
        .route("/todo/get-model", get(todo::todo_model))
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(|origin: &HeaderValue, _| {
            let origin = origin.as_bytes();
            origin.starts_with(b"https://") || origin.starts_with(b"http://")
        }))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            ACCEPT,
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static("x-csrf-token"),
        ])
        .expose_headers([LINK])
        .allow_credentials(true)
        .max_age(Duration::from_secs(300))
}

fn handle_panic(_: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("request handler panicked");
    ApiError::internal_server_error("internal server error").into_response()
}

/// Wire the configured gateway into a [`TodoService`].
pub async fn build_state(config: &AppConfig, run_migrations: bool) -> Result<AppState, DatabaseError> {
    let gateway: Arc<dyn TodoGateway> = match config.database.storage {
        Storage::Postgres => {
            let pool = DatabaseManager::connect(&config.database, config.service.environment).await?;
            if run_migrations {
                DatabaseManager::migrate(&pool).await?;
            }
            Arc::new(PgTodoRepository::new(pool))
        }
        Storage::Memory => {
            info!("using in-memory storage; items are lost on exit");
            Arc::new(InMemoryTodoRepository::new())
        }
    };

    let service = TodoService::new(gateway, Arc::new(SystemClock), tracing::info_span!("todo_service"));
    Ok(AppState::new(service, config.api.clone()))
}

/// Bind `0.0.0.0:<port>` and serve until Ctrl-C.
pub async fn serve(config: &AppConfig, run_migrations: bool) -> anyhow::Result<()> {
    let state = build_state(config, run_migrations).await?;

    let bind_addr = format!("0.0.0.0:{}", config.service.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!(
        "todo-api listening on http://{} in {:?} mode",
        bind_addr, config.service.environment
    );

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app(state)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("todo-api stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}
