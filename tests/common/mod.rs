#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{extract::Request, ServiceExt};
use chrono::{Duration, Utc};
use serde_json::{json, Value};

use todo_api::config::{ApiConfig, AppConfig, Environment};
use todo_api::database::InMemoryTodoRepository;
use todo_api::server::app;
use todo_api::services::{SystemClock, TodoService};
use todo_api::state::AppState;

pub struct TestServer {
    pub base_url: String,
    pub repo: InMemoryTodoRepository,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub fn default_api_config() -> ApiConfig {
    AppConfig::for_environment(Environment::Development).api
}

/// Serve the real router on an ephemeral port, backed by a fresh in-memory store.
///
/// The server task lives on the calling test's runtime, so every test gets its own.
pub async fn spawn_server() -> Result<TestServer> {
    spawn_server_with(default_api_config()).await
}

pub async fn spawn_server_with(api: ApiConfig) -> Result<TestServer> {
    let repo = InMemoryTodoRepository::new();
    let service = TodoService::new(
        Arc::new(repo.clone()),
        Arc::new(SystemClock),
        tracing::Span::none(),
    );
    let state = AppState::new(service, api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind test listener")?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, ServiceExt::<Request>::into_make_service(app(state))).await;
    });

    Ok(TestServer {
        base_url: format!("http://{}", addr),
        repo,
        client: reqwest::Client::new(),
    })
}

pub fn todo_body(user_id: i64, title: &str, due_in_days: i64) -> Value {
    json!({
        "userId": user_id,
        "title": title,
        "description": format!("{} details", title),
        "dueDate": Utc::now() + Duration::days(due_in_days),
    })
}

/// POST an item and return the created body, asserting 201.
pub async fn create(server: &TestServer, body: &Value) -> Result<Value> {
    let res = server.client.post(server.url("/todo")).json(body).send().await?;
    let status = res.status();
    let created = res.json::<Value>().await?;
    anyhow::ensure!(status == reqwest::StatusCode::CREATED, "expected 201, got {}: {}", status, created);
    Ok(created)
}
