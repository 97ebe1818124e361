use crate::app::jobs::{join_error_message, run_all};
use crate::config::AppConfig;
use crate::core::SyncReport;
use async_trait::async_trait;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{NaiveDate, Utc};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

pub const SECRET_HEADER: &str = "X-Sync-Secret";

/// `/sync` 觸發的動作，正式實作會執行兩個任務
#[async_trait]
pub trait SyncTrigger: Send + Sync {
    async fn run(&self, today: NaiveDate) -> SyncReport;
}

pub struct LiveSync {
    config: Arc<AppConfig>,
}

impl LiveSync {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SyncTrigger for LiveSync {
    async fn run(&self, today: NaiveDate) -> SyncReport {
        run_all(Arc::clone(&self.config), today).await
    }
}

#[derive(Clone)]
pub struct AppState {
    pub sync_secret: String,
    pub runner: Arc<dyn SyncTrigger>,
}

impl AppState {
    pub fn live(config: Arc<AppConfig>) -> Self {
        Self {
            sync_secret: config.sync_secret.clone(),
            runner: Arc::new(LiveSync::new(config)),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/sync", get(sync).post(sync))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

fn authorized(secret: &str, headers: &HeaderMap, params: &HashMap<String, String>) -> bool {
    if secret.is_empty() {
        return true;
    }
    let provided = headers
        .get(SECRET_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .or_else(|| params.get("secret").map(String::as_str));
    provided == Some(secret)
}

async fn sync(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&state.sync_secret, &headers, &params) {
        tracing::warn!("Rejected /sync call without a valid secret");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Unauthorized" })),
        )
            .into_response();
    }

    let today = Utc::now().date_naive();
    let runner = Arc::clone(&state.runner);
    match tokio::spawn(async move { runner.run(today).await }).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => {
            let err = anyhow::anyhow!(join_error_message(e)).context("sync trigger failed");
            let message = err.root_cause().to_string();
            let traceback = format!("{:?}", err);
            tracing::error!("Sync failed: {}", message);
            tracing::error!("{}", traceback);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message, "traceback": traceback })),
            )
                .into_response()
        }
    }
}

pub async fn serve(config: Arc<AppConfig>) -> anyhow::Result<()> {
    use anyhow::Context;

    let addr = config.listen_addr()?;
    let app = router(AppState::live(config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind HTTP server")?;
    tracing::info!("🌐 Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
        })
        .await
        .context("HTTP server error")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_authorized_without_secret() {
        assert!(authorized("", &HeaderMap::new(), &HashMap::new()));
    }

    #[test]
    fn test_authorized_by_header_or_query() {
        let mut headers = HeaderMap::new();
        headers.insert(SECRET_HEADER, HeaderValue::from_static("abc"));
        assert!(authorized("abc", &headers, &HashMap::new()));

        let params = HashMap::from([("secret".to_string(), "abc".to_string())]);
        assert!(authorized("abc", &HeaderMap::new(), &params));

        assert!(!authorized("abc", &HeaderMap::new(), &HashMap::new()));
        let wrong = HashMap::from([("secret".to_string(), "nope".to_string())]);
        assert!(!authorized("abc", &HeaderMap::new(), &wrong));
    }
}
