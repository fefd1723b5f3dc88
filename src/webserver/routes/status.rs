use axum::{extract::State, response::Response, routing::get, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::logger::{self, LogTag};
use crate::webserver::{state::AppState, utils::success_response};

/// Service identification response
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfoResponse {
    pub service: String,
    pub status: String,
}

/// Health report for the `/test` endpoint
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub backend: String,
    pub database: String,
    pub database_path: String,
    pub collections: Vec<String>,
}

/// Create status routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(service_info))
        .route("/test", get(health_report))
}

/// GET / - Service identification
async fn service_info() -> Response {
    success_response(ServiceInfoResponse {
        service: "VoidSpark.world Backend".to_string(),
        status: "ok".to_string(),
    })
}

/// GET /test - Backend and database health report
async fn health_report(State(state): State<Arc<AppState>>) -> Response {
    logger::debug(LogTag::Api, "Health report requested");

    let database_path = if state.config.database.filename.is_empty() {
        "missing"
    } else {
        "set"
    };

    let (database, collections) = match state.db.list_collections() {
        Ok(list) => (
            "ok".to_string(),
            list.into_iter().map(|(name, _)| name).take(10).collect(),
        ),
        Err(e) => (format!("error: {}", e), Vec::new()),
    };

    success_response(HealthReport {
        backend: "ok".to_string(),
        database,
        database_path: database_path.to_string(),
        collections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::database::Database;
    use crate::webserver::ws::WsHub;

    fn test_state() -> Arc<AppState> {
        Arc::new(AppState::new(
            Config::default(),
            Arc::new(Database::new_in_memory().unwrap()),
            WsHub::new(8),
        ))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_service_info_shape() {
        let body = body_json(service_info().await).await;
        assert_eq!(body["service"], "VoidSpark.world Backend");
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_health_report_lists_collections() {
        let state = test_state();
        state
            .db
            .create_document("player", &serde_json::json!({"address": "w1"}))
            .unwrap();
        state
            .db
            .create_document("item", &serde_json::json!({"name": "Ion Blade"}))
            .unwrap();

        let body = body_json(health_report(State(state)).await).await;
        assert_eq!(body["backend"], "ok");
        assert_eq!(body["database"], "ok");
        assert_eq!(body["database_path"], "set");

        let collections: Vec<String> = body["collections"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect();
        assert!(collections.contains(&"player".to_string()));
        assert!(collections.contains(&"item".to_string()));
    }
}
