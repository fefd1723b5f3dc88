//! Item & Inventory API Routes
//!
//! Items are schemaless documents keyed by `owner`; the inventory endpoint
//! is a straight owner lookup.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::logger::{self, LogTag};
use crate::webserver::state::AppState;
use crate::webserver::utils::{error_response, success_response};

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub owner: String,
    pub name: String,
    #[serde(default = "default_rarity")]
    pub rarity: String,
    #[serde(default = "default_stats")]
    pub stats: serde_json::Value,
}

fn default_rarity() -> String {
    "common".to_string()
}

fn default_stats() -> serde_json::Value {
    serde_json::json!({})
}

#[derive(Debug, Serialize)]
pub struct CreateItemResponse {
    pub ok: bool,
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct InventoryResponse {
    pub items: Vec<serde_json::Value>,
}

/// Create item routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/item/create", post(create_item))
        .route("/inventory/:wallet", get(get_inventory))
}

/// POST /api/item/create - Persist a new item document
async fn create_item(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateItemRequest>,
) -> Response {
    let now = Utc::now().to_rfc3339();
    let doc = serde_json::json!({
        "owner": payload.owner,
        "name": payload.name,
        "rarity": payload.rarity,
        "stats": payload.stats,
        "created_at": now,
        "updated_at": now,
    });

    match state.db.create_document("item", &doc) {
        Ok(id) => {
            logger::debug(LogTag::Api, &format!("Item created (id={})", id));
            success_response(CreateItemResponse {
                ok: true,
                id: id.to_string(),
            })
        }
        Err(e) => {
            logger::error(LogTag::Api, &format!("Failed to persist item: {}", e));
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                &format!("Failed to persist item: {}", e),
                None,
            )
        }
    }
}

/// GET /api/inventory/:wallet - All items owned by a wallet
async fn get_inventory(
    State(state): State<Arc<AppState>>,
    Path(wallet): Path<String>,
) -> Response {
    match state.db.get_documents_by_field("item", "owner", &wallet, None) {
        Ok(items) => success_response(InventoryResponse { items }),
        Err(e) => {
            logger::error(LogTag::Api, &format!("Inventory lookup failed: {}", e));
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                &format!("Inventory lookup failed: {}", e),
                None,
            )
        }
    }
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

    #[test]
    fn test_create_item_request_defaults() {
        let req: CreateItemRequest =
            serde_json::from_str(r#"{"owner": "w1", "name": "Ion Blade"}"#).unwrap();
        assert_eq!(req.rarity, "common");
        assert_eq!(req.stats, serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_create_item_persists_with_timestamps() {
        let state = test_state();
        let response = create_item(
            State(Arc::clone(&state)),
            Json(CreateItemRequest {
                owner: "wallet-a".to_string(),
                name: "Aether Core".to_string(),
                rarity: "rare".to_string(),
                stats: serde_json::json!({"power": 9}),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["ok"], true);
        let id: i64 = body["id"].as_str().unwrap().parse().unwrap();

        let stored = state.db.get_document_by_id("item", id).unwrap().unwrap();
        assert_eq!(stored["name"], "Aether Core");
        assert_eq!(stored["rarity"], "rare");
        assert_eq!(stored["stats"]["power"], 9);
        assert!(stored["created_at"].is_string());
        assert_eq!(stored["created_at"], stored["updated_at"]);
    }

    #[tokio::test]
    async fn test_inventory_filters_by_owner() {
        let state = test_state();
        for (owner, name) in [
            ("wallet-a", "Ion Blade"),
            ("wallet-b", "Aether Core"),
            ("wallet-a", "Flux Capacitor"),
        ] {
            state
                .db
                .create_document("item", &serde_json::json!({"owner": owner, "name": name}))
                .unwrap();
        }

        let body = body_json(
            get_inventory(State(Arc::clone(&state)), Path("wallet-a".to_string())).await,
        )
        .await;

        let items = body["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        for item in items {
            assert_eq!(item["owner"], "wallet-a");
            assert!(item["_id"].is_string());
        }
    }

    #[tokio::test]
    async fn test_inventory_empty_for_unknown_wallet() {
        let state = test_state();
        let body =
            body_json(get_inventory(State(state), Path("nobody".to_string())).await).await;
        assert_eq!(body["items"].as_array().unwrap().len(), 0);
    }
}
