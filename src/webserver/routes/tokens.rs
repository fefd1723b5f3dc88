//! Token Trade & Mint Intent Routes
//!
//! Root-level endpoints kept at their historical paths for game-client
//! compatibility. Trades and mint intents are recorded only; nothing here
//! touches the chain except the read-only balance lookup.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::logger::{self, LogTag};
use crate::rpc;
use crate::webserver::state::AppState;
use crate::webserver::utils::{error_response, success_response};

const MINT_NOTE: &str = "Recorded mint intent. Use deployment scripts to mint on-chain.";

#[derive(Debug, Deserialize)]
pub struct BuySellRequest {
    pub wallet: String,
    pub item_id: String,
    pub price: f64,
}

#[derive(Debug, Deserialize)]
pub struct MintItemRequest {
    pub wallet: String,
    pub name: String,
    #[serde(default = "default_attributes")]
    pub attributes: serde_json::Value,
}

fn default_attributes() -> serde_json::Value {
    serde_json::json!({})
}

#[derive(Debug, Deserialize)]
pub struct BalanceQuery {
    pub address: String,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub address: String,
    pub lamports: u64,
    pub sol: f64,
}

/// Create token trade routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/buyItem", post(buy_item))
        .route("/sellItem", post(sell_item))
        .route("/mintItemNFT", post(mint_item_nft))
        .route("/getBalance", get(get_balance))
}

/// POST /buyItem - Record a token buy
async fn buy_item(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BuySellRequest>,
) -> Response {
    record_token_trade(&state, payload, "buy")
}

/// POST /sellItem - Record a token sell
async fn sell_item(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BuySellRequest>,
) -> Response {
    record_token_trade(&state, payload, "sell")
}

fn record_token_trade(state: &AppState, payload: BuySellRequest, action: &str) -> Response {
    let doc = serde_json::json!({
        "wallet": payload.wallet,
        "item_id": payload.item_id,
        "price": payload.price,
        "action": action,
        "time": Utc::now().to_rfc3339(),
    });

    if let Err(e) = state.db.create_document("token_trades", &doc) {
        logger::error(LogTag::Api, &format!("Failed to persist token trade: {}", e));
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "DATABASE_ERROR",
            &format!("Failed to persist token trade: {}", e),
            None,
        );
    }

    logger::debug(LogTag::Api, &format!("Token trade recorded ({})", action));
    success_response(serde_json::json!({"ok": true}))
}

/// POST /mintItemNFT - Record an NFT mint intent
///
/// Minting itself happens client-side with a wallet signature; this only
/// logs the intent for the automation pipeline.
async fn mint_item_nft(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<MintItemRequest>,
) -> Response {
    let doc = serde_json::json!({
        "wallet": payload.wallet,
        "name": payload.name,
        "attributes": payload.attributes,
        "intent": "mint_nft",
        "time": Utc::now().to_rfc3339(),
    });

    if let Err(e) = state.db.create_document("nft_mint_intents", &doc) {
        logger::error(LogTag::Api, &format!("Failed to persist mint intent: {}", e));
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "DATABASE_ERROR",
            &format!("Failed to persist mint intent: {}", e),
            None,
        );
    }

    success_response(serde_json::json!({"ok": true, "note": MINT_NOTE}))
}

/// GET /getBalance - Wallet balance via the configured ledger RPC
///
/// Failures (timeout, HTTP error, parse error) still answer HTTP 200 with a
/// zero balance and a truncated error string, matching what game clients
/// expect.
async fn get_balance(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BalanceQuery>,
) -> Response {
    let rpc_url = state.config.ledger.rpc_url.clone();
    let timeout = Duration::from_secs(state.config.ledger.request_timeout_secs);

    match rpc::get_balance_lamports(&query.address, &rpc_url, timeout).await {
        Ok(lamports) => success_response(BalanceResponse {
            address: query.address,
            lamports,
            sol: rpc::lamports_to_sol(lamports),
        }),
        Err(e) => {
            logger::warning(LogTag::Api, &format!("Balance lookup failed: {}", e));

            let message: String = e.to_string().chars().take(120).collect();
            success_response(serde_json::json!({
                "address": query.address,
                "lamports": 0,
                "sol": 0,
                "error": message,
            }))
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

    #[tokio::test]
    async fn test_buy_and_sell_record_actions() {
        let state = test_state();

        let request = BuySellRequest {
            wallet: "wallet-a".to_string(),
            item_id: "3".to_string(),
            price: 1.25,
        };
        body_json(buy_item(State(Arc::clone(&state)), Json(request)).await).await;

        let request = BuySellRequest {
            wallet: "wallet-a".to_string(),
            item_id: "3".to_string(),
            price: 1.5,
        };
        body_json(sell_item(State(Arc::clone(&state)), Json(request)).await).await;

        let trades = state.db.get_documents("token_trades", None).unwrap();
        assert_eq!(trades.len(), 2);
        // Newest first
        assert_eq!(trades[0]["action"], "sell");
        assert_eq!(trades[1]["action"], "buy");
        assert!(trades[0]["time"].is_string());
    }

    #[tokio::test]
    async fn test_mint_intent_recorded_with_note() {
        let state = test_state();
        let response = mint_item_nft(
            State(Arc::clone(&state)),
            Json(MintItemRequest {
                wallet: "wallet-a".to_string(),
                name: "Void Crown".to_string(),
                attributes: serde_json::json!({"tier": "mythic"}),
            }),
        )
        .await;

        let body = body_json(response).await;
        assert_eq!(body["ok"], true);
        assert_eq!(body["note"], MINT_NOTE);

        let intents = state.db.get_documents("nft_mint_intents", None).unwrap();
        assert_eq!(intents.len(), 1);
        assert_eq!(intents[0]["intent"], "mint_nft");
        assert_eq!(intents[0]["attributes"]["tier"], "mythic");
    }

    #[test]
    fn test_mint_request_defaults_attributes() {
        let req: MintItemRequest =
            serde_json::from_str(r#"{"wallet": "wallet-a", "name": "Void Crown"}"#).unwrap();
        assert_eq!(req.attributes, serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_balance_failure_answers_200_with_error() {
        let mut config = Config::default();
        // Nothing listens here, so the lookup fails fast
        config.ledger.rpc_url = "http://127.0.0.1:9".to_string();
        config.ledger.request_timeout_secs = 1;

        let state = Arc::new(AppState::new(
            config,
            Arc::new(Database::new_in_memory().unwrap()),
            WsHub::new(8),
        ));

        let response = get_balance(
            State(state),
            Query(BalanceQuery {
                address: "9xQeWvG816bUx9EPf2oKUkkGvRyG2yLGeGmBXzWzWqtA".to_string(),
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["address"], "9xQeWvG816bUx9EPf2oKUkkGvRyG2yLGeGmBXzWzWqtA");
        assert_eq!(body["lamports"], 0);
        assert_eq!(body["sol"], 0);
        assert!(!body["error"].as_str().unwrap().is_empty());
        assert!(body["error"].as_str().unwrap().chars().count() <= 120);
    }
}
