//! Player API Routes
//!
//! Wallet-linked login. There is no challenge or signature verification:
//! posting a plausible address upserts a player record and counts as a
//! session.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::logger::{self, LogTag};
use crate::webserver::state::AppState;
use crate::webserver::utils::{error_response, success_response};

/// Minimum plausible wallet address length
const MIN_ADDRESS_LEN: usize = 20;

#[derive(Debug, Deserialize)]
pub struct WalletLoginRequest {
    pub address: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WalletLoginResponse {
    pub ok: bool,
    pub player: PlayerSummary,
}

#[derive(Debug, Serialize)]
pub struct PlayerSummary {
    pub address: String,
}

/// Create player routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/player/login-wallet", post(login_wallet))
}

/// POST /api/player/login-wallet - Link a wallet address as a player
async fn login_wallet(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<WalletLoginRequest>,
) -> Response {
    let address = match payload.address {
        Some(a) if a.len() >= MIN_ADDRESS_LEN => a,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"detail": "Invalid wallet address"})),
            )
                .into_response();
        }
    };

    let player_doc = serde_json::json!({
        "address": address,
        "last_login": Utc::now().to_rfc3339(),
        "stats": {"level": 1, "xp": 0, "hp": 100},
    });

    if let Err(e) = state.db.create_document("player", &player_doc) {
        logger::error(LogTag::Api, &format!("Failed to persist player: {}", e));
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "DATABASE_ERROR",
            &format!("Failed to persist player: {}", e),
            None,
        );
    }

    logger::info(LogTag::Api, &format!("Player login: {}", address));

    success_response(WalletLoginResponse {
        ok: true,
        player: PlayerSummary { address },
    })
}
