//! Marketplace API Routes
//!
//! Listings are plain documents with an `open` status; buying only records a
//! trade document, settlement happens elsewhere.

use axum::{
    extract::State,
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
pub struct CreateListingRequest {
    pub seller: String,
    pub item_id: String,
    pub price: f64,
}

#[derive(Debug, Deserialize)]
pub struct TradeActionRequest {
    pub wallet: String,
    pub listing_id: String,
}

#[derive(Debug, Serialize)]
pub struct CreateListingResponse {
    pub ok: bool,
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct ListingsResponse {
    pub listings: Vec<serde_json::Value>,
}

/// Create marketplace routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/marketplace/listings", get(get_listings))
        .route("/marketplace/create", post(create_listing))
        .route("/marketplace/buy", post(buy_listing))
}

/// GET /api/marketplace/listings - All listing documents
async fn get_listings(State(state): State<Arc<AppState>>) -> Response {
    match state.db.get_documents("listing", None) {
        Ok(listings) => success_response(ListingsResponse { listings }),
        Err(e) => {
            logger::error(LogTag::Api, &format!("Listing lookup failed: {}", e));
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                &format!("Listing lookup failed: {}", e),
                None,
            )
        }
    }
}

/// POST /api/marketplace/create - Open a new listing
async fn create_listing(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateListingRequest>,
) -> Response {
    let doc = serde_json::json!({
        "seller": payload.seller,
        "item_id": payload.item_id,
        "price": payload.price,
        "created_at": Utc::now().to_rfc3339(),
        "status": "open",
    });

    match state.db.create_document("listing", &doc) {
        Ok(id) => {
            logger::debug(LogTag::Api, &format!("Listing created (id={})", id));
            success_response(CreateListingResponse {
                ok: true,
                id: id.to_string(),
            })
        }
        Err(e) => {
            logger::error(LogTag::Api, &format!("Failed to persist listing: {}", e));
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                &format!("Failed to persist listing: {}", e),
                None,
            )
        }
    }
}

/// POST /api/marketplace/buy - Record a buy action against a listing
async fn buy_listing(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TradeActionRequest>,
) -> Response {
    let doc = serde_json::json!({
        "action": "buy",
        "wallet": payload.wallet,
        "listing_id": payload.listing_id,
        "time": Utc::now().to_rfc3339(),
    });

    if let Err(e) = state.db.create_document("trade", &doc) {
        logger::error(LogTag::Api, &format!("Failed to persist trade: {}", e));
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "DATABASE_ERROR",
            &format!("Failed to persist trade: {}", e),
            None,
        );
    }

    success_response(serde_json::json!({"ok": true}))
}
