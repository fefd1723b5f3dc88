//! WebSocket Route
//!
//! Single `/ws` endpoint. Every connection joins the broadcast hub: all
//! inbound text is relayed to every connected client, and the hub announces
//! joins and leaves with `system` frames.

use axum::{
    extract::{ws::WebSocketUpgrade, State},
    response::Response,
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::logger::{self, LogTag};
use crate::webserver::{state::AppState, ws::connection};

/// Create WebSocket routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/ws", get(ws_handler))
}

/// GET /ws - Upgrade and hand the socket to the hub driver
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    logger::debug(LogTag::Websocket, "WebSocket upgrade requested");

    let hub = Arc::clone(&state.hub);
    ws.on_upgrade(move |socket| connection::handle_connection(socket, hub))
}
