/// WebSocket connection lifecycle driver
///
/// Owns one socket end-to-end: register with the hub, announce the join,
/// pump frames in both directions, and guarantee deregistration plus a
/// leave notice on every termination path (graceful close, read error,
/// or a failed send).
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};

use crate::logger::{self, LogTag};

use super::hub::WsHub;
use super::message::EventMessage;

/// Drive one WebSocket connection against the hub
pub async fn handle_connection(socket: WebSocket, hub: Arc<WsHub>) {
    let (conn_id, mut hub_rx) = hub.register_connection().await;
    let (mut ws_tx, mut ws_rx) = socket.split();

    logger::debug(LogTag::Websocket, &format!("Connection {} started", conn_id));

    // Join notice goes to every registered connection, the new one included
    hub.broadcast(&EventMessage::system("Player joined")).await;

    loop {
        tokio::select! {
            biased;

            // Frames from the hub (broadcasts to forward to this client)
            payload = hub_rx.recv() => {
                match payload {
                    Some(payload) => {
                        if let Err(e) = forward_to_client(&mut ws_tx, &payload).await {
                            logger::warning(
                                LogTag::Websocket,
                                &format!("Connection {}: failed to send frame: {}", conn_id, e),
                            );
                            break;
                        }
                    }
                    // The hub dropped our sender after a failed delivery
                    None => break,
                }
            }

            // Frames from the client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        hub.broadcast(&EventMessage::chat(text)).await;
                    }
                    Some(Ok(Message::Binary(bytes))) => {
                        // Best effort: treat binary payloads as opaque text
                        let text = String::from_utf8_lossy(&bytes).into_owned();
                        hub.broadcast(&EventMessage::chat(text)).await;
                    }
                    Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => {
                        // Axum answers pings at the protocol layer
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        logger::debug(
                            LogTag::Websocket,
                            &format!("Connection {}: client closed", conn_id),
                        );
                        break;
                    }
                    Some(Err(e)) => {
                        logger::warning(
                            LogTag::Websocket,
                            &format!("Connection {}: websocket error: {}", conn_id, e),
                        );
                        break;
                    }
                }
            }
        }
    }

    // Every exit path lands here: deregister first (idempotent if the hub
    // already dropped us), then tell the remaining peers
    hub.unregister_connection(conn_id).await;
    hub.broadcast(&EventMessage::system("Player left")).await;

    logger::debug(LogTag::Websocket, &format!("Connection {} closed", conn_id));
}

/// Forward one pre-serialized frame to the client
async fn forward_to_client(
    ws_tx: &mut SplitSink<WebSocket, Message>,
    payload: &Arc<String>,
) -> Result<(), axum::Error> {
    ws_tx.send(Message::Text(payload.as_ref().clone())).await
}
