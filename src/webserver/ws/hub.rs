/// Central WebSocket hub - connection registry and broadcaster
///
/// The hub owns the set of live connections and fans every event out to all
/// of them. It manages:
/// - Connection identity (unique id per connection lifetime, never reused)
/// - Per-connection bounded send queues
/// - Broadcast delivery with per-target failure isolation
///
/// Delivery never blocks on a peer: a full or closed send queue counts as a
/// failed delivery, and a failed target is removed from the registry before
/// the broadcast call returns. The registry read guard is held across the
/// whole send pass, so each broadcast targets the registry as of call start;
/// a connection registering mid-broadcast waits and receives nothing from
/// that call.
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};

use crate::logger::{self, LogTag};

use super::message::EventMessage;

// ============================================================================
// HUB TYPES
// ============================================================================

/// Connection ID (unique per WebSocket connection, never reused)
pub type ConnectionId = u64;

/// Per-connection sender (bounded channel carrying pre-serialized frames)
pub type ConnectionSender = mpsc::Sender<Arc<String>>;

// ============================================================================
// WS HUB
// ============================================================================

/// Central WebSocket hub
pub struct WsHub {
    /// Active connections (connection_id -> sender)
    connections: RwLock<HashMap<ConnectionId, ConnectionSender>>,

    /// Next connection ID
    next_conn_id: AtomicU64,

    /// Per-connection queue capacity (from config)
    buffer_size: usize,
}

impl WsHub {
    /// Create a new hub
    pub fn new(buffer_size: usize) -> Arc<Self> {
        Arc::new(Self {
            connections: RwLock::new(HashMap::new()),
            next_conn_id: AtomicU64::new(1),
            buffer_size,
        })
    }

    /// Register a new connection
    ///
    /// Returns the connection's id and the receiving end of its send queue.
    /// The caller owns the receiver; dropping it makes every later delivery
    /// to this connection fail, which removes the entry on the next
    /// broadcast.
    pub async fn register_connection(&self) -> (ConnectionId, mpsc::Receiver<Arc<String>>) {
        let conn_id = self.next_conn_id.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = mpsc::channel(self.buffer_size);

        self.connections.write().await.insert(conn_id, tx);

        logger::debug(
            LogTag::Hub,
            &format!(
                "Connection {} registered (active={})",
                conn_id,
                self.connections.read().await.len()
            ),
        );

        (conn_id, rx)
    }

    /// Remove a connection from the registry
    ///
    /// Idempotent: only the first call for a given id has an effect, repeat
    /// or concurrent calls are no-ops.
    pub async fn unregister_connection(&self, conn_id: ConnectionId) {
        let removed = self.connections.write().await.remove(&conn_id).is_some();

        if removed {
            logger::debug(
                LogTag::Hub,
                &format!(
                    "Connection {} unregistered (active={})",
                    conn_id,
                    self.connections.read().await.len()
                ),
            );
        }
    }

    /// Broadcast an event to every registered connection
    ///
    /// Serializes the event once, then attempts one non-blocking delivery
    /// per connection. Targets whose queue is full or closed are dropped
    /// from the registry before this returns; delivery to the remaining
    /// targets is unaffected. Returns the number of successful deliveries.
    pub async fn broadcast(&self, event: &EventMessage) -> usize {
        let payload = match event.to_json() {
            Ok(json) => Arc::new(json),
            Err(e) => {
                logger::error(LogTag::Hub, &format!("Failed to serialize event: {}", e));
                return 0;
            }
        };

        let mut delivered = 0;
        let mut failed: Vec<ConnectionId> = Vec::new();

        {
            let connections = self.connections.read().await;
            if connections.is_empty() {
                return 0;
            }

            for (conn_id, sender) in connections.iter() {
                match sender.try_send(Arc::clone(&payload)) {
                    Ok(_) => {
                        delivered += 1;
                    }
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        logger::debug(
                            LogTag::Hub,
                            &format!("Connection {} queue full, dropping connection", conn_id),
                        );
                        failed.push(*conn_id);
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => {
                        failed.push(*conn_id);
                    }
                }
            }
        }

        // Failed targets leave the registry before the broadcast returns,
        // so no later broadcast can hit a known-dead connection.
        if !failed.is_empty() {
            let mut connections = self.connections.write().await;
            for conn_id in &failed {
                connections.remove(conn_id);
            }

            logger::debug(
                LogTag::Hub,
                &format!(
                    "Removed {} failed connection(s) during broadcast (active={})",
                    failed.len(),
                    connections.len()
                ),
            );
        }

        delivered
    }

    /// Get active connection count
    pub async fn active_connections(&self) -> usize {
        self.connections.read().await.len()
    }
}
