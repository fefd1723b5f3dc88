/// Shared application state for the webserver
///
/// Carries the resources route handlers need: the loaded configuration, the
/// document store, and the broadcast hub. Cloned once at startup and passed
/// to every handler as `Arc<AppState>`.
use std::sync::Arc;

use crate::config::Config;
use crate::database::Database;
use crate::webserver::ws::WsHub;

/// Shared application state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    /// Full configuration snapshot taken at startup
    pub config: Config,

    /// Document store handle
    pub db: Arc<Database>,

    /// Central WebSocket hub
    pub hub: Arc<WsHub>,

    /// Server startup time
    pub startup_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config, db: Arc<Database>, hub: Arc<WsHub>) -> Self {
        Self {
            config,
            db,
            hub,
            startup_time: chrono::Utc::now(),
        }
    }

    /// Get current WebSocket connection count
    pub async fn ws_connection_count(&self) -> usize {
        self.hub.active_connections().await
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        (chrono::Utc::now() - self.startup_time)
            .num_seconds()
            .max(0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_state_tracks_hub_connections() {
        let state = AppState::new(
            Config::default(),
            Arc::new(Database::new_in_memory().unwrap()),
            WsHub::new(8),
        );

        assert_eq!(state.ws_connection_count().await, 0);

        let (_id, _rx) = state.hub.register_connection().await;
        assert_eq!(state.ws_connection_count().await, 1);
    }
}
