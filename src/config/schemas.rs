/// Configuration schemas - all config structures defined once with defaults
///
/// This module contains all configuration structures for the VoidSpark
/// backend. Each struct is defined using the config_struct! macro which
/// provides:
/// - Single-source definition (no repetition)
/// - Embedded defaults
/// - Type safety
/// - Serde support
use crate::config_struct;

// ============================================================================
// LEDGER CONFIGURATION
// ============================================================================

config_struct! {
    /// Ledger JSON-RPC configuration
    pub struct LedgerConfig {
        /// RPC endpoint for balance queries (SOLANA_RPC env var overrides)
        rpc_url: String = "https://api.mainnet-beta.solana.com".to_string(),

        /// Per-request timeout (seconds)
        request_timeout_secs: u64 = 8,
    }
}

// ============================================================================
// DATABASE CONFIGURATION
// ============================================================================

config_struct! {
    /// Document store configuration
    pub struct DatabaseConfig {
        /// Database filename inside the data directory (VOIDSPARK_DB env var overrides)
        filename: String = "voidspark.db".to_string(),
    }
}

// ============================================================================
// WEBSERVER CONFIGURATION
// ============================================================================

config_struct! {
    /// WebSocket configuration
    pub struct WebSocketConfig {
        /// Per-connection outbound queue capacity; a full queue counts as a
        /// failed send and gets the connection dropped
        buffer_size: usize = 64,
    }
}

config_struct! {
    /// Webserver configuration
    pub struct WebserverConfig {
        host: String = "127.0.0.1".to_string(),
        port: u16 = 8080,
        websocket: WebSocketConfig = WebSocketConfig::default(),
    }
}

// ============================================================================
// ROOT CONFIGURATION
// ============================================================================

config_struct! {
    /// Root configuration structure containing all sub-configurations
    pub struct Config {
        /// Ledger RPC configuration
        ledger: LedgerConfig = LedgerConfig::default(),

        /// Database configuration
        database: DatabaseConfig = DatabaseConfig::default(),

        /// Webserver configuration
        webserver: WebserverConfig = WebserverConfig::default(),
    }
}

// ============================================================================
// IMPLEMENTATIONS
// ============================================================================

impl WebserverConfig {
    /// Validate webserver configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("Port cannot be 0".to_string());
        }

        if self.websocket.buffer_size == 0 {
            return Err("WebSocket buffer_size must be > 0".to_string());
        }

        Ok(())
    }

    /// Get the full bind address (host:port)
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl LedgerConfig {
    /// Validate ledger configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.rpc_url.is_empty() {
            return Err("Ledger rpc_url cannot be empty".to_string());
        }

        if self.request_timeout_secs == 0 {
            return Err("Ledger request_timeout_secs must be > 0".to_string());
        }

        Ok(())
    }
}
