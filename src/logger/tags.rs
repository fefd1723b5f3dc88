/// Log tag definitions for module-scoped logging
///
/// Every log line carries a tag identifying the module it came from. Tags
/// drive two things: the colored prefix on the console, and the
/// --debug-<key> gating for Debug-level logs.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTag {
    /// Application lifecycle (startup, shutdown, directories)
    System,
    /// Configuration loading and saving
    Config,
    /// SQLite document store operations
    Database,
    /// HTTP server lifecycle and routing
    Webserver,
    /// Individual WebSocket connections
    Websocket,
    /// Broadcast hub (registry, fan-out)
    Hub,
    /// Ledger JSON-RPC calls
    Rpc,
    /// Procedural world generators
    World,
    /// REST API handlers
    Api,
    /// Signal handling and graceful shutdown
    Shutdown,
    /// Test-only logging
    Test,
    /// Anything that doesn't fit the fixed set
    Other(String),
}

impl LogTag {
    /// The key used for --debug-<key> flags and the enabled_tags filter
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system".to_string(),
            LogTag::Config => "config".to_string(),
            LogTag::Database => "database".to_string(),
            LogTag::Webserver => "webserver".to_string(),
            LogTag::Websocket => "websocket".to_string(),
            LogTag::Hub => "hub".to_string(),
            LogTag::Rpc => "rpc".to_string(),
            LogTag::World => "world".to_string(),
            LogTag::Api => "api".to_string(),
            LogTag::Shutdown => "shutdown".to_string(),
            LogTag::Test => "test".to_string(),
            LogTag::Other(s) => s.to_lowercase(),
        }
    }

    /// The uncolored label written to log files
    pub fn to_plain_string(&self) -> String {
        match self {
            LogTag::System => "SYSTEM".to_string(),
            LogTag::Config => "CONFIG".to_string(),
            LogTag::Database => "DATABASE".to_string(),
            LogTag::Webserver => "WEBSERVER".to_string(),
            LogTag::Websocket => "WS".to_string(),
            LogTag::Hub => "HUB".to_string(),
            LogTag::Rpc => "RPC".to_string(),
            LogTag::World => "WORLD".to_string(),
            LogTag::Api => "API".to_string(),
            LogTag::Shutdown => "SHUTDOWN".to_string(),
            LogTag::Test => "TEST".to_string(),
            LogTag::Other(s) => s.to_uppercase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_keys_are_lowercase() {
        assert_eq!(LogTag::Hub.to_debug_key(), "hub");
        assert_eq!(LogTag::Websocket.to_debug_key(), "websocket");
        assert_eq!(LogTag::Other("Custom".to_string()).to_debug_key(), "custom");
    }

    #[test]
    fn test_plain_strings() {
        assert_eq!(LogTag::Websocket.to_plain_string(), "WS");
        assert_eq!(LogTag::Rpc.to_plain_string(), "RPC");
        assert_eq!(LogTag::Other("misc".to_string()).to_plain_string(), "MISC");
    }
}
