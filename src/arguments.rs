/// Centralized argument handling system for VoidSpark
///
/// This module consolidates all command-line argument parsing and debug flag checking
/// functionality so binaries and tests share one source of truth.
///
/// Features:
/// - Centralized CMD_ARGS storage with thread-safe access
/// - Debug flag checking functions for all modules
/// - Webserver host/port override parsing with validation
/// - Unified argument parsing utilities
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

/// Global command-line arguments storage
/// Thread-safe singleton that stores arguments for access throughout the application
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Sets the global command-line arguments
/// Used by binaries and tests to override the default env::args() collection
pub fn set_cmd_args(args: Vec<String>) {
    if let Ok(mut cmd_args) = CMD_ARGS.lock() {
        *cmd_args = args;
    }
}

/// Gets a copy of the current command-line arguments
/// Returns a vector clone to avoid holding the mutex lock
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        Err(_) => {
            // Fallback to env::args if mutex is poisoned
            env::args().collect()
        }
    }
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    get_cmd_args()
        .iter()
        .any(|a| a == arg)
}

/// Gets the value of a command-line argument that follows a flag
/// Returns None if the flag is not found or has no value
pub fn get_arg_value(flag: &str) -> Option<String> {
    let args = get_cmd_args();
    for (i, arg) in args.iter().enumerate() {
        if arg == flag && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

// =============================================================================
// DEBUG FLAG CHECKING FUNCTIONS
// These functions check for specific debug flags in the command-line arguments
// =============================================================================

/// System lifecycle debug mode
pub fn is_debug_system_enabled() -> bool {
    has_arg("--debug-system")
}

/// Config loading debug mode
pub fn is_debug_config_enabled() -> bool {
    has_arg("--debug-config")
}

/// Database operations debug mode
pub fn is_debug_database_enabled() -> bool {
    has_arg("--debug-database")
}

/// Webserver debug mode
pub fn is_debug_webserver_enabled() -> bool {
    has_arg("--debug-webserver")
}

/// WebSocket connection debug mode
pub fn is_debug_websocket_enabled() -> bool {
    has_arg("--debug-websocket")
}

/// Broadcast hub debug mode
pub fn is_debug_hub_enabled() -> bool {
    has_arg("--debug-hub")
}

/// Ledger RPC debug mode
pub fn is_debug_rpc_enabled() -> bool {
    has_arg("--debug-rpc")
}

/// World generator debug mode
pub fn is_debug_world_enabled() -> bool {
    has_arg("--debug-world")
}

/// REST API debug mode
pub fn is_debug_api_enabled() -> bool {
    has_arg("--debug-api")
}

/// Verbose mode - lowers the minimum log level to Verbose for every tag
pub fn is_verbose_enabled() -> bool {
    has_arg("--verbose") || has_arg("-v")
}

/// File logging mode - mirrors console output into the logs directory
pub fn is_log_to_file_enabled() -> bool {
    has_arg("--log-to-file")
}

// =============================================================================
// WEBSERVER OVERRIDES
// CLI flags that override the [webserver] config section for one run
// =============================================================================

/// Gets the webserver port override from --port, if present and parseable
pub fn get_port_override() -> Option<u16> {
    get_arg_value("--port").and_then(|s| s.parse().ok())
}

/// Gets the webserver host override from --host, if present
pub fn get_host_override() -> Option<String> {
    get_arg_value("--host")
}

/// Gets the config file path override from --config, if present
pub fn get_config_override() -> Option<String> {
    get_arg_value("--config")
}

/// Checks whether a port needs elevated privileges to bind
pub fn is_privileged_port(port: u16) -> bool {
    port < 1024
}

/// Validates the --port argument if one was provided
///
/// A flag with a missing or unparseable value is an error; absence is fine.
pub fn validate_port_argument() -> Result<(), String> {
    if !has_arg("--port") {
        return Ok(());
    }

    match get_arg_value("--port") {
        Some(value) => match value.parse::<u16>() {
            Ok(0) => Err("--port must be between 1 and 65535".to_string()),
            Ok(_) => Ok(()),
            Err(_) => Err(format!("--port value '{}' is not a valid port number", value)),
        },
        None => Err("--port requires a value".to_string()),
    }
}

/// Validates the --host argument if one was provided
///
/// Accepts IP addresses and "localhost"; anything else is rejected early so the
/// webserver does not fail later with an opaque bind error.
pub fn validate_host_argument() -> Result<(), String> {
    if !has_arg("--host") {
        return Ok(());
    }

    match get_arg_value("--host") {
        Some(value) => {
            if value == "localhost" || value.parse::<std::net::IpAddr>().is_ok() {
                Ok(())
            } else {
                Err(format!("--host value '{}' is not a valid IP address or 'localhost'", value))
            }
        }
        None => Err("--host requires a value".to_string()),
    }
}

// =============================================================================
// HELP SYSTEM
// =============================================================================

/// Displays the help menu with all available flags and their descriptions
pub fn print_help() {
    println!("VoidSpark - Casual game world backend");
    println!();
    println!("USAGE:");
    println!("    voidspark [FLAGS]");
    println!();
    println!("CORE FLAGS:");
    println!("    --host <ADDR>             Override the webserver bind host");
    println!("    --port <PORT>             Override the webserver bind port");
    println!("    --config <PATH>           Load configuration from a custom path");
    println!("    --log-to-file             Mirror console output into the logs directory");
    println!("    --verbose, -v             Enable verbose logging for all modules");
    println!("    --help, -h                Show this help message");
    println!();
    println!("DEBUG FLAGS:");
    println!("    --debug-api               REST API debug mode");
    println!("    --debug-config            Config loading debug mode");
    println!("    --debug-database          Database operations debug mode");
    println!("    --debug-hub               Broadcast hub debug mode");
    println!("    --debug-rpc               Ledger RPC debug mode");
    println!("    --debug-system            System lifecycle debug mode");
    println!("    --debug-webserver         Webserver debug mode");
    println!("    --debug-websocket         WebSocket connection debug mode");
    println!("    --debug-world             World generator debug mode");
    println!();
    println!("EXAMPLES:");
    println!("    voidspark                                  # Start with config/defaults");
    println!("    voidspark --port 3000                      # Start on port 3000");
    println!("    voidspark --host 0.0.0.0 --port 8080       # Expose to the local network");
    println!("    voidspark --debug-hub --debug-websocket    # Trace realtime traffic");
    println!("    voidspark --log-to-file                    # Keep a log file for this run");
    println!("    voidspark --help                           # Show this help");
    println!();
    println!("For more information, visit: https://github.com/voidspark-world/backend");
}

// =============================================================================
// UTILITY FUNCTIONS
// =============================================================================

/// Checks if any debug mode is enabled
pub fn is_any_debug_enabled() -> bool {
    is_debug_system_enabled() ||
        is_debug_config_enabled() ||
        is_debug_database_enabled() ||
        is_debug_webserver_enabled() ||
        is_debug_websocket_enabled() ||
        is_debug_hub_enabled() ||
        is_debug_rpc_enabled() ||
        is_debug_world_enabled() ||
        is_debug_api_enabled()
}

/// Gets a list of all enabled debug modes
pub fn get_enabled_debug_modes() -> Vec<&'static str> {
    let mut modes = Vec::new();

    if is_debug_system_enabled() {
        modes.push("system");
    }
    if is_debug_config_enabled() {
        modes.push("config");
    }
    if is_debug_database_enabled() {
        modes.push("database");
    }
    if is_debug_webserver_enabled() {
        modes.push("webserver");
    }
    if is_debug_websocket_enabled() {
        modes.push("websocket");
    }
    if is_debug_hub_enabled() {
        modes.push("hub");
    }
    if is_debug_rpc_enabled() {
        modes.push("rpc");
    }
    if is_debug_world_enabled() {
        modes.push("world");
    }
    if is_debug_api_enabled() {
        modes.push("api");
    }
    if is_verbose_enabled() {
        modes.push("verbose");
    }
    if is_log_to_file_enabled() {
        modes.push("log-to-file");
    }

    modes
}

/// Prints debug information about current arguments and enabled debug modes
pub fn print_debug_info() {
    let args = get_cmd_args();
    println!("Command-line arguments: {:?}", args);

    let enabled_modes = get_enabled_debug_modes();
    if enabled_modes.is_empty() {
        println!("No debug modes enabled");
    } else {
        println!("Enabled debug modes: {:?}", enabled_modes);
    }
}

// =============================================================================
// COMMON ARGUMENT PATTERNS
// =============================================================================

/// Common argument parsing patterns used across binaries
pub mod patterns {
    use super::*;

    /// Checks for help flags
    pub fn is_help_requested() -> bool {
        has_arg("--help") || has_arg("-h")
    }

    /// Checks for version flags
    pub fn is_version_requested() -> bool {
        has_arg("--version") || has_arg("-V")
    }

    /// Checks for quiet/silent mode
    pub fn is_quiet_mode() -> bool {
        has_arg("--quiet") || has_arg("-q")
    }

    /// Checks for verbose mode
    pub fn is_verbose_mode() -> bool {
        has_arg("--verbose") || has_arg("-v")
    }
}
