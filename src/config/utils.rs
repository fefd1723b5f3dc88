use super::schemas::Config;
/// Configuration utilities - loading, reloading, and access helpers
///
/// This module provides utility functions for working with the configuration system:
/// - Loading configuration from disk (with env var overrides)
/// - Hot-reloading configuration at runtime
/// - Thread-safe access helpers
use once_cell::sync::OnceCell;
use std::path::PathBuf;
use std::sync::RwLock;

/// Global configuration instance
///
/// This is the single source of truth for all configuration values.
/// Access it using the helper functions below.
pub static CONFIG: OnceCell<RwLock<Config>> = OnceCell::new();

/// Resolve the config file path: --config CLI flag wins, otherwise the
/// platform data directory
pub fn resolve_config_path() -> PathBuf {
    match crate::arguments::get_config_override() {
        Some(path) => PathBuf::from(path),
        None => crate::paths::get_config_path(),
    }
}

/// Load configuration from disk and initialize the global CONFIG
///
/// This should be called once at startup. If the config file doesn't exist,
/// it will use default values from the schema definitions. Environment
/// overrides (PORT, SOLANA_RPC, VOIDSPARK_DB) are applied on top of
/// whatever was loaded.
///
/// # Returns
/// - `Ok(())` - Configuration loaded successfully
/// - `Err(String)` - Error message if loading failed
pub fn load_config() -> Result<(), String> {
    let path = resolve_config_path();
    load_config_from_path(&path.to_string_lossy())
}

/// Read and parse a configuration file without touching the global CONFIG
///
/// Missing file falls back to defaults. Environment overrides are applied
/// to the result.
pub fn read_config_from_path(path: &str) -> Result<Config, String> {
    let mut config = if std::path::Path::new(path).exists() {
        // Load from file
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path, e))?;

        toml::from_str::<Config>(&contents)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path, e))?
    } else {
        // Use defaults if file doesn't exist
        eprintln!("⚠️  Config file '{}' not found, using default values", path);
        Config::default()
    };

    apply_env_overrides(&mut config);

    Ok(config)
}

/// Load configuration from a specific file path
///
/// # Arguments
/// * `path` - Path to the TOML configuration file
///
/// # Returns
/// - `Ok(())` - Configuration loaded successfully
/// - `Err(String)` - Error message if loading failed
pub fn load_config_from_path(path: &str) -> Result<(), String> {
    let config = read_config_from_path(path)?;

    CONFIG
        .set(RwLock::new(config))
        .map_err(|_| "Config already initialized".to_string())?;

    Ok(())
}

/// Apply environment variable overrides to a loaded configuration
///
/// Recognized variables:
/// - `PORT` - webserver port
/// - `SOLANA_RPC` - ledger RPC endpoint
/// - `VOIDSPARK_DB` - database filename
fn apply_env_overrides(config: &mut Config) {
    if let Ok(port) = std::env::var("PORT") {
        match port.parse::<u16>() {
            Ok(port) if port > 0 => config.webserver.port = port,
            _ => eprintln!("⚠️  Ignoring invalid PORT value '{}'", port),
        }
    }

    if let Ok(rpc_url) = std::env::var("SOLANA_RPC") {
        if !rpc_url.is_empty() {
            config.ledger.rpc_url = rpc_url;
        }
    }

    if let Ok(filename) = std::env::var("VOIDSPARK_DB") {
        if !filename.is_empty() {
            config.database.filename = filename;
        }
    }
}

/// Reload configuration from disk
///
/// This allows hot-reloading configuration changes without restarting the application.
/// The configuration is atomically replaced, so reads are always consistent.
///
/// # Returns
/// - `Ok(())` - Configuration reloaded successfully
/// - `Err(String)` - Error message if reloading failed
pub fn reload_config() -> Result<(), String> {
    let path = resolve_config_path();
    reload_config_from_path(&path.to_string_lossy())
}

/// Reload configuration from a specific file path
///
/// # Arguments
/// * `path` - Path to the TOML configuration file
///
/// # Returns
/// - `Ok(())` - Configuration reloaded successfully
/// - `Err(String)` - Error message if reloading failed
pub fn reload_config_from_path(path: &str) -> Result<(), String> {
    let new_config = read_config_from_path(path)?;

    if let Some(config_lock) = CONFIG.get() {
        let mut config = config_lock
            .write()
            .map_err(|e| format!("Failed to acquire config write lock: {}", e))?;
        *config = new_config;
        Ok(())
    } else {
        Err("Config not initialized. Call load_config() first.".to_string())
    }
}

/// Execute a function with read access to the configuration
///
/// This is the recommended way to read configuration values.
/// The closure receives an immutable reference to the Config.
///
/// # Arguments
/// * `f` - Closure that receives a reference to Config
///
/// # Returns
/// The return value of the closure
///
/// # Example
/// ```no_run
/// use voidspark::config::with_config;
///
/// let port = with_config(|cfg| cfg.webserver.port);
/// let rpc_url = with_config(|cfg| cfg.ledger.rpc_url.clone());
/// ```
pub fn with_config<F, R>(f: F) -> R
where
    F: FnOnce(&Config) -> R,
{
    let config_lock = CONFIG
        .get()
        .expect("Config not initialized. Call load_config() first.");

    let config = config_lock
        .read()
        .expect("Failed to acquire config read lock");

    f(&config)
}

/// Get a clone of the entire configuration
///
/// This is useful when you need to hold onto config values across await points.
/// Note: This clones the entire config, so use with_config() for simple reads.
///
/// # Returns
/// A cloned copy of the current configuration
pub fn get_config_clone() -> Config {
    with_config(|cfg| cfg.clone())
}

/// Save the current configuration to disk
///
/// This writes the current in-memory configuration to the specified file.
/// Useful for persisting runtime changes.
///
/// # Arguments
/// * `path` - Path where to save the configuration (default: resolved config path)
///
/// # Returns
/// - `Ok(())` - Configuration saved successfully
/// - `Err(String)` - Error message if saving failed
pub fn save_config(path: Option<&str>) -> Result<(), String> {
    let path = match path {
        Some(p) => PathBuf::from(p),
        None => resolve_config_path(),
    };

    let config_str = with_config(|cfg| {
        toml::to_string_pretty(cfg).map_err(|e| format!("Failed to serialize config: {}", e))
    })?;

    std::fs::write(&path, config_str)
        .map_err(|e| format!("Failed to write config file '{}': {}", path.display(), e))?;

    Ok(())
}

/// Check if configuration has been initialized
///
/// # Returns
/// `true` if load_config() has been called successfully
pub fn is_config_initialized() -> bool {
    CONFIG.get().is_some()
}

// ============================================================================
// CONFIG UPDATE HELPERS
// ============================================================================

/// Update a config section in-memory and optionally save to disk
///
/// This is a generic helper that allows updating any config section.
/// It uses a closure to perform the update, ensuring type safety.
///
/// # Arguments
/// * `update_fn` - Closure that receives mutable Config reference and performs updates
/// * `save_to_disk` - Whether to persist changes to config.toml
///
/// # Returns
/// - `Ok(())` - Update successful
/// - `Err(String)` - Update failed with error message
pub fn update_config_section<F>(update_fn: F, save_to_disk: bool) -> Result<(), String>
where
    F: FnOnce(&mut Config),
{
    let config_lock = CONFIG
        .get()
        .ok_or("Config not initialized. Call load_config() first.")?;

    {
        let mut config = config_lock
            .write()
            .map_err(|e| format!("Failed to acquire config write lock: {}", e))?;

        // Apply the update
        update_fn(&mut config);
    } // Lock released here

    // Optionally save to disk (without holding the lock)
    if save_to_disk {
        save_config(None)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.webserver.host, "127.0.0.1");
        assert_eq!(config.webserver.port, 8080);
        assert_eq!(config.webserver.websocket.buffer_size, 64);
        assert_eq!(config.ledger.rpc_url, "https://api.mainnet-beta.solana.com");
        assert_eq!(config.ledger.request_timeout_secs, 8);
        assert_eq!(config.database.filename, "voidspark.db");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[ledger]"));
        assert!(toml_str.contains("[database]"));
        assert!(toml_str.contains("[webserver]"));
        assert!(toml_str.contains("[webserver.websocket]"));
    }

    #[test]
    fn test_partial_config_parses_with_defaults() {
        let parsed: Config = toml::from_str("[webserver]\nport = 9000\n").unwrap();
        assert_eq!(parsed.webserver.port, 9000);
        assert_eq!(parsed.webserver.host, "127.0.0.1");
        assert_eq!(parsed.database.filename, "voidspark.db");
    }

    #[test]
    fn test_validation() {
        let mut config = Config::default();
        assert!(config.webserver.validate().is_ok());
        assert!(config.ledger.validate().is_ok());
        assert_eq!(config.webserver.bind_address(), "127.0.0.1:8080");

        config.webserver.port = 0;
        assert!(config.webserver.validate().is_err());

        config.webserver.port = 8080;
        config.ledger.rpc_url = String::new();
        assert!(config.ledger.validate().is_err());
    }

    // The global CONFIG cell and the override env vars are process-wide, so
    // everything touching them happens inside this single test.
    #[test]
    fn test_env_overrides_and_global_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[webserver]\nport = 8081\n").unwrap();
        drop(file);

        std::env::set_var("PORT", "9100");
        std::env::set_var("SOLANA_RPC", "https://rpc.example.test");
        std::env::set_var("VOIDSPARK_DB", "override.db");

        let config = read_config_from_path(&path.to_string_lossy()).unwrap();
        assert_eq!(config.webserver.port, 9100);
        assert_eq!(config.ledger.rpc_url, "https://rpc.example.test");
        assert_eq!(config.database.filename, "override.db");

        std::env::remove_var("PORT");
        std::env::remove_var("SOLANA_RPC");
        std::env::remove_var("VOIDSPARK_DB");

        // Missing file falls back to defaults
        let missing = dir.path().join("nope.toml");
        let config = read_config_from_path(&missing.to_string_lossy()).unwrap();
        assert_eq!(config.webserver.port, 8080);

        // Global load + in-memory update
        load_config_from_path(&path.to_string_lossy()).unwrap();
        assert!(is_config_initialized());
        assert_eq!(with_config(|cfg| cfg.webserver.port), 8081);

        update_config_section(|cfg| cfg.webserver.port = 9099, false).unwrap();
        assert_eq!(get_config_clone().webserver.port, 9099);

        reload_config_from_path(&path.to_string_lossy()).unwrap();
        assert_eq!(with_config(|cfg| cfg.webserver.port), 8081);
    }
}
