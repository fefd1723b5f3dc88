/// Logger configuration and CLI-driven initialization
///
/// Holds the runtime logger settings (minimum level, per-module debug and
/// verbose modes) behind a global RwLock so every log call can check them
/// cheaply.

use once_cell::sync::Lazy;
use std::sync::RwLock;

use super::levels::LogLevel;
use super::tags::LogTag;

/// Runtime logger settings
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Minimum level that gets through (errors always do)
    pub min_level: LogLevel,
    /// If non-empty, only these tag keys are logged
    pub enabled_tags: Vec<String>,
    /// Tag keys with Debug level enabled via --debug-<key>
    pub debug_modes: Vec<String>,
    /// Tag keys with Verbose level enabled via --verbose-<key>
    pub verbose_modes: Vec<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            enabled_tags: Vec::new(),
            debug_modes: Vec::new(),
            verbose_modes: Vec::new(),
        }
    }
}

/// Global logger configuration
static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

/// Build a LoggerConfig from a raw argument list
///
/// Recognized patterns:
/// - `--verbose` / `-v` lowers the minimum level to Verbose globally
/// - `--debug-<key>` enables Debug level for that tag key
/// - `--verbose-<key>` enables Verbose level for that tag key
/// - `--quiet` / `-q` raises the minimum level to Warning
fn parse_from_args(args: &[String]) -> LoggerConfig {
    let mut config = LoggerConfig::default();

    for arg in args {
        if arg == "--verbose" || arg == "-v" {
            config.min_level = LogLevel::Verbose;
        } else if arg == "--quiet" || arg == "-q" {
            config.min_level = LogLevel::Warning;
        } else if let Some(key) = arg.strip_prefix("--debug-") {
            if !key.is_empty() {
                config.debug_modes.push(key.to_string());
            }
        } else if let Some(key) = arg.strip_prefix("--verbose-") {
            if !key.is_empty() {
                config.verbose_modes.push(key.to_string());
            }
        }
    }

    config
}

/// Initialize the logger configuration from the process arguments
///
/// Called once by logger::init(). Debug flags are scanned here so later
/// should_log checks are just vector lookups.
pub fn init_from_args() {
    let config = parse_from_args(&crate::arguments::get_cmd_args());
    set_logger_config(config);
}

/// Get a copy of the current logger configuration
pub fn get_logger_config() -> LoggerConfig {
    match LOGGER_CONFIG.read() {
        Ok(config) => config.clone(),
        Err(_) => LoggerConfig::default(),
    }
}

/// Replace the logger configuration
pub fn set_logger_config(config: LoggerConfig) {
    if let Ok(mut current) = LOGGER_CONFIG.write() {
        *current = config;
    }
}

/// Apply a mutation to the logger configuration in place
pub fn update_logger_config<F>(update_fn: F)
where
    F: FnOnce(&mut LoggerConfig),
{
    if let Ok(mut current) = LOGGER_CONFIG.write() {
        update_fn(&mut current);
    }
}

/// Whether Debug-level logs are enabled for this tag
pub fn is_debug_enabled_for_tag(tag: &LogTag) -> bool {
    let key = tag.to_debug_key();
    let config = get_logger_config();
    config.min_level >= LogLevel::Debug || config.debug_modes.iter().any(|m| m == &key)
}

/// Whether Verbose-level logs are enabled for this tag
pub fn is_verbose_enabled_for_tag(tag: &LogTag) -> bool {
    let key = tag.to_debug_key();
    let config = get_logger_config();
    config.verbose_modes.iter().any(|m| m == &key)
}
