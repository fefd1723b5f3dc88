//! Backend startup sequence
//!
//! Wires configuration, the document store, and the broadcast hub together,
//! then runs the webserver until shutdown.

use std::sync::Arc;

use crate::{
    database::Database,
    logger::{self, LogTag},
    webserver::{self, state::AppState, ws::WsHub},
};

/// Main backend execution function - handles the full service lifecycle
pub async fn run_server() -> Result<(), String> {
    logger::info(LogTag::System, "VoidSpark backend starting up...");

    // 1. Ensure all required directories exist (safety backup, already done in main.rs)
    crate::paths::ensure_all_directories()
        .map_err(|e| format!("Failed to create required directories: {}", e))?;

    // 2. Validate CLI arguments early (before any processing)
    if let Err(e) = crate::arguments::validate_port_argument() {
        logger::error(
            LogTag::System,
            &format!("Argument validation failed: {}", e),
        );
        return Err(e);
    }

    if let Err(e) = crate::arguments::validate_host_argument() {
        logger::error(
            LogTag::System,
            &format!("Argument validation failed: {}", e),
        );
        return Err(e);
    }

    // 3. Log CLI overrides (if provided)
    if let Some(port) = crate::arguments::get_port_override() {
        if crate::arguments::is_privileged_port(port) {
            logger::warning(
                LogTag::System,
                &format!(
                    "Port {} requires elevated privileges (root/Administrator)",
                    port
                ),
            );
        }

        logger::info(
            LogTag::System,
            &format!("CLI override: Using port {}", port),
        );
    }

    if let Some(host) = crate::arguments::get_host_override() {
        logger::info(
            LogTag::System,
            &format!("CLI override: Using host {}", host),
        );

        if host == "0.0.0.0" {
            logger::warning(
                LogTag::System,
                "Binding to 0.0.0.0 allows remote access - ensure firewall is configured",
            );
        }
    }

    // 4. Load configuration (if not already loaded by main.rs)
    if !crate::config::is_config_initialized() {
        crate::config::load_config().map_err(|e| format!("Failed to load config: {}", e))?;
        logger::info(LogTag::System, "Configuration loaded successfully");
    }

    let config = crate::config::get_config_clone();

    // 5. Validate configuration sections used at runtime
    config
        .webserver
        .validate()
        .map_err(|e| format!("Invalid webserver config: {}", e))?;
    config
        .ledger
        .validate()
        .map_err(|e| format!("Invalid ledger config: {}", e))?;

    // 6. Open the document store
    let db_path = crate::paths::get_database_path(&config.database.filename);
    let db = Database::new(&db_path)
        .map_err(|e| format!("Failed to open document store: {}", e))?;

    logger::info(
        LogTag::System,
        &format!("Document store ready at {}", db_path.display()),
    );

    // 7. Create the broadcast hub
    let hub = WsHub::new(config.webserver.websocket.buffer_size);

    // 8. Assemble shared application state
    let state = Arc::new(AppState::new(config, Arc::new(db), hub));

    // 9. Install signal handlers for graceful shutdown
    crate::shutdown::install_shutdown_handlers()?;

    // 10. Run the webserver until shutdown is requested
    webserver::start_server(state).await?;

    logger::info(LogTag::System, "VoidSpark backend stopped");
    logger::flush();

    Ok(())
}
