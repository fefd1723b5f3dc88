//! Axum webserver implementation
//!
//! Main server lifecycle management including startup, shutdown, and
//! graceful termination.

use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tower_http::cors::CorsLayer;

use crate::{
    arguments,
    logger::{self, LogTag},
    webserver::{routes, state::AppState},
};

/// Global shutdown notifier
static SHUTDOWN_NOTIFY: once_cell::sync::Lazy<Arc<Notify>> =
    once_cell::sync::Lazy::new(|| Arc::new(Notify::new()));

/// Start the webserver
///
/// This function blocks until the server is shut down
pub async fn start_server(state: Arc<AppState>) -> Result<(), String> {
    let host = arguments::get_host_override()
        .unwrap_or_else(|| state.config.webserver.host.clone());
    let port = arguments::get_port_override().unwrap_or(state.config.webserver.port);

    logger::debug(
        LogTag::Webserver,
        &format!("🌐 Starting webserver on {}:{}", host, port),
    );

    // Build the router
    let app = build_app(Arc::clone(&state));

    // Parse bind address
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| format!("Invalid bind address {}:{}: {}", host, port, e))?;

    // Create TCP listener
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        // Provide helpful error message for common cases
        match e.kind() {
            std::io::ErrorKind::AddrInUse => {
                format!(
                    "Failed to bind to {}: Address already in use\n\
                     \n\
                     This usually means another instance of the VoidSpark backend is running.\n\
                     \n\
                     To verify and stop other instances:\n\
                       1. Check: ps aux | grep voidspark | grep -v grep\n\
                       2. Stop: pkill -f voidspark\n\
                       3. Verify: ps aux | grep voidspark | grep -v grep",
                    addr
                )
            }
            std::io::ErrorKind::PermissionDenied => {
                format!(
                    "Failed to bind to {}: Permission denied\n\
                     \n\
                     Port {} requires elevated privileges on this system.\n\
                     Consider using a port above 1024 or running with appropriate permissions.",
                    addr, port
                )
            }
            _ => format!("Failed to bind to {}: {}", addr, e),
        }
    })?;

    logger::info(
        LogTag::Webserver,
        &format!("✅ Webserver listening on http://{}", addr),
    );
    logger::debug(
        LogTag::Webserver,
        &format!("📊 API endpoints available at http://{}/api", addr),
    );
    logger::debug(
        LogTag::Webserver,
        &format!("🔌 WebSocket hub available at ws://{}/ws", addr),
    );

    // Run the server with graceful shutdown
    let shutdown_signal = async {
        SHUTDOWN_NOTIFY.notified().await;
        logger::debug(
            LogTag::Webserver,
            "Received shutdown signal, stopping webserver...",
        );
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    logger::debug(LogTag::Webserver, "✅ Webserver stopped gracefully");

    Ok(())
}

/// Trigger webserver shutdown
pub fn shutdown() {
    logger::debug(LogTag::Webserver, "Triggering webserver shutdown...");
    SHUTDOWN_NOTIFY.notify_one();
}

/// Build the Axum application with all routes and middleware
fn build_app(state: Arc<AppState>) -> Router {
    let app = routes::create_router(state);

    // Browser clients call the API from arbitrary origins
    let app = app.layer(CorsLayer::permissive());

    app
}
