//! Graceful shutdown coordination
//!
//! Installs Ctrl+C and SIGTERM handlers that stop the webserver and flush
//! pending log writes. A second signal exits the process immediately.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::logger::{self, LogTag};

/// Set once the first shutdown signal has been handled
static SHUTDOWN_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Install signal handlers for graceful shutdown
pub fn install_shutdown_handlers() -> Result<(), String> {
    // plain Ctrl-C (works cross-platform)
    ctrlc::set_handler(|| {
        request_shutdown("Ctrl+C");
    })
    .map_err(|e| format!("Failed to install Ctrl+C handler: {}", e))?;

    // Spawn async SIGTERM listener for Unix
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        tokio::spawn(async {
            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    sigterm.recv().await;
                    request_shutdown("SIGTERM");
                }
                Err(e) => {
                    logger::error(
                        LogTag::Shutdown,
                        &format!("Failed to install SIGTERM handler: {}", e),
                    );
                }
            }
        });
    }

    Ok(())
}

/// Stop the webserver and flush logs; exit at once on a repeated signal
fn request_shutdown(source: &str) {
    if SHUTDOWN_REQUESTED.swap(true, Ordering::SeqCst) {
        logger::warning(
            LogTag::Shutdown,
            "Second signal received, exiting immediately",
        );
        logger::flush();
        std::process::exit(1);
    }

    logger::info(
        LogTag::Shutdown,
        &format!("{} received, shutting down gracefully...", source),
    );
    crate::webserver::shutdown();
    logger::flush();
}
