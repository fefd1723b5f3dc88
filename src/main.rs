use voidspark::{
    arguments::{patterns, print_debug_info, print_help},
    logger::{self as logger, LogTag},
};

/// Main entry point for the VoidSpark backend
///
/// Handles:
/// - --help / --version (print and exit)
/// - Headless service mode (default): REST API plus the broadcast hub
#[tokio::main]
async fn main() {
    // Ensure all directories exist BEFORE logger initialization
    // (Logger needs logs directory to create log files)
    if let Err(e) = voidspark::paths::ensure_all_directories() {
        eprintln!("❌ Failed to create required directories: {}", e);
        std::process::exit(1);
    }

    // Initialize logger system (now safe to create log files)
    logger::init();

    // Check for help request first (before any other processing)
    if patterns::is_help_requested() {
        print_help();
        std::process::exit(0);
    }

    if patterns::is_version_requested() {
        println!("voidspark {}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    // Print debug information if any debug modes are enabled
    print_debug_info();

    match voidspark::run::run_server().await {
        Ok(_) => {
            logger::info(LogTag::System, "✅ VoidSpark backend exited cleanly");
        }
        Err(e) => {
            logger::error(LogTag::System, &format!("❌ VoidSpark backend failed: {}", e));
            std::process::exit(1);
        }
    }
}
