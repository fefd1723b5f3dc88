/// File logging backend
///
/// Mirrors console output into a per-run log file under the logs directory
/// when --log-to-file is passed. Writes are buffered and flushed on every
/// line so a crash loses at most the line being written.

use chrono::Local;
use once_cell::sync::Lazy;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::sync::Mutex;

/// Open log file handle, None when file logging is disabled
static LOG_FILE: Lazy<Mutex<Option<BufWriter<std::fs::File>>>> = Lazy::new(|| Mutex::new(None));

/// Initialize file logging if --log-to-file was passed
///
/// Creates `voidspark_<timestamp>.log` in the logs directory. Failure to
/// open the file is reported on stderr and file logging stays disabled;
/// console logging is unaffected.
pub fn init_file_logging() {
    if !crate::arguments::is_log_to_file_enabled() {
        return;
    }

    let filename = format!("voidspark_{}.log", Local::now().format("%Y%m%d_%H%M%S"));
    let path = crate::paths::get_logs_directory().join(filename);

    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            if let Ok(mut guard) = LOG_FILE.lock() {
                *guard = Some(BufWriter::new(file));
            }
            eprintln!("Logging to file: {}", path.display());
        }
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", path.display(), e);
        }
    }
}

/// Append a line to the log file, if file logging is active
pub fn write_to_file(line: &str) {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(writer) = guard.as_mut() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

/// Flush any buffered log writes
///
/// Called during shutdown so the tail of the log survives process exit.
pub fn flush_file_logging() {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(writer) = guard.as_mut() {
            let _ = writer.flush();
        }
    }
}
