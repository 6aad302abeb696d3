use log::{debug, log_enabled, warn, Level};

use crate::util::hex::{format_hex_compact, pretty_hex};

/// Frames longer than this are dumped as a multi-line hex block.
const COMPACT_DUMP_LIMIT: usize = 32;

/// Initializes the logger with the `env_logger` crate.
///
/// Safe to call more than once; only the first call installs the logger.
pub fn init_logger() {
    let _ = env_logger::try_init();
}

/// Logs a warning message.
pub fn log_warn(message: &str) {
    if log_enabled!(Level::Warn) {
        warn!("{message}");
    }
}

/// Logs a debug message.
pub fn log_debug(message: &str) {
    if log_enabled!(Level::Debug) {
        debug!("{message}");
    }
}

/// Logs a hex dump of frame bytes at debug level.
///
/// Short frames fit on one line; longer ones get an offset column so field
/// positions reported elsewhere in the log can be located.
pub fn log_frame_hex(context: &str, data: &[u8]) {
    if !log_enabled!(Level::Debug) {
        return;
    }
    if data.len() <= COMPACT_DUMP_LIMIT {
        debug!("{context} ({} bytes): {}", data.len(), format_hex_compact(data));
    } else {
        debug!("{context} ({} bytes):\n{}", data.len(), pretty_hex(data, 16));
    }
}
