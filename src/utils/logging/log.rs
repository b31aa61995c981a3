//! Load reporting
//!
//! One `info!` line when a source starts loading and one when it is done, so a
//! log shows which file a failure belongs to.

use std::path::Path;
use std::time::Duration;

/// Announce that `what` (e.g. "patients") is about to be read from `path`
pub fn log_load_start(what: &str, path: &Path) {
    log::info!("Loading {what} from {}", path.display());
}

/// Report the row count and duration of a finished load
pub fn log_load_complete(what: &str, path: &Path, rows: usize, elapsed: Duration) {
    let per_sec = rows as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
    log::info!(
        "Loaded {rows} {what} rows from {} in {elapsed:?} ({per_sec:.0} rows/s)",
        path.display()
    );
}

/// Warn about data that loads but deserves attention (duplicates, orphans)
pub fn log_source_warning(path: &Path, message: &str) {
    log::warn!("{}: {message}", path.display());
}
