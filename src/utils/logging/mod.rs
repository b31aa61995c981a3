//! Logging utilities for load reporting and progress tracking

pub mod log;
pub mod progress;

pub use self::log::{log_load_complete, log_load_start, log_source_warning};
pub use progress::{create_row_spinner, finish_and_clear};
