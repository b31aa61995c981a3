//! Progress reporting while reading sources, using the indicatif crate.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Template for the row spinner
pub const ROW_SPINNER_TEMPLATE: &str = "{spinner:.green} {elapsed_precise} {pos} rows {msg}";

/// Create a spinner that counts rows, or a hidden bar when `visible` is false
///
/// A hidden bar accepts the same calls, so callers tick it unconditionally.
#[must_use]
pub fn create_row_spinner(visible: bool, message: &str) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template(ROW_SPINNER_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Finish a progress bar and clear it from display
pub fn finish_and_clear(pb: &ProgressBar) {
    pb.finish_and_clear();
}
