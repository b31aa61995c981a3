//! Configuration for loading patient and lab sources.

use crate::schema::date_utils::DEFAULT_TIMESTAMP_FORMAT;
use crate::schema::fields::{LAB_DATE, LAB_DATE_TIME, PATIENT_ID};

/// Configuration for the record loader
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Field delimiter; consecutive delimiters delimit empty fields
    pub delimiter: char,
    /// chrono format string for `date_of_birth` and lab dates
    pub timestamp_format: String,
    /// Name of the key column shared by both sources
    pub patient_id_column: String,
    /// Candidate names for the lab date column, first present wins
    pub lab_date_columns: Vec<String>,
    /// Show a spinner while rows are read
    pub show_progress: bool,
    /// Emit a debug log line every this many rows (0 disables)
    pub progress_interval: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: '\t',
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            patient_id_column: PATIENT_ID.to_string(),
            lab_date_columns: vec![LAB_DATE_TIME.to_string(), LAB_DATE.to_string()],
            show_progress: false,
            progress_interval: 100_000,
        }
    }
}

impl LoaderConfig {
    /// Create a new loader configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different field delimiter
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Use a different timestamp format
    #[must_use]
    pub fn with_timestamp_format(mut self, format: &str) -> Self {
        self.timestamp_format = format.to_string();
        self
    }

    /// Use a different key column name
    #[must_use]
    pub fn with_patient_id_column(mut self, column: &str) -> Self {
        self.patient_id_column = column.to_string();
        self
    }

    /// Replace the candidate lab date column names
    #[must_use]
    pub fn with_lab_date_columns(mut self, columns: &[&str]) -> Self {
        self.lab_date_columns = columns.iter().map(ToString::to_string).collect();
        self
    }

    /// Enable or disable the loading spinner
    #[must_use]
    pub const fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}
