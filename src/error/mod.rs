//! Error handling for loading and querying patient data.

pub mod util;

use std::io;
use std::path::PathBuf;

/// Specialized error type for the EHR reader
#[derive(Debug, thiserror::Error)]
pub enum EhrError {
    /// A source file is missing or cannot be read
    #[error("Source unavailable: {}: {context}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        context: String,
        #[source]
        source: io::Error,
    },

    /// A data row does not have as many fields as the header
    #[error(
        "Malformed row at {}:{line}: expected {expected} fields, found {found}",
        path.display()
    )]
    MalformedRow {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A column required by the typed loader is absent from the header
    #[error("Missing column '{column}' in {}", path.display())]
    MissingColumn { path: PathBuf, column: String },

    /// A numeric or timestamp field could not be parsed
    #[error(
        "Invalid value '{value}' for column '{column}' at {}:{line}: {reason}",
        path.display()
    )]
    FieldFormat {
        path: PathBuf,
        line: usize,
        column: String,
        value: String,
        reason: String,
    },

    /// The queried patient id has no patient record
    #[error("Patient not found: {0}")]
    PatientNotFound(String),

    /// The patient has no lab results carrying a date
    #[error("No dated lab history for patient: {0}")]
    NoLabHistory(String),

    /// Error from the relational storage backend
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl EhrError {
    /// Build a `SourceUnavailable` error from an I/O failure
    pub fn source_unavailable(
        path: impl Into<PathBuf>,
        context: impl Into<String>,
        source: io::Error,
    ) -> Self {
        Self::SourceUnavailable {
            path: path.into(),
            context: context.into(),
            source,
        }
    }

    /// Whether this error came from reading or parsing a source file
    #[must_use]
    pub const fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::SourceUnavailable { .. }
                | Self::MalformedRow { .. }
                | Self::MissingColumn { .. }
                | Self::FieldFormat { .. }
        )
    }
}

/// Result type for EHR reader operations
pub type Result<T> = std::result::Result<T, EhrError>;
