//! A Rust library for loading tab-delimited patient and lab tables and
//! answering age and lab-threshold questions about a patient.

pub mod collections;
pub mod config;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod models;
pub mod query;
pub mod reader;
pub mod schema;
pub mod storage;
pub mod utils;

// Re-export the most common types for easier use
pub use config::LoaderConfig;
pub use dataset::Dataset;
pub use error::{EhrError, Result};
pub use loader::{RawDataset, load, load_raw, load_with_config};
pub use models::{FieldMap, LabResult, PatientRecord};
pub use query::{ComparisonOperator, PatientQueries, age, age_at, age_at_first_test, is_sick};
pub use storage::SqliteStore;
