//! Domain models
//!
//! Typed records produced by the loader: patient demographics and lab results.

pub mod lab;
pub mod patient;

pub use lab::LabResult;
pub use patient::PatientRecord;

use std::collections::BTreeMap;

/// Column name to raw string value, for one source row minus its key column
pub type FieldMap = BTreeMap<String, String>;
