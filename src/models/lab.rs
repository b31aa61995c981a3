//! Lab result entity model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One laboratory measurement for a patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabResult {
    /// Patient the result belongs to; need not have a patient record
    pub patient_id: String,
    pub admission_id: String,
    /// Test identifier, e.g. `METABOLIC: ALBUMIN`
    pub lab_name: String,
    pub lab_value: f64,
    pub lab_units: String,
    /// When the test was taken, if the source records it
    pub lab_date: Option<NaiveDateTime>,
}

impl LabResult {
    /// Create a lab result with empty admission and unit fields
    #[must_use]
    pub fn new(
        patient_id: impl Into<String>,
        lab_name: impl Into<String>,
        lab_value: f64,
        lab_date: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            patient_id: patient_id.into(),
            admission_id: String::new(),
            lab_name: lab_name.into(),
            lab_value,
            lab_units: String::new(),
            lab_date,
        }
    }

    /// Check whether this result is for the named test (exact, case-sensitive)
    #[must_use]
    pub fn is_test(&self, lab_name: &str) -> bool {
        self.lab_name == lab_name
    }
}
