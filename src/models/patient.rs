//! Patient entity model
//!
//! This module contains the `PatientRecord` model, one row of the patient
//! demographics source keyed by patient id.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Demographic record of one patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Unique patient identifier
    pub patient_id: String,
    /// Gender as recorded in the source (not validated)
    pub gender: String,
    /// Date and time of birth
    pub date_of_birth: NaiveDateTime,
    pub marital_status: String,
    pub race: String,
    pub language: String,
    /// Percentage of the patient's population below the poverty line, verbatim
    pub poverty_percentage: String,
}

impl PatientRecord {
    /// Create a patient record with empty passthrough fields
    #[must_use]
    pub fn new(patient_id: impl Into<String>, date_of_birth: NaiveDateTime) -> Self {
        Self {
            patient_id: patient_id.into(),
            gender: String::new(),
            date_of_birth,
            marital_status: String::new(),
            race: String::new(),
            language: String::new(),
            poverty_percentage: String::new(),
        }
    }

    #[must_use]
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = gender.into();
        self
    }

    #[must_use]
    pub fn with_marital_status(mut self, marital_status: impl Into<String>) -> Self {
        self.marital_status = marital_status.into();
        self
    }
}
