//! Patient collection
//!
//! Patient records indexed by patient id.

use crate::models::PatientRecord;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Patient records keyed by patient id; a later insert replaces an earlier one
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientCollection {
    by_id: FxHashMap<String, PatientRecord>,
}

impl PatientCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the record it replaced
    pub fn add(&mut self, record: PatientRecord) -> Option<PatientRecord> {
        self.by_id.insert(record.patient_id.clone(), record)
    }

    #[must_use]
    pub fn get(&self, patient_id: &str) -> Option<&PatientRecord> {
        self.by_id.get(patient_id)
    }

    #[must_use]
    pub fn contains(&self, patient_id: &str) -> bool {
        self.by_id.contains_key(patient_id)
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.by_id.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PatientRecord> {
        self.by_id.values()
    }
}
