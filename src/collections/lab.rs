//! Lab result collection
//!
//! Lab results grouped by patient id, each group in source order.

use crate::models::LabResult;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Lab results grouped by patient id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabCollection {
    by_patient: FxHashMap<String, Vec<LabResult>>,
    total: usize,
}

impl LabCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result to its patient's sequence, creating the sequence if needed
    pub fn add(&mut self, lab: LabResult) {
        self.by_patient
            .entry(lab.patient_id.clone())
            .or_default()
            .push(lab);
        self.total += 1;
    }

    /// All results for a patient in source order; empty for unknown ids
    #[must_use]
    pub fn get(&self, patient_id: &str) -> &[LabResult] {
        self.by_patient
            .get(patient_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of results across all patients
    #[must_use]
    pub const fn count(&self) -> usize {
        self.total
    }

    /// Number of distinct patient ids with at least one result
    #[must_use]
    pub fn patient_count(&self) -> usize {
        self.by_patient.len()
    }

    pub fn patient_ids(&self) -> impl Iterator<Item = &str> {
        self.by_patient.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabResult> {
        self.by_patient.values().flatten()
    }
}
