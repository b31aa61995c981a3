//! The loaded patient and lab data.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::collections::{LabCollection, PatientCollection};
use crate::models::{LabResult, PatientRecord};

/// Patients and their lab histories, immutable once loaded
///
/// Labs are not required to reference a known patient; the join happens
/// at query time. Reloading produces a new `Dataset`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    patients: PatientCollection,
    labs: LabCollection,
}

impl Dataset {
    #[must_use]
    pub const fn new(patients: PatientCollection, labs: LabCollection) -> Self {
        Self { patients, labs }
    }

    #[must_use]
    pub fn patient(&self, patient_id: &str) -> Option<&PatientRecord> {
        self.patients.get(patient_id)
    }

    /// Lab results for a patient in source order
    #[must_use]
    pub fn labs_for(&self, patient_id: &str) -> &[LabResult] {
        self.labs.get(patient_id)
    }

    #[must_use]
    pub const fn patients(&self) -> &PatientCollection {
        &self.patients
    }

    #[must_use]
    pub const fn labs(&self) -> &LabCollection {
        &self.labs
    }

    #[must_use]
    pub fn patient_count(&self) -> usize {
        self.patients.count()
    }

    #[must_use]
    pub const fn lab_count(&self) -> usize {
        self.labs.count()
    }

    /// Patient ids that have lab results but no patient record, sorted
    #[must_use]
    pub fn orphan_lab_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .labs
            .patient_ids()
            .filter(|id| !self.patients.contains(id))
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Wrap into a shared snapshot for concurrent readers
    #[must_use]
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}
