//! Queries over an in-memory [`Dataset`].

use chrono::NaiveDateTime;

use super::{ComparisonOperator, PatientQueries, years_between};
use crate::dataset::Dataset;
use crate::error::{EhrError, Result};

impl PatientQueries for Dataset {
    fn age_at(&self, patient_id: &str, now: NaiveDateTime) -> Result<i64> {
        let patient = self
            .patient(patient_id)
            .ok_or_else(|| EhrError::PatientNotFound(patient_id.to_string()))?;
        Ok(years_between(patient.date_of_birth, now))
    }

    fn age_at_first_test(&self, patient_id: &str) -> Result<i64> {
        let patient = self
            .patient(patient_id)
            .ok_or_else(|| EhrError::PatientNotFound(patient_id.to_string()))?;

        // Ties on the earliest date are interchangeable
        let first = self
            .labs_for(patient_id)
            .iter()
            .filter_map(|lab| lab.lab_date)
            .min()
            .ok_or_else(|| EhrError::NoLabHistory(patient_id.to_string()))?;

        Ok(years_between(patient.date_of_birth, first))
    }

    fn is_sick(
        &self,
        patient_id: &str,
        lab_name: &str,
        operator: &str,
        threshold: f64,
    ) -> Result<bool> {
        Ok(any_lab_matches(self, patient_id, lab_name, operator, threshold))
    }
}

/// Scan the patient's labs in source order, stopping at the first hit
pub(crate) fn any_lab_matches(
    dataset: &Dataset,
    patient_id: &str,
    lab_name: &str,
    operator: &str,
    threshold: f64,
) -> bool {
    let Some(op) = ComparisonOperator::parse(operator) else {
        log::debug!("Unrecognized operator '{operator}', treating as no match");
        return false;
    };

    dataset
        .labs_for(patient_id)
        .iter()
        .filter(|lab| lab.is_test(lab_name))
        .any(|lab| op.matches(lab.lab_value, threshold))
}
