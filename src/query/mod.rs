//! Patient queries: age, age at first lab test, and lab threshold checks.
//!
//! The [`PatientQueries`] trait is implemented by the in-memory [`Dataset`]
//! and by [`crate::storage::SqliteStore`], so both backends answer the same
//! questions with the same rules.

pub mod memory;

use std::fmt;

use chrono::{Local, NaiveDateTime};

use crate::dataset::Dataset;
use crate::error::Result;

/// Length of a year in days used by every age calculation
pub const DAYS_PER_YEAR: f64 = 365.25;

const SECONDS_PER_DAY: i64 = 86_400;

/// Comparison applied by [`PatientQueries::is_sick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    /// `>`: lab value strictly greater than the threshold
    GreaterThan,
    /// `<`: lab value strictly less than the threshold
    LessThan,
}

impl ComparisonOperator {
    /// Parse an operator symbol; anything other than `>` or `<` is `None`
    #[must_use]
    pub fn parse(symbol: &str) -> Option<Self> {
        match symbol {
            ">" => Some(Self::GreaterThan),
            "<" => Some(Self::LessThan),
            _ => None,
        }
    }

    /// Whether `value` satisfies the comparison against `threshold`
    #[must_use]
    pub fn matches(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::GreaterThan => value > threshold,
            Self::LessThan => value < threshold,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::GreaterThan => ">",
            Self::LessThan => "<",
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Whole years between two timestamps
///
/// Elapsed whole days are floored, then divided by [`DAYS_PER_YEAR`] and
/// floored again. Negative when `to` precedes `from`.
#[must_use]
pub fn years_between(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    let days = (to - from).num_seconds().div_euclid(SECONDS_PER_DAY);
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    let years = (days as f64 / DAYS_PER_YEAR).floor() as i64;
    years
}

/// Questions answered against loaded patient data
pub trait PatientQueries {
    /// Age in years at the given instant; fails with `PatientNotFound`
    fn age_at(&self, patient_id: &str, now: NaiveDateTime) -> Result<i64>;

    /// Age in years at the patient's earliest dated lab test
    fn age_at_first_test(&self, patient_id: &str) -> Result<i64>;

    /// Whether any of the patient's results for `lab_name` satisfies `operator`
    /// against `threshold`. Unknown patients and unrecognized operators yield
    /// `false`.
    fn is_sick(&self, patient_id: &str, lab_name: &str, operator: &str, threshold: f64)
    -> Result<bool>;

    /// Age in years now, by the local wall clock
    fn age(&self, patient_id: &str) -> Result<i64> {
        self.age_at(patient_id, Local::now().naive_local())
    }
}

/// Age of a patient in years, by the local wall clock
pub fn age(dataset: &Dataset, patient_id: &str) -> Result<i64> {
    dataset.age(patient_id)
}

/// Age of a patient in years at a fixed instant
pub fn age_at(dataset: &Dataset, patient_id: &str, now: NaiveDateTime) -> Result<i64> {
    dataset.age_at(patient_id, now)
}

/// Age of a patient in years at their earliest dated lab test
pub fn age_at_first_test(dataset: &Dataset, patient_id: &str) -> Result<i64> {
    dataset.age_at_first_test(patient_id)
}

/// Whether any matching lab result of the patient crosses the threshold
#[must_use]
pub fn is_sick(
    dataset: &Dataset,
    patient_id: &str,
    lab_name: &str,
    operator: &str,
    threshold: f64,
) -> bool {
    memory::any_lab_matches(dataset, patient_id, lab_name, operator, threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn year_length_rounds_down() {
        assert_eq!(years_between(at(1990, 1, 1), at(2024, 1, 1)), 33);
        assert_eq!(years_between(at(1990, 1, 1), at(1990, 12, 31)), 0);
    }

    #[test]
    fn negative_span_floors() {
        assert_eq!(years_between(at(2000, 1, 2), at(2000, 1, 1)), -1);
        assert_eq!(years_between(at(2000, 1, 1), at(1990, 1, 1)), -10);
    }

    #[test]
    fn operator_parsing_is_closed() {
        assert_eq!(ComparisonOperator::parse(">"), Some(ComparisonOperator::GreaterThan));
        assert_eq!(ComparisonOperator::parse("<"), Some(ComparisonOperator::LessThan));
        assert_eq!(ComparisonOperator::parse("="), None);
        assert_eq!(ComparisonOperator::parse(">="), None);
        assert_eq!(ComparisonOperator::parse(" >"), None);
    }

    #[test]
    fn comparison_is_strict() {
        assert!(!ComparisonOperator::GreaterThan.matches(5.0, 5.0));
        assert!(!ComparisonOperator::LessThan.matches(5.0, 5.0));
        assert!(ComparisonOperator::GreaterThan.matches(5.1, 5.0));
        assert!(ComparisonOperator::LessThan.matches(4.9, 5.0));
    }
}
