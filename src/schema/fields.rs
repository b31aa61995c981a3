//! Source column definitions
//!
//! Column names for the patient and lab sources. Columns are matched by name,
//! so their order in a source header does not matter.

/// Key column shared by both sources
pub const PATIENT_ID: &str = "PatientID";

pub const PATIENT_GENDER: &str = "PatientGender";
pub const PATIENT_DATE_OF_BIRTH: &str = "PatientDateOfBirth";
pub const PATIENT_RACE: &str = "PatientRace";
pub const PATIENT_MARITAL_STATUS: &str = "PatientMaritalStatus";
pub const PATIENT_LANGUAGE: &str = "PatientLanguage";
pub const PATIENT_POVERTY: &str = "PatientPopulationPercentageBelowPoverty";

pub const ADMISSION_ID: &str = "AdmissionID";
pub const LAB_NAME: &str = "LabName";
pub const LAB_VALUE: &str = "LabValue";
pub const LAB_UNITS: &str = "LabUnits";
pub const LAB_DATE_TIME: &str = "LabDateTime";
/// Alternate lab date column name seen in older extracts
pub const LAB_DATE: &str = "LabDate";
