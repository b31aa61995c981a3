//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::io::Write;

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::NamedTempFile;

/// Write rows as a tab-delimited source; the first row is the header
#[must_use]
pub fn write_source(rows: &[&[&str]]) -> NamedTempFile {
    let text: String = rows.iter().map(|row| row.join("\t") + "\n").collect();
    write_text(&text)
}

/// Write raw text as a source
#[must_use]
pub fn write_text(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp source");
    file.write_all(text.as_bytes()).expect("write temp source");
    file
}

/// Midnight on the given date
#[must_use]
pub fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

pub const PATIENT_HEADER: &[&str] = &[
    "PatientID",
    "PatientGender",
    "PatientDateOfBirth",
    "PatientRace",
    "PatientMaritalStatus",
    "PatientLanguage",
    "PatientPopulationPercentageBelowPoverty",
];

pub const LAB_HEADER: &[&str] = &[
    "PatientID",
    "AdmissionID",
    "LabName",
    "LabValue",
    "LabUnits",
    "LabDateTime",
];

/// Two patients; patient 1 has two albumin results, patient 2 one
pub fn sample_sources() -> (NamedTempFile, NamedTempFile) {
    let patients = write_source(&[
        PATIENT_HEADER,
        &["1", "Male", "1973-08-16 10:58:34.413", "White", "Married", "English", "13.03"],
        &["2", "Female", "1952-01-18 19:51:12.917", "Asian", "Single", "Icelandic", "6.67"],
    ]);
    let labs = write_source(&[
        LAB_HEADER,
        &["1", "13", "METABOLIC: ALBUMIN", "100", "gm/dL", "2019-01-01 10:58:34.413"],
        &["1", "1", "METABOLIC: ALBUMIN", "110", "gm/dL", "1992-06-27 03:32:50.653"],
        &["2", "2", "METABOLIC: ALBUMIN", "90", "gm/dL", "2019-05-03 05:48:55.413"],
    ]);
    (patients, labs)
}
