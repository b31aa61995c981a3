//! Tests for age and lab threshold queries

mod utils;

use ehr_reader::{EhrError, PatientQueries, age_at, age_at_first_test, is_sick, load};
use utils::{midnight, sample_sources, write_source};

#[test]
fn test_age_rounds_down_with_fixed_year_length() {
    let patients = write_source(&[
        &["PatientID", "PatientDateOfBirth"],
        &["1", "1990-01-01 00:00:00.000"],
    ]);
    let labs = write_source(&[&["PatientID", "LabName", "LabValue"]]);
    let dataset = load(patients.path(), labs.path()).unwrap();

    assert_eq!(age_at(&dataset, "1", midnight(2024, 1, 1)).unwrap(), 33);
}

#[test]
fn test_age_of_sample_patients() {
    let (patients, labs) = sample_sources();
    let dataset = load(patients.path(), labs.path()).unwrap();

    assert_eq!(dataset.age_at("1", midnight(2022, 10, 1)).unwrap(), 49);
    assert!(dataset.age("1").unwrap() >= 49);
}

#[test]
fn test_age_is_monotonic_in_birth_date() {
    let (patients, labs) = sample_sources();
    let dataset = load(patients.path(), labs.path()).unwrap();
    let now = midnight(2024, 6, 1);

    // Patient 2 was born earlier than patient 1
    assert!(dataset.age_at("2", now).unwrap() >= dataset.age_at("1", now).unwrap());
}

#[test]
fn test_age_unknown_patient() {
    let (patients, labs) = sample_sources();
    let dataset = load(patients.path(), labs.path()).unwrap();
    let err = dataset.age_at("nobody", midnight(2024, 1, 1)).unwrap_err();
    assert!(matches!(err, EhrError::PatientNotFound(ref id) if id == "nobody"));
}

#[test]
fn test_age_at_first_test_uses_earliest_lab() {
    let (patients, labs) = sample_sources();
    let dataset = load(patients.path(), labs.path()).unwrap();

    // Born 1973-08-16, earliest lab 1992-06-27
    assert_eq!(age_at_first_test(&dataset, "1").unwrap(), 18);
}

#[test]
fn test_age_at_first_test_can_be_negative() {
    let patients = write_source(&[
        &["PatientID", "PatientDateOfBirth"],
        &["1", "2000-01-01 00:00:00.000"],
    ]);
    let labs = write_source(&[
        &["PatientID", "LabName", "LabValue", "LabDateTime"],
        &["1", "X", "1", "1995-01-01 00:00:00.000"],
    ]);
    let dataset = load(patients.path(), labs.path()).unwrap();
    assert_eq!(age_at_first_test(&dataset, "1").unwrap(), -5);
}

#[test]
fn test_age_at_first_test_without_dates() {
    let patients = write_source(&[
        &["PatientID", "PatientDateOfBirth"],
        &["1", "2000-01-01 00:00:00.000"],
        &["2", "2000-01-01 00:00:00.000"],
    ]);
    let labs = write_source(&[
        &["PatientID", "LabName", "LabValue", "LabDateTime"],
        &["1", "X", "1", ""],
    ]);
    let dataset = load(patients.path(), labs.path()).unwrap();

    assert!(matches!(age_at_first_test(&dataset, "1"), Err(EhrError::NoLabHistory(_))));
    assert!(matches!(age_at_first_test(&dataset, "2"), Err(EhrError::NoLabHistory(_))));
    assert!(matches!(age_at_first_test(&dataset, "3"), Err(EhrError::PatientNotFound(_))));
}

#[test]
fn test_is_sick_any_match() {
    let patients = write_source(&[
        &["PatientID", "PatientDateOfBirth"],
        &["1", "1990-01-01 00:00:00.000"],
    ]);
    let labs = write_source(&[
        &["PatientID", "LabName", "LabValue"],
        &["1", "X", "100"],
        &["1", "X", "110"],
        &["1", "Y", "50"],
    ]);
    let dataset = load(patients.path(), labs.path()).unwrap();

    assert!(is_sick(&dataset, "1", "X", ">", 105.0));
    assert!(!is_sick(&dataset, "1", "X", "<", 90.0));
    assert!(is_sick(&dataset, "1", "X", "<", 105.0));
    // Only results for the named test count
    assert!(!is_sick(&dataset, "1", "X", "<", 60.0));
    assert!(is_sick(&dataset, "1", "Y", "<", 60.0));
}

#[test]
fn test_is_sick_is_strict() {
    let (patients, labs) = sample_sources();
    let dataset = load(patients.path(), labs.path()).unwrap();

    assert!(!is_sick(&dataset, "2", "METABOLIC: ALBUMIN", ">", 90.0));
    assert!(!is_sick(&dataset, "2", "METABOLIC: ALBUMIN", "<", 90.0));
}

#[test]
fn test_is_sick_unknown_operator_and_patient() {
    let (patients, labs) = sample_sources();
    let dataset = load(patients.path(), labs.path()).unwrap();

    for op in ["=", ">=", "", "gt"] {
        assert!(!is_sick(&dataset, "1", "METABOLIC: ALBUMIN", op, 100.0));
    }
    assert!(!is_sick(&dataset, "nobody", "METABOLIC: ALBUMIN", ">", 0.0));
    assert!(!is_sick(&dataset, "2", "CBC: MCHC", ">", 38.5));
    assert!(!is_sick(&dataset, "1", "metabolic: albumin", ">", 0.0));
}

#[test]
fn test_sample_patient_thresholds() {
    let (patients, labs) = sample_sources();
    let dataset = load(patients.path(), labs.path()).unwrap();

    assert!(dataset.is_sick("1", "METABOLIC: ALBUMIN", ">", 100.5).unwrap());
    assert!(dataset.is_sick("1", "METABOLIC: ALBUMIN", "<", 200.5).unwrap());
}

#[test]
fn test_shared_snapshot_across_threads() {
    let (patients, labs) = sample_sources();
    let dataset = load(patients.path(), labs.path()).unwrap().into_shared();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let dataset = std::sync::Arc::clone(&dataset);
            std::thread::spawn(move || age_at_first_test(&dataset, "1").unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 18);
    }
}
