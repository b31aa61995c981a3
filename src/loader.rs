//! Patient and lab source loading
//!
//! Two forms are offered. [`load_raw`] keeps every field as a string and groups
//! rows by patient id. [`load`] additionally parses birth dates, lab values and
//! lab dates into a typed [`Dataset`], failing the whole load on the first
//! value that does not parse.

use std::path::{Path, PathBuf};
use std::time::Instant;

use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::collections::{LabCollection, PatientCollection};
use crate::config::LoaderConfig;
use crate::dataset::Dataset;
use crate::error::{EhrError, Result};
use crate::models::{FieldMap, LabResult, PatientRecord};
use crate::reader::{DelimitedReader, Header, Row};
use crate::schema::date_utils::parse_timestamp;
use crate::schema::fields::{
    ADMISSION_ID, LAB_NAME, LAB_UNITS, LAB_VALUE, PATIENT_DATE_OF_BIRTH, PATIENT_GENDER,
    PATIENT_LANGUAGE, PATIENT_MARITAL_STATUS, PATIENT_POVERTY, PATIENT_RACE,
};
use crate::utils::logging::{
    create_row_spinner, finish_and_clear, log_load_complete, log_load_start, log_source_warning,
};

/// Rows of both sources as string fields, grouped by patient id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDataset {
    patients: FxHashMap<String, FieldMap>,
    labs: FxHashMap<String, Vec<FieldMap>>,
}

impl RawDataset {
    /// Patient id to the patient's fields (key column excluded)
    #[must_use]
    pub const fn patients(&self) -> &FxHashMap<String, FieldMap> {
        &self.patients
    }

    /// Patient id to that patient's lab rows in source order (key column excluded)
    #[must_use]
    pub const fn labs(&self) -> &FxHashMap<String, Vec<FieldMap>> {
        &self.labs
    }
}

/// Load both sources keeping all fields as strings
pub fn load_raw(patient_path: &Path, lab_path: &Path, config: &LoaderConfig) -> Result<RawDataset> {
    let mut dataset = RawDataset::default();

    let key_index = |header: &Header| Ok::<_, EhrError>(header.index_of(&config.patient_id_column));

    read_keyed(patient_path, config, "patients", key_index, |key, id, header, row| {
        if dataset
            .patients
            .insert(id.to_string(), field_map(header, row, *key))
            .is_some()
        {
            log::debug!("Duplicate patient id {id} at line {}, keeping later row", row.line);
        }
        Ok(())
    })?;

    read_keyed(lab_path, config, "labs", key_index, |key, id, header, row| {
        dataset
            .labs
            .entry(id.to_string())
            .or_default()
            .push(field_map(header, row, *key));
        Ok(())
    })?;

    Ok(dataset)
}

/// Load both sources into a typed [`Dataset`] using the default configuration
pub fn load(patient_path: &Path, lab_path: &Path) -> Result<Dataset> {
    load_with_config(patient_path, lab_path, &LoaderConfig::default())
}

/// Load both sources into a typed [`Dataset`]
pub fn load_with_config(
    patient_path: &Path,
    lab_path: &Path,
    config: &LoaderConfig,
) -> Result<Dataset> {
    let patients = load_patients(patient_path, config)?;
    let labs = load_labs(lab_path, config)?;
    let dataset = Dataset::new(patients, labs);

    let orphans = dataset.orphan_lab_ids();
    if !orphans.is_empty() {
        log_source_warning(
            lab_path,
            &format!("{} patient ids have lab results but no patient record", orphans.len()),
        );
    }

    Ok(dataset)
}

/// Load the patient source into a typed collection
pub fn load_patients(path: &Path, config: &LoaderConfig) -> Result<PatientCollection> {
    let mut patients = PatientCollection::new();
    let mut duplicates = 0usize;

    let resolve = |header: &Header| PatientColumns::resolve(header, path);
    read_keyed(path, config, "patients", resolve, |cols, id, _, row| {
        let record = cols.parse(id, row, path, config)?;
        if patients.add(record).is_some() {
            duplicates += 1;
        }
        Ok(())
    })?;

    if duplicates > 0 {
        log_source_warning(
            path,
            &format!("{duplicates} duplicate patient rows replaced earlier rows"),
        );
    }
    Ok(patients)
}

/// Load the lab source into a typed collection grouped by patient id
pub fn load_labs(path: &Path, config: &LoaderConfig) -> Result<LabCollection> {
    let mut labs = LabCollection::new();
    let resolve = |header: &Header| LabColumns::resolve(header, path, config);
    read_keyed(path, config, "labs", resolve, |cols, id, _, row| {
        labs.add(cols.parse(id, row, path, config)?);
        Ok(())
    })?;

    Ok(labs)
}

/// Single pass over a source, handing each row and its patient id to `on_row`
///
/// `setup` runs once against the header before any row is read; its output is
/// passed back to every `on_row` call.
fn read_keyed<C, S, F>(
    path: &Path,
    config: &LoaderConfig,
    what: &str,
    setup: S,
    mut on_row: F,
) -> Result<usize>
where
    S: FnOnce(&Header) -> Result<C>,
    F: FnMut(&C, &str, &Header, &Row) -> Result<()>,
{
    let start = Instant::now();
    log_load_start(what, path);

    let reader = DelimitedReader::open(path, config.delimiter)?;
    let header = reader.header().clone();
    log::debug!("{what} columns: {}", header.columns().iter().join(", "));
    let key = header.require(&config.patient_id_column, path)?;
    let context = setup(&header)?;

    let spinner = create_row_spinner(config.show_progress, what);
    let mut rows = 0usize;
    for row in reader {
        let row = row?;
        on_row(&context, &row.fields[key], &header, &row)?;
        rows += 1;
        spinner.inc(1);
        if config.progress_interval > 0 && rows % config.progress_interval == 0 {
            log::debug!("Read {rows} {what} rows from {}", path.display());
        }
    }
    finish_and_clear(&spinner);

    log_load_complete(what, path, rows, start.elapsed());
    Ok(rows)
}

fn field_map(header: &Header, row: &Row, key: Option<usize>) -> FieldMap {
    header
        .columns()
        .iter()
        .zip(&row.fields)
        .enumerate()
        .filter(|(i, _)| Some(*i) != key)
        .map(|(_, (name, value))| (name.clone(), value.clone()))
        .collect()
}

fn field_error(path: &Path, row: &Row, column: &str, value: &str, reason: String) -> EhrError {
    EhrError::FieldFormat {
        path: PathBuf::from(path),
        line: row.line,
        column: column.to_string(),
        value: value.to_string(),
        reason,
    }
}

fn optional(row: &Row, index: Option<usize>) -> String {
    index.map(|i| row.fields[i].clone()).unwrap_or_default()
}

/// Column positions of the patient source
struct PatientColumns {
    date_of_birth: usize,
    gender: Option<usize>,
    race: Option<usize>,
    marital_status: Option<usize>,
    language: Option<usize>,
    poverty: Option<usize>,
}

impl PatientColumns {
    fn resolve(header: &Header, path: &Path) -> Result<Self> {
        Ok(Self {
            date_of_birth: header.require(PATIENT_DATE_OF_BIRTH, path)?,
            gender: header.index_of(PATIENT_GENDER),
            race: header.index_of(PATIENT_RACE),
            marital_status: header.index_of(PATIENT_MARITAL_STATUS),
            language: header.index_of(PATIENT_LANGUAGE),
            poverty: header.index_of(PATIENT_POVERTY),
        })
    }

    fn parse(&self, id: &str, row: &Row, path: &Path, config: &LoaderConfig) -> Result<PatientRecord> {
        let dob = &row.fields[self.date_of_birth];
        let date_of_birth = parse_timestamp(dob, &config.timestamp_format)
            .map_err(|e| field_error(path, row, PATIENT_DATE_OF_BIRTH, dob, e.to_string()))?;

        Ok(PatientRecord {
            patient_id: id.to_string(),
            gender: optional(row, self.gender),
            date_of_birth,
            marital_status: optional(row, self.marital_status),
            race: optional(row, self.race),
            language: optional(row, self.language),
            poverty_percentage: optional(row, self.poverty),
        })
    }
}

/// Column positions of the lab source
struct LabColumns {
    lab_name: usize,
    lab_value: usize,
    admission_id: Option<usize>,
    lab_units: Option<usize>,
    lab_date: Option<(usize, String)>,
}

impl LabColumns {
    fn resolve(header: &Header, path: &Path, config: &LoaderConfig) -> Result<Self> {
        let lab_date = config
            .lab_date_columns
            .iter()
            .find_map(|name| header.index_of(name).map(|i| (i, name.clone())));
        if lab_date.is_none() {
            log_source_warning(path, "No lab date column, lab results carry no dates");
        }

        Ok(Self {
            lab_name: header.require(LAB_NAME, path)?,
            lab_value: header.require(LAB_VALUE, path)?,
            admission_id: header.index_of(ADMISSION_ID),
            lab_units: header.index_of(LAB_UNITS),
            lab_date,
        })
    }

    fn parse(&self, id: &str, row: &Row, path: &Path, config: &LoaderConfig) -> Result<LabResult> {
        let value = &row.fields[self.lab_value];
        let lab_value = value
            .trim()
            .parse::<f64>()
            .map_err(|e| field_error(path, row, LAB_VALUE, value, e.to_string()))?;
        if !lab_value.is_finite() {
            return Err(field_error(path, row, LAB_VALUE, value, "value is not finite".to_string()));
        }

        let lab_date = match &self.lab_date {
            Some((i, column)) if !row.fields[*i].is_empty() => {
                let text = &row.fields[*i];
                let ts = parse_timestamp(text, &config.timestamp_format)
                    .map_err(|e| field_error(path, row, column, text, e.to_string()))?;
                Some(ts)
            }
            _ => None,
        };

        Ok(LabResult {
            patient_id: id.to_string(),
            admission_id: optional(row, self.admission_id),
            lab_name: row.fields[self.lab_name].clone(),
            lab_value,
            lab_units: optional(row, self.lab_units),
            lab_date,
        })
    }
}
