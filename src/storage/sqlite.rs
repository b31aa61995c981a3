//! SQLite backing store

use std::path::Path;

use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, params};

use crate::dataset::Dataset;
use crate::error::{EhrError, Result};
use crate::query::{ComparisonOperator, PatientQueries, years_between};
use crate::schema::date_utils::{DEFAULT_TIMESTAMP_FORMAT, format_timestamp};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS Patients (
    patient_id TEXT PRIMARY KEY,
    gender     TEXT,
    dob        TEXT NOT NULL,
    race       TEXT,
    marital    TEXT,
    language   TEXT,
    poverty    TEXT
);
CREATE TABLE IF NOT EXISTS Labs (
    patient_id   TEXT NOT NULL,
    admission_id TEXT,
    lab_name     TEXT NOT NULL,
    lab_value    REAL NOT NULL,
    lab_units    TEXT,
    lab_date     TEXT
);
CREATE INDEX IF NOT EXISTS idx_labs_patient ON Labs (patient_id, lab_name);
";

const INSERT_PATIENT: &str = "INSERT OR REPLACE INTO Patients
    (patient_id, gender, dob, race, marital, language, poverty)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

const INSERT_LAB: &str = "INSERT INTO Labs
    (patient_id, admission_id, lab_name, lab_value, lab_units, lab_date)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const ANY_ABOVE: &str = "SELECT EXISTS(SELECT 1 FROM Labs
    WHERE patient_id = ?1 AND lab_name = ?2 AND lab_value > ?3)";

const ANY_BELOW: &str = "SELECT EXISTS(SELECT 1 FROM Labs
    WHERE patient_id = ?1 AND lab_name = ?2 AND lab_value < ?3)";

/// A dataset mirrored into SQLite
///
/// Owns its connection; the connection is closed when the store is dropped.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a database file and ensure the schema exists
    pub fn open(path: &Path) -> Result<Self> {
        log::info!("Opening SQLite store at {}", path.display());
        Self::with_connection(Connection::open(path)?)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let store = Self { conn };
        store.create_schema()?;
        Ok(store)
    }

    /// Create the `Patients` and `Labs` tables if missing
    pub fn create_schema(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Copy every patient and lab of `dataset` into the store in one transaction
    ///
    /// Patients are upserted by id; labs are appended.
    pub fn import(&mut self, dataset: &Dataset) -> Result<()> {
        let tx = self.conn.transaction()?;
        {
            let mut insert_patient = tx.prepare(INSERT_PATIENT)?;
            for p in dataset.patients().iter() {
                insert_patient.execute(params![
                    p.patient_id,
                    p.gender,
                    format_timestamp(&p.date_of_birth),
                    p.race,
                    p.marital_status,
                    p.language,
                    p.poverty_percentage,
                ])?;
            }

            let mut insert_lab = tx.prepare(INSERT_LAB)?;
            for lab in dataset.labs().iter() {
                insert_lab.execute(params![
                    lab.patient_id,
                    lab.admission_id,
                    lab.lab_name,
                    lab.lab_value,
                    lab.lab_units,
                    lab.lab_date.as_ref().map(format_timestamp),
                ])?;
            }
        }
        tx.commit()?;

        log::info!(
            "Imported {} patients and {} lab results into SQLite",
            dataset.patient_count(),
            dataset.lab_count()
        );
        Ok(())
    }

    pub fn patient_count(&self) -> Result<usize> {
        self.count("SELECT COUNT(*) FROM Patients")
    }

    pub fn lab_count(&self) -> Result<usize> {
        self.count("SELECT COUNT(*) FROM Labs")
    }

    fn count(&self, sql: &str) -> Result<usize> {
        let n: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
        Ok(usize::try_from(n).unwrap_or_default())
    }

    fn date_of_birth(&self, patient_id: &str) -> Result<NaiveDateTime> {
        let dob: Option<String> = self
            .conn
            .query_row(
                "SELECT dob FROM Patients WHERE patient_id = ?1",
                params![patient_id],
                |row| row.get(0),
            )
            .optional()?;
        let dob = dob.ok_or_else(|| EhrError::PatientNotFound(patient_id.to_string()))?;
        parse_stored(&dob)
    }
}

fn parse_stored(text: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, DEFAULT_TIMESTAMP_FORMAT).map_err(|e| {
        EhrError::Storage(rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(e),
        ))
    })
}

impl PatientQueries for SqliteStore {
    fn age_at(&self, patient_id: &str, now: NaiveDateTime) -> Result<i64> {
        Ok(years_between(self.date_of_birth(patient_id)?, now))
    }

    fn age_at_first_test(&self, patient_id: &str) -> Result<i64> {
        let dob = self.date_of_birth(patient_id)?;
        // Stored timestamps have a fixed width, so MIN on text is chronological
        let first: Option<String> = self.conn.query_row(
            "SELECT MIN(lab_date) FROM Labs WHERE patient_id = ?1 AND lab_date IS NOT NULL",
            params![patient_id],
            |row| row.get(0),
        )?;
        let first = first.ok_or_else(|| EhrError::NoLabHistory(patient_id.to_string()))?;
        Ok(years_between(dob, parse_stored(&first)?))
    }

    fn is_sick(
        &self,
        patient_id: &str,
        lab_name: &str,
        operator: &str,
        threshold: f64,
    ) -> Result<bool> {
        let sql = match ComparisonOperator::parse(operator) {
            Some(ComparisonOperator::GreaterThan) => ANY_ABOVE,
            Some(ComparisonOperator::LessThan) => ANY_BELOW,
            None => return Ok(false),
        };
        let found: bool = self
            .conn
            .query_row(sql, params![patient_id, lab_name, threshold], |row| row.get(0))?;
        Ok(found)
    }
}
