//! Relational mirror of a loaded dataset.
//!
//! The store answers the same [`crate::query::PatientQueries`] as the
//! in-memory dataset, using parameter-bound SQL only.

pub mod sqlite;

pub use sqlite::SqliteStore;
