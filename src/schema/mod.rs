//! Column definitions and field formats for the patient and lab sources.

pub mod date_utils;
pub mod fields;

pub use date_utils::{DEFAULT_TIMESTAMP_FORMAT, TimestampError, format_timestamp, parse_timestamp};
