//! Keyed collections backing a loaded `Dataset`.

pub mod lab;
pub mod patient;

pub use lab::LabCollection;
pub use patient::PatientCollection;
