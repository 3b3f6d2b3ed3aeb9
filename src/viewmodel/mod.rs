//! View-model layer: pure mappings from raw API payloads to the shapes
//! the presentation layer renders and the CSV export serializes.
//!
//! Every function in this module is deterministic, side-effect free and
//! total: absent or partial upstream data (a fetch that has not
//! resolved yet, a null field) degrades to empty collections or the
//! `"—"` placeholder, never to an error.

mod patients;
mod stats;

pub use patients::{patient_rows, sort_rows, DeviceKind, PatientRow, SortColumn, VerificationStatus};
pub use stats::{
    consultation_series, doctors_vs_patients, prescription_series, stat_cards, top_specialties,
    DoctorsVsPatientsPoint, PieSlice, SeriesPoint, StatCard, PIE_ORANGE, PIE_TEAL,
};

/// Placeholder shown for any field with no usable value.
pub const PLACEHOLDER: &str = "—";
