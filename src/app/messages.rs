//! AppMessage enum for async communication within the application.

use crate::models::{DashboardStats, PatientsPage};

/// Messages received from background fetch tasks.
///
/// The fetch messages carry the generation they were issued under;
/// results from a superseded generation (logout, re-login) are
/// discarded instead of applied.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// Login round-trip succeeded; the token is ready to persist.
    LoginSucceeded { token: String },
    /// Login rejected by the server, or the response had no token.
    LoginFailed { error: String },
    /// Dashboard stats fetch resolved.
    StatsLoaded {
        generation: u64,
        stats: DashboardStats,
    },
    /// Dashboard stats fetch failed.
    StatsFailed { generation: u64, error: String },
    /// Patients page fetch resolved.
    PatientsLoaded { generation: u64, page: PatientsPage },
    /// Patients page fetch failed.
    PatientsFailed { generation: u64, error: String },
}
