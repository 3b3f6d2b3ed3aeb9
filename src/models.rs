//! Wire-format schemas for the iPrescribe admin API.
//!
//! The backend sends loosely-shaped JSON: nullable strings, camelCase
//! next to snake_case, and metric fields prefixed with their group name
//! (`total_patients`, `doctors_percentage_since_last_week`, ...). These
//! types absorb all of that once at deserialization so the rest of the
//! client works with typed data. Every field that can be null or absent
//! on the wire is either an `Option` or carries `#[serde(default)]`.

use serde::Deserialize;

// ============================================================================
// POST /auth/login
// ============================================================================

/// Response from the login endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub data: Option<LoginData>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<i64>,
}

/// Payload of a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Authenticated user object. Shape is backend-defined and this
    /// client never reads into it, so it stays opaque.
    #[serde(default)]
    pub user: serde_json::Value,
}

// ============================================================================
// GET /admin/dashboard/stats
// ============================================================================

/// Response from the dashboard stats endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardStatsResponse {
    #[serde(default)]
    pub data: DashboardStats,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<i64>,
}

/// Aggregate dashboard statistics: five week-over-week metric groups,
/// two time series, one multi-series category group and the top
/// specialties list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub patients: MetricGroup,
    #[serde(default)]
    pub doctors: MetricGroup,
    #[serde(default)]
    pub pending_reviews: MetricGroup,
    #[serde(default)]
    pub consultations: MetricGroup,
    #[serde(default)]
    pub prescriptions: MetricGroup,
    #[serde(default, rename = "consultationOverTime")]
    pub consultation_over_time: Vec<TrendPoint>,
    #[serde(default, rename = "prescriptionVolumeTrend")]
    pub prescription_volume_trend: Vec<TrendPoint>,
    #[serde(default)]
    pub active_doctors_vs_patients: SeriesGroup,
    #[serde(default)]
    pub top_specialities_in_demand: Vec<SpecialityCount>,
}

/// One week-over-week metric group.
///
/// The backend prefixes every field with the group name, so the same
/// shape arrives as `total_patients`/`patients_percentage_since_last_week`
/// in one group and `total_doctors`/`doctors_percentage_since_last_week`
/// in the next. The aliases below absorb all five spellings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct MetricGroup {
    #[serde(
        default,
        alias = "total_patients",
        alias = "total_doctors",
        alias = "total_pending_reviews",
        alias = "total_consultations",
        alias = "total_prescriptions"
    )]
    pub total: u64,
    #[serde(
        default,
        alias = "patients_percentage_since_last_week",
        alias = "doctors_percentage_since_last_week",
        alias = "pending_reviews_percentage_since_last_week",
        alias = "consultations_percentage_since_last_week",
        alias = "prescriptions_percentage_since_last_week"
    )]
    pub percentage_since_last_week: f64,
    #[serde(default)]
    pub positive: bool,
}

/// One `{period, count}` tuple of a time series, in source order.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TrendPoint {
    #[serde(default)]
    pub month: String,
    #[serde(default)]
    pub count: u64,
}

/// Category labels plus a set of named series aligned to them.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SeriesGroup {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub series: Vec<NamedSeries>,
}

/// A single named series inside a [`SeriesGroup`].
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct NamedSeries {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub data: Vec<u64>,
}

/// One `{speciality, count}` entry of the top-specialties list.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SpecialityCount {
    #[serde(default)]
    pub speciality: String,
    #[serde(default)]
    pub count: u64,
}

// ============================================================================
// GET /admin/patients?page=N
// ============================================================================

/// Response from the paginated patients index.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientsResponse {
    #[serde(default)]
    pub data: PatientsPage,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<i64>,
}

/// One page of patient records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientsPage {
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub data: Vec<RawPatient>,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total: u64,
}

/// A patient record as the backend sends it. Most fields are nullable,
/// and several are duplicated between the record and the nested user;
/// the view-model layer owns the fallback policy between them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPatient {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_seen: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub user: Option<RawUser>,
}

/// The account sub-object nested in every patient record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawUser {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub devices: Vec<RawDevice>,
}

/// One registered device of a user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDevice {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub platform: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_group_absorbs_prefixed_field_names() {
        let patients: MetricGroup = serde_json::from_str(
            r#"{"total_patients": 120, "patients_this_week": 4,
                "patients_percentage_since_last_week": 12.5, "positive": true}"#,
        )
        .unwrap();
        assert_eq!(patients.total, 120);
        assert_eq!(patients.percentage_since_last_week, 12.5);
        assert!(patients.positive);

        let doctors: MetricGroup = serde_json::from_str(
            r#"{"total_doctors": 8, "doctors_percentage_since_last_week": 3.0, "positive": false}"#,
        )
        .unwrap();
        assert_eq!(doctors.total, 8);
        assert!(!doctors.positive);
    }

    #[test]
    fn dashboard_stats_tolerates_missing_sections() {
        let stats: DashboardStats = serde_json::from_str(r#"{"patients": {"total_patients": 1}}"#).unwrap();
        assert_eq!(stats.patients.total, 1);
        assert_eq!(stats.doctors, MetricGroup::default());
        assert!(stats.consultation_over_time.is_empty());
        assert!(stats.active_doctors_vs_patients.categories.is_empty());
    }

    #[test]
    fn dashboard_stats_parses_camel_case_series() {
        let stats: DashboardStats = serde_json::from_str(
            r#"{
                "consultationOverTime": [{"month": "Jan", "count": 5}],
                "prescriptionVolumeTrend": [{"month": "Jan", "count": 2}],
                "active_doctors_vs_patients": {
                    "categories": ["Jan", "Feb"],
                    "series": [{"name": "Doctors", "data": [1, 2]}]
                },
                "top_specialities_in_demand": [{"speciality": "Pediatrics", "count": 45}]
            }"#,
        )
        .unwrap();
        assert_eq!(stats.consultation_over_time[0].month, "Jan");
        assert_eq!(stats.prescription_volume_trend[0].count, 2);
        assert_eq!(stats.active_doctors_vs_patients.series[0].data, vec![1, 2]);
        assert_eq!(stats.top_specialities_in_demand[0].speciality, "Pediatrics");
    }

    #[test]
    fn raw_patient_tolerates_nulls_everywhere() {
        let patient: RawPatient = serde_json::from_str(
            r#"{"id": 7, "first_name": null, "last_name": null, "email": null,
                "phone": null, "state": null, "created_at": null, "last_seen": null,
                "status": null, "user": null}"#,
        )
        .unwrap();
        assert_eq!(patient.id, 7);
        assert!(patient.first_name.is_none());
        assert!(patient.user.is_none());
    }

    #[test]
    fn patients_page_parses_nested_user_and_devices() {
        let page: PatientsPage = serde_json::from_str(
            r#"{
                "current_page": 1,
                "per_page": 15,
                "total": 1,
                "data": [{
                    "id": 3,
                    "created_at": "2025-09-12T08:15:00.000000Z",
                    "status": "verified",
                    "user": {
                        "id": 9,
                        "email": "a@b.com",
                        "devices": [{"id": 1, "platform": "Android"}]
                    }
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(page.current_page, 1);
        let user = page.data[0].user.as_ref().unwrap();
        assert_eq!(user.devices[0].platform.as_deref(), Some("Android"));
    }

    #[test]
    fn login_response_without_data_parses() {
        let resp: LoginResponse =
            serde_json::from_str(r#"{"message": "Invalid credentials", "status": 401}"#).unwrap();
        assert!(resp.data.is_none());
        assert_eq!(resp.message.as_deref(), Some("Invalid credentials"));
    }
}
