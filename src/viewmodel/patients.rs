//! Patient row flattening.
//!
//! The backend duplicates most patient fields between the record and
//! its nested user sub-object, and any of them can be null. The
//! per-field fallback chains here are the contract the table and the
//! CSV export rely on; the edge cases are deliberate and pinned by
//! tests (empty device list reads as iOS, null status reads as
//! Pending).

use crate::models::{PatientsPage, RawPatient, RawUser};

use super::PLACEHOLDER;

/// Device kind shown in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Ios,
    Android,
}

impl DeviceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceKind::Ios => "iOS",
            DeviceKind::Android => "Android",
        }
    }
}

/// Verification status shown in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStatus {
    Verified,
    Pending,
}

impl VerificationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            VerificationStatus::Verified => "Verified",
            VerificationStatus::Pending => "Pending",
        }
    }
}

/// A flattened, render-ready patient row.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientRow {
    pub id: i64,
    pub sign_up_date: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub last_seen: String,
    pub location: String,
    pub device: DeviceKind,
    pub status: VerificationStatus,
}

/// Sortable table columns, in the order the sort key cycles through
/// them. Id and phone are not sortable, matching the web table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    SignUpDate,
    Name,
    Email,
    LastSeen,
    Location,
    Device,
    Status,
}

impl SortColumn {
    pub const ALL: [SortColumn; 7] = [
        SortColumn::SignUpDate,
        SortColumn::Name,
        SortColumn::Email,
        SortColumn::LastSeen,
        SortColumn::Location,
        SortColumn::Device,
        SortColumn::Status,
    ];

    /// The table header this column sorts.
    pub fn label(self) -> &'static str {
        match self {
            SortColumn::SignUpDate => "Sign Up Date",
            SortColumn::Name => "Patient Name",
            SortColumn::Email => "Email Address",
            SortColumn::LastSeen => "Last Seen",
            SortColumn::Location => "Location",
            SortColumn::Device => "Device",
            SortColumn::Status => "Status",
        }
    }
}

/// Order rows by one column. Textual columns compare case-insensitively;
/// the timestamp columns are already `YYYY-MM-DD...` strings so their
/// lexical order is chronological. The sort is stable, so equal keys
/// keep source order.
pub fn sort_rows(rows: &mut [PatientRow], column: SortColumn, ascending: bool) {
    rows.sort_by(|a, b| {
        let ord = match column {
            SortColumn::SignUpDate => a.sign_up_date.cmp(&b.sign_up_date),
            SortColumn::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortColumn::Email => a.email.to_lowercase().cmp(&b.email.to_lowercase()),
            SortColumn::LastSeen => a.last_seen.cmp(&b.last_seen),
            SortColumn::Location => a.location.to_lowercase().cmp(&b.location.to_lowercase()),
            SortColumn::Device => a.device.as_str().cmp(b.device.as_str()),
            SortColumn::Status => a.status.as_str().cmp(b.status.as_str()),
        };
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });
}

impl PatientRow {
    /// Case-insensitive match against the table's search fields:
    /// name, email and location.
    pub fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.email.to_lowercase().contains(&needle)
            || self.location.to_lowercase().contains(&needle)
    }
}

/// Flatten one page of raw records, or an empty list while loading.
pub fn patient_rows(page: Option<&PatientsPage>) -> Vec<PatientRow> {
    page.map_or_else(Vec::new, |p| p.data.iter().map(patient_row).collect())
}

fn patient_row(p: &RawPatient) -> PatientRow {
    let user = p.user.as_ref();
    PatientRow {
        id: p.id,
        sign_up_date: sign_up_date(p.created_at.as_deref()),
        name: display_name(p, user),
        email: pick(user.and_then(|u| u.email.as_deref()), p.email.as_deref()),
        phone: pick(user.and_then(|u| u.phone.as_deref()), p.phone.as_deref()),
        last_seen: last_seen(p.last_seen.as_deref()),
        location: pick(user.and_then(|u| u.state.as_deref()), p.state.as_deref()),
        device: classify_device(user),
        status: classify_status(p.status.as_deref()),
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// Nested user field first, then the record's own field, then "—".
fn pick(user_field: Option<&str>, record_field: Option<&str>) -> String {
    non_empty(user_field)
        .or(non_empty(record_field))
        .unwrap_or(PLACEHOLDER)
        .to_string()
}

/// Join first and last name, collapsing to whichever is present.
fn join_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
    match (non_blank(first), non_blank(last)) {
        (Some(f), Some(l)) => Some(format!("{} {}", f, l)),
        (Some(f), None) => Some(f.to_string()),
        (None, Some(l)) => Some(l.to_string()),
        (None, None) => None,
    }
}

/// Display name fallback chain: record first/last, user first/last,
/// user email, record email, placeholder.
fn display_name(p: &RawPatient, user: Option<&RawUser>) -> String {
    join_name(p.first_name.as_deref(), p.last_name.as_deref())
        .or_else(|| {
            user.and_then(|u| join_name(u.first_name.as_deref(), u.last_name.as_deref()))
        })
        .or_else(|| user.and_then(|u| non_empty(u.email.as_deref()).map(String::from)))
        .or_else(|| non_empty(p.email.as_deref()).map(String::from))
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Date portion of the creation timestamp: first 10 characters.
fn sign_up_date(created_at: Option<&str>) -> String {
    match non_empty(created_at) {
        Some(ts) => ts.chars().take(10).collect(),
        None => PLACEHOLDER.to_string(),
    }
}

/// `YYYY-MM-DDTHH:MM:SS...` becomes `YYYY-MM-DD HH:MM:SS`: the first
/// `T` separator is replaced with a space, then the result truncated to
/// 19 characters.
fn last_seen(ts: Option<&str>) -> String {
    match non_empty(ts) {
        Some(ts) => ts.replacen('T', " ", 1).chars().take(19).collect(),
        None => PLACEHOLDER.to_string(),
    }
}

/// First device platform decides; anything other than a literal
/// (case-insensitive) "android" - including no devices at all - reads
/// as iOS.
fn classify_device(user: Option<&RawUser>) -> DeviceKind {
    let platform = user
        .and_then(|u| u.devices.first())
        .and_then(|d| d.platform.as_deref());
    match platform {
        Some(p) if p.eq_ignore_ascii_case("android") => DeviceKind::Android,
        _ => DeviceKind::Ios,
    }
}

/// Case-insensitive "verified" reads as Verified; anything else -
/// including a null status - reads as Pending.
fn classify_status(status: Option<&str>) -> VerificationStatus {
    match status {
        Some(s) if s.eq_ignore_ascii_case("verified") => VerificationStatus::Verified,
        _ => VerificationStatus::Pending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawDevice;

    fn user() -> RawUser {
        RawUser {
            id: 9,
            first_name: Some("Ada".to_string()),
            last_name: Some("Obi".to_string()),
            email: Some("ada@example.com".to_string()),
            phone: Some("+2348000000".to_string()),
            state: Some("Lagos".to_string()),
            devices: vec![RawDevice {
                id: 1,
                platform: Some("iOS".to_string()),
            }],
        }
    }

    fn patient() -> RawPatient {
        RawPatient {
            id: 3,
            first_name: Some("Adaeze".to_string()),
            last_name: Some("Obi".to_string()),
            email: Some("record@example.com".to_string()),
            phone: Some("+2348111111".to_string()),
            state: Some("Abuja".to_string()),
            created_at: Some("2025-09-12T08:15:00.000000Z".to_string()),
            last_seen: Some("2025-09-14T19:03:27.000000Z".to_string()),
            status: Some("verified".to_string()),
            user: Some(user()),
        }
    }

    #[test]
    fn empty_page_and_absent_page_both_yield_no_rows() {
        assert!(patient_rows(None).is_empty());
        assert!(patient_rows(Some(&PatientsPage::default())).is_empty());
    }

    #[test]
    fn full_record_flattens_with_record_name_and_user_contact() {
        let page = PatientsPage {
            data: vec![patient()],
            ..PatientsPage::default()
        };
        let rows = patient_rows(Some(&page));
        let row = &rows[0];
        assert_eq!(row.name, "Adaeze Obi");
        // Contact fields prefer the nested user.
        assert_eq!(row.email, "ada@example.com");
        assert_eq!(row.phone, "+2348000000");
        assert_eq!(row.location, "Lagos");
        assert_eq!(row.sign_up_date, "2025-09-12");
        assert_eq!(row.last_seen, "2025-09-14 19:03:27");
        assert_eq!(row.device, DeviceKind::Ios);
        assert_eq!(row.status, VerificationStatus::Verified);
    }

    #[test]
    fn display_name_collapses_to_single_present_part() {
        let mut p = patient();
        p.last_name = None;
        p.user = None;
        assert_eq!(patient_row(&p).name, "Adaeze");

        let mut p = patient();
        p.first_name = None;
        p.user = None;
        assert_eq!(patient_row(&p).name, "Obi");
    }

    #[test]
    fn display_name_trims_whitespace_only_parts() {
        let mut p = patient();
        p.first_name = Some("  ".to_string());
        p.last_name = Some(" Obi ".to_string());
        assert_eq!(patient_row(&p).name, "Obi");
    }

    #[test]
    fn display_name_falls_back_to_user_name_then_user_email() {
        let mut p = patient();
        p.first_name = Some("".to_string());
        p.last_name = None;
        assert_eq!(patient_row(&p).name, "Ada Obi");

        let mut u = user();
        u.first_name = None;
        u.last_name = Some("".to_string());
        let mut p = patient();
        p.first_name = None;
        p.last_name = None;
        p.email = None;
        u.email = Some("a@b.com".to_string());
        p.user = Some(u);
        assert_eq!(patient_row(&p).name, "a@b.com");
    }

    #[test]
    fn record_name_replaces_the_user_name_whole_not_per_field() {
        // A record with only a first name does not borrow the user's
        // last name; the record pair wins as a unit.
        let mut u = user();
        u.first_name = None;
        u.last_name = Some("Obi".to_string());
        let mut p = patient();
        p.last_name = None;
        p.user = Some(u);
        assert_eq!(patient_row(&p).name, "Adaeze");
    }

    #[test]
    fn display_name_with_no_information_is_placeholder() {
        let p = RawPatient::default();
        assert_eq!(patient_row(&p).name, PLACEHOLDER);
    }

    #[test]
    fn contact_fields_fall_back_to_record_then_placeholder() {
        let mut u = user();
        u.email = None;
        u.phone = None;
        u.state = None;
        let mut p = patient();
        p.user = Some(u);
        let row = patient_row(&p);
        assert_eq!(row.email, "record@example.com");
        assert_eq!(row.phone, "+2348111111");
        assert_eq!(row.location, "Abuja");

        let row = patient_row(&RawPatient::default());
        assert_eq!(row.email, PLACEHOLDER);
        assert_eq!(row.phone, PLACEHOLDER);
        assert_eq!(row.location, PLACEHOLDER);
    }

    #[test]
    fn timestamps_degrade_to_placeholder() {
        let mut p = patient();
        p.created_at = None;
        p.last_seen = Some("".to_string());
        let row = patient_row(&p);
        assert_eq!(row.sign_up_date, PLACEHOLDER);
        assert_eq!(row.last_seen, PLACEHOLDER);
    }

    #[test]
    fn last_seen_truncates_to_nineteen_characters() {
        assert_eq!(
            last_seen(Some("2025-09-14T19:03:27.000000Z")),
            "2025-09-14 19:03:27"
        );
        // Shorter inputs pass through whole.
        assert_eq!(last_seen(Some("2025-09-14T19:03")), "2025-09-14 19:03");
    }

    #[test]
    fn device_classification_defaults_to_ios() {
        // Explicit platforms.
        let mut u = user();
        u.devices = vec![RawDevice {
            id: 1,
            platform: Some("Android".to_string()),
        }];
        let mut p = patient();
        p.user = Some(u);
        assert_eq!(patient_row(&p).device, DeviceKind::Android);

        let mut u = user();
        u.devices = vec![RawDevice {
            id: 1,
            platform: Some("iOS".to_string()),
        }];
        let mut p = patient();
        p.user = Some(u);
        assert_eq!(patient_row(&p).device, DeviceKind::Ios);

        // Empty device list defaults to iOS, not "unknown".
        let mut u = user();
        u.devices = Vec::new();
        let mut p = patient();
        p.user = Some(u);
        assert_eq!(patient_row(&p).device, DeviceKind::Ios);

        // No user at all.
        let mut p = patient();
        p.user = None;
        assert_eq!(patient_row(&p).device, DeviceKind::Ios);
    }

    #[test]
    fn status_mapping_defaults_to_pending() {
        assert_eq!(classify_status(Some("VERIFIED")), VerificationStatus::Verified);
        assert_eq!(classify_status(Some("pending")), VerificationStatus::Pending);
        assert_eq!(classify_status(Some("banned")), VerificationStatus::Pending);
        assert_eq!(classify_status(None), VerificationStatus::Pending);
    }

    fn named(name: &str, sign_up: &str) -> PatientRow {
        PatientRow {
            id: 0,
            sign_up_date: sign_up.to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: PLACEHOLDER.to_string(),
            last_seen: PLACEHOLDER.to_string(),
            location: PLACEHOLDER.to_string(),
            device: DeviceKind::Ios,
            status: VerificationStatus::Pending,
        }
    }

    #[test]
    fn sort_by_name_is_case_insensitive() {
        let mut rows = vec![
            named("chidi", "2025-01-03"),
            named("Ada", "2025-01-01"),
            named("Bola", "2025-01-02"),
        ];
        sort_rows(&mut rows, SortColumn::Name, true);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Ada", "Bola", "chidi"]);

        sort_rows(&mut rows, SortColumn::Name, false);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["chidi", "Bola", "Ada"]);
    }

    #[test]
    fn sort_by_sign_up_date_is_chronological() {
        let mut rows = vec![
            named("Ada", "2025-02-10"),
            named("Bola", "2024-11-30"),
            named("Chidi", "2025-01-05"),
        ];
        sort_rows(&mut rows, SortColumn::SignUpDate, true);
        let dates: Vec<&str> = rows.iter().map(|r| r.sign_up_date.as_str()).collect();
        assert_eq!(dates, ["2024-11-30", "2025-01-05", "2025-02-10"]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let mut rows = vec![
            named("Ada", "2025-01-01"),
            named("Bola", "2025-01-01"),
            named("Chidi", "2025-01-01"),
        ];
        sort_rows(&mut rows, SortColumn::SignUpDate, true);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Ada", "Bola", "Chidi"]);
    }

    #[test]
    fn search_matches_name_email_and_location_case_insensitively() {
        let page = PatientsPage {
            data: vec![patient()],
            ..PatientsPage::default()
        };
        let row = &patient_rows(Some(&page))[0];
        assert!(row.matches(""));
        assert!(row.matches("adaeze"));
        assert!(row.matches("ADA@EXAMPLE"));
        assert!(row.matches("lagos"));
        assert!(!row.matches("+234800")); // phone is not a search field
    }
}
