//! Client-side CSV export of the dashboard.
//!
//! The document mirrors what the web dashboard downloads: a title and
//! generation timestamp, a fixed five-row statistics section and one
//! row per patient. Fields are comma-joined with no quoting or
//! escaping - behavioral parity with the existing export; a name
//! containing a comma shifts its row's columns (pinned by a test, not
//! silently hardened).

use chrono::{DateTime, Local, NaiveDate};
use color_eyre::{eyre::WrapErr, Result};
use std::path::PathBuf;

use crate::models::DashboardStats;
use crate::viewmodel::PatientRow;

/// Build the CSV document text.
pub fn build_csv(
    stats: &DashboardStats,
    patients: &[PatientRow],
    generated_at: DateTime<Local>,
) -> String {
    let mut rows: Vec<String> = Vec::new();

    rows.push("Dashboard Export - iPrescribe".to_string());
    rows.push(format!(
        "Generated on: {}",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    rows.push(String::new());

    rows.push("DASHBOARD STATISTICS".to_string());
    rows.push("Metric,Value,Change Since Last Week".to_string());
    let metrics = [
        ("Total Patients", &stats.patients),
        ("Total Doctors", &stats.doctors),
        ("Pending Reviews", &stats.pending_reviews),
        ("Total Consultations", &stats.consultations),
        ("Prescriptions Issued", &stats.prescriptions),
    ];
    for (label, group) in metrics {
        rows.push(format!(
            "{},{},{}%",
            label, group.total, group.percentage_since_last_week
        ));
    }
    rows.push(String::new());

    rows.push("RECENT PATIENTS".to_string());
    rows.push("Name,Email,Phone,Status,Created Date".to_string());
    for patient in patients {
        rows.push(format!(
            "{},{},{},{},{}",
            patient.name,
            patient.email,
            patient.phone,
            patient.status.as_str(),
            patient.sign_up_date
        ));
    }

    rows.join("\n")
}

/// File name for an export generated on the given date.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("iprescribe_dashboard_{}.csv", date.format("%Y-%m-%d"))
}

/// Directory exports are written to: the user's download directory,
/// else the current directory.
pub fn export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Serialize the dashboard and write it as a date-stamped CSV file.
/// Entirely local; no server round-trip.
pub fn export_dashboard(stats: &DashboardStats, patients: &[PatientRow]) -> Result<PathBuf> {
    let now = Local::now();
    let csv = build_csv(stats, patients, now);
    let path = export_dir().join(export_file_name(now.date_naive()));
    std::fs::write(&path, csv).wrap_err_with(|| format!("Failed to write export to {:?}", path))?;
    tracing::info!(path = %path.display(), "dashboard exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MetricGroup;
    use crate::viewmodel::{DeviceKind, VerificationStatus};
    use chrono::TimeZone;

    fn stats() -> DashboardStats {
        DashboardStats {
            patients: MetricGroup {
                total: 120,
                percentage_since_last_week: 12.5,
                positive: true,
            },
            doctors: MetricGroup {
                total: 8,
                percentage_since_last_week: 5.0,
                positive: false,
            },
            pending_reviews: MetricGroup {
                total: 3,
                percentage_since_last_week: 0.0,
                positive: true,
            },
            consultations: MetricGroup {
                total: 40,
                percentage_since_last_week: 25.0,
                positive: true,
            },
            prescriptions: MetricGroup {
                total: 15,
                percentage_since_last_week: 10.0,
                positive: true,
            },
            ..DashboardStats::default()
        }
    }

    fn row(name: &str) -> PatientRow {
        PatientRow {
            id: 1,
            sign_up_date: "2025-09-12".to_string(),
            name: name.to_string(),
            email: "a@b.com".to_string(),
            phone: "+234800".to_string(),
            last_seen: "2025-09-14 19:03:27".to_string(),
            location: "Lagos".to_string(),
            device: DeviceKind::Ios,
            status: VerificationStatus::Verified,
        }
    }

    fn generated_at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 9, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn document_has_expected_sections_and_row_counts() {
        let patients = vec![row("Ada Obi"), row("Ngozi Eze")];
        let csv = build_csv(&stats(), &patients, generated_at());
        let lines: Vec<&str> = csv.split('\n').collect();

        assert_eq!(lines[0], "Dashboard Export - iPrescribe");
        assert_eq!(lines[1], "Generated on: 2025-09-15 10:30:00");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "DASHBOARD STATISTICS");
        assert_eq!(lines[4], "Metric,Value,Change Since Last Week");
        // Exactly five metric rows.
        assert_eq!(lines[5], "Total Patients,120,12.5%");
        assert_eq!(lines[9], "Prescriptions Issued,15,10%");
        assert_eq!(lines[10], "");
        assert_eq!(lines[11], "RECENT PATIENTS");
        assert_eq!(lines[12], "Name,Email,Phone,Status,Created Date");
        // One row per patient, nothing after.
        assert_eq!(lines[13], "Ada Obi,a@b.com,+234800,Verified,2025-09-12");
        assert_eq!(lines.len(), 15);
    }

    #[test]
    fn percentages_carry_a_percent_suffix() {
        let csv = build_csv(&stats(), &[], generated_at());
        assert!(csv.contains("Total Doctors,8,5%"));
        assert!(csv.contains("Pending Reviews,3,0%"));
    }

    #[test]
    fn commas_in_fields_are_not_escaped() {
        // Known limitation, preserved on purpose: a comma inside a name
        // shifts the columns of that row.
        let patients = vec![row("Obi, Ada")];
        let csv = build_csv(&stats(), &patients, generated_at());
        let last = csv.split('\n').last().unwrap();
        assert_eq!(last, "Obi, Ada,a@b.com,+234800,Verified,2025-09-12");
        assert_eq!(last.split(',').count(), 6); // one column too many
    }

    #[test]
    fn file_name_is_date_stamped() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();
        assert_eq!(export_file_name(date), "iprescribe_dashboard_2025-09-15.csv");
    }
}
