//! Transforms for the stat cards and the three chart datasets.

use crate::models::{DashboardStats, MetricGroup, SeriesGroup, TrendPoint};

/// Even-index pie slice color (teal).
pub const PIE_TEAL: &str = "#43B4BC";
/// Odd-index pie slice color (orange).
pub const PIE_ORANGE: &str = "#FF9900";

/// A compact metric widget: title, value and signed week-over-week
/// change as a fraction (`0.1` == up 10%, `-0.1` == down 10%).
#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: u64,
    pub change: f64,
    pub icon: &'static str,
    pub color: &'static str,
}

/// Fixed display metadata for the five metric groups, in render order:
/// title, icon key, background color.
const STAT_CARD_STYLES: [(&str, &str, &str); 5] = [
    ("Total Patients", "people-green", "#F9F4FF"),
    ("Total Doctors", "people-green", "#F6FAFD"),
    ("Pending Reviews", "people-green", "#FFF8ED"),
    ("Total Consultations", "people-blue", "#F9F4FF"),
    ("Prescriptions Issued", "prescription", "#F2FFFC"),
];

/// Signed change fraction: percentage over 100, negated when the
/// backend flags the movement as negative.
fn change_fraction(group: &MetricGroup) -> f64 {
    (group.percentage_since_last_week / 100.0) * if group.positive { 1.0 } else { -1.0 }
}

/// Build the five stat cards, or an empty list while stats are loading.
pub fn stat_cards(stats: Option<&DashboardStats>) -> Vec<StatCard> {
    let Some(d) = stats else {
        return Vec::new();
    };
    let groups = [
        &d.patients,
        &d.doctors,
        &d.pending_reviews,
        &d.consultations,
        &d.prescriptions,
    ];
    groups
        .into_iter()
        .zip(STAT_CARD_STYLES)
        .map(|(group, (title, icon, color))| StatCard {
            title,
            value: group.total,
            change: change_fraction(group),
            icon,
            color,
        })
        .collect()
}

/// One point of a rendered time series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub period: String,
    pub value: u64,
}

fn trend(points: &[TrendPoint]) -> Vec<SeriesPoint> {
    // Source order is assumed chronological and is preserved as-is.
    points
        .iter()
        .map(|p| SeriesPoint {
            period: p.month.clone(),
            value: p.count,
        })
        .collect()
}

/// Consultations-over-time line chart data.
pub fn consultation_series(stats: Option<&DashboardStats>) -> Vec<SeriesPoint> {
    stats.map_or_else(Vec::new, |d| trend(&d.consultation_over_time))
}

/// Prescription-volume-trend line chart data.
pub fn prescription_series(stats: Option<&DashboardStats>) -> Vec<SeriesPoint> {
    stats.map_or_else(Vec::new, |d| trend(&d.prescription_volume_trend))
}

/// One category of the doctors-vs-patients bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DoctorsVsPatientsPoint {
    pub period: String,
    pub doctors: u64,
    pub patients: u64,
}

/// Series are bound by case-insensitive substring, not exact key: the
/// backend has shipped both "Doctors" and "Active Doctors" for the same
/// series. A missing or short series reads as zero at every index.
fn find_series<'a>(group: &'a SeriesGroup, needle: &str) -> Option<&'a [u64]> {
    group
        .series
        .iter()
        .find(|s| s.name.to_lowercase().contains(needle))
        .map(|s| s.data.as_slice())
}

/// Build the dual-series bar chart rows, index-aligned to the category
/// list.
pub fn doctors_vs_patients(stats: Option<&DashboardStats>) -> Vec<DoctorsVsPatientsPoint> {
    let Some(group) = stats.map(|d| &d.active_doctors_vs_patients) else {
        return Vec::new();
    };
    let doctors = find_series(group, "doctor");
    let patients = find_series(group, "patient");
    group
        .categories
        .iter()
        .enumerate()
        .map(|(i, period)| DoctorsVsPatientsPoint {
            period: period.clone(),
            doctors: doctors.and_then(|s| s.get(i).copied()).unwrap_or(0),
            patients: patients.and_then(|s| s.get(i).copied()).unwrap_or(0),
        })
        .collect()
}

/// One slice of the top-specialties pie.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
    pub color: &'static str,
}

/// Build the pie data. Colors alternate teal/orange by position; source
/// order is preserved, no re-sorting by magnitude.
pub fn top_specialties(stats: Option<&DashboardStats>) -> Vec<PieSlice> {
    let Some(d) = stats else {
        return Vec::new();
    };
    d.top_specialities_in_demand
        .iter()
        .enumerate()
        .map(|(idx, s)| PieSlice {
            label: s.speciality.clone(),
            value: s.count,
            color: if idx % 2 == 0 { PIE_TEAL } else { PIE_ORANGE },
        })
        .collect()
}
