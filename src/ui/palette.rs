//! Theme-aware color palette.
//!
//! Colors that encode meaning (series identity, verification status) stay
//! fixed across themes; only the neutral text and chrome colors flip
//! between light and dark.

use ratatui::style::Color;

use crate::theme::ThemeMode;

/// Doctors series, used in the grouped bar chart legend and bars.
pub const COLOR_DOCTORS: Color = Color::Rgb(255, 152, 31);

/// Patients series, shared by the bar chart and the consultations trend line.
pub const COLOR_PATIENTS: Color = Color::Rgb(26, 150, 240);

/// First slice color of the specialties breakdown.
pub const COLOR_TEAL: Color = Color::Rgb(67, 180, 188);

/// Alternate slice color of the specialties breakdown.
pub const COLOR_ORANGE: Color = Color::Rgb(255, 153, 0);

/// Prescription volume trend line.
pub const COLOR_PRESCRIPTIONS: Color = Color::Rgb(76, 175, 80);

/// Verified patient status.
pub const COLOR_VERIFIED: Color = Color::Rgb(76, 175, 80);

/// Pending patient status.
pub const COLOR_PENDING: Color = Color::Rgb(255, 153, 0);

/// Resolved set of neutral colors for the active theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    /// Primary text.
    pub text: Color,
    /// Secondary text: hints, captions, placeholders.
    pub dim: Color,
    /// Block borders.
    pub border: Color,
    /// Focused borders and selected navigation items.
    pub accent: Color,
    /// Error messages.
    pub error: Color,
    /// Table row highlight background.
    pub highlight_bg: Color,
}

impl Palette {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Palette {
                text: Color::Black,
                dim: Color::DarkGray,
                border: Color::Gray,
                accent: Color::Blue,
                error: Color::Red,
                highlight_bg: Color::Rgb(220, 230, 245),
            },
            ThemeMode::Dark => Palette {
                text: Color::White,
                dim: Color::Gray,
                border: Color::DarkGray,
                accent: Color::LightBlue,
                error: Color::LightRed,
                highlight_bg: Color::Rgb(40, 50, 65),
            },
        }
    }
}
