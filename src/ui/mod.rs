//! UI rendering for the iPrescribe admin TUI
//!
//! Two top-level screens:
//! - Login: centered credential form with inline validation errors
//! - Dashboard: sidebar navigation, stat cards, trend charts and the
//!   searchable patients table
//!
//! Rendering is stateless apart from the table selection, which ratatui
//! tracks through `TableState` on the `App`.

mod dashboard;
mod login;
mod palette;
mod patients_table;
mod sidebar;

use ratatui::Frame;

use crate::app::{App, Screen};

pub use palette::Palette;

/// Top-level render dispatch, called once per draw.
pub fn render(frame: &mut Frame, app: &mut App) {
    let palette = Palette::for_mode(app.theme.mode());
    match app.screen {
        Screen::Login => login::render(frame, app, &palette),
        Screen::Dashboard => dashboard::render(frame, app, &palette),
    }
}
