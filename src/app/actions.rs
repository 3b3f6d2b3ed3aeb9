//! User-triggered actions: login, fetches, export, theme, logout.

use super::{App, AppMessage, Focus, Screen};
use crate::export;

/// Patients page requested for the dashboard table.
const FIRST_PAGE: u32 = 1;

impl App {
    /// Validate and submit the login form. Validation failures set
    /// field errors and never reach the network.
    pub fn submit_login(&mut self) {
        if self.login_form.submitting {
            return;
        }
        if !self.login_form.validate() {
            self.mark_dirty();
            return;
        }

        self.login_form.submitting = true;
        self.mark_dirty();

        let api = self.api.clone();
        let email = self.login_form.email.clone();
        let password = self.login_form.password.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let message = match api.login(&email, &password).await {
                Ok(outcome) => AppMessage::LoginSucceeded {
                    token: outcome.token,
                },
                Err(e) => AppMessage::LoginFailed {
                    error: e.to_string(),
                },
            };
            let _ = tx.send(message);
        });
    }

    pub(super) fn on_login_succeeded(&mut self, token: String) {
        tracing::info!("login succeeded");
        self.session.login(token.clone());
        self.api.set_auth_token(Some(token));
        self.login_form = Default::default();
        self.screen = Screen::Dashboard;
        self.refresh();
    }

    pub(super) fn on_login_failed(&mut self, error: String) {
        tracing::warn!(%error, "login failed");
        self.login_form.submitting = false;
        // The server message lands on the password field, as on the web
        // login form.
        self.login_form.password_error = Some(error);
    }

    /// Issue the two dashboard fetches concurrently. Each is
    /// independently loading/error/success; neither blocks the other.
    pub fn refresh(&mut self) {
        self.fetch_generation += 1;
        let generation = self.fetch_generation;

        self.stats_loading = true;
        self.stats_error = None;
        self.patients_loading = true;
        self.patients_error = None;
        self.mark_dirty();

        let api = self.api.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let message = match api.dashboard_stats().await {
                Ok(stats) => AppMessage::StatsLoaded { generation, stats },
                Err(e) => AppMessage::StatsFailed {
                    generation,
                    error: e.to_string(),
                },
            };
            let _ = tx.send(message);
        });

        let api = self.api.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let message = match api.patients(FIRST_PAGE).await {
                Ok(page) => AppMessage::PatientsLoaded { generation, page },
                Err(e) => AppMessage::PatientsFailed {
                    generation,
                    error: e.to_string(),
                },
            };
            let _ = tx.send(message);
        });
    }

    /// Clear the session and return to the login screen. In-flight
    /// fetch results become stale and will be discarded.
    pub fn logout(&mut self) {
        tracing::info!("logging out");
        self.session.logout();
        self.api.set_auth_token(None);
        self.fetch_generation += 1;
        self.stats = None;
        self.stats_loading = false;
        self.stats_error = None;
        self.patients = None;
        self.patients_loading = false;
        self.patients_error = None;
        self.search.clear();
        self.sort_column = None;
        self.sort_ascending = true;
        self.table_state.select(None);
        self.status_line = None;
        self.focus = Focus::default();
        self.screen = Screen::Login;
        self.mark_dirty();
    }

    /// Export the dashboard as CSV. No-op until both fetches have
    /// resolved.
    pub fn export(&mut self) {
        let (Some(stats), Some(_)) = (self.stats.as_ref(), self.patients.as_ref()) else {
            self.status_line = Some("Export is available once the dashboard has loaded".to_string());
            self.mark_dirty();
            return;
        };
        let rows = crate::viewmodel::patient_rows(self.patients.as_ref());
        self.status_line = Some(match export::export_dashboard(stats, &rows) {
            Ok(path) => format!("Exported to {}", path.display()),
            Err(e) => format!("Export failed: {}", e),
        });
        self.mark_dirty();
    }

    /// Flip the theme; the store persists before the new mode is
    /// observable.
    pub fn toggle_theme(&mut self) {
        let mode = self.theme.toggle();
        tracing::debug!(mode = mode.as_str(), "theme toggled");
        self.mark_dirty();
    }
}
