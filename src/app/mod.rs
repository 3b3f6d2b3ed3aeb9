//! Application state and logic for the TUI.
//!
//! This module contains the core [`App`] struct and related types:
//! - [`Screen`] - Which screen is currently displayed
//! - [`Focus`] - Which dashboard component has focus
//! - [`AppMessage`] - Messages for async communication with fetch tasks

mod actions;
mod form;
mod handlers;
mod messages;
mod types;

pub use form::LoginForm;
pub use messages::AppMessage;
pub use types::{Focus, LoginField, Screen, NAV_ITEMS};

use ratatui::widgets::TableState;
use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::config::Config;
use crate::models::{DashboardStats, PatientsPage};
use crate::session::SessionStore;
use crate::theme::ThemeStore;
use crate::viewmodel::{self, PatientRow, SortColumn};

/// Top-level application state.
pub struct App {
    /// Which screen is displayed.
    pub screen: Screen,
    /// Which dashboard component has keyboard focus.
    pub focus: Focus,
    /// Login form state.
    pub login_form: LoginForm,
    /// Persisted session token store.
    pub session: SessionStore,
    /// Persisted theme preference store.
    pub theme: ThemeStore,
    /// REST client; cloned into background fetch tasks.
    pub api: ApiClient,

    /// Raw dashboard stats, present once the fetch resolves.
    pub stats: Option<DashboardStats>,
    pub stats_loading: bool,
    pub stats_error: Option<String>,
    /// Raw patients page, present once the fetch resolves.
    pub patients: Option<PatientsPage>,
    pub patients_loading: bool,
    pub patients_error: Option<String>,

    /// Patient table search input.
    pub search: String,
    /// Active sort column, `None` for source order.
    pub sort_column: Option<SortColumn>,
    /// Sort direction; meaningless while `sort_column` is `None`.
    pub sort_ascending: bool,
    /// Patient table selection.
    pub table_state: TableState,
    /// Active sidebar item index into [`NAV_ITEMS`].
    pub nav_index: usize,
    /// Transient message shown at the bottom of the dashboard
    /// (export destination, export failure).
    pub status_line: Option<String>,

    /// Incremented whenever in-flight fetches become stale (refresh,
    /// logout). Results tagged with an older generation are discarded.
    pub fetch_generation: u64,

    pub needs_redraw: bool,
    pub should_quit: bool,

    /// Sender handed to background tasks.
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    /// Receiver; taken by the event loop.
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
}

impl App {
    /// Build the application from resolved configuration and stores.
    ///
    /// A stored token means the app starts on the dashboard with no
    /// network round-trip; the caller is expected to kick off the
    /// initial fetches in that case.
    pub fn new(config: Config, session: SessionStore, theme: ThemeStore) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();

        let mut api = ApiClient::new(config.api_base_url);
        api.set_auth_token(session.token().map(String::from));

        let screen = if session.is_authenticated() {
            Screen::Dashboard
        } else {
            Screen::Login
        };

        Self {
            screen,
            focus: Focus::default(),
            login_form: LoginForm::default(),
            session,
            theme,
            api,
            stats: None,
            stats_loading: false,
            stats_error: None,
            patients: None,
            patients_loading: false,
            patients_error: None,
            search: String::new(),
            sort_column: None,
            sort_ascending: true,
            table_state: TableState::default(),
            nav_index: 0,
            status_line: None,
            fetch_generation: 0,
            needs_redraw: true,
            should_quit: false,
            message_tx,
            message_rx: Some(message_rx),
        }
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// All patient rows for the current page.
    pub fn patient_rows(&self) -> Vec<PatientRow> {
        viewmodel::patient_rows(self.patients.as_ref())
    }

    /// Patient rows matching the current search input, ordered by the
    /// active sort column (source order when unsorted).
    pub fn filtered_rows(&self) -> Vec<PatientRow> {
        let mut rows: Vec<PatientRow> = self
            .patient_rows()
            .into_iter()
            .filter(|row| row.matches(&self.search))
            .collect();
        if let Some(column) = self.sort_column {
            viewmodel::sort_rows(&mut rows, column, self.sort_ascending);
        }
        rows
    }

    /// Advance the sort: unsorted, then each column ascending in turn,
    /// then back to unsorted. Selection is reset because row indices
    /// change meaning.
    pub fn cycle_sort_column(&mut self) {
        self.sort_column = match self.sort_column {
            None => Some(SortColumn::ALL[0]),
            Some(current) => SortColumn::ALL
                .iter()
                .position(|c| *c == current)
                .map(|i| i + 1)
                .filter(|i| *i < SortColumn::ALL.len())
                .map(|i| SortColumn::ALL[i]),
        };
        self.sort_ascending = true;
        self.table_state.select(None);
        self.mark_dirty();
    }

    /// Reverse the sort direction. No-op while unsorted.
    pub fn toggle_sort_direction(&mut self) {
        if self.sort_column.is_none() {
            return;
        }
        self.sort_ascending = !self.sort_ascending;
        self.table_state.select(None);
        self.mark_dirty();
    }

    /// Whether the export action is available: both fetches resolved.
    pub fn can_export(&self) -> bool {
        self.stats.is_some() && self.patients.is_some()
    }

    /// Move the table selection down, clamped to the filtered rows.
    pub fn select_next(&mut self) {
        let len = self.filtered_rows().len();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let next = match self.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.table_state.select(Some(next));
    }

    /// Move the table selection up.
    pub fn select_previous(&mut self) {
        let len = self.filtered_rows().len();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let prev = match self.table_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => 0,
        };
        self.table_state.select(Some(prev));
    }

    /// Apply a message from a background task.
    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::LoginSucceeded { token } => self.on_login_succeeded(token),
            AppMessage::LoginFailed { error } => self.on_login_failed(error),
            AppMessage::StatsLoaded { generation, stats } => {
                if !self.is_current(generation) {
                    return;
                }
                self.stats = Some(stats);
                self.stats_loading = false;
                self.stats_error = None;
            }
            AppMessage::StatsFailed { generation, error } => {
                if !self.is_current(generation) {
                    return;
                }
                self.stats_loading = false;
                self.stats_error = Some(error);
            }
            AppMessage::PatientsLoaded { generation, page } => {
                if !self.is_current(generation) {
                    return;
                }
                self.patients = Some(page);
                self.patients_loading = false;
                self.patients_error = None;
                self.table_state.select(None);
            }
            AppMessage::PatientsFailed { generation, error } => {
                if !self.is_current(generation) {
                    return;
                }
                self.patients_loading = false;
                self.patients_error = Some(error);
            }
        }
        self.mark_dirty();
    }

    /// Whether a fetch result belongs to the current generation. Stale
    /// results (fetch resolved after a logout or refresh) are dropped
    /// so they never mutate state they no longer describe.
    fn is_current(&self, generation: u64) -> bool {
        if generation != self.fetch_generation {
            tracing::debug!(generation, current = self.fetch_generation, "discarding stale fetch result");
            return false;
        }
        true
    }
}
