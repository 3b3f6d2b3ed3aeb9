//! Keyboard handling per screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{App, Focus, Screen, NAV_ITEMS};

impl App {
    /// Route a key press to the active screen. Ctrl+C is handled by the
    /// event loop before this is called.
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.mark_dirty();
        match self.screen {
            Screen::Login => self.handle_login_key(key),
            Screen::Dashboard => self.handle_dashboard_key(key),
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        if self.login_form.submitting {
            return;
        }
        match key.code {
            KeyCode::Tab | KeyCode::Down | KeyCode::Up => self.login_form.next_field(),
            KeyCode::Enter => self.submit_login(),
            KeyCode::Backspace => self.login_form.backspace(),
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.login_form.toggle_show_password();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.login_form.type_char(c);
            }
            _ => {}
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        // Search consumes plain characters while focused.
        if self.focus == Focus::Search {
            match key.code {
                KeyCode::Esc => {
                    self.focus = Focus::Table;
                }
                KeyCode::Enter => {
                    self.focus = Focus::Table;
                    self.table_state.select(None);
                }
                KeyCode::Backspace => {
                    self.search.pop();
                    self.table_state.select(None);
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.search.push(c);
                    self.table_state.select(None);
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('/') => self.focus = Focus::Search,
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Char('s') => self.cycle_sort_column(),
            KeyCode::Char('S') => self.toggle_sort_direction(),
            KeyCode::Char('e') => self.export(),
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Char('l') => self.logout(),
            KeyCode::Tab => self.nav_index = (self.nav_index + 1) % NAV_ITEMS.len(),
            KeyCode::BackTab => {
                self.nav_index = (self.nav_index + NAV_ITEMS.len() - 1) % NAV_ITEMS.len();
            }
            KeyCode::Esc => {
                if !self.search.is_empty() {
                    self.search.clear();
                    self.table_state.select(None);
                }
            }
            _ => {}
        }
    }
}
