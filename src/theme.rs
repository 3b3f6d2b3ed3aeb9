//! Theme preference store.
//!
//! Cold-start resolution order: persisted value at
//! `~/.iprescribe/theme`, else the terminal's reported background
//! (the `COLORFGBG` convention stands in for an OS color-scheme query),
//! else light. Every mutation persists before the in-memory value is
//! updated, so a crash between the two never leaves the next load
//! looking at anything but the persisted value.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::session::DATA_DIR;

/// The theme file name under the data directory.
const THEME_FILE: &str = "theme";

/// Light or dark rendering palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// The persisted spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// The opposite mode.
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }
}

/// Terminal background preference, the TUI stand-in for the platform
/// `prefers-color-scheme` query.
///
/// Many terminals export `COLORFGBG` as `"<fg>;<bg>"`; background
/// palette indices 0-6 and 8 are dark.
pub fn system_preference() -> ThemeMode {
    match std::env::var("COLORFGBG") {
        Ok(value) => match value.rsplit(';').next().and_then(|bg| bg.parse::<u8>().ok()) {
            Some(bg) if bg <= 6 || bg == 8 => ThemeMode::Dark,
            _ => ThemeMode::Light,
        },
        Err(_) => ThemeMode::Light,
    }
}

/// Owns the persisted theme preference.
#[derive(Debug)]
pub struct ThemeStore {
    path: PathBuf,
    mode: ThemeMode,
}

impl ThemeStore {
    /// Create a store backed by `~/.iprescribe/theme`.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        Some(Self::with_path(home.join(DATA_DIR).join(THEME_FILE)))
    }

    /// Create a store backed by an explicit path. Used by tests.
    ///
    /// A persisted value wins; the system preference is only consulted
    /// when nothing was stored.
    pub fn with_path(path: PathBuf) -> Self {
        let mode = Self::load_from(&path).unwrap_or_else(system_preference);
        Self { path, mode }
    }

    fn load_from(path: &Path) -> Option<ThemeMode> {
        fs::read_to_string(path)
            .ok()
            .and_then(|s| ThemeMode::parse(s.trim()))
    }

    /// The current mode.
    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Flip between light and dark. Returns the new mode.
    pub fn toggle(&mut self) -> ThemeMode {
        self.set_mode(self.mode.toggled());
        self.mode
    }

    /// Set the mode. Persists before updating the in-memory value.
    pub fn set_mode(&mut self, mode: ThemeMode) {
        if !self.persist(mode) {
            tracing::warn!(path = ?self.path, "failed to persist theme preference");
        }
        self.mode = mode;
    }

    fn persist(&self, mode: ThemeMode) -> bool {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() && fs::create_dir_all(parent).is_err() {
                return false;
            }
        }
        fs::write(&self.path, mode.as_str()).is_ok()
    }
}
