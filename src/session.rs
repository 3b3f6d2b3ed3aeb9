//! Persisted authentication session.
//!
//! The session is nothing more than the presence of a bearer token,
//! stored as JSON at `~/.iprescribe/.credentials.json`. A process start
//! with a stored token is authenticated without any network round-trip;
//! login and logout persist synchronously before the in-memory flag is
//! observable in a new state.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// The data directory name under the user's home.
pub const DATA_DIR: &str = ".iprescribe";

/// The credentials file name.
const CREDENTIALS_FILE: &str = ".credentials.json";

/// Stored credentials: just the bearer token.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Credentials {
    pub token: Option<String>,
}

impl Credentials {
    /// Whether a non-empty token is present.
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Owns the persisted session token and the authenticated flag derived
/// from it.
#[derive(Debug)]
pub struct SessionStore {
    credentials_path: PathBuf,
    credentials: Credentials,
}

impl SessionStore {
    /// Create a store backed by `~/.iprescribe/.credentials.json`.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        Some(Self::with_path(home.join(DATA_DIR).join(CREDENTIALS_FILE)))
    }

    /// Create a store backed by an explicit path. Used by tests.
    pub fn with_path(credentials_path: PathBuf) -> Self {
        let credentials = Self::load_from(&credentials_path);
        Self {
            credentials_path,
            credentials,
        }
    }

    /// Load credentials, degrading to empty defaults when the file is
    /// missing or unreadable.
    fn load_from(path: &Path) -> Credentials {
        if !path.exists() {
            return Credentials::default();
        }
        let file = match File::open(path) {
            Ok(f) => f,
            Err(_) => return Credentials::default(),
        };
        serde_json::from_reader(BufReader::new(file)).unwrap_or_default()
    }

    /// Path to the backing file.
    pub fn credentials_path(&self) -> &Path {
        &self.credentials_path
    }

    /// Whether a token is present. Invariant: equal to `token().is_some()`.
    pub fn is_authenticated(&self) -> bool {
        self.credentials.has_token()
    }

    /// The stored token, if any.
    pub fn token(&self) -> Option<&str> {
        self.credentials
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
    }

    /// Store a token. Persists before updating the in-memory value.
    pub fn login(&mut self, token: String) {
        let next = Credentials { token: Some(token) };
        if !self.persist(&next) {
            tracing::warn!(path = ?self.credentials_path, "failed to persist session token");
        }
        self.credentials = next;
    }

    /// Clear the token. Persists before updating the in-memory value.
    pub fn logout(&mut self) {
        let next = Credentials::default();
        if !self.persist(&next) {
            tracing::warn!(path = ?self.credentials_path, "failed to clear session token");
        }
        self.credentials = next;
    }

    /// Write credentials to disk, creating the parent directory if
    /// needed. Returns `true` on success.
    fn persist(&self, credentials: &Credentials) -> bool {
        if let Some(parent) = self.credentials_path.parent() {
            if !parent.exists() && fs::create_dir_all(parent).is_err() {
                return false;
            }
        }
        let file = match File::create(&self.credentials_path) {
            Ok(f) => f,
            Err(_) => return false,
        };
        serde_json::to_writer_pretty(BufWriter::new(file), credentials).is_ok()
    }
}
