//! Runtime configuration.
//!
//! The API base URL is the only configuration value this client takes.
//! It is resolved once at startup from the `IPRESCRIBE_API_URL`
//! environment variable, falling back to the production endpoint.

/// Environment variable that overrides the API base URL.
pub const API_URL_ENV: &str = "IPRESCRIBE_API_URL";

/// Default base URL for the iPrescribe admin API.
pub const DEFAULT_API_URL: &str = "https://api.iprescribe.health/api/v1";

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL all API requests are issued against.
    pub api_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Config {
    /// Resolve configuration from the process environment.
    ///
    /// An unset or blank `IPRESCRIBE_API_URL` falls back to
    /// [`DEFAULT_API_URL`]. A trailing slash is stripped so endpoint
    /// paths can be appended uniformly.
    pub fn from_env() -> Self {
        let api_base_url = std::env::var(API_URL_ENV)
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self { api_base_url }
    }

    /// Set the API base URL.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn from_env_defaults_when_unset() {
        std::env::remove_var(API_URL_ENV);
        let config = Config::from_env();
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
    }

    #[test]
    #[serial]
    fn from_env_reads_override_and_strips_trailing_slash() {
        std::env::set_var(API_URL_ENV, "http://localhost:9000/api/");
        let config = Config::from_env();
        assert_eq!(config.api_base_url, "http://localhost:9000/api");
        std::env::remove_var(API_URL_ENV);
    }

    #[test]
    #[serial]
    fn from_env_ignores_blank_override() {
        std::env::set_var(API_URL_ENV, "   ");
        let config = Config::from_env();
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        std::env::remove_var(API_URL_ENV);
    }

    #[test]
    fn builder_overrides_url() {
        let config = Config::default().with_api_base_url("http://127.0.0.1:1");
        assert_eq!(config.api_base_url, "http://127.0.0.1:1");
    }
}
