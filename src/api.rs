//! REST client for the iPrescribe admin API.
//!
//! Three operations: login, dashboard stats and the paginated patients
//! index. Bearer auth is attached when a token is set. Every failure -
//! transport error, non-2xx status, unparseable body - collapses into
//! [`ApiError`], which carries nothing more structured than a message
//! string; callers must not assume error codes.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{
    DashboardStats, DashboardStatsResponse, LoginResponse, PatientsPage, PatientsResponse,
};

/// Fallback message when the server provides none.
const REQUEST_FAILED: &str = "Request failed";

/// Error type for API client operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Credentials rejected, or a login response without a token.
    #[error("{message}")]
    Auth { message: String },
    /// Any other non-2xx response or transport failure.
    #[error("{message}")]
    Request { message: String },
}

impl ApiError {
    /// The user-facing message text.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Auth { message } | ApiError::Request { message } => message,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Request {
            message: e.to_string(),
        }
    }
}

/// Error body the backend sends on failures: `message` or `error`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Extract the server-supplied error message from a response body.
fn server_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed.message.or(parsed.error).filter(|m| !m.is_empty())
}

/// Result of a successful login.
///
/// The client does not store the token itself; the caller decides what
/// to do with it (normally: persist it through the session store).
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: serde_json::Value,
    pub message: Option<String>,
}

/// Client for the iPrescribe admin API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Base URL all requests are issued against, without trailing slash.
    pub base_url: String,
    /// Reusable HTTP client.
    client: Client,
    /// Optional bearer token for authenticated endpoints.
    auth_token: Option<String>,
}

impl ApiClient {
    /// Create a client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
            auth_token: None,
        }
    }

    /// Set the bearer token at construction time.
    pub fn with_auth(mut self, token: &str) -> Self {
        self.auth_token = Some(token.to_string());
        self
    }

    /// Set or clear the bearer token on an existing client.
    pub fn set_auth_token(&mut self, token: Option<String>) {
        self.auth_token = token;
    }

    /// The current bearer token, if any.
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    /// Add the Authorization header when a token is set.
    fn add_auth_header(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(ref token) = self.auth_token {
            builder.header("Authorization", format!("Bearer {}", token))
        } else {
            builder
        }
    }

    /// Authenticate with email and password.
    ///
    /// POST /auth/login
    ///
    /// Fails with [`ApiError::Auth`] when the server rejects the
    /// credentials or the response carries no token. No retry.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, ApiError> {
        let url = format!("{}/auth/login", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(ApiError::Auth {
                message: server_message(&text).unwrap_or_else(|| "Login failed".to_string()),
            });
        }

        let parsed: LoginResponse = serde_json::from_str(&text).map_err(|e| ApiError::Auth {
            message: format!("Login failed: invalid response: {}", e),
        })?;

        let message = parsed.message;
        let (token, user) = match parsed.data {
            Some(data) => (data.token.filter(|t| !t.is_empty()), data.user),
            None => (None, serde_json::Value::Null),
        };

        match token {
            Some(token) => Ok(LoginOutcome {
                token,
                user,
                message,
            }),
            None => Err(ApiError::Auth {
                message: "Login failed: missing token".to_string(),
            }),
        }
    }

    /// Fetch the aggregate dashboard statistics.
    ///
    /// GET /admin/dashboard/stats (bearer auth when a token is set)
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        let url = format!("{}/admin/dashboard/stats", self.base_url);
        let response: DashboardStatsResponse = self.get_json(self.client.get(&url)).await?;
        Ok(response.data)
    }

    /// Fetch one page of the patients index.
    ///
    /// GET /admin/patients?page=N (bearer auth when a token is set)
    pub async fn patients(&self, page: u32) -> Result<PatientsPage, ApiError> {
        let url = format!("{}/admin/patients", self.base_url);
        let builder = self.client.get(&url).query(&[("page", page)]);
        let response: PatientsResponse = self.get_json(builder).await?;
        Ok(response.data)
    }

    /// Send a GET request and decode the JSON body.
    ///
    /// Non-2xx responses become [`ApiError::Request`] with the
    /// server-supplied message, or "Request failed" when there is none.
    async fn get_json<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.add_auth_header(builder).send().await?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(ApiError::Request {
                message: server_message(&text).unwrap_or_else(|| REQUEST_FAILED.to_string()),
            });
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Request {
            message: format!("Invalid response format: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_prefers_message_over_error() {
        let body = r#"{"message": "Token expired", "error": "unauthorized"}"#;
        assert_eq!(server_message(body).as_deref(), Some("Token expired"));
    }

    #[test]
    fn server_message_falls_back_to_error_field() {
        let body = r#"{"error": "unauthorized"}"#;
        assert_eq!(server_message(body).as_deref(), Some("unauthorized"));
    }

    #[test]
    fn server_message_rejects_empty_and_unparseable_bodies() {
        assert_eq!(server_message(""), None);
        assert_eq!(server_message("<html>502</html>"), None);
        assert_eq!(server_message(r#"{"message": ""}"#), None);
    }

    #[test]
    fn api_error_displays_only_the_message() {
        let err = ApiError::Request {
            message: "Request failed".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed");
        assert_eq!(err.message(), "Request failed");
    }

    #[test]
    fn auth_token_can_be_set_and_cleared() {
        let mut client = ApiClient::new("http://localhost:1").with_auth("abc");
        assert_eq!(client.auth_token(), Some("abc"));
        client.set_auth_token(None);
        assert_eq!(client.auth_token(), None);
    }
}
