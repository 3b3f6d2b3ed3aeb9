//! Login form state and client-side validation.

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::LoginField;

/// Same shape the web login screen checks: something@something.tld,
/// no whitespace.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex compiles"));

/// Login form state with per-field validation errors.
///
/// Errors are set on submit and cleared per-field on edit: typing in
/// the email field clears only the email error.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub field: LoginField,
    pub show_password: bool,
    pub email_error: Option<String>,
    pub password_error: Option<String>,
    /// A login request is in flight; input is ignored until it lands.
    pub submitting: bool,
}

impl LoginForm {
    /// Append a character to the focused field, clearing that field's
    /// error.
    pub fn type_char(&mut self, c: char) {
        match self.field {
            LoginField::Email => {
                self.email.push(c);
                self.email_error = None;
            }
            LoginField::Password => {
                self.password.push(c);
                self.password_error = None;
            }
        }
    }

    /// Delete the last character of the focused field.
    pub fn backspace(&mut self) {
        match self.field {
            LoginField::Email => {
                self.email.pop();
                self.email_error = None;
            }
            LoginField::Password => {
                self.password.pop();
                self.password_error = None;
            }
        }
    }

    /// Move focus to the other field.
    pub fn next_field(&mut self) {
        self.field = match self.field {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    pub fn toggle_show_password(&mut self) {
        self.show_password = !self.show_password;
    }

    /// Validate both fields. Returns true when the form may be
    /// submitted; on false, field errors are set and no network call
    /// must be attempted.
    pub fn validate(&mut self) -> bool {
        self.email_error = if self.email.is_empty() {
            Some("Email is required".to_string())
        } else if !EMAIL_RE.is_match(&self.email) {
            Some("Invalid email format".to_string())
        } else {
            None
        };

        self.password_error = if self.password.is_empty() {
            Some("Password is required".to_string())
        } else if self.password.chars().count() < 8 {
            Some("Password must be at least 8 characters".to_string())
        } else {
            None
        };

        self.email_error.is_none() && self.password_error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(email: &str, password: &str) -> LoginForm {
        LoginForm {
            email: email.to_string(),
            password: password.to_string(),
            ..LoginForm::default()
        }
    }

    #[test]
    fn empty_fields_are_required() {
        let mut form = LoginForm::default();
        assert!(!form.validate());
        assert_eq!(form.email_error.as_deref(), Some("Email is required"));
        assert_eq!(form.password_error.as_deref(), Some("Password is required"));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut form = filled("not-an-email", "longenough");
        assert!(!form.validate());
        assert_eq!(form.email_error.as_deref(), Some("Invalid email format"));
        assert!(form.password_error.is_none());
    }

    #[test]
    fn seven_character_password_is_rejected() {
        let mut form = filled("admin@careoneclinics.com", "1234567");
        assert!(!form.validate());
        assert_eq!(
            form.password_error.as_deref(),
            Some("Password must be at least 8 characters")
        );
        assert!(form.email_error.is_none());
    }

    #[test]
    fn valid_credentials_pass() {
        let mut form = filled("admin@careoneclinics.com", "12345678");
        assert!(form.validate());
        assert!(form.email_error.is_none());
        assert!(form.password_error.is_none());
    }

    #[test]
    fn editing_a_field_clears_only_its_own_error() {
        let mut form = LoginForm::default();
        form.validate();
        form.field = LoginField::Email;
        form.type_char('a');
        assert!(form.email_error.is_none());
        assert_eq!(form.password_error.as_deref(), Some("Password is required"));
    }
}
