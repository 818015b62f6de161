//! Login form validation.

use serde::Deserialize;

use crate::api::types::LoginCredentials;

use super::FieldErrors;

/// Raw login form fields as posted by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    /// Build the request body from validated fields.
    #[must_use]
    pub fn to_credentials(&self) -> LoginCredentials {
        LoginCredentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

/// Validate a login form. Presence only; the backend is the authority on
/// whether the credentials are correct.
#[must_use]
pub fn validate(form: &LoginForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if form.email.trim().is_empty() {
        errors.insert("email".to_string(), "Email is required".to_string());
    }

    if form.password.trim().is_empty() {
        errors.insert("password".to_string(), "Password is required".to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_form_passes() {
        let form = LoginForm {
            email: "jane@example.com".to_string(),
            password: "hunter22".to_string(),
        };
        assert!(validate(&form).is_empty());
    }

    #[test]
    fn test_empty_form_reports_both_fields() {
        let errors = validate(&LoginForm::default());
        assert_eq!(errors.len(), 2);
        assert!(errors.contains_key("email"));
        assert!(errors.contains_key("password"));
    }
}
