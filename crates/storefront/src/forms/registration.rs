//! Registration form validation.
//!
//! The observable contract: validate before any network call, report
//! every violation keyed by field, keep entered values intact so the
//! user can correct and resubmit.

use serde::Deserialize;

use mango_core::Email;

use crate::api::types::RegisterData;

use super::FieldErrors;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Raw registration form fields as posted by the browser.
///
/// All fields default so a partially filled form still deserializes and
/// reaches validation instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    /// Which registration upstream handles this submission; `"users"`
    /// routes to the standalone user service.
    #[serde(default)]
    pub upstream: Option<String>,
}

impl RegisterForm {
    /// Whether this submission targets the standalone user service.
    #[must_use]
    pub fn targets_user_service(&self) -> bool {
        self.upstream.as_deref() == Some("users")
    }

    /// Build the request body from validated fields.
    #[must_use]
    pub fn to_register_data(&self) -> RegisterData {
        RegisterData {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

/// Validate a registration form, collecting every violation in one pass.
///
/// An empty result is the only green light for the network call.
#[must_use]
pub fn validate(form: &RegisterForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if form.first_name.trim().is_empty() {
        errors.insert(
            "first_name".to_string(),
            "First name is required".to_string(),
        );
    }

    if form.last_name.trim().is_empty() {
        errors.insert("last_name".to_string(), "Last name is required".to_string());
    }

    let email = form.email.trim();
    if email.is_empty() {
        errors.insert("email".to_string(), "Email is required".to_string());
    } else if Email::parse(email).is_err() {
        errors.insert(
            "email".to_string(),
            "Enter a valid email address".to_string(),
        );
    }

    if form.password.trim().is_empty() {
        errors.insert("password".to_string(), "Password is required".to_string());
    } else if form.password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.insert(
            "password".to_string(),
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
        );
    }

    if form.confirm_password.trim().is_empty() {
        errors.insert(
            "confirm_password".to_string(),
            "Please confirm your password".to_string(),
        );
    } else if form.confirm_password != form.password {
        errors.insert(
            "confirm_password".to_string(),
            "Passwords do not match".to_string(),
        );
    }

    errors
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_form() -> RegisterForm {
        RegisterForm {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            password: "correct-horse".to_string(),
            confirm_password: "correct-horse".to_string(),
            upstream: None,
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(validate(&valid_form()).is_empty());
    }

    #[test]
    fn test_each_missing_field_reported_alone() {
        for field in ["first_name", "last_name", "email", "password"] {
            let mut form = valid_form();
            match field {
                "first_name" => form.first_name.clear(),
                "last_name" => form.last_name.clear(),
                "email" => form.email.clear(),
                _ => {
                    form.password.clear();
                    // keep confirmation consistent so only one error appears
                    form.confirm_password.clear();
                }
            }
            let errors = validate(&form);
            assert!(errors.contains_key(field), "expected error on {field}");
        }
    }

    #[test]
    fn test_whitespace_only_counts_as_missing() {
        let mut form = valid_form();
        form.first_name = "   ".to_string();
        let errors = validate(&form);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("first_name"));
    }

    #[test]
    fn test_short_password_reported_regardless_of_other_fields() {
        let mut form = valid_form();
        form.password = "short".to_string();
        form.confirm_password = "short".to_string();
        let errors = validate(&form);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("password").map(String::as_str),
            Some("Password must be at least 8 characters")
        );
    }

    #[test]
    fn test_password_mismatch_reported_on_confirmation_only() {
        let mut form = valid_form();
        form.confirm_password = "different-pass".to_string();
        let errors = validate(&form);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("confirm_password"));
        assert!(!errors.contains_key("password"));
    }

    #[test]
    fn test_invalid_email_shapes_rejected() {
        for bad in ["bad", "@example.com", "user@", "no-at-sign.com"] {
            let mut form = valid_form();
            form.email = bad.to_string();
            let errors = validate(&form);
            assert_eq!(
                errors.get("email").map(String::as_str),
                Some("Enter a valid email address"),
                "email {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_all_violations_collected_in_one_pass() {
        // The canonical everything-wrong submission
        let form = RegisterForm {
            first_name: String::new(),
            last_name: "Doe".to_string(),
            email: "bad".to_string(),
            password: "short".to_string(),
            confirm_password: "mismatch".to_string(),
            upstream: None,
        };

        let errors = validate(&form);
        assert_eq!(errors.len(), 4);
        assert!(errors.contains_key("first_name"));
        assert!(errors.contains_key("email"));
        assert!(errors.contains_key("password"));
        assert!(errors.contains_key("confirm_password"));
        assert!(!errors.contains_key("last_name"));
    }

    #[test]
    fn test_to_register_data_trims_identity_fields() {
        let mut form = valid_form();
        form.first_name = "  Jane ".to_string();
        form.email = " jane@example.com ".to_string();
        let data = form.to_register_data();
        assert_eq!(data.first_name, "Jane");
        assert_eq!(data.email, "jane@example.com");
        // passwords are never trimmed
        assert_eq!(data.password, "correct-horse");
    }

    #[test]
    fn test_upstream_toggle() {
        let mut form = valid_form();
        assert!(!form.targets_user_service());
        form.upstream = Some("users".to_string());
        assert!(form.targets_user_service());
    }
}
