//! Form state and validation.
//!
//! Validation runs in one synchronous pass per form and collects every
//! violation into a field-keyed error map - not fail-fast - so the user
//! sees all problems at once. A form submits to the backend only when
//! its map is empty.

pub mod login;
pub mod registration;

use std::collections::BTreeMap;

use crate::api::ApiError;
use crate::api::types::ApiErrorBody;

/// Map from form field name to a validation message.
///
/// Ordered so templates render errors deterministically.
pub type FieldErrors = BTreeMap<String, String>;

/// What a failed backend call means for the form that submitted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFeedback {
    /// Per-field messages supplied by the backend, adopted verbatim.
    Fields(FieldErrors),
    /// A single general message.
    General(String),
}

/// Extract human-readable form feedback from a failed backend call.
///
/// Prefers a structured per-field `errors` map when the backend supplied
/// one, then a `message` string, then a generic line. Network failures
/// never have a body to inspect.
#[must_use]
pub fn feedback_from_api(err: &ApiError) -> ApiFeedback {
    match err {
        ApiError::Network(_) => {
            ApiFeedback::General("Unable to reach the server. Please try again.".to_string())
        }
        ApiError::Parse(_) => {
            ApiFeedback::General("The server returned an unexpected response.".to_string())
        }
        ApiError::Unauthorized { .. } | ApiError::Http { .. } => {
            if let Some(body) = err.body()
                && let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body)
            {
                if let Some(errors) = parsed.errors
                    && !errors.is_empty()
                {
                    return ApiFeedback::Fields(errors);
                }
                if let Some(message) = parsed.message
                    && !message.trim().is_empty()
                {
                    return ApiFeedback::General(message);
                }
            }
            ApiFeedback::General("Something went wrong. Please try again.".to_string())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn http_error(status: u16, body: &str) -> ApiError {
        ApiError::Http {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_structured_errors_adopted_verbatim() {
        let err = http_error(
            422,
            r#"{"errors": {"email": "Email already registered", "password": "Too weak"}}"#,
        );

        let ApiFeedback::Fields(fields) = feedback_from_api(&err) else {
            panic!("expected field feedback");
        };
        assert_eq!(fields.len(), 2);
        assert_eq!(
            fields.get("email").map(String::as_str),
            Some("Email already registered")
        );
        assert_eq!(fields.get("password").map(String::as_str), Some("Too weak"));
    }

    #[test]
    fn test_message_used_when_no_field_errors() {
        let err = http_error(409, r#"{"message": "Account already exists"}"#);
        assert_eq!(
            feedback_from_api(&err),
            ApiFeedback::General("Account already exists".to_string())
        );
    }

    #[test]
    fn test_empty_errors_map_falls_back_to_message() {
        let err = http_error(422, r#"{"errors": {}, "message": "Invalid input"}"#);
        assert_eq!(
            feedback_from_api(&err),
            ApiFeedback::General("Invalid input".to_string())
        );
    }

    #[test]
    fn test_unparseable_body_gets_generic_message() {
        let err = http_error(500, "<html>Internal Server Error</html>");
        let ApiFeedback::General(message) = feedback_from_api(&err) else {
            panic!("expected general feedback");
        };
        assert_eq!(message, "Something went wrong. Please try again.");
    }
}
