//! Authentication route handlers.
//!
//! Handles login, registration, and logout against the marketplace API.
//! Validation runs before any network call; failed submissions re-render
//! with field errors and the entered values intact.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::api;
use crate::api::types::AuthResponse;
use crate::filters;
use crate::forms::login::LoginForm;
use crate::forms::registration::RegisterForm;
use crate::forms::{ApiFeedback, FieldErrors, feedback_from_api, login, registration};
use crate::middleware::{clear_access_token, set_access_token};
use crate::state::AppState;

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Translate an error code from a redirect into a user-visible line.
fn notice_for(code: &str) -> String {
    match code {
        "session_expired" => "Your session has expired. Please sign in again.".to_string(),
        "session" => "Could not start a session. Please try again.".to_string(),
        _ => "Please sign in to continue.".to_string(),
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub authenticated: bool,
    pub email: String,
    pub email_error: Option<String>,
    pub password_error: Option<String>,
    pub general_error: Option<String>,
    pub notice: Option<String>,
}

impl LoginTemplate {
    fn empty() -> Self {
        Self {
            authenticated: false,
            email: String::new(),
            email_error: None,
            password_error: None,
            general_error: None,
            notice: None,
        }
    }

    /// Re-render the form with errors, keeping the entered email.
    fn with_errors(form: &LoginForm, mut errors: FieldErrors, general: Option<String>) -> Self {
        Self {
            authenticated: false,
            email: form.email.clone(),
            email_error: errors.remove("email"),
            password_error: errors.remove("password"),
            general_error: general.or_else(|| remaining_general(errors)),
            notice: None,
        }
    }
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub authenticated: bool,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub first_name_error: Option<String>,
    pub last_name_error: Option<String>,
    pub email_error: Option<String>,
    pub password_error: Option<String>,
    pub confirm_password_error: Option<String>,
    pub general_error: Option<String>,
    pub via_user_service: bool,
}

impl RegisterTemplate {
    fn empty() -> Self {
        Self {
            authenticated: false,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            first_name_error: None,
            last_name_error: None,
            email_error: None,
            password_error: None,
            confirm_password_error: None,
            general_error: None,
            via_user_service: false,
        }
    }

    /// Re-render the form with errors, keeping everything but the
    /// password fields.
    fn with_errors(form: &RegisterForm, mut errors: FieldErrors, general: Option<String>) -> Self {
        Self {
            authenticated: false,
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            email: form.email.clone(),
            first_name_error: errors.remove("first_name"),
            last_name_error: errors.remove("last_name"),
            email_error: errors.remove("email"),
            password_error: errors.remove("password"),
            confirm_password_error: errors.remove("confirm_password"),
            general_error: general.or_else(|| remaining_general(errors)),
            via_user_service: form.targets_user_service(),
        }
    }
}

/// Backend field errors that match none of the form's fields still need
/// to reach the user; fold them into the general line.
fn remaining_general(errors: FieldErrors) -> Option<String> {
    if errors.is_empty() {
        None
    } else {
        Some(
            errors
                .into_values()
                .collect::<Vec<_>>()
                .join(" "),
        )
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        general_error: query.error.as_deref().map(notice_for),
        notice: query.success,
        ..LoginTemplate::empty()
    }
}

/// Handle login form submission.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let errors = login::validate(&form);
    if !errors.is_empty() {
        return LoginTemplate::with_errors(&form, errors, None).into_response();
    }

    match api::auth::login(state.api(), &form.to_credentials()).await {
        Ok(auth) => establish_session(&session, &auth, "/").await,
        Err(err) => {
            tracing::warn!("Login failed: {err}");
            // A 401 here means rejected credentials, not an expired
            // session - there is nothing to sign out of yet.
            let feedback = if err.is_unauthorized() {
                ApiFeedback::General("Invalid email or password".to_string())
            } else {
                feedback_from_api(&err)
            };
            match feedback {
                ApiFeedback::Fields(fields) => {
                    LoginTemplate::with_errors(&form, fields, None).into_response()
                }
                ApiFeedback::General(message) => {
                    LoginTemplate::with_errors(&form, FieldErrors::new(), Some(message))
                        .into_response()
                }
            }
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    RegisterTemplate {
        general_error: query.error.as_deref().map(notice_for),
        ..RegisterTemplate::empty()
    }
}

/// Handle registration form submission.
///
/// Validation gates the network call: a submission with any field error
/// never leaves this process.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    let errors = registration::validate(&form);
    if !errors.is_empty() {
        return RegisterTemplate::with_errors(&form, errors, None).into_response();
    }

    let data = form.to_register_data();
    let result = if form.targets_user_service() {
        api::users::register(state.user_api(), &data).await
    } else {
        api::auth::register(state.api(), &data).await
    };

    match result {
        Ok(auth) => establish_session(&session, &auth, "/").await,
        Err(err) => {
            tracing::warn!("Registration failed: {err}");
            match feedback_from_api(&err) {
                ApiFeedback::Fields(fields) => {
                    RegisterTemplate::with_errors(&form, fields, None).into_response()
                }
                ApiFeedback::General(message) => {
                    RegisterTemplate::with_errors(&form, FieldErrors::new(), Some(message))
                        .into_response()
                }
            }
        }
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Clears the persisted token and destroys the session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_access_token(&session).await {
        tracing::error!("Failed to clear access token: {e}");
    }

    // Also destroy the entire session
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }

    Redirect::to("/").into_response()
}

// =============================================================================
// Helpers
// =============================================================================

/// Persist the minted token and leave the form.
///
/// The token is persisted if and only if the response carried a
/// non-empty one; `set_access_token` enforces the invariant.
async fn establish_session(session: &Session, auth: &AuthResponse, next: &str) -> Response {
    if let Err(e) = set_access_token(session, &auth.token).await {
        tracing::error!("Failed to set session: {e}");
        return Redirect::to("/auth/login?error=session").into_response();
    }

    tracing::debug!(user = %auth.user.id, "session established");
    Redirect::to(next).into_response()
}
