//! Authentication state: the session-persisted bearer token.
//!
//! The token's presence is the sole signal of "signed in" - there is no
//! expiry tracking and no refresh. All access goes through the helpers
//! here; nothing below the route layer reads the session.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

/// Session keys for authentication data.
pub mod session_keys {
    /// Key for the bearer token of the signed-in user.
    pub const ACCESS_TOKEN: &str = "access_token";
}

/// Read the persisted bearer token, if any.
pub async fn access_token(session: &Session) -> Option<String> {
    session
        .get::<String>(session_keys::ACCESS_TOKEN)
        .await
        .ok()
        .flatten()
        .filter(|token| !token.is_empty())
}

/// Persist the bearer token.
///
/// An empty token is not a credential and is never stored.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_access_token(
    session: &Session,
    token: &str,
) -> Result<(), tower_sessions::session::Error> {
    if token.is_empty() {
        return Ok(());
    }
    session.insert(session_keys::ACCESS_TOKEN, token).await
}

/// Remove the persisted bearer token (sign-out).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_access_token(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<String>(session_keys::ACCESS_TOKEN)
        .await?;
    Ok(())
}

/// Extractor that requires a signed-in user.
///
/// Carries the bearer token for backend calls. Browser requests without
/// one are redirected to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(token): RequireAuth,
/// ) -> impl IntoResponse {
///     // pass `token` to api:: calls
/// }
/// ```
pub struct RequireAuth(pub String);

/// Error returned when authentication is required but no token is present.
pub enum AuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::Unauthorized)?;

        let token = access_token(session).await.ok_or_else(|| {
            // API requests get a bare 401 instead of a redirect
            if parts.uri.path().starts_with("/api/") {
                AuthRejection::Unauthorized
            } else {
                AuthRejection::RedirectToLogin
            }
        })?;

        Ok(Self(token))
    }
}

/// Extractor that optionally gets the bearer token.
///
/// Unlike `RequireAuth`, this does not reject the request when no user is
/// signed in; pages that render for guests use it to vary their chrome.
pub struct OptionalAuth(pub Option<String>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = match parts.extensions.get::<Session>() {
            Some(session) => access_token(session).await,
            None => None,
        };

        Ok(Self(token))
    }
}
