//! Authentication operations against the marketplace API.
//!
//! These functions only issue the HTTP call and return the typed body.
//! Persisting the returned token into the session happens at the route
//! layer, the one place tokens are minted, so nothing here touches
//! ambient state.

use tracing::instrument;

use super::types::{AuthResponse, LoginCredentials, RegisterData, User};
use super::{ApiClient, ApiError};

/// Exchange credentials for a user and bearer token.
///
/// # Errors
///
/// Returns an error if the credentials are rejected or the API request
/// fails.
#[instrument(skip(client, credentials), fields(email = %credentials.email))]
pub async fn login(
    client: &ApiClient,
    credentials: &LoginCredentials,
) -> Result<AuthResponse, ApiError> {
    client.post("/auth/login", credentials, None).await
}

/// Create an account and receive a user and bearer token.
///
/// # Errors
///
/// Returns an error if the backend rejects the registration or the API
/// request fails.
#[instrument(skip(client, data), fields(email = %data.email))]
pub async fn register(client: &ApiClient, data: &RegisterData) -> Result<AuthResponse, ApiError> {
    client.post("/auth/register", data, None).await
}

/// Fetch the profile of the token's owner.
///
/// # Errors
///
/// Returns an error if the token is rejected or the API request fails.
#[instrument(skip(client, token))]
pub async fn current_user(client: &ApiClient, token: &str) -> Result<User, ApiError> {
    client.get("/auth/me", Some(token)).await
}
