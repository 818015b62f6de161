//! Registration against the standalone user service.
//!
//! The user service is a separate deployment with its own base URL and a
//! versioned path, so it gets its own [`ApiClient`] instance. Its
//! response contract matches the marketplace API's registration.

use tracing::instrument;

use super::types::{AuthResponse, RegisterData};
use super::{ApiClient, ApiError};

/// Register a new user through the user service.
///
/// # Errors
///
/// Returns an error if the service rejects the registration or the API
/// request fails.
#[instrument(skip(client, data), fields(email = %data.email))]
pub async fn register(client: &ApiClient, data: &RegisterData) -> Result<AuthResponse, ApiError> {
    client.post("/api/v1/users/registers", data, None).await
}
