//! Category operations.

use tracing::instrument;

use mango_core::CategoryId;

use super::types::Category;
use super::{ApiClient, ApiError};

/// List all categories.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip(client))]
pub async fn list(client: &ApiClient) -> Result<Vec<Category>, ApiError> {
    client.get("/categories", None).await
}

/// Get a single category by ID.
///
/// # Errors
///
/// Returns an error if the category is not found or the API request fails.
#[instrument(skip(client), fields(id = %id))]
pub async fn get(client: &ApiClient, id: &CategoryId) -> Result<Category, ApiError> {
    client.get(&format!("/categories/{id}"), None).await
}
