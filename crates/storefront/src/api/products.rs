//! Product catalog operations.
//!
//! Read-only; no call here requires authentication.

use tracing::instrument;

use mango_core::{CategoryId, ProductId};

use super::types::{Product, ProductQuery};
use super::{ApiClient, ApiError};

/// List products, optionally filtered and sorted.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip(client))]
pub async fn list(client: &ApiClient, query: &ProductQuery) -> Result<Vec<Product>, ApiError> {
    client.get_with_query("/products", query, None).await
}

/// Get a single product by ID.
///
/// # Errors
///
/// Returns an error if the product is not found or the API request fails.
#[instrument(skip(client), fields(id = %id))]
pub async fn get(client: &ApiClient, id: &ProductId) -> Result<Product, ApiError> {
    client.get(&format!("/products/{id}"), None).await
}

/// Full-text search over the catalog.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip(client))]
pub async fn search(client: &ApiClient, query: &str) -> Result<Vec<Product>, ApiError> {
    client
        .get_with_query("/products/search", &[("q", query)], None)
        .await
}

/// List products in one category.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip(client), fields(category_id = %category_id))]
pub async fn by_category(
    client: &ApiClient,
    category_id: &CategoryId,
) -> Result<Vec<Product>, ApiError> {
    client
        .get(&format!("/products/category/{category_id}"), None)
        .await
}
