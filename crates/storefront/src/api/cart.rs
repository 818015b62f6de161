//! Cart operations against the marketplace API.
//!
//! Every operation acts on the cart of the token's owner; the backend
//! owns all cart rules (quantity floors, stock checks, merging).

use serde::Serialize;
use tracing::instrument;

use mango_core::{CartItemId, ProductId};

use super::types::CartItem;
use super::{ApiClient, ApiError};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddItemRequest<'a> {
    product_id: &'a ProductId,
    quantity: u32,
}

#[derive(Debug, Serialize)]
struct UpdateItemRequest {
    quantity: u32,
}

/// Fetch the cart contents.
///
/// # Errors
///
/// Returns an error if the token is rejected or the API request fails.
#[instrument(skip(client, token))]
pub async fn items(client: &ApiClient, token: &str) -> Result<Vec<CartItem>, ApiError> {
    client.get("/cart", Some(token)).await
}

/// Add a product to the cart.
///
/// # Errors
///
/// Returns an error if the token is rejected or the API request fails.
#[instrument(skip(client, token), fields(product_id = %product_id))]
pub async fn add(
    client: &ApiClient,
    token: &str,
    product_id: &ProductId,
    quantity: u32,
) -> Result<CartItem, ApiError> {
    let body = AddItemRequest {
        product_id,
        quantity,
    };
    client.post("/cart", &body, Some(token)).await
}

/// Set the quantity of an existing cart line.
///
/// # Errors
///
/// Returns an error if the token is rejected or the API request fails.
#[instrument(skip(client, token), fields(item_id = %item_id))]
pub async fn update(
    client: &ApiClient,
    token: &str,
    item_id: &CartItemId,
    quantity: u32,
) -> Result<CartItem, ApiError> {
    let body = UpdateItemRequest { quantity };
    client
        .put(&format!("/cart/{item_id}"), &body, Some(token))
        .await
}

/// Remove one line from the cart.
///
/// # Errors
///
/// Returns an error if the token is rejected or the API request fails.
#[instrument(skip(client, token), fields(item_id = %item_id))]
pub async fn remove(client: &ApiClient, token: &str, item_id: &CartItemId) -> Result<(), ApiError> {
    client.delete(&format!("/cart/{item_id}"), Some(token)).await
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the token is rejected or the API request fails.
#[instrument(skip(client, token))]
pub async fn clear(client: &ApiClient, token: &str) -> Result<(), ApiError> {
    client.delete("/cart", Some(token)).await
}
