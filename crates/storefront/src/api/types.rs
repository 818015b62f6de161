//! Wire types for the marketplace backend API.
//!
//! These are plain data-transfer shapes with no behavior; each lives for
//! one request/response. Field names follow the backend's camelCase JSON
//! and decimal amounts travel as strings (e.g. `"19.99"`), which
//! `rust_decimal` deserializes losslessly.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mango_core::{CartItemId, CategoryId, ProductId, UserId};

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    /// Primary image URL.
    pub image: String,
    /// Gallery image URLs, when the product has more than one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    /// Category display name.
    pub category: String,
    pub category_id: CategoryId,
    /// Units in stock; zero means sold out.
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<BTreeMap<String, String>>,
}

/// A marketplace user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

/// A shipping address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// A line in the signed-in user's cart: a product plus a quantity.
///
/// The backend guarantees `quantity >= 1`; a removal deletes the line
/// instead of zeroing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub product: Product,
    pub quantity: u32,
}

/// Response to a successful login or registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: User,
    /// Opaque bearer token. May be empty when the backend requires a
    /// separate activation step; an empty token is never persisted.
    #[serde(default)]
    pub token: String,
}

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_count: Option<u32>,
}

/// Login request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Registration request body.
///
/// The password confirmation is a client-side concern and is not sent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Catalog listing filters, serialized as query parameters.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<Decimal>,
}

/// Sort key for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Price,
    Name,
    Date,
    Rating,
}

/// Sort direction for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Error body the backend sends with non-2xx responses.
///
/// `errors` carries per-field messages for validation failures (422);
/// `message` is the general fallback. Either may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<BTreeMap<String, String>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserializes_camel_case() {
        let json = r#"{
            "id": "prod-1",
            "name": "Mango Slicer",
            "description": "Slices mangoes.",
            "price": "12.50",
            "image": "https://cdn.example.com/slicer.jpg",
            "category": "Kitchen",
            "categoryId": "cat-3",
            "stock": 7,
            "rating": 4.5,
            "reviews": 12
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "prod-1");
        assert_eq!(product.category_id.as_str(), "cat-3");
        assert_eq!(product.price, Decimal::new(1250, 2));
        assert_eq!(product.stock, 7);
        assert!(product.images.is_none());
        assert!(product.brand.is_none());
    }

    #[test]
    fn test_cart_item_wraps_product() {
        let json = r#"{
            "id": "line-9",
            "quantity": 2,
            "product": {
                "id": "prod-1",
                "name": "Mango Slicer",
                "description": "",
                "price": "12.50",
                "image": "",
                "category": "Kitchen",
                "categoryId": "cat-3",
                "stock": 7
            }
        }"#;

        let item: CartItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id.as_str(), "line-9");
        assert_eq!(item.quantity, 2);
        assert_eq!(item.product.name, "Mango Slicer");
    }

    #[test]
    fn test_auth_response_token_defaults_empty() {
        let json = r#"{
            "user": {
                "id": "u-1",
                "firstName": "Jane",
                "lastName": "Doe",
                "email": "jane@example.com"
            }
        }"#;

        let auth: AuthResponse = serde_json::from_str(json).unwrap();
        assert!(auth.token.is_empty());
    }

    #[test]
    fn test_product_query_skips_unset_fields() {
        let query = ProductQuery {
            category: Some("cat-3".to_string()),
            sort_by: Some(SortKey::Price),
            order: Some(SortOrder::Desc),
            ..ProductQuery::default()
        };

        let encoded = serde_urlencoded::to_string(&query).unwrap();
        assert_eq!(encoded, "category=cat-3&sortBy=price&order=desc");
    }

    #[test]
    fn test_error_body_structured_errors() {
        let json = r#"{"errors": {"email": "Email already registered"}}"#;
        let body: ApiErrorBody = serde_json::from_str(json).unwrap();
        let errors = body.errors.unwrap();
        assert_eq!(
            errors.get("email").map(String::as_str),
            Some("Email already registered")
        );
        assert!(body.message.is_none());
    }
}
