//! HTTP pipeline tests against a mocked backend.
//!
//! Covers the client contract: verb/path mapping, JSON headers, bearer
//! attachment, and the failure taxonomy.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mango_core::{CartItemId, CategoryId, ProductId};
use mango_storefront::api::types::{LoginCredentials, ProductQuery, SortKey, SortOrder};
use mango_storefront::api::{self, ApiClient, ApiError};

fn product_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": "Mango Slicer",
        "description": "Slices mangoes.",
        "price": "12.50",
        "image": "/img/slicer.jpg",
        "category": "Kitchen",
        "categoryId": "cat-3",
        "stock": 7
    })
}

#[tokio::test]
async fn list_products_parses_typed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(header("content-type", "application/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([product_json("prod-1")])),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).expect("client");
    let products = api::products::list(&client, &ProductQuery::default())
        .await
        .expect("list");

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, ProductId::new("prod-1"));
    assert_eq!(products[0].stock, 7);
}

#[tokio::test]
async fn list_products_serializes_query_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("sortBy", "price"))
        .and(query_param("order", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).expect("client");
    let query = ProductQuery {
        sort_by: Some(SortKey::Price),
        order: Some(SortOrder::Desc),
        ..ProductQuery::default()
    };
    let products = api::products::list(&client, &query).await.expect("list");
    assert!(products.is_empty());
}

#[tokio::test]
async fn search_sends_term_as_q() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/search"))
        .and(query_param("q", "slicer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).expect("client");
    api::products::search(&client, "slicer").await.expect("search");
}

#[tokio::test]
async fn category_listing_uses_dedicated_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/category/cat-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([product_json("p")])))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).expect("client");
    let products = api::products::by_category(&client, &CategoryId::new("cat-3"))
        .await
        .expect("by_category");
    assert_eq!(products.len(), 1);
}

#[tokio::test]
async fn single_category_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories/cat-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cat-3",
            "name": "Kitchen",
            "slug": "kitchen",
            "productCount": 42
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).expect("client");
    let category = api::categories::get(&client, &CategoryId::new("cat-3"))
        .await
        .expect("get");
    assert_eq!(category.slug, "kitchen");
    assert_eq!(category.product_count, Some(42));
}

#[tokio::test]
async fn cart_calls_attach_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cart"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).expect("client");
    let items = api::cart::items(&client, "tok-123").await.expect("items");
    assert!(items.is_empty());
}

#[tokio::test]
async fn add_to_cart_posts_product_and_quantity() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cart"))
        .and(header("authorization", "Bearer tok-123"))
        .and(body_json(json!({"productId": "prod-1", "quantity": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "line-1",
            "product": product_json("prod-1"),
            "quantity": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).expect("client");
    let item = api::cart::add(&client, "tok-123", &ProductId::new("prod-1"), 2)
        .await
        .expect("add");
    assert_eq!(item.quantity, 2);
}

#[tokio::test]
async fn delete_tolerates_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/cart/line-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).expect("client");
    api::cart::remove(&client, "tok", &CartItemId::new("line-1"))
        .await
        .expect("remove");
}

#[tokio::test]
async fn unauthorized_response_is_its_own_variant() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Token expired"})),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).expect("client");
    let err = api::auth::current_user(&client, "stale")
        .await
        .expect_err("should fail");

    assert!(err.is_unauthorized());
    assert!(err.body().unwrap_or_default().contains("Token expired"));
}

#[tokio::test]
async fn non_success_status_retains_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(json!({"errors": {"email": "Unknown account"}})),
        )
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).expect("client");
    let credentials = LoginCredentials {
        email: "jane@example.com".to_string(),
        password: "hunter22".to_string(),
    };
    let err = api::auth::login(&client, &credentials)
        .await
        .expect_err("should fail");

    match err {
        ApiError::Http { status, body } => {
            assert_eq!(status, 422);
            assert!(body.contains("Unknown account"));
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_success_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).expect("client");
    let err = api::categories::list(&client).await.expect_err("should fail");
    assert!(matches!(err, ApiError::Parse(_)));
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    // Nothing listens on this port
    let client = ApiClient::new("http://127.0.0.1:9").expect("client");
    let err = api::categories::list(&client).await.expect_err("should fail");
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(err.status(), None);
}
