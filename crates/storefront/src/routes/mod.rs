//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Product listing (category/sort filters)
//! GET  /products/search        - Search results
//! GET  /products/{id}          - Product detail
//!
//! # Cart (requires auth)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add a product
//! POST /cart/update            - Set line quantity
//! POST /cart/remove            - Remove a line
//! POST /cart/clear             - Empty the cart
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! GET  /auth/register          - Register page
//! POST /auth/register          - Register action
//! POST /auth/logout            - Logout action
//!
//! # Account (requires auth)
//! GET  /account                - Profile page (tab via ?tab=)
//! ```

pub mod account;
pub mod auth;
pub mod cart;
pub mod home;
pub mod products;

use axum::{
    Router,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tower_sessions::Session;

use crate::api::ApiError;
use crate::error::AppError;
use crate::middleware::clear_access_token;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/search", get(products::search))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product routes
        .nest("/products", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Account
        .route("/account", get(account::show))
        // Auth routes
        .nest("/auth", auth_routes())
}

/// Translate a failed backend call into a response.
///
/// Every page handler funnels its API errors through here, so the 401
/// side effect fires identically for every request path: the persisted
/// token is cleared exactly once and the visitor lands on the login
/// page. All other failures become an [`AppError`] response.
pub(crate) async fn signed_out_or_error(session: &Session, err: ApiError) -> Response {
    if err.is_unauthorized() {
        if let Err(e) = clear_access_token(session).await {
            tracing::error!("Failed to clear access token: {e}");
        }
        return Redirect::to("/auth/login?error=session_expired").into_response();
    }

    AppError::from(err).into_response()
}
