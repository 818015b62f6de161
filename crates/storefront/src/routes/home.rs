//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::api;
use crate::api::types::{Category, ProductQuery};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::state::AppState;

use super::products::ProductCardView;
use super::signed_out_or_error;

/// Number of featured products on the home page.
const FEATURED_COUNT: u32 = 8;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub authenticated: bool,
    pub categories: Vec<Category>,
    pub featured: Vec<ProductCardView>,
}

/// Display the home page.
#[instrument(skip(state, session, auth))]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    auth: OptionalAuth,
) -> Response {
    let categories = match api::categories::list(state.api()).await {
        Ok(categories) => categories,
        Err(e) => return signed_out_or_error(&session, e).await,
    };

    let query = ProductQuery {
        limit: Some(FEATURED_COUNT),
        ..ProductQuery::default()
    };
    let featured = match api::products::list(state.api(), &query).await {
        Ok(products) => products,
        Err(e) => return signed_out_or_error(&session, e).await,
    };

    HomeTemplate {
        authenticated: auth.0.is_some(),
        categories,
        featured: featured.iter().map(ProductCardView::from).collect(),
    }
    .into_response()
}
