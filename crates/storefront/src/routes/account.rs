//! Account route handlers.
//!
//! The profile page requires a signed-in user; it is the canonical
//! authenticated fetch, so an expired token surfaces here first.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::api;
use crate::api::types::User;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

use super::signed_out_or_error;

/// Tabs on the account page.
const TABS: &[&str] = &["profile", "orders", "addresses", "settings"];

/// User display data for the account page.
#[derive(Clone)]
pub struct UserView {
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    /// Single-letter fallback when no avatar image is set.
    pub initial: String,
    pub address_lines: Vec<String>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        let address_lines = user.address.as_ref().map_or_else(Vec::new, |address| {
            vec![
                address.street.clone(),
                format!("{}, {} {}", address.city, address.state, address.zip_code),
                address.country.clone(),
            ]
        });

        Self {
            full_name: format!("{} {}", user.first_name, user.last_name),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            avatar: user.avatar.clone(),
            initial: user
                .first_name
                .chars()
                .next()
                .map_or_else(|| "?".to_string(), |c| c.to_uppercase().to_string()),
            address_lines,
        }
    }
}

/// Tab selection from the URL.
#[derive(Debug, Deserialize)]
pub struct TabQuery {
    pub tab: Option<String>,
}

/// Account page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/show.html")]
pub struct AccountTemplate {
    pub authenticated: bool,
    pub user: UserView,
    pub active_tab: String,
}

/// Display the account page.
#[instrument(skip(state, session, token))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(token): RequireAuth,
    Query(query): Query<TabQuery>,
) -> Response {
    let user = match api::auth::current_user(state.api(), &token).await {
        Ok(user) => user,
        Err(e) => return signed_out_or_error(&session, e).await,
    };

    // Unknown tab values fall back to the profile tab
    let active_tab = query
        .tab
        .filter(|tab| TABS.contains(&tab.as_str()))
        .unwrap_or_else(|| "profile".to_string());

    AccountTemplate {
        authenticated: true,
        user: UserView::from(&user),
        active_tab,
    }
    .into_response()
}
