//! Cart route handlers.
//!
//! The backend owns the cart; these handlers render it and translate
//! form posts into cart operations. Totals shown on the page are
//! display-only derivations from the fetched lines.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use mango_core::{CartItemId, ProductId};

use crate::api;
use crate::api::types::CartItem;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

use super::products::format_price;
use super::signed_out_or_error;

/// Flat shipping charge displayed on non-empty carts.
const SHIPPING_FLAT: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Display tax rate (10%).
const TAX_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

// =============================================================================
// View Types
// =============================================================================

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub product_id: String,
    pub name: String,
    pub snippet: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        let line_total = item.product.price * Decimal::from(item.quantity);
        Self {
            id: item.id.to_string(),
            product_id: item.product.id.to_string(),
            name: item.product.name.clone(),
            snippet: item.product.description.chars().take(80).collect(),
            image: item.product.image.clone(),
            quantity: item.quantity,
            price: format_price(item.product.price),
            line_total: format_price(line_total),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u32,
    pub subtotal: String,
    pub shipping: String,
    pub tax: String,
    pub total: String,
}

impl CartView {
    /// Derive display totals from the fetched lines.
    #[must_use]
    pub fn from_items(items: &[CartItem]) -> Self {
        let subtotal: Decimal = items
            .iter()
            .map(|item| item.product.price * Decimal::from(item.quantity))
            .sum();
        let shipping = if items.is_empty() {
            Decimal::ZERO
        } else {
            SHIPPING_FLAT
        };
        let tax = subtotal * TAX_RATE;
        let total = subtotal + shipping + tax;

        Self {
            items: items.iter().map(CartItemView::from).collect(),
            item_count: items.iter().map(|item| item.quantity).sum(),
            subtotal: format_price(subtotal),
            shipping: format_price(shipping),
            tax: format_price(tax),
            total: format_price(total),
        }
    }
}

// =============================================================================
// Form Types
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    pub quantity: Option<u32>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub item_id: String,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub item_id: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub authenticated: bool,
    pub cart: CartView,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart page.
#[instrument(skip(state, session, token))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(token): RequireAuth,
) -> Response {
    let items = match api::cart::items(state.api(), &token).await {
        Ok(items) => items,
        Err(e) => return signed_out_or_error(&session, e).await,
    };

    CartShowTemplate {
        authenticated: true,
        cart: CartView::from_items(&items),
    }
    .into_response()
}

/// Add a product to the cart, then show the cart.
#[instrument(skip(state, session, token))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(token): RequireAuth,
    Form(form): Form<AddToCartForm>,
) -> Response {
    // A line always holds at least one unit
    let quantity = form.quantity.unwrap_or(1).max(1);
    let product_id = ProductId::new(form.product_id);

    match api::cart::add(state.api(), &token, &product_id, quantity).await {
        Ok(_) => Redirect::to("/cart").into_response(),
        Err(e) => signed_out_or_error(&session, e).await,
    }
}

/// Set the quantity of a cart line.
#[instrument(skip(state, session, token))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(token): RequireAuth,
    Form(form): Form<UpdateCartForm>,
) -> Response {
    let item_id = CartItemId::new(form.item_id);
    let quantity = form.quantity.max(1);

    match api::cart::update(state.api(), &token, &item_id, quantity).await {
        Ok(_) => Redirect::to("/cart").into_response(),
        Err(e) => signed_out_or_error(&session, e).await,
    }
}

/// Remove a line from the cart.
#[instrument(skip(state, session, token))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(token): RequireAuth,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    let item_id = CartItemId::new(form.item_id);

    match api::cart::remove(state.api(), &token, &item_id).await {
        Ok(()) => Redirect::to("/cart").into_response(),
        Err(e) => signed_out_or_error(&session, e).await,
    }
}

/// Empty the cart.
#[instrument(skip(state, session, token))]
pub async fn clear(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(token): RequireAuth,
) -> Response {
    match api::cart::clear(state.api(), &token).await {
        Ok(()) => Redirect::to("/cart").into_response(),
        Err(e) => signed_out_or_error(&session, e).await,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::types::Product;
    use mango_core::CategoryId;

    fn item(price_cents: i64, quantity: u32) -> CartItem {
        CartItem {
            id: CartItemId::new(format!("line-{price_cents}")),
            product: Product {
                id: ProductId::new("prod-1"),
                name: "Thing".to_string(),
                description: String::new(),
                price: Decimal::new(price_cents, 2),
                image: String::new(),
                images: None,
                category: "Misc".to_string(),
                category_id: CategoryId::new("cat-1"),
                stock: 10,
                rating: None,
                reviews: None,
                brand: None,
                specifications: None,
            },
            quantity,
        }
    }

    #[test]
    fn test_cart_view_totals() {
        // 2 x $99.99 + 1 x $49.99 + 1 x $149.99
        let items = vec![item(9999, 2), item(4999, 1), item(14999, 1)];
        let cart = CartView::from_items(&items);

        assert_eq!(cart.item_count, 4);
        assert_eq!(cart.subtotal, "$399.96");
        assert_eq!(cart.shipping, "$10.00");
        assert_eq!(cart.tax, "$40.00");
        assert_eq!(cart.total, "$449.96");
    }

    #[test]
    fn test_empty_cart_has_no_shipping() {
        let cart = CartView::from_items(&[]);
        assert!(cart.items.is_empty());
        assert_eq!(cart.item_count, 0);
        assert_eq!(cart.subtotal, "$0.00");
        assert_eq!(cart.shipping, "$0.00");
        assert_eq!(cart.total, "$0.00");
    }

    #[test]
    fn test_line_total_multiplies_quantity() {
        let view = CartItemView::from(&item(1250, 3));
        assert_eq!(view.price, "$12.50");
        assert_eq!(view.line_total, "$37.50");
    }
}
