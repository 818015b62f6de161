//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use mango_core::{CategoryId, CurrencyCode, Price, ProductId};

use crate::api::types::{Category, Product, ProductQuery, SortKey, SortOrder};
use crate::api::{self, ApiError};
use crate::error::AppError;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::state::AppState;

use super::signed_out_or_error;

/// Length of the description snippet on product cards.
const SNIPPET_LENGTH: usize = 120;

/// Stock level at or below which a "low stock" badge appears.
const LOW_STOCK_THRESHOLD: u32 = 5;

// =============================================================================
// View Types
// =============================================================================

/// Product display data for card grids.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub snippet: String,
    pub price: String,
    pub image: String,
    pub category: String,
    /// Short status label (e.g. "Sold out"), when one applies.
    pub badge: Option<String>,
    pub rating: Option<f64>,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            snippet: snippet(&product.description),
            price: format_price(product.price),
            image: product.image.clone(),
            category: product.category.clone(),
            badge: stock_badge(product.stock),
            rating: product.rating,
        }
    }
}

/// Category link in the listing sidebar.
#[derive(Clone)]
pub struct CategoryLink {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

/// Product display data for the detail page.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub images: Vec<String>,
    pub selected_image: usize,
    pub category: String,
    pub stock: u32,
    pub in_stock: bool,
    pub badge: Option<String>,
    pub rating: Option<f64>,
    pub reviews: u32,
    pub brand: Option<String>,
    pub specifications: Vec<(String, String)>,
    pub quantity: u32,
}

/// Format a decimal amount as a display price.
pub fn format_price(amount: rust_decimal::Decimal) -> String {
    Price::new(amount, CurrencyCode::USD).display()
}

fn snippet(description: &str) -> String {
    if description.chars().count() <= SNIPPET_LENGTH {
        return description.to_string();
    }
    let cut: String = description.chars().take(SNIPPET_LENGTH).collect();
    format!("{}\u{2026}", cut.trim_end())
}

fn stock_badge(stock: u32) -> Option<String> {
    match stock {
        0 => Some("Sold out".to_string()),
        s if s <= LOW_STOCK_THRESHOLD => Some(format!("Only {s} left")),
        _ => None,
    }
}

// =============================================================================
// Query Types
// =============================================================================

/// Catalog listing filters from the URL.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub sort: Option<String>,
}

/// Search query from the header search box.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Per-view state on the detail page: gallery selection and quantity.
#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    pub image: Option<usize>,
    pub qty: Option<u32>,
}

/// Map a `?sort=` value onto the backend's sort parameters.
fn sort_params(sort: Option<&str>) -> (Option<SortKey>, Option<SortOrder>) {
    match sort {
        Some("price_asc") => (Some(SortKey::Price), Some(SortOrder::Asc)),
        Some("price_desc") => (Some(SortKey::Price), Some(SortOrder::Desc)),
        Some("name") => (Some(SortKey::Name), Some(SortOrder::Asc)),
        Some("rating") => (Some(SortKey::Rating), Some(SortOrder::Desc)),
        Some("newest") => (Some(SortKey::Date), Some(SortOrder::Desc)),
        _ => (None, None),
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Product listing page template, shared by browse and search results.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub authenticated: bool,
    pub heading: String,
    pub products: Vec<ProductCardView>,
    pub categories: Vec<CategoryLink>,
    /// Currently selected sort value; empty means featured order.
    pub sort: String,
    pub search_query: Option<String>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub authenticated: bool,
    pub product: ProductDetailView,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the product listing page.
#[instrument(skip(state, session, auth))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    auth: OptionalAuth,
    Query(query): Query<CatalogQuery>,
) -> Response {
    let categories = match api::categories::list(state.api()).await {
        Ok(categories) => categories,
        Err(e) => return signed_out_or_error(&session, e).await,
    };

    let (sort_by, order) = sort_params(query.sort.as_deref());
    let selected_category = query.category.unwrap_or_default();

    // A category filter uses the dedicated endpoint; everything else goes
    // through the general listing with query parameters.
    let result = if selected_category.is_empty() {
        let product_query = ProductQuery {
            sort_by,
            order,
            ..ProductQuery::default()
        };
        api::products::list(state.api(), &product_query).await
    } else {
        api::products::by_category(state.api(), &CategoryId::new(selected_category.as_str())).await
    };

    let products = match result {
        Ok(products) => products,
        Err(e) => return signed_out_or_error(&session, e).await,
    };

    let heading = categories
        .iter()
        .find(|category| category.id.as_str() == selected_category)
        .map_or_else(|| "All Products".to_string(), |category| category.name.clone());

    ProductsIndexTemplate {
        authenticated: auth.0.is_some(),
        heading,
        products: products.iter().map(ProductCardView::from).collect(),
        categories: category_links(&categories, &selected_category),
        sort: query.sort.unwrap_or_default(),
        search_query: None,
    }
    .into_response()
}

/// Sidebar links with the current selection marked.
fn category_links(categories: &[Category], selected: &str) -> Vec<CategoryLink> {
    categories
        .iter()
        .map(|category| CategoryLink {
            id: category.id.to_string(),
            name: category.name.clone(),
            selected: category.id.as_str() == selected,
        })
        .collect()
}

/// Display search results from the header search box.
#[instrument(skip(state, session, auth))]
pub async fn search(
    State(state): State<AppState>,
    session: Session,
    auth: OptionalAuth,
    Query(query): Query<SearchQuery>,
) -> Response {
    let term = query.q.trim();

    let products = if term.is_empty() {
        Vec::new()
    } else {
        match api::products::search(state.api(), term).await {
            Ok(products) => products,
            Err(e) => return signed_out_or_error(&session, e).await,
        }
    };

    ProductsIndexTemplate {
        authenticated: auth.0.is_some(),
        heading: format!("Results for \"{term}\""),
        products: products.iter().map(ProductCardView::from).collect(),
        categories: Vec::new(),
        sort: String::new(),
        search_query: Some(term.to_string()),
    }
    .into_response()
}

/// Display the product detail page.
#[instrument(skip(state, session, auth))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    auth: OptionalAuth,
    Path(id): Path<String>,
    Query(query): Query<DetailQuery>,
) -> Response {
    let product = match api::products::get(state.api(), &ProductId::new(id)).await {
        Ok(product) => product,
        Err(ApiError::Http { status: 404, .. }) => {
            return AppError::NotFound("product".to_string()).into_response();
        }
        Err(e) => return signed_out_or_error(&session, e).await,
    };

    ProductShowTemplate {
        authenticated: auth.0.is_some(),
        product: detail_view(&product, query.image, query.qty),
    }
    .into_response()
}

/// Build the detail view, clamping per-view state to valid ranges.
fn detail_view(product: &Product, image: Option<usize>, qty: Option<u32>) -> ProductDetailView {
    let mut images = vec![product.image.clone()];
    if let Some(gallery) = &product.images {
        images.extend(gallery.iter().filter(|url| **url != product.image).cloned());
    }

    let selected_image = image.unwrap_or(0).min(images.len().saturating_sub(1));

    // Quantity lives for this view only; the backend re-validates on add
    let quantity = qty.unwrap_or(1).clamp(1, product.stock.max(1));

    ProductDetailView {
        id: product.id.to_string(),
        name: product.name.clone(),
        description: product.description.clone(),
        price: format_price(product.price),
        images,
        selected_image,
        category: product.category.clone(),
        stock: product.stock,
        in_stock: product.stock > 0,
        badge: stock_badge(product.stock),
        rating: product.rating,
        reviews: product.reviews.unwrap_or(0),
        brand: product.brand.clone(),
        specifications: product
            .specifications
            .as_ref()
            .map(|specs| {
                specs
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default(),
        quantity,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sample_product(stock: u32) -> Product {
        Product {
            id: ProductId::new("prod-1"),
            name: "Mango Slicer".to_string(),
            description: "A".repeat(200),
            price: Decimal::new(1250, 2),
            image: "/img/slicer.jpg".to_string(),
            images: Some(vec![
                "/img/slicer.jpg".to_string(),
                "/img/slicer-2.jpg".to_string(),
            ]),
            category: "Kitchen".to_string(),
            category_id: CategoryId::new("cat-3"),
            stock,
            rating: Some(4.5),
            reviews: Some(12),
            brand: None,
            specifications: None,
        }
    }

    #[test]
    fn test_card_view_formats_price_and_snippet() {
        let card = ProductCardView::from(&sample_product(10));
        assert_eq!(card.price, "$12.50");
        assert!(card.snippet.chars().count() <= SNIPPET_LENGTH + 1);
        assert!(card.snippet.ends_with('\u{2026}'));
        assert!(card.badge.is_none());
    }

    #[test]
    fn test_stock_badges() {
        assert_eq!(stock_badge(0).as_deref(), Some("Sold out"));
        assert_eq!(stock_badge(3).as_deref(), Some("Only 3 left"));
        assert_eq!(stock_badge(6), None);
    }

    #[test]
    fn test_detail_view_dedupes_primary_image() {
        let view = detail_view(&sample_product(10), None, None);
        assert_eq!(view.images.len(), 2);
        assert_eq!(view.selected_image, 0);
    }

    #[test]
    fn test_detail_view_clamps_selection_and_quantity() {
        let product = sample_product(4);
        let view = detail_view(&product, Some(99), Some(99));
        assert_eq!(view.selected_image, 1);
        assert_eq!(view.quantity, 4);

        let view = detail_view(&product, None, Some(0));
        assert_eq!(view.quantity, 1);
    }

    #[test]
    fn test_detail_view_sold_out_keeps_quantity_floor() {
        let view = detail_view(&sample_product(0), None, None);
        assert!(!view.in_stock);
        assert_eq!(view.quantity, 1);
    }

    #[test]
    fn test_sort_params_mapping() {
        assert_eq!(
            sort_params(Some("price_desc")),
            (Some(SortKey::Price), Some(SortOrder::Desc))
        );
        assert_eq!(sort_params(Some("name")), (Some(SortKey::Name), Some(SortOrder::Asc)));
        assert_eq!(sort_params(Some("bogus")), (None, None));
        assert_eq!(sort_params(None), (None, None));
    }
}
