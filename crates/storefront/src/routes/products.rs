//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use swiftcart_core::text::{CARD_TITLE_MAX_CHARS, truncate};
use swiftcart_core::{CategoryFilter, Product, ProductId, StarRating};

use super::home::{CatalogQuery, CatalogView, catalog_page};
use super::htmx::is_htmx_request;
use crate::error::Result;
use crate::state::AppState;

/// Product card data for the catalog grid.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: ProductId,
    /// Full title, used for the `title`/`alt` attributes.
    pub title: String,
    /// Title shortened for the card heading.
    pub short_title: String,
    pub price: String,
    pub image: String,
    pub category: String,
    /// Font Awesome classes, one per star.
    pub stars: Vec<&'static str>,
    pub rating_count: u32,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            short_title: truncate(&product.title, CARD_TITLE_MAX_CHARS),
            price: product.price.display(),
            image: product.image.clone(),
            category: product.category.to_string(),
            stars: star_classes(&product.rating.stars()),
            rating_count: product.rating.count,
        }
    }
}

/// Product detail data for the modal.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub category: String,
    pub stars: Vec<&'static str>,
    /// Average score as sent by the API (e.g. "3.9").
    pub rating_rate: String,
    pub rating_count: u32,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price.display(),
            image: product.image.clone(),
            category: product.category.to_string(),
            stars: star_classes(&product.rating.stars()),
            rating_rate: product.rating.rate.to_string(),
            rating_count: product.rating.count,
        }
    }
}

fn star_classes(rating: &StarRating) -> Vec<&'static str> {
    rating.stars().iter().map(|star| star.css_class()).collect()
}

/// Catalog section fragment (category bar and grid), swapped in by HTMX.
#[derive(Template, WebTemplate)]
#[template(path = "partials/catalog.html")]
pub struct CatalogFragmentTemplate {
    pub catalog: CatalogView,
}

/// Product detail modal fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/quick_view.html")]
pub struct QuickViewTemplate {
    pub product: ProductDetailView,
}

/// List products for a category.
///
/// HTMX requests get the catalog section only; direct visits get the full page.
#[instrument(skip(state, session, headers))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Query(query): Query<CatalogQuery>,
) -> Response {
    let filter = CategoryFilter::parse(query.category.as_deref());

    if is_htmx_request(&headers) {
        let catalog = CatalogView::load(&state, filter).await;
        CatalogFragmentTemplate { catalog }.into_response()
    } else {
        catalog_page(&state, &session, filter).await.into_response()
    }
}

/// Display the product detail modal fragment.
///
/// Any failure answers with an error status, which HTMX does not swap, so
/// the modal simply stays closed.
#[instrument(skip(state))]
pub async fn quick_view(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<QuickViewTemplate> {
    let product = state.catalog().product(id).await?;

    Ok(QuickViewTemplate {
        product: ProductDetailView::from(&product),
    })
}
