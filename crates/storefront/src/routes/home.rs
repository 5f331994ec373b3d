//! Catalog page route handler.
//!
//! The home page is the catalog: a category bar above a product grid. The
//! category list and the product list come from two independent catalog
//! calls; either may fail without taking the other down.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use swiftcart_core::{ALL_CATEGORIES, Category, CategoryFilter};

use super::products::ProductCardView;
use crate::cart_store;
use crate::filters;
use crate::state::AppState;

/// Catalog query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
}

/// One button in the category bar.
#[derive(Clone)]
pub struct CategoryButtonView {
    /// Query value (`all` or the raw category tag).
    pub value: String,
    pub label: String,
    pub active: bool,
}

/// Everything the catalog section renders.
#[derive(Clone)]
pub struct CatalogView {
    pub categories: Vec<CategoryButtonView>,
    pub products: Vec<ProductCardView>,
    /// Set when the product list could not be fetched.
    pub load_failed: bool,
}

impl CatalogView {
    /// Fetch categories and products for `filter`.
    ///
    /// Failures are logged and rendered as fallbacks: without categories only
    /// the "All" button is shown, without products the grid shows an error.
    pub async fn load(state: &AppState, filter: CategoryFilter) -> Self {
        let catalog = state.catalog();
        let (categories, products) =
            tokio::join!(catalog.categories(), catalog.products(&filter));

        let categories = categories.unwrap_or_else(|e| {
            tracing::error!(error = %e, "Error loading categories");
            Vec::new()
        });

        let (products, load_failed) = match products {
            Ok(products) => (products.iter().map(ProductCardView::from).collect(), false),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    category = %filter.as_query_value(),
                    "Error loading products"
                );
                (Vec::new(), true)
            }
        };

        Self {
            categories: category_buttons(&categories, &filter),
            products,
            load_failed,
        }
    }
}

/// The "All" button followed by one button per category.
fn category_buttons(categories: &[Category], filter: &CategoryFilter) -> Vec<CategoryButtonView> {
    let all = CategoryButtonView {
        value: ALL_CATEGORIES.to_string(),
        label: "All".to_string(),
        active: *filter == CategoryFilter::All,
    };

    std::iter::once(all)
        .chain(categories.iter().map(|category| CategoryButtonView {
            value: category.as_str().to_string(),
            label: category.label(),
            active: filter.selects(category),
        }))
        .collect()
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/index.html")]
pub struct CatalogPageTemplate {
    pub catalog: CatalogView,
    pub cart_count: u32,
    pub active_page: &'static str,
}

/// Render the full catalog page for `filter`.
pub async fn catalog_page(
    state: &AppState,
    session: &Session,
    filter: CategoryFilter,
) -> CatalogPageTemplate {
    let (catalog, cart) = tokio::join!(
        CatalogView::load(state, filter),
        cart_store::load(session)
    );

    CatalogPageTemplate {
        catalog,
        cart_count: cart.total_items(),
        active_page: "products",
    }
}

/// Display the catalog page.
#[instrument(skip(state, session))]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CatalogQuery>,
) -> impl IntoResponse {
    let filter = CategoryFilter::parse(query.category.as_deref());
    catalog_page(&state, &session, filter).await
}
