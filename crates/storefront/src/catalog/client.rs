//! `CatalogClient` implementation.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use swiftcart_core::{Category, CategoryFilter, Product, ProductId};

use super::{CatalogError, body_excerpt};
use crate::config::CatalogConfig;

/// `User-Agent` sent with every catalog request.
pub const USER_AGENT: &str = concat!("swiftcart/", env!("CARGO_PKG_VERSION"));

/// Client for the catalog REST API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    /// Create a new catalog API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// The API base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Build an endpoint URL from path segments.
    ///
    /// Segments are percent-encoded, so category tags with spaces or
    /// apostrophes are safe to pass through.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.inner.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// `GET` a JSON document.
    ///
    /// Returns `Ok(None)` when the API answers with an empty body or `null`,
    /// which is how it reports unknown products.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>, CatalogError> {
        let response = self.inner.client.get(url.clone()).send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            tracing::error!(
                status = %status,
                url = %url,
                body = %body_excerpt(&body),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: body_excerpt(&body),
            });
        }

        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(None);
        }

        match serde_json::from_str(trimmed) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    url = %url,
                    body = %body_excerpt(&body),
                    "Failed to parse catalog API response"
                );
                Err(CatalogError::Parse(e))
            }
        }
    }

    // =========================================================================
    // Catalog Methods
    // =========================================================================

    /// List every category tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the body is not a list.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        let url = self.endpoint(&["products", "categories"]);
        let categories: Vec<Category> = self.get_json(url).await?.unwrap_or_default();
        debug!(count = categories.len(), "Fetched categories");
        Ok(categories)
    }

    /// List products, optionally restricted to one category.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the body is not a list.
    #[instrument(skip(self), fields(category = %filter.as_query_value()))]
    pub async fn products(&self, filter: &CategoryFilter) -> Result<Vec<Product>, CatalogError> {
        let url = match filter {
            CategoryFilter::All => self.endpoint(&["products"]),
            CategoryFilter::Only(category) => {
                self.endpoint(&["products", "category", category.as_str()])
            }
        };

        let products: Vec<Product> = self.get_json(url).await?.unwrap_or_default();
        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    /// Get a single product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for unknown IDs, or another error if
    /// the API request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let url = self.endpoint(&["products", &id.to_string()]);

        self.get_json(url)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("product {id}")))
    }
}
