//! Catalog REST API client.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP with `reqwest`; every call is an independent `GET`
//! - The catalog API is the source of truth - NO local sync and NO caching
//! - No retries: a failed call is reported to the caller, which logs it and
//!   renders a fallback
//!
//! # Endpoints
//!
//! ```text
//! GET /products/categories            - category tags
//! GET /products                       - every product
//! GET /products/category/{category}   - products in one category
//! GET /products/{id}                  - one product (empty body when unknown)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use swiftcart_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog)?;
//! let categories = client.categories().await?;
//! let product = client.product(ProductId::new(1)).await?;
//! ```

mod client;

pub use client::{CatalogClient, USER_AGENT};

use thiserror::Error;

/// Longest upstream body excerpt kept in errors and logs.
const BODY_EXCERPT_CHARS: usize = 200;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Catalog API returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        body: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Shorten an upstream body for error messages.
fn body_excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::NotFound("product 42".to_string());
        assert_eq!(err.to_string(), "Not found: product 42");

        let err = CatalogError::Status {
            status: 503,
            body: "upstream down".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Catalog API returned HTTP 503: upstream down"
        );
    }

    #[test]
    fn test_body_excerpt_is_bounded() {
        let long = "x".repeat(BODY_EXCERPT_CHARS * 2);
        assert_eq!(body_excerpt(&long).len(), BODY_EXCERPT_CHARS);
        assert_eq!(body_excerpt("short"), "short");
    }
}
