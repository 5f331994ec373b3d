//! CLI command implementations.

pub mod catalog;
pub mod migrate;

use thiserror::Error;

use swiftcart_storefront::catalog::CatalogError;
use swiftcart_storefront::config::ConfigError;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}
