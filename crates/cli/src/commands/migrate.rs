//! Session store migration command.
//!
//! # Usage
//!
//! ```bash
//! swiftcart migrate
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` - `SQLite` connection string for the session store
//!   (falls back to `DATABASE_URL`)
//!
//! The storefront also does this on startup; running it ahead of time lets a
//! deployment fail early on an unwritable database path.

use swiftcart_storefront::config::StorefrontConfig;
use swiftcart_storefront::db;

use super::CommandError;

/// Create the session table.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the database cannot be
/// reached.
pub async fn run() -> Result<(), CommandError> {
    let config = StorefrontConfig::from_env()?;

    tracing::info!(database_url = %config.database_url, "Connecting to session database...");
    let pool = db::create_pool(&config.database_url).await?;

    tracing::info!("Creating session table...");
    db::migrate(&pool).await?;

    tracing::info!("Session store ready");
    Ok(())
}
