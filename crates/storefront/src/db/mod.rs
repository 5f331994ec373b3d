//! Session database for the storefront.
//!
//! # Database: `SQLite`
//!
//! Stores local data only (the catalog API is the source of truth for products):
//!
//! ## Tables
//!
//! - `tower_sessions` - Session records; each holds one browser's cart under
//!   the `swiftcart` key
//!
//! # Migrations
//!
//! The session table is created by `tower-sessions-sqlx-store` and is safe to
//! create repeatedly. The storefront does it on startup; it can also be run
//! ahead of time via:
//! ```bash
//! cargo run -p swiftcart-cli -- migrate
//! ```

use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower_sessions_sqlx_store::SqliteStore;

/// Create a `SQLite` connection pool with sensible defaults.
///
/// In-memory databases live only as long as their connection, so they get a
/// single connection that is never recycled.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g. `sqlite://swiftcart.db?mode=rwc`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    options
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url)
        .await
}

/// Create the session table if it does not exist yet.
///
/// # Errors
///
/// Returns `sqlx::Error` if the schema cannot be created.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    SqliteStore::new(pool.clone()).migrate().await
}

/// Check that the database answers queries.
///
/// # Errors
///
/// Returns `sqlx::Error` if the database is unreachable.
pub async fn ping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").fetch_one(pool).await.map(|_| ())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_pool_migrates_and_pings() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        migrate(&pool).await.unwrap();
        // Running twice must be harmless
        migrate(&pool).await.unwrap();
        ping(&pool).await.unwrap();
    }
}
