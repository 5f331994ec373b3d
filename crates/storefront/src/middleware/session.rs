//! Session middleware configuration.
//!
//! Sets up `SQLite`-backed sessions using tower-sessions. The session is what
//! ties a browser to its cart, so it is long-lived and only expires after a
//! month without visits.

use sqlx::SqlitePool;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "swiftcart_session";

/// Session expiry time in seconds (30 days of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Create the session layer with `SQLite` store.
///
/// # Arguments
///
/// * `pool` - `SQLite` connection pool
/// * `config` - Storefront configuration (for the cookie `Secure` flag)
#[must_use]
pub fn create_session_layer(
    pool: &SqlitePool,
    config: &StorefrontConfig,
) -> SessionManagerLayer<SqliteStore> {
    // The sessions table must exist; see `db::migrate`
    let store = SqliteStore::new(pool.clone());

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
