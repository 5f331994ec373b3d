//! SwiftCart Storefront - product catalog and cart.
//!
//! This binary serves the storefront on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework with HTMX for interactivity
//! - Askama templates for server-side rendering
//! - Public catalog REST API for categories and products (read-only)
//! - `SQLite`-backed sessions holding each browser's cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use swiftcart_storefront::config::StorefrontConfig;
use swiftcart_storefront::state::AppState;
use swiftcart_storefront::{app, db, telemetry};

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let sentry_guard = telemetry::init_sentry(&config);
    telemetry::init_tracing(config.log_format);
    if sentry_guard.is_some() {
        tracing::info!("Sentry initialized");
    }

    // Initialize session database
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");
    db::migrate(&pool)
        .await
        .expect("Failed to create session table");
    tracing::info!(database_url = %config.database_url, "Session database ready");

    let state = AppState::new(config.clone(), pool).expect("Failed to initialize application state");
    tracing::info!(catalog = %state.catalog().base_url(), "Catalog client ready");

    let app = app(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    // Start server
    let addr = config.socket_addr();
    tracing::info!("storefront listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    drop(sentry_guard);
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
