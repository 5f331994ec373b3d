//! Integration tests for SwiftCart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p swiftcart-integration-tests
//! ```
//!
//! Each test serves the real storefront router on an ephemeral port, backed
//! by an in-memory session database and a mock catalog API, and drives it
//! with a cookie-keeping HTTP client the way a browser would.

use std::net::SocketAddr;

use reqwest::Client;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use swiftcart_storefront::config::{CatalogConfig, StorefrontConfig};
use swiftcart_storefront::state::AppState;
use swiftcart_storefront::{app, db};

/// A running storefront plus the mock catalog behind it.
pub struct TestContext {
    /// Browser-like client (keeps the session cookie).
    pub client: Client,
    /// Storefront base URL, e.g. `http://127.0.0.1:41234`.
    pub base_url: String,
    /// Mock catalog API; mount extra expectations as needed.
    pub catalog: MockServer,
}

impl TestContext {
    /// Start a storefront against an empty mock catalog.
    ///
    /// # Panics
    ///
    /// Panics if the database, the listener, or the HTTP client cannot be set up.
    pub async fn new() -> Self {
        let catalog = MockServer::start().await;

        let pool = db::create_pool("sqlite::memory:")
            .await
            .expect("Failed to create database pool");
        db::migrate(&pool).await.expect("Failed to create session table");

        let mut config =
            StorefrontConfig::from_lookup(|_| None).expect("Failed to build configuration");
        config.catalog =
            CatalogConfig::new(Url::parse(&catalog.uri()).expect("Invalid mock server URL"));

        let state = AppState::new(config, pool).expect("Failed to build application state");

        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Listener has no address");

        tokio::spawn(async move {
            axum_serve(listener, state).await;
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: format!("http://{addr}"),
            catalog,
        }
    }

    /// Absolute storefront URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Serve `products` from the mock catalog (list, per-category lists, and
    /// single-product lookups) along with their category tags.
    pub async fn mount_products(&self, products: &[Value]) {
        let mut categories: Vec<&str> = Vec::new();
        for category in products.iter().filter_map(|p| p["category"].as_str()) {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }

        Mock::given(method("GET"))
            .and(path("/products/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&categories))
            .mount(&self.catalog)
            .await;

        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(products))
            .mount(&self.catalog)
            .await;

        for category in &categories {
            let in_category: Vec<&Value> = products
                .iter()
                .filter(|p| p["category"].as_str() == Some(category))
                .collect();
            Mock::given(method("GET"))
                .and(path(format!("/products/category/{}", self.encode_segment(category))))
                .respond_with(ResponseTemplate::new(200).set_body_json(in_category))
                .mount(&self.catalog)
                .await;
        }

        for product in products {
            let id = product["id"].as_i64().unwrap_or_default();
            Mock::given(method("GET"))
                .and(path(format!("/products/{id}")))
                .respond_with(ResponseTemplate::new(200).set_body_json(product))
                .mount(&self.catalog)
                .await;
        }
    }

    /// Percent-encode a path segment the way the catalog client does.
    fn encode_segment(&self, segment: &str) -> String {
        let mut url = Url::parse(&self.catalog.uri()).expect("Invalid mock server URL");
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(segment);
        }
        url.path().trim_start_matches('/').to_string()
    }

    /// POST a form the way HTMX does.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn htmx_post(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .header("hx-request", "true")
            .form(form)
            .send()
            .await
            .expect("Request failed")
    }

    /// GET a page and return its body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or does not answer 200.
    pub async fn page(&self, path: &str) -> String {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Request failed");
        assert_eq!(response.status(), 200, "GET {path}");
        response.text().await.expect("Failed to read body")
    }
}

async fn axum_serve(listener: tokio::net::TcpListener, state: AppState) {
    if let Err(e) = axum::serve(listener, app(state)).await {
        panic!("storefront server stopped: {e}");
    }
}

/// Catalog API product JSON.
#[must_use]
pub fn product_json(id: i64, title: &str, price: f64, category: &str, rate: f64) -> Value {
    json!({
        "id": id,
        "title": title,
        "price": price,
        "description": format!("Description of {title}"),
        "category": category,
        "image": format!("https://img.example/{id}.jpg"),
        "rating": { "rate": rate, "count": 100 + id }
    })
}
