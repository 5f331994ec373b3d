//! Integration tests for the catalog and the session-backed cart.
//!
//! Each test starts its own storefront and mock catalog, so they run in
//! parallel without sharing state.

use reqwest::StatusCode;
use serde_json::Value;

use swiftcart_core::MAX_LINE_QUANTITY;
use swiftcart_integration_tests::{TestContext, product_json};

async fn context_with_products() -> TestContext {
    let ctx = TestContext::new().await;
    ctx.mount_products(&[
        product_json(1, "Fjallraven Backpack", 109.95, "men's clothing", 3.9),
        product_json(2, "Mens Casual Slim Fit", 15.99, "men's clothing", 2.1),
        product_json(5, "Dragon Station Chain Bracelet", 695.0, "jewelery", 4.6),
        product_json(9, "WD 2TB Portable Hard Drive", 64.0, "electronics", 3.3),
    ])
    .await;
    ctx
}

fn trigger_header(response: &reqwest::Response) -> Value {
    let raw = response
        .headers()
        .get("hx-trigger")
        .expect("missing HX-Trigger header")
        .to_str()
        .expect("HX-Trigger is not text");
    serde_json::from_str(raw).expect("HX-Trigger is not JSON")
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn test_catalog_page_lists_every_product() {
    let ctx = context_with_products().await;
    let body = ctx.page("/").await;

    for title in [
        "Fjallraven Backpack",
        "Mens Casual Slim Fit",
        "Dragon Station Chain Bracelet",
        "WD 2TB Portable Hard Drive",
    ] {
        assert!(body.contains(title), "missing {title}");
    }
    assert!(body.contains("$695.00"));
    assert!(body.contains(r#"id="cart-badge""#));
}

#[tokio::test]
async fn test_category_filter_fragment() {
    let ctx = context_with_products().await;

    let response = ctx
        .client
        .get(ctx.url("/products?category=jewelery"))
        .header("hx-request", "true")
        .send()
        .await
        .expect("Request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("Dragon Station Chain Bracelet"));
    assert!(!body.contains("Fjallraven Backpack"));
    assert!(!body.contains("<html"));
}

#[tokio::test]
async fn test_category_with_apostrophe() {
    let ctx = context_with_products().await;
    let body = ctx.page("/?category=men%27s%20clothing").await;

    assert!(body.contains("Fjallraven Backpack"));
    assert!(body.contains("Mens Casual Slim Fit"));
    assert!(!body.contains("WD 2TB Portable Hard Drive"));
}

#[tokio::test]
async fn test_quick_view_shows_full_details() {
    let ctx = context_with_products().await;
    let body = ctx.page("/products/5/quick-view").await;

    assert!(body.contains("Dragon Station Chain Bracelet"));
    assert!(body.contains("Description of Dragon Station Chain Bracelet"));
    assert!(body.contains("4.6 (105 reviews)"));
    assert!(body.contains("Buy Now"));
}

#[tokio::test]
async fn test_quick_view_unknown_product() {
    let ctx = context_with_products().await;

    let response = ctx
        .client
        .get(ctx.url("/products/404/quick-view"))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
async fn test_adding_twice_increments_quantity() {
    let ctx = context_with_products().await;

    let first = ctx.htmx_post("/cart/add", &[("product_id", "1")]).await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(trigger_header(&first)["notify"]["level"], "success");
    assert!(first.text().await.expect("body").contains(">1</span>"));

    let second = ctx.htmx_post("/cart/add", &[("product_id", "1")]).await;
    assert!(second.text().await.expect("body").contains(">2</span>"));

    let cart = ctx.page("/cart").await;
    assert!(cart.contains("Fjallraven Backpack"));
    assert!(cart.contains(r#"value="2""#));
    assert!(cart.contains("$219.90"));
}

#[tokio::test]
async fn test_cart_persists_across_requests() {
    let ctx = context_with_products().await;

    ctx.htmx_post("/cart/add", &[("product_id", "5")]).await;
    ctx.htmx_post("/cart/add", &[("product_id", "9")]).await;

    let count = ctx.page("/cart/count").await;
    assert!(count.contains(">2</span>"));

    // The badge on a fresh page load reflects the stored cart
    let home = ctx.page("/").await;
    assert!(home.contains(">2</span>"));
}

#[tokio::test]
async fn test_separate_browsers_have_separate_carts() {
    let ctx = context_with_products().await;
    ctx.htmx_post("/cart/add", &[("product_id", "5")]).await;

    let other = reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client");
    let body = other
        .get(ctx.url("/cart"))
        .send()
        .await
        .expect("Request failed")
        .text()
        .await
        .expect("Failed to read body");

    assert!(body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_update_and_remove() {
    let ctx = context_with_products().await;
    ctx.htmx_post("/cart/add", &[("product_id", "2")]).await;
    ctx.htmx_post("/cart/add", &[("product_id", "9")]).await;

    let updated = ctx
        .htmx_post("/cart/update", &[("product_id", "2"), ("quantity", "3")])
        .await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert!(trigger_header(&updated).get("cart-updated").is_some());
    let body = updated.text().await.expect("body");
    assert!(body.contains("$47.97"));
    assert!(body.contains("Subtotal (4 items)"));

    let removed = ctx.htmx_post("/cart/remove", &[("product_id", "2")]).await;
    let body = removed.text().await.expect("body");
    assert!(!body.contains("Mens Casual Slim Fit"));
    assert!(body.contains("WD 2TB Portable Hard Drive"));

    let emptied = ctx
        .htmx_post("/cart/update", &[("product_id", "9"), ("quantity", "0")])
        .await;
    assert!(
        emptied
            .text()
            .await
            .expect("body")
            .contains("Your cart is empty")
    );
}

#[tokio::test]
async fn test_repeated_adds_stop_at_line_limit() {
    let ctx = context_with_products().await;

    for _ in 0..=MAX_LINE_QUANTITY {
        ctx.htmx_post("/cart/add", &[("product_id", "9")]).await;
    }

    let count = ctx.page("/cart/count").await;
    assert!(count.contains(&format!(">{MAX_LINE_QUANTITY}</span>")));

    // The cart page can submit the quantity it renders
    let limit = MAX_LINE_QUANTITY.to_string();
    let update = ctx
        .htmx_post("/cart/update", &[("product_id", "9"), ("quantity", &limit)])
        .await;
    assert_eq!(update.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_add_unknown_product_leaves_cart_empty() {
    let ctx = context_with_products().await;

    let response = ctx.htmx_post("/cart/add", &[("product_id", "404")]).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert!(ctx.page("/cart/count").await.contains(">0</span>"));
}

#[tokio::test]
async fn test_buy_now_closes_modal_with_info_toast() {
    let ctx = context_with_products().await;

    let response = ctx.htmx_post("/cart/buy-now", &[("product_id", "5")]).await;
    assert_eq!(response.status(), StatusCode::OK);

    let trigger = trigger_header(&response);
    assert!(trigger.get("close-modal").is_some());
    assert_eq!(trigger["notify"]["message"], "Redirecting to checkout...");
    assert_eq!(trigger["notify"]["level"], "info");

    // Buy Now does not touch the cart
    assert!(ctx.page("/cart/count").await.contains(">0</span>"));
}

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new().await;
    assert_eq!(ctx.page("/health").await, "ok");
    assert_eq!(ctx.page("/health/ready").await, "");
}
