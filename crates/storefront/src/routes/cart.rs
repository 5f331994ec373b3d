//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the session under a single key; every handler
//! loads it whole and every mutation saves it whole.
//!
//! Plain form posts (no JavaScript) are answered with a redirect to the cart
//! page instead of a fragment.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use swiftcart_core::{Cart, CartLine, MAX_LINE_QUANTITY, ProductId};

use super::htmx::{CART_UPDATED, CLOSE_MODAL, Notification, Triggers, is_htmx_request};
use crate::cart_store;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

// =============================================================================
// Type Conversions
// =============================================================================

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            subtotal: cart.subtotal().display(),
            item_count: cart.total_items(),
        }
    }
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id,
            title: line.title.clone(),
            image: line.image.clone(),
            quantity: line.quantity,
            price: line.price.display(),
            line_price: line.line_total().display(),
        }
    }
}

// =============================================================================
// Forms & Templates
// =============================================================================

/// Form naming a single product (add, remove, buy now).
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub product_id: ProductId,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub cart_count: u32,
    pub active_page: &'static str,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub cart_count: u32,
}

/// Where plain form posts land after a cart change.
fn back_to_cart() -> Response {
    Redirect::to("/cart").into_response()
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let cart = cart_store::load(&session).await;

    CartShowTemplate {
        cart_count: cart.total_items(),
        cart: CartView::from(&cart),
        active_page: "cart",
    }
}

/// Add one unit of a product to the cart (HTMX).
///
/// The product is looked up in the catalog so the stored line carries its
/// current title, price, and image. Returns the refreshed cart badge and
/// triggers the modal close and a success toast.
#[instrument(skip(state, session, headers))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let product = state.catalog().product(form.product_id).await?;

    let mut cart = cart_store::load(&session).await;
    let quantity = cart.add(&product);
    cart_store::save(&session, &cart).await?;

    tracing::info!(product_id = %product.id, quantity, "Added to cart");
    add_breadcrumb(
        "cart",
        "Added product to cart",
        Some(&[("product_id", &product.id.to_string())]),
    );

    if !is_htmx_request(&headers) {
        return Ok(back_to_cart());
    }

    let triggers = Triggers::new()
        .event(CLOSE_MODAL)
        .notify(Notification::success("Product added to cart!"));

    Ok((
        triggers,
        CartCountTemplate {
            cart_count: cart.total_items(),
        },
    )
        .into_response())
}

/// Update cart item quantity (HTMX). A quantity of zero removes the line.
///
/// Unknown products leave the cart untouched.
#[instrument(skip(session, headers))]
pub async fn update(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    if form.quantity > MAX_LINE_QUANTITY {
        return Err(AppError::BadRequest(format!(
            "quantity must be at most {MAX_LINE_QUANTITY}"
        )));
    }

    let mut cart = cart_store::load(&session).await;
    if cart.set_quantity(form.product_id, form.quantity) {
        cart_store::save(&session, &cart).await?;
        tracing::info!(product_id = %form.product_id, quantity = form.quantity, "Updated cart line");
    } else {
        tracing::debug!(product_id = %form.product_id, "Update for product not in cart");
    }

    if !is_htmx_request(&headers) {
        return Ok(back_to_cart());
    }

    Ok((
        Triggers::new().event(CART_UPDATED),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
        .into_response())
}

/// Remove item from cart (HTMX).
#[instrument(skip(session, headers))]
pub async fn remove(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let mut cart = cart_store::load(&session).await;
    if cart.remove(form.product_id) {
        cart_store::save(&session, &cart).await?;
        tracing::info!(product_id = %form.product_id, "Removed from cart");
    }

    if !is_htmx_request(&headers) {
        return Ok(back_to_cart());
    }

    Ok((
        Triggers::new().event(CART_UPDATED),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
        .into_response())
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let cart = cart_store::load(&session).await;

    CartCountTemplate {
        cart_count: cart.total_items(),
    }
}

/// "Buy Now" from the product modal.
///
/// There is no payment processing: the product is checked against the
/// catalog, the modal closes, and the shopper is told checkout is next. The
/// cart is left unchanged.
#[instrument(skip(state, headers))]
pub async fn buy_now(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let product = state.catalog().product(form.product_id).await?;
    tracing::info!(product_id = %product.id, "Buying now");

    if !is_htmx_request(&headers) {
        return Ok(back_to_cart());
    }

    let triggers = Triggers::new()
        .event(CLOSE_MODAL)
        .notify(Notification::info("Redirecting to checkout..."));

    Ok((triggers, ()).into_response())
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use swiftcart_core::{Category, Price, Product, Rating};

    use super::*;

    fn product(id: i32, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Price::from_cents(cents),
            description: String::new(),
            category: Category::new("electronics"),
            image: format!("https://img.example/{id}.jpg"),
            rating: Rating::default(),
        }
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::from(&Cart::new());
        assert!(view.items.is_empty());
        assert_eq!(view.subtotal, "$0.00");
        assert_eq!(view.item_count, 0);
    }

    #[test]
    fn test_cart_view_formats_prices() {
        let mut cart = Cart::new();
        cart.add(&product(1, 1050));
        cart.add(&product(1, 1050));
        cart.add(&product(2, 399));

        let view = CartView::from(&cart);
        assert_eq!(view.item_count, 3);
        assert_eq!(view.subtotal, "$24.99");
        assert_eq!(view.items[0].price, "$10.50");
        assert_eq!(view.items[0].line_price, "$21.00");
        assert_eq!(view.items[0].quantity, 2);
        assert_eq!(view.items[1].image, "https://img.example/2.jpg");
    }
}
