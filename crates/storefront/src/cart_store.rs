//! Per-browser cart persistence.
//!
//! The whole cart is stored as one value under [`CART_KEY`] in the shopper's
//! session. It is read wholesale at the start of a request and written
//! wholesale after every mutation; nothing else touches it, so no locking or
//! merging is needed.

use thiserror::Error;
use tower_sessions::Session;

use swiftcart_core::Cart;

/// Session key holding the serialized cart.
pub const CART_KEY: &str = "swiftcart";

/// Errors persisting the cart.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The session store rejected the write.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// Load the shopper's cart.
///
/// A missing record yields an empty cart. So does an unreadable one, which is
/// logged and overwritten on the next save.
pub async fn load(session: &Session) -> Cart {
    match session.get::<Cart>(CART_KEY).await {
        Ok(Some(cart)) => cart,
        Ok(None) => Cart::new(),
        Err(e) => {
            tracing::warn!(error = %e, "Discarding unreadable cart");
            Cart::new()
        }
    }
}

/// Replace the shopper's stored cart with `cart`.
///
/// # Errors
///
/// Returns an error if the session cannot be written.
pub async fn save(session: &Session, cart: &Cart) -> Result<(), CartStoreError> {
    session.insert(CART_KEY, cart).await?;
    Ok(())
}
