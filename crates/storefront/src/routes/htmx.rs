//! HTMX request detection and response triggers.
//!
//! Handlers answer HTMX requests with fragments and announce side effects
//! through the `HX-Trigger` header; the client script reacts to the events
//! (closing the product modal, showing a toast, refreshing the cart badge).

use std::convert::Infallible;

use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponseParts, ResponseParts};
use serde::Serialize;

/// Request header set by HTMX on every request it issues.
pub const HX_REQUEST: &str = "hx-request";

/// Response header carrying client-side events.
pub const HX_TRIGGER: &str = "hx-trigger";

/// Fired after the cart changed in a way other fragments must reflect.
pub const CART_UPDATED: &str = "cart-updated";

/// Closes the product detail modal if it is open.
pub const CLOSE_MODAL: &str = "close-modal";

/// Shows a toast; the event detail is a [`Notification`].
pub const NOTIFY: &str = "notify";

/// Whether the request was issued by HTMX (as opposed to a plain form post
/// or navigation).
#[must_use]
pub fn is_htmx_request(headers: &HeaderMap) -> bool {
    headers
        .get(HX_REQUEST)
        .is_some_and(|value| value.as_bytes() == b"true")
}

/// Toast style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyLevel {
    /// Green, check icon.
    Success,
    /// Blue, info icon.
    Info,
}

/// A toast message shown by the client script.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub message: String,
    pub level: NotifyLevel,
}

impl Notification {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotifyLevel::Success,
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotifyLevel::Info,
        }
    }
}

/// A set of client events, sent as one JSON `HX-Trigger` header.
///
/// ```rust,ignore
/// let triggers = Triggers::new()
///     .event(CLOSE_MODAL)
///     .notify(Notification::success("Product added to cart!"));
/// (triggers, CartCountTemplate { cart_count }).into_response()
/// ```
#[derive(Debug, Clone, Default)]
pub struct Triggers {
    events: serde_json::Map<String, serde_json::Value>,
}

impl Triggers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event without detail.
    #[must_use]
    pub fn event(mut self, name: &str) -> Self {
        self.events
            .insert(name.to_string(), serde_json::Value::Object(serde_json::Map::new()));
        self
    }

    /// Add a toast notification.
    #[must_use]
    pub fn notify(mut self, notification: Notification) -> Self {
        let detail = serde_json::to_value(notification).unwrap_or_default();
        self.events.insert(NOTIFY.to_string(), detail);
        self
    }

    /// The header value, or `None` when there are no events.
    #[must_use]
    pub fn header_value(&self) -> Option<HeaderValue> {
        if self.events.is_empty() {
            return None;
        }
        let json = serde_json::Value::Object(self.events.clone()).to_string();
        HeaderValue::from_str(&json).ok()
    }
}

impl IntoResponseParts for Triggers {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if let Some(value) = self.header_value() {
            res.headers_mut().insert(HX_TRIGGER, value);
        }
        Ok(res)
    }
}
