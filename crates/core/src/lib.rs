//! SwiftCart Core - Shared domain types.
//!
//! This crate provides the types used across all SwiftCart components:
//! - `storefront` - Server-rendered catalog and cart
//! - `cli` - Command-line tools for the session store and catalog browsing
//!
//! # Architecture
//!
//! The core crate contains only types and arithmetic - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, categories, and ratings
//! - [`cart`] - The cart model persisted per browser
//! - [`text`] - Display helpers for catalog text

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod text;
pub mod types;

pub use cart::{Cart, CartLine, MAX_LINE_QUANTITY};
pub use types::*;
