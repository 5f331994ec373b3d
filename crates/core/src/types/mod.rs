//! Core types for SwiftCart.
//!
//! This module provides type-safe wrappers for catalog concepts.

pub mod category;
pub mod id;
pub mod price;
pub mod product;
pub mod rating;

pub use category::{ALL_CATEGORIES, Category, CategoryFilter};
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use product::Product;
pub use rating::{Rating, StarKind, StarRating};
