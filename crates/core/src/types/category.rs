//! Catalog categories.
//!
//! Categories are server-defined string tags (e.g. `"men's clothing"`). The
//! storefront never invents its own; it only filters by what the catalog API
//! returns.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Query value that selects the unfiltered listing.
pub const ALL_CATEGORIES: &str = "all";

/// A server-defined category tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Wrap a raw category tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The raw tag as sent by the catalog API.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-facing label: the tag with its first character upper-cased.
    ///
    /// `"men's clothing"` becomes `"Men's clothing"`.
    #[must_use]
    pub fn label(&self) -> String {
        let mut chars = self.0.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Which slice of the catalog to list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every product.
    #[default]
    All,
    /// Products tagged with exactly this category.
    Only(Category),
}

impl CategoryFilter {
    /// Parse a user-supplied filter value.
    ///
    /// Missing, blank, and `all` values select the unfiltered listing.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("" | ALL_CATEGORIES) => Self::All,
            Some(tag) => Self::Only(Category::new(tag)),
        }
    }

    /// The value used in query strings (`all` or the raw tag).
    #[must_use]
    pub fn as_query_value(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(category) => category.as_str(),
        }
    }

    /// Whether this filter selects the given category.
    #[must_use]
    pub fn selects(&self, category: &Category) -> bool {
        matches!(self, Self::Only(selected) if selected == category)
    }
}
