//! Product ratings and their five-star rendering.

use serde::{Deserialize, Serialize};

/// Number of stars in a rendered rating.
pub const MAX_STARS: u8 = 5;

/// Aggregate customer rating as reported by the catalog API.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rating {
    /// Average score, nominally `0.0..=5.0`.
    pub rate: f64,
    /// Number of reviews behind the average.
    pub count: u32,
}

impl Rating {
    /// Five-star breakdown of the average score.
    #[must_use]
    pub fn stars(&self) -> StarRating {
        StarRating::from_rate(self.rate)
    }
}

/// One rendered star.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarKind {
    Full,
    Half,
    Empty,
}

impl StarKind {
    /// Font Awesome classes for the star icon.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Full => "fas fa-star",
            Self::Half => "fas fa-star-half-alt",
            Self::Empty => "far fa-star",
        }
    }

    /// Single-character glyph for plain-text output.
    #[must_use]
    pub const fn glyph(&self) -> char {
        match self {
            Self::Full => '★',
            Self::Half => '⯪',
            Self::Empty => '☆',
        }
    }
}

/// A score split into full, half, and empty stars.
///
/// Always accounts for exactly [`MAX_STARS`] stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRating {
    pub full: u8,
    pub half: bool,
    pub empty: u8,
}

impl StarRating {
    /// Break a score into stars.
    ///
    /// The whole part gives the full stars, a fractional part of at least one
    /// half adds a half star, and the remainder up to five is empty. Scores
    /// outside `0..=5` (and NaN) are clamped first.
    #[must_use]
    pub fn from_rate(rate: f64) -> Self {
        let rate = if rate.is_nan() {
            0.0
        } else {
            rate.clamp(0.0, f64::from(MAX_STARS))
        };

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to 0..=5 above
        let full = rate.floor() as u8;
        let half = rate.fract() >= 0.5;
        let empty = MAX_STARS - full - u8::from(half);

        Self { full, half, empty }
    }

    /// Stars in display order: full, then half, then empty.
    #[must_use]
    pub fn stars(&self) -> Vec<StarKind> {
        let mut stars = Vec::with_capacity(usize::from(MAX_STARS));
        stars.extend(std::iter::repeat_n(StarKind::Full, usize::from(self.full)));
        if self.half {
            stars.push(StarKind::Half);
        }
        stars.extend(std::iter::repeat_n(StarKind::Empty, usize::from(self.empty)));
        stars
    }

    /// Plain-text rendering, e.g. `★★★⯪☆`.
    #[must_use]
    pub fn as_text(&self) -> String {
        self.stars().iter().map(StarKind::glyph).collect()
    }
}
