//! The internal Glicko-2 scale, centered at `0.0` with deviations around
//! `1.0`. All update mathematics happens on this scale.

use std::f64::consts::PI;

use crate::rating::{RatingDifference, RatingScalar};

/// Factor between the public and the internal scale.
///
/// See "Step 2." in [Glickman's paper](http://www.glicko.net/glicko/glicko2.pdf).
pub const INTERNAL_RATING_SCALE: f64 = 173.7178;

/// Public rating that maps to `0.0` on the internal scale.
pub const INTERNAL_RATING_CENTER: f64 = 1500.0;

/// A rating on the internal scale (`μ` in Glicko-2 terminology).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct InternalRatingScalar(pub f64);

impl From<InternalRatingScalar> for f64 {
    #[inline]
    fn from(InternalRatingScalar(rating): InternalRatingScalar) -> f64 {
        rating
    }
}

impl InternalRatingScalar {
    #[inline]
    pub fn to_external(self, scale: f64) -> RatingScalar {
        RatingScalar(self.0 * scale + INTERNAL_RATING_CENTER)
    }
}

/// A rating difference or deviation on the internal scale (`φ` in Glicko-2
/// terminology).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct InternalRatingDifference(pub f64);

impl From<InternalRatingDifference> for f64 {
    #[inline]
    fn from(InternalRatingDifference(difference): InternalRatingDifference) -> f64 {
        difference
    }
}

impl InternalRatingDifference {
    #[inline]
    pub fn to_external(self, scale: f64) -> RatingDifference {
        RatingDifference(self.0 * scale)
    }

    #[inline]
    pub fn sq(self) -> f64 {
        self.0 * self.0
    }
}

impl RatingScalar {
    #[inline]
    pub fn to_internal(self, scale: f64) -> InternalRatingScalar {
        InternalRatingScalar((self.0 - INTERNAL_RATING_CENTER) / scale)
    }
}

impl RatingDifference {
    #[inline]
    pub fn to_internal(self, scale: f64) -> InternalRatingDifference {
        InternalRatingDifference(self.0 / scale)
    }
}

/// Weight of a game against an opponent with the given deviation. Uncertain
/// opponents count for less. Always in `(0.0, 1.0]`.
#[inline]
pub fn g(deviation: InternalRatingDifference) -> f64 {
    1.0 / (1.0 + 3.0 * deviation.sq() / (PI * PI)).sqrt()
}

/// Expected score of a player with `rating` against an opponent. Always in
/// `(0.0, 1.0)` for finite inputs.
#[inline]
pub fn expectation(
    rating: InternalRatingScalar,
    opponent_rating: InternalRatingScalar,
    opponent_deviation: InternalRatingDifference,
) -> f64 {
    1.0 / (1.0 + (-g(opponent_deviation) * (rating.0 - opponent_rating.0)).exp())
}
