use std::{
    fmt,
    ops::{Add, Mul, Sub},
};

use serde::{Deserialize, Serialize};

/// Number representing playing strength, such that the difference between two
/// ratings can be used to predict an expected score. Higher is better.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingScalar(pub f64);

impl From<RatingScalar> for f64 {
    #[inline]
    fn from(RatingScalar(rating): RatingScalar) -> f64 {
        rating
    }
}

impl From<f64> for RatingScalar {
    #[inline]
    fn from(rating: f64) -> RatingScalar {
        RatingScalar(rating)
    }
}

impl Sub<RatingScalar> for RatingScalar {
    type Output = RatingDifference;

    #[inline]
    fn sub(self, rhs: RatingScalar) -> RatingDifference {
        RatingDifference(self.0 - rhs.0)
    }
}

impl Add<RatingDifference> for RatingScalar {
    type Output = RatingScalar;

    #[inline]
    fn add(self, RatingDifference(difference): RatingDifference) -> RatingScalar {
        RatingScalar(self.0 + difference)
    }
}

impl Sub<RatingDifference> for RatingScalar {
    type Output = RatingScalar;

    #[inline]
    fn sub(self, RatingDifference(difference): RatingDifference) -> RatingScalar {
        RatingScalar(self.0 - difference)
    }
}

/// A difference between two ratings. Also used for rating deviations.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingDifference(pub f64);

impl From<RatingDifference> for f64 {
    #[inline]
    fn from(RatingDifference(difference): RatingDifference) -> f64 {
        difference
    }
}

impl From<f64> for RatingDifference {
    #[inline]
    fn from(difference: f64) -> RatingDifference {
        RatingDifference(difference)
    }
}

impl RatingDifference {
    #[inline]
    pub(crate) fn sq(self) -> f64 {
        self.0 * self.0
    }
}

impl Mul<RatingDifference> for f64 {
    type Output = RatingDifference;

    #[inline]
    fn mul(self, RatingDifference(difference): RatingDifference) -> RatingDifference {
        RatingDifference(self * difference)
    }
}

/// Number representing the degree of expected fluctuation in a rating.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Volatility(pub f64);

impl Volatility {
    #[inline]
    pub(crate) fn sq(self) -> f64 {
        self.0 * self.0
    }
}

impl From<Volatility> for f64 {
    #[inline]
    fn from(Volatility(volatility): Volatility) -> f64 {
        volatility
    }
}

impl From<f64> for Volatility {
    #[inline]
    fn from(volatility: f64) -> Volatility {
        Volatility(volatility)
    }
}

/// The state of a player after a rating period, on the public scale.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Number indicating playing strength. Higher is better. The difference
    /// between two ratings determines the expected score in a game between
    /// the two players.
    pub rating: RatingScalar,
    /// Uncertainty in the rating. A range from rating minus twice the deviation
    /// to rating plus twice the deviation approximately represents a 95%
    /// confidence interval.
    pub deviation: RatingDifference,
    /// Number indicating the degree of expected fluctuation in the rating.
    pub volatility: Volatility,
}

impl Rating {
    pub fn confidence_interval(&self) -> RatingInterval {
        RatingInterval {
            rating: self.rating,
            low: self.rating - 2.0 * self.deviation,
            high: self.rating + 2.0 * self.deviation,
        }
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.rating.0.is_finite()
            && self.deviation.0.is_finite()
            && self.deviation.0 > 0.0
            && self.volatility.0.is_finite()
            && self.volatility.0 > 0.0
    }
}

/// Approximate 95% confidence interval around a rating.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RatingInterval {
    pub rating: RatingScalar,
    pub low: RatingScalar,
    pub high: RatingScalar,
}

impl RatingInterval {
    pub fn contains(&self, rating: RatingScalar) -> bool {
        self.low <= rating && rating <= self.high
    }
}

impl fmt::Display for RatingInterval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:.2} ± {:.2} ( {:.2} - {:.2} )",
            self.rating.0,
            (self.high - self.rating).0,
            self.low.0,
            self.high.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_interval() {
        let rating = Rating {
            rating: RatingScalar(1500.0),
            deviation: RatingDifference(200.0),
            volatility: Volatility(0.06),
        };

        let interval = rating.confidence_interval();
        assert_eq!(interval.low, RatingScalar(1100.0));
        assert_eq!(interval.high, RatingScalar(1900.0));
        assert!(interval.contains(RatingScalar(1899.0)));
        assert!(!interval.contains(RatingScalar(1901.0)));
        assert_eq!(
            interval.to_string(),
            "1500.00 ± 400.00 ( 1100.00 - 1900.00 )"
        );
    }

    #[test]
    fn test_rejects_invalid_ratings() {
        let valid = Rating {
            rating: RatingScalar(1500.0),
            deviation: RatingDifference(350.0),
            volatility: Volatility(0.06),
        };
        assert!(valid.is_valid());

        assert!(!Rating {
            deviation: RatingDifference(0.0),
            ..valid
        }
        .is_valid());
        assert!(!Rating {
            volatility: Volatility(f64::NAN),
            ..valid
        }
        .is_valid());
        assert!(!Rating {
            rating: RatingScalar(f64::INFINITY),
            ..valid
        }
        .is_valid());
    }
}
