//! Volatility update, "Step 5." in
//! [Glickman's paper](http://www.glicko.net/glicko/glicko2.pdf).
//!
//! Finds the root of the objective with the Illinois variant of regula falsi,
//! which converges without derivatives.

use tracing::trace;

use crate::{
    error::VolatilityError, internal_rating::InternalRatingDifference, rating::Volatility,
};

/// Inputs of a single volatility update, all on the internal scale.
#[derive(Debug, Copy, Clone)]
pub struct VolatilityProblem {
    /// Estimated improvement `Δ`.
    pub improvement: f64,
    /// Pre-period deviation `φ`.
    pub deviation: InternalRatingDifference,
    /// Estimated variance `v`.
    pub variance: f64,
    /// Pre-period volatility `σ`.
    pub volatility: Volatility,
}

impl VolatilityProblem {
    fn a(&self) -> f64 {
        self.volatility.sq().ln()
    }

    /// The function `f(x)` whose root `A` yields the new volatility
    /// `exp(A / 2)`.
    pub fn objective(&self, x: f64, tau: f64) -> f64 {
        let ex = x.exp();
        let phi_sq = self.deviation.sq();
        let denom = phi_sq + self.variance + ex;
        ex * (self.improvement * self.improvement - phi_sq - self.variance - ex)
            / (2.0 * denom * denom)
            - (x - self.a()) / (tau * tau)
    }

    /// Solves for the new volatility.
    ///
    /// Both the search for the initial bracket and the iterations of the
    /// Illinois method are capped at `max_iterations` steps.
    pub fn solve(
        &self,
        tau: f64,
        tolerance: f64,
        max_iterations: u32,
    ) -> Result<Volatility, VolatilityError> {
        let f = |x: f64| -> Result<f64, VolatilityError> {
            let y = self.objective(x, tau);
            if y.is_nan() {
                Err(VolatilityError::NonFinite { x })
            } else {
                Ok(y)
            }
        };

        let a = self.a();
        let mut big_a = a;

        let excess = self.improvement * self.improvement - self.deviation.sq() - self.variance;
        let mut big_b = if excess > 0.0 {
            excess.ln()
        } else {
            let mut k = 1;
            loop {
                if k > max_iterations {
                    return Err(VolatilityError::BracketNotFound {
                        iterations: max_iterations,
                    });
                }
                let x = a - f64::from(k) * tau;
                if f(x)? >= 0.0 {
                    break x;
                }
                k += 1;
            }
        };

        let mut f_a = f(big_a)?;
        let mut f_b = f(big_b)?;

        let mut iterations = 0;
        while (big_b - big_a).abs() > tolerance {
            if iterations >= max_iterations {
                return Err(VolatilityError::NotConverged {
                    iterations: max_iterations,
                });
            }
            iterations += 1;

            let big_c = big_a + (big_a - big_b) * f_a / (f_b - f_a);
            let f_c = f(big_c)?;
            if f_c * f_b < 0.0 {
                big_a = big_b;
                f_a = f_b;
            } else {
                f_a /= 2.0;
            }
            big_b = big_c;
            f_b = f_c;

            trace!(iterations, big_a, big_b, f_a, f_b, "illinois step");
        }

        Ok(Volatility((big_a / 2.0).exp()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glickman_example() -> VolatilityProblem {
        VolatilityProblem {
            improvement: -0.4839332609836549,
            deviation: InternalRatingDifference(1.1512924985234674),
            variance: 1.7789770897239976,
            volatility: Volatility(0.06),
        }
    }

    #[test]
    fn test_glickman_example() {
        let volatility = glickman_example().solve(0.5, 1e-6, 100).unwrap();
        assert!((volatility.0 - 0.059995984286488495).abs() < 1e-9);
    }

    #[test]
    fn test_root_found() {
        let problem = glickman_example();
        let volatility = problem.solve(0.5, 1e-6, 100).unwrap();
        let root = volatility.sq().ln();
        assert!(problem.objective(root, 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_large_improvement_uses_direct_bracket() {
        let problem = VolatilityProblem {
            improvement: 2.5000952568225174,
            ..glickman_example()
        };
        let volatility = problem.solve(0.5, 1e-6, 100).unwrap();
        assert!((volatility.0 - 0.06000439239606067).abs() < 1e-9);
    }

    #[test]
    fn test_bracket_search_capped() {
        let problem = glickman_example();
        assert_eq!(
            problem.solve(1e-20, 1e-6, 10),
            Err(VolatilityError::BracketNotFound { iterations: 10 })
        );
    }

    #[test]
    fn test_iterations_capped() {
        let problem = glickman_example();
        assert_eq!(
            problem.solve(0.5, 0.0, 5),
            Err(VolatilityError::NotConverged { iterations: 5 })
        );
    }

    #[test]
    fn test_nan_reported() {
        let problem = VolatilityProblem {
            volatility: Volatility(f64::NAN),
            ..glickman_example()
        };
        assert!(matches!(
            problem.solve(0.5, 1e-6, 100),
            Err(VolatilityError::NonFinite { .. })
        ));
    }
}
