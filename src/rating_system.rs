use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    error::{InvalidConfig, RatingError},
    game::Game,
    internal_rating::{
        expectation, g, InternalRatingDifference, InternalRatingScalar, INTERNAL_RATING_SCALE,
    },
    player::{Player, PlayerId, PlayerLookup},
    rating::{Rating, RatingDifference, RatingScalar, Volatility},
    score::Score,
    volatility::VolatilityProblem,
};

/// What to do with a game whose opponent is not known to the lookup.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingOpponentPolicy {
    /// Ignore the game, as if it had not been played.
    #[default]
    Skip,
    /// Fail the update with [`RatingError::OpponentNotFound`].
    Reject,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RatingSystemBuilder {
    default_rating: f64,
    default_deviation: f64,
    default_volatility: f64,

    tau: f64,

    convergence_tolerance: f64,
    max_iterations: u32,

    internal_scale: f64,

    missing_opponents: MissingOpponentPolicy,
}

impl Default for RatingSystemBuilder {
    fn default() -> RatingSystemBuilder {
        RatingSystemBuilder::new()
    }
}

impl RatingSystemBuilder {
    pub fn new() -> RatingSystemBuilder {
        RatingSystemBuilder {
            default_rating: 1500.0,
            default_deviation: 350.0,
            default_volatility: 0.06,

            tau: 0.5,

            convergence_tolerance: 0.000_001,
            max_iterations: 10_000,

            internal_scale: INTERNAL_RATING_SCALE,

            missing_opponents: MissingOpponentPolicy::Skip,
        }
    }

    pub fn default_rating(&mut self, default_rating: f64) -> &mut Self {
        self.default_rating = default_rating;
        self
    }

    pub fn default_deviation(&mut self, default_deviation: f64) -> &mut Self {
        self.default_deviation = default_deviation;
        self
    }

    pub fn default_volatility(&mut self, default_volatility: f64) -> &mut Self {
        self.default_volatility = default_volatility;
        self
    }

    /// Constrains the change in volatility over time. Reasonable choices are
    /// between `0.3` and `1.2`. Smaller values prevent large rating swings.
    pub fn tau(&mut self, tau: f64) -> &mut Self {
        self.tau = tau;
        self
    }

    pub fn convergence_tolerance(&mut self, convergence_tolerance: f64) -> &mut Self {
        self.convergence_tolerance = convergence_tolerance;
        self
    }

    pub fn max_iterations(&mut self, max_iterations: u32) -> &mut Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn internal_scale(&mut self, internal_scale: f64) -> &mut Self {
        self.internal_scale = internal_scale;
        self
    }

    pub fn missing_opponents(&mut self, missing_opponents: MissingOpponentPolicy) -> &mut Self {
        self.missing_opponents = missing_opponents;
        self
    }

    pub fn build(&self) -> Result<RatingSystem, InvalidConfig> {
        fn check(name: &'static str, value: f64, valid: bool) -> Result<(), InvalidConfig> {
            if valid && value.is_finite() {
                Ok(())
            } else {
                Err(InvalidConfig { name, value })
            }
        }

        check("default_rating", self.default_rating, true)?;
        check("default_deviation", self.default_deviation, self.default_deviation > 0.0)?;
        check("default_volatility", self.default_volatility, self.default_volatility > 0.0)?;
        check("tau", self.tau, self.tau > 0.0)?;
        check(
            "convergence_tolerance",
            self.convergence_tolerance,
            self.convergence_tolerance > 0.0,
        )?;
        check(
            "max_iterations",
            f64::from(self.max_iterations),
            self.max_iterations > 0,
        )?;
        check("internal_scale", self.internal_scale, self.internal_scale > 0.0)?;

        Ok(self.assemble())
    }

    fn assemble(&self) -> RatingSystem {
        RatingSystem {
            default_rating: self.default_rating,
            default_deviation: self.default_deviation,
            default_volatility: self.default_volatility,

            tau: self.tau,

            convergence_tolerance: self.convergence_tolerance,
            max_iterations: self.max_iterations,

            internal_scale: self.internal_scale,

            missing_opponents: self.missing_opponents,
        }
    }
}

/// New rating of a player and the number of games it is based on. Zero
/// games means the deviation only decayed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RatedPeriod {
    pub rating: Rating,
    pub games: usize,
}

#[derive(Debug, Clone)]
pub struct RatingSystem {
    default_rating: f64,
    default_deviation: f64,
    default_volatility: f64,

    tau: f64,

    convergence_tolerance: f64,
    max_iterations: u32,

    internal_scale: f64,

    missing_opponents: MissingOpponentPolicy,
}

impl Default for RatingSystem {
    fn default() -> RatingSystem {
        RatingSystem::new()
    }
}

impl RatingSystem {
    pub fn builder() -> RatingSystemBuilder {
        RatingSystemBuilder::default()
    }

    pub fn new() -> RatingSystem {
        RatingSystem::builder().assemble()
    }

    pub fn new_rating(&self) -> Rating {
        Rating {
            rating: RatingScalar(self.default_rating),
            deviation: RatingDifference(self.default_deviation),
            volatility: Volatility(self.default_volatility),
        }
    }

    pub fn new_player(&self, id: PlayerId) -> Player {
        Player::new(id, self.new_rating())
    }

    /// Expected score of `first` in a game against `second`.
    pub fn expected_score(&self, first: &Rating, second: &Rating) -> Score {
        Score(expectation(
            first.rating.to_internal(self.internal_scale),
            second.rating.to_internal(self.internal_scale),
            second.deviation.to_internal(self.internal_scale),
        ))
    }

    /// Computes the rating of `player` after a rating period consisting of
    /// `games`.
    ///
    /// Games that do not involve `player` are ignored. Opponents are
    /// resolved through `lookup` and contribute with their current rating,
    /// so `lookup` must not contain ratings already updated for the same
    /// period.
    pub fn rate<L>(
        &self,
        player: &Player,
        games: &[Game],
        lookup: &L,
    ) -> Result<Rating, RatingError>
    where
        L: PlayerLookup + ?Sized,
    {
        self.rate_period(player, games, lookup)
            .map(|period| period.rating)
    }

    /// Like [`RatingSystem::rate`], also reporting how many games
    /// contributed to the update.
    pub(crate) fn rate_period<L>(
        &self,
        player: &Player,
        games: &[Game],
        lookup: &L,
    ) -> Result<RatedPeriod, RatingError>
    where
        L: PlayerLookup + ?Sized,
    {
        let id = player.id();
        let current = *player.current();
        if !current.is_valid() {
            return Err(RatingError::InvalidRating {
                player: id,
                rating: current,
            });
        }

        let rating = current.rating.to_internal(self.internal_scale);
        let deviation = current.deviation.to_internal(self.internal_scale);

        // Sums over all games with a known opponent.
        let mut inverse_variance = 0.0;
        let mut performance = 0.0;
        let mut contributing: usize = 0;

        for game in games {
            let (Ok(opponent_id), Ok(score)) = (game.opponent_of(id), game.score_for(id)) else {
                continue;
            };

            let Some(opponent) = lookup.player(&opponent_id) else {
                match self.missing_opponents {
                    MissingOpponentPolicy::Skip => {
                        warn!(
                            player = %id,
                            opponent = %opponent_id,
                            "skipping game against unknown opponent"
                        );
                        continue;
                    }
                    MissingOpponentPolicy::Reject => {
                        return Err(RatingError::OpponentNotFound {
                            player: id,
                            opponent: opponent_id,
                        });
                    }
                }
            };

            let opponent_current = *opponent.current();
            if !opponent_current.is_valid() {
                return Err(RatingError::InvalidRating {
                    player: opponent_id,
                    rating: opponent_current,
                });
            }

            let opponent_rating = opponent_current.rating.to_internal(self.internal_scale);
            let opponent_deviation = opponent_current.deviation.to_internal(self.internal_scale);

            let weight = g(opponent_deviation);
            let e = expectation(rating, opponent_rating, opponent_deviation);
            inverse_variance += weight * weight * e * (1.0 - e);
            performance += weight * (score.value() - e);
            contributing += 1;
        }

        if contributing == 0 {
            let decayed = self.decay(&current);
            debug!(player = %id, deviation = decayed.deviation.0, "no games in rating period");
            return Ok(RatedPeriod {
                rating: decayed,
                games: 0,
            });
        }

        let variance = 1.0 / inverse_variance;
        let problem = VolatilityProblem {
            improvement: variance * performance,
            deviation,
            variance,
            volatility: current.volatility,
        };
        let new_volatility = problem
            .solve(self.tau, self.convergence_tolerance, self.max_iterations)
            .map_err(|source| RatingError::Volatility { player: id, source })?;

        let pre_period_deviation_sq = deviation.sq() + new_volatility.sq();
        let new_deviation = (1.0 / (1.0 / pre_period_deviation_sq + 1.0 / variance)).sqrt();
        let new_rating = rating.0 + new_deviation * new_deviation * performance;

        let updated = Rating {
            rating: InternalRatingScalar(new_rating).to_external(self.internal_scale),
            deviation: InternalRatingDifference(new_deviation).to_external(self.internal_scale),
            volatility: new_volatility,
        };

        debug!(
            player = %id,
            games = contributing,
            rating = updated.rating.0,
            deviation = updated.deviation.0,
            volatility = updated.volatility.0,
            "rated"
        );

        Ok(RatedPeriod {
            rating: updated,
            games: contributing,
        })
    }

    /// Rating after a period without games. Only the deviation grows.
    fn decay(&self, rating: &Rating) -> Rating {
        Rating {
            deviation: RatingDifference((rating.deviation.sq() + rating.volatility.sq()).sqrt()),
            ..*rating
        }
    }

    pub fn default_rating(&self) -> f64 {
        self.default_rating
    }

    pub fn default_deviation(&self) -> f64 {
        self.default_deviation
    }

    pub fn default_volatility(&self) -> f64 {
        self.default_volatility
    }

    pub fn tau(&self) -> f64 {
        self.tau
    }

    pub fn convergence_tolerance(&self) -> f64 {
        self.convergence_tolerance
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    pub fn internal_scale(&self) -> f64 {
        self.internal_scale
    }

    pub fn missing_opponents(&self) -> MissingOpponentPolicy {
        self.missing_opponents
    }
}
