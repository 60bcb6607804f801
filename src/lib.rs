//! Glicko-2 ratings computed in rating periods, with a full per-player
//! history of ratings, deviations and volatilities.
//!
//! ```
//! use periodic_glicko2::{Game, GameResult, RatingSystem, Registry};
//!
//! let rating_system = RatingSystem::new();
//! let mut registry = Registry::new();
//! let alice = registry.create_player(&rating_system);
//! let bob = registry.create_player(&rating_system);
//!
//! registry
//!     .process_round(&rating_system, &[Game::new(alice, bob, GameResult::FirstWon)])
//!     .unwrap();
//!
//! let alice = registry.get(&alice).unwrap();
//! assert!(alice.rating().0 > 1500.0);
//! println!("{}", alice.confidence_interval());
//! ```

mod error;
mod game;
mod internal_rating;
mod player;
mod rating;
mod rating_system;
mod registry;
mod round;
mod score;
mod volatility;

pub use error::{InvalidConfig, InvalidGameResult, NotParticipant, RatingError, VolatilityError};
pub use game::{Game, GameResult};
pub use internal_rating::{
    expectation, g, InternalRatingDifference, InternalRatingScalar, INTERNAL_RATING_CENTER,
    INTERNAL_RATING_SCALE,
};
pub use player::{Player, PlayerId, PlayerLookup};
pub use rating::{Rating, RatingDifference, RatingInterval, RatingScalar, Volatility};
pub use rating_system::{MissingOpponentPolicy, RatingSystem, RatingSystemBuilder};
pub use registry::{Registry, RoundSummary};
pub use round::Round;
pub use score::Score;
pub use volatility::VolatilityProblem;

/// Log likelihood deviance metric that can be used to evaluate the quality of
/// rating system predictions.
///
/// Lower is better.
///
/// See <https://www.kaggle.com/c/ChessRatings2/overview/evaluation>.
pub fn deviance(Score(expected): Score, Score(actual): Score) -> f64 {
    let expected = expected.clamp(0.01, 0.99);
    -(actual * expected.log10() + (1.0 - actual) * (1.0 - expected).log10())
}
