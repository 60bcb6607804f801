use thiserror::Error;

use crate::{player::PlayerId, rating::Rating};

/// A player was asked about a game they did not take part in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
#[error("player {0} did not take part in the game")]
pub struct NotParticipant(pub PlayerId);

/// The game result code could not be parsed.
#[derive(Debug, Error)]
#[error("invalid game result")]
pub struct InvalidGameResult;

/// A rating system parameter is out of range.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid rating system parameter {name}: {value}")]
pub struct InvalidConfig {
    pub name: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum VolatilityError {
    #[error("no bracket for the new volatility found within {iterations} steps")]
    BracketNotFound { iterations: u32 },
    #[error("new volatility did not converge within {iterations} iterations")]
    NotConverged { iterations: u32 },
    #[error("volatility objective is not finite at {x}")]
    NonFinite { x: f64 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RatingError {
    #[error("player {0} is not registered")]
    UnknownPlayer(PlayerId),
    #[error("player {0} is already registered")]
    DuplicatePlayer(PlayerId),
    #[error("opponent {opponent} of player {player} is not registered")]
    OpponentNotFound { player: PlayerId, opponent: PlayerId },
    #[error("invalid rating for player {player}: {rating:?}")]
    InvalidRating { player: PlayerId, rating: Rating },
    #[error("could not update volatility of player {player}")]
    Volatility {
        player: PlayerId,
        #[source]
        source: VolatilityError,
    },
}
