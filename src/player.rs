use std::{collections::HashMap, fmt, hash::BuildHasher};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::RatingError,
    rating::{Rating, RatingDifference, RatingInterval, RatingScalar, Volatility},
    round::Round,
};

/// Opaque identity of a player.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(Uuid);

impl PlayerId {
    /// Generates a new time-ordered identity.
    pub fn random() -> PlayerId {
        PlayerId(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for PlayerId {
    fn from(uuid: Uuid) -> PlayerId {
        PlayerId(uuid)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A player and the rating they had after each round.
///
/// The history is never empty. Entry 0 is the initial rating and every
/// processed round appends exactly one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    id: PlayerId,
    history: Vec<Rating>,
}

impl Player {
    pub fn new(id: PlayerId, initial: Rating) -> Player {
        Player {
            id,
            history: vec![initial],
        }
    }

    /// Like [`Player::new`], but fails with [`RatingError::InvalidRating`]
    /// unless the rating is finite with a positive deviation and volatility.
    pub fn try_new(id: PlayerId, initial: Rating) -> Result<Player, RatingError> {
        if !initial.is_valid() {
            return Err(RatingError::InvalidRating {
                player: id,
                rating: initial,
            });
        }
        Ok(Player::new(id, initial))
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Rating after the most recent round.
    pub fn current(&self) -> &Rating {
        // The history is initialized with one entry and only ever grows.
        &self.history[self.history.len() - 1]
    }

    pub fn rating(&self) -> RatingScalar {
        self.current().rating
    }

    pub fn deviation(&self) -> RatingDifference {
        self.current().deviation
    }

    pub fn volatility(&self) -> Volatility {
        self.current().volatility
    }

    pub fn confidence_interval(&self) -> RatingInterval {
        self.current().confidence_interval()
    }

    pub fn at(&self, Round(round): Round) -> Option<&Rating> {
        self.history.get(round)
    }

    /// The most recent round, `Round(0)` if no round was processed yet.
    pub fn round(&self) -> Round {
        Round(self.history.len() - 1)
    }

    pub fn history(&self) -> &[Rating] {
        &self.history
    }

    pub fn ratings(&self) -> impl Iterator<Item = RatingScalar> + '_ {
        self.history.iter().map(|r| r.rating)
    }

    pub fn deviations(&self) -> impl Iterator<Item = RatingDifference> + '_ {
        self.history.iter().map(|r| r.deviation)
    }

    pub fn volatilities(&self) -> impl Iterator<Item = Volatility> + '_ {
        self.history.iter().map(|r| r.volatility)
    }

    pub(crate) fn push(&mut self, rating: Rating) {
        self.history.push(rating);
    }
}

/// Supplies the current state of players by identity.
pub trait PlayerLookup {
    fn player(&self, id: &PlayerId) -> Option<&Player>;
}

impl<S: BuildHasher> PlayerLookup for HashMap<PlayerId, Player, S> {
    fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.get(id)
    }
}
