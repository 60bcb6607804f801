use periodic_glicko2::{Game, GameResult, PlayerId, Round};
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};
use thiserror::Error;

/// A row of the input CSV. Rows must be in non-decreasing order of `round`.
#[serde_as]
#[derive(Deserialize, Debug)]
pub struct RawEncounter {
    pub round: usize,
    pub first: String,
    pub second: String,
    #[serde_as(as = "DisplayFromStr")]
    pub result: GameResult,
}

impl RawEncounter {
    pub fn round(&self) -> Round {
        Round(self.round)
    }

    /// Fails if the row belongs to a round before `current`, which was
    /// already collected.
    pub fn check_order(&self, current: Round) -> Result<(), RoundOutOfOrder> {
        if self.round() < current {
            return Err(RoundOutOfOrder {
                round: self.round(),
                current,
            });
        }
        Ok(())
    }

    pub fn to_game(&self, first: PlayerId, second: PlayerId) -> Game {
        Game::new(first, second, self.result)
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("encounter in round {} after rows of round {}", round.0, current.0)]
pub struct RoundOutOfOrder {
    pub round: Round,
    pub current: Round,
}
