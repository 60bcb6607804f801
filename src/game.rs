use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    error::{InvalidGameResult, NotParticipant},
    player::{Player, PlayerId, PlayerLookup},
    score::Score,
};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    Draw,
    FirstWon,
    SecondWon,
}

impl FromStr for GameResult {
    type Err = InvalidGameResult;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "0" | "1/2-1/2" => GameResult::Draw,
            "1" | "1-0" => GameResult::FirstWon,
            "2" | "0-1" => GameResult::SecondWon,
            _ => return Err(InvalidGameResult),
        })
    }
}

impl GameResult {
    pub fn first_score(self) -> Score {
        match self {
            GameResult::Draw => Score::DRAW,
            GameResult::FirstWon => Score::WIN,
            GameResult::SecondWon => Score::LOSS,
        }
    }
}

/// Outcome of a single game between two players.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Game {
    first: PlayerId,
    second: PlayerId,
    result: GameResult,
}

impl Game {
    pub fn new(first: PlayerId, second: PlayerId, result: GameResult) -> Game {
        Game {
            first,
            second,
            result,
        }
    }

    pub fn first(&self) -> PlayerId {
        self.first
    }

    pub fn second(&self) -> PlayerId {
        self.second
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn involves(&self, player: PlayerId) -> bool {
        player == self.first || player == self.second
    }

    pub fn score_for(&self, player: PlayerId) -> Result<Score, NotParticipant> {
        if player == self.first {
            Ok(self.result.first_score())
        } else if player == self.second {
            Ok(self.result.first_score().opposite())
        } else {
            Err(NotParticipant(player))
        }
    }

    pub fn opponent_of(&self, player: PlayerId) -> Result<PlayerId, NotParticipant> {
        if player == self.first {
            Ok(self.second)
        } else if player == self.second {
            Ok(self.first)
        } else {
            Err(NotParticipant(player))
        }
    }

    /// Resolves the opponent of `player`. `None` if `player` did not take
    /// part or the opponent is unknown to `lookup`.
    pub fn opponent<'a, L>(&self, player: PlayerId, lookup: &'a L) -> Option<&'a Player>
    where
        L: PlayerLookup + ?Sized,
    {
        self.opponent_of(player)
            .ok()
            .and_then(|opponent| lookup.player(&opponent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    #[test]
    fn test_score_for() {
        let (a, b, c) = (PlayerId::random(), PlayerId::random(), PlayerId::random());

        let draw = Game::new(a, b, GameResult::Draw);
        assert_eq!(draw.score_for(a), Ok(Score::DRAW));
        assert_eq!(draw.score_for(b), Ok(Score::DRAW));

        let first_won = Game::new(a, b, GameResult::FirstWon);
        assert_eq!(first_won.score_for(a), Ok(Score::WIN));
        assert_eq!(first_won.score_for(b), Ok(Score::LOSS));

        let second_won = Game::new(a, b, GameResult::SecondWon);
        assert_eq!(second_won.score_for(a), Ok(Score::LOSS));
        assert_eq!(second_won.score_for(b), Ok(Score::WIN));

        assert_eq!(draw.score_for(c), Err(NotParticipant(c)));
    }

    #[test]
    fn test_opponent() {
        let (a, b, c) = (PlayerId::random(), PlayerId::random(), PlayerId::random());
        let game = Game::new(a, b, GameResult::FirstWon);

        assert_eq!(game.opponent_of(a), Ok(b));
        assert_eq!(game.opponent_of(b), Ok(a));
        assert_eq!(game.opponent_of(c), Err(NotParticipant(c)));
        assert!(game.involves(a) && game.involves(b) && !game.involves(c));

        let mut lookup = FxHashMap::default();
        lookup.insert(b, Player::new(b, crate::RatingSystem::new().new_rating()));
        assert_eq!(game.opponent(a, &lookup).map(Player::id), Some(b));
        assert!(game.opponent(b, &lookup).is_none());
        assert!(game.opponent(c, &lookup).is_none());
    }

    #[test]
    fn test_parse_result() {
        assert_eq!("0".parse::<GameResult>().unwrap(), GameResult::Draw);
        assert_eq!("1".parse::<GameResult>().unwrap(), GameResult::FirstWon);
        assert_eq!("2".parse::<GameResult>().unwrap(), GameResult::SecondWon);
        assert_eq!("1/2-1/2".parse::<GameResult>().unwrap(), GameResult::Draw);
        assert_eq!("1-0".parse::<GameResult>().unwrap(), GameResult::FirstWon);
        assert_eq!("0-1".parse::<GameResult>().unwrap(), GameResult::SecondWon);
        assert!("*".parse::<GameResult>().is_err());
    }
}
