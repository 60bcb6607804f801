use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{
    error::RatingError,
    game::Game,
    player::{Player, PlayerId, PlayerLookup},
    rating_system::{RatedPeriod, RatingSystem},
    round::Round,
};

/// Registered players by identity.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    players: FxHashMap<PlayerId, Player>,
    round: Round,
}

/// Outcome of processing a round for all registered players.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    pub round: Round,
    /// Players that had at least one game against a registered opponent.
    pub active: usize,
    /// Players whose deviation only decayed.
    pub inactive: usize,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    /// Adds a player. Fails if the identity is already taken or the current
    /// rating could never be updated.
    pub fn register(&mut self, player: Player) -> Result<&Player, RatingError> {
        let id = player.id();
        let current = *player.current();
        if !current.is_valid() {
            return Err(RatingError::InvalidRating {
                player: id,
                rating: current,
            });
        }
        if self.players.contains_key(&id) {
            return Err(RatingError::DuplicatePlayer(id));
        }
        Ok(self.players.entry(id).or_insert(player))
    }

    /// Registers a new player with a random identity and the default rating
    /// of `rating_system`.
    pub fn create_player(&mut self, rating_system: &RatingSystem) -> PlayerId {
        let id = PlayerId::random();
        self.players.insert(id, rating_system.new_player(id));
        id
    }

    pub fn get(&self, id: &PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.players.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Number of rounds processed so far.
    pub fn round(&self) -> Round {
        self.round
    }

    /// Processes a rating period for every registered player.
    ///
    /// All new ratings are computed from the ratings before the round and
    /// appended only once every player was rated. If any player fails,
    /// no history is changed.
    pub fn process_round(
        &mut self,
        rating_system: &RatingSystem,
        games: &[Game],
    ) -> Result<RoundSummary, RatingError> {
        let snapshot: &Registry = self;
        let updates: Vec<(PlayerId, RatedPeriod)> = snapshot
            .players
            .par_iter()
            .map(|(id, player)| {
                rating_system
                    .rate_period(player, games, snapshot)
                    .map(|period| (*id, period))
            })
            .collect::<Result<_, RatingError>>()?;

        let mut active = 0;
        for (id, period) in updates {
            if let Some(player) = self.players.get_mut(&id) {
                if period.games > 0 {
                    active += 1;
                }
                player.push(period.rating);
            }
        }

        self.round = self.round.next();
        let summary = RoundSummary {
            round: self.round,
            active,
            inactive: self.players.len() - active,
        };
        debug!(round = summary.round.0, active, inactive = summary.inactive, "processed round");
        Ok(summary)
    }
}

impl PlayerLookup for Registry {
    fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.get(id)
    }
}
