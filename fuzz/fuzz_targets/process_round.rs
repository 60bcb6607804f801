#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use periodic_glicko2::{
    Game, GameResult, Player, PlayerId, Rating, RatingDifference, RatingScalar, RatingSystem,
    Registry, Volatility,
};

#[derive(Arbitrary, Debug)]
struct ArbitraryRating {
    rating: f64,
    deviation: f64,
    volatility: f64,
}

impl ArbitraryRating {
    fn into_clamped(self) -> Option<Rating> {
        if !self.rating.is_finite() || !self.deviation.is_finite() || !self.volatility.is_finite() {
            None
        } else {
            Some(Rating {
                rating: RatingScalar(self.rating.clamp(-10000.0, 10000.0)),
                deviation: RatingDifference(self.deviation.clamp(1.0, 1000.0)),
                volatility: Volatility(self.volatility.clamp(0.001, 1.0)),
            })
        }
    }
}

#[derive(Arbitrary, Debug)]
struct Encounter {
    first: u8,
    second: u8,
    result: u8,
}

#[derive(Arbitrary, Debug)]
struct Input {
    players: Vec<ArbitraryRating>,
    encounters: Vec<Encounter>,
    tau: f64,
}

fn assert_rating(rating: &Rating) {
    assert!(!f64::from(rating.rating).is_nan());
    assert!(!f64::from(rating.deviation).is_nan());
    assert!(!f64::from(rating.volatility).is_nan());
}

fuzz_target!(|input: Input| {
    let ratings: Vec<Rating> = input
        .players
        .into_iter()
        .filter_map(ArbitraryRating::into_clamped)
        .collect();
    if ratings.is_empty() || !input.tau.is_finite() {
        return;
    }

    let Ok(rating_system) = RatingSystem::builder()
        .tau(input.tau.clamp(0.01, 2.0))
        .max_iterations(1000)
        .build()
    else {
        return;
    };

    let mut registry = Registry::new();
    let ids: Vec<PlayerId> = ratings
        .into_iter()
        .map(|rating| {
            let id = PlayerId::random();
            registry.register(Player::new(id, rating)).expect("fresh id");
            id
        })
        .collect();

    let games: Vec<Game> = input
        .encounters
        .iter()
        .map(|e| {
            Game::new(
                ids[usize::from(e.first) % ids.len()],
                ids[usize::from(e.second) % ids.len()],
                match e.result % 3 {
                    0 => GameResult::Draw,
                    1 => GameResult::FirstWon,
                    _ => GameResult::SecondWon,
                },
            )
        })
        .collect();

    // Solver errors are reported, never panics or NaN ratings.
    if registry.process_round(&rating_system, &games).is_ok() {
        for player in registry.iter() {
            assert_eq!(player.history().len(), 2);
            assert_rating(player.current());
        }
    }
});
