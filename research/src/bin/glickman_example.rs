use std::error::Error as StdError;

use clap::Parser as _;
use periodic_glicko2::{
    Game, GameResult, Player, PlayerId, Rating, RatingDifference, RatingScalar, Registry,
    Volatility,
};
use periodic_glicko2_research::{config::RatingSystemOpt, init_logging};
use tracing::info;

/// Rates a player with 1500 ± 200 after a win against 1400 ± 30 and losses
/// against 1550 ± 100 and 1700 ± 300, the example from Glickman's paper.
#[derive(clap::Parser)]
struct Opt {
    #[clap(flatten)]
    rating_system: RatingSystemOpt,
}

fn main() -> Result<(), Box<dyn StdError>> {
    init_logging();
    let opt = Opt::parse();
    let rating_system = opt.rating_system.rating_system()?;

    let mut registry = Registry::new();
    let mut register = |rating: f64, deviation: f64| {
        let id = PlayerId::random();
        registry.register(Player::new(
            id,
            Rating {
                rating: RatingScalar(rating),
                deviation: RatingDifference(deviation),
                volatility: Volatility(rating_system.default_volatility()),
            },
        ))?;
        Ok::<_, periodic_glicko2::RatingError>(id)
    };

    let player = register(1500.0, 200.0)?;
    let first = register(1400.0, 30.0)?;
    let second = register(1550.0, 100.0)?;
    let third = register(1700.0, 300.0)?;

    let summary = registry.process_round(
        &rating_system,
        &[
            Game::new(player, first, GameResult::FirstWon),
            Game::new(player, second, GameResult::SecondWon),
            Game::new(player, third, GameResult::SecondWon),
        ],
    )?;
    info!(round = summary.round.0, active = summary.active, "processed round");

    let player = registry
        .get(&player)
        .ok_or(periodic_glicko2::RatingError::UnknownPlayer(player))?;
    let current = player.current();
    println!("{}", player.confidence_interval());
    println!(
        "rating: {}, deviation: {}, volatility: {}",
        current.rating.0, current.deviation.0, current.volatility.0
    );

    Ok(())
}
