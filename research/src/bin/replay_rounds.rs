use std::{error::Error as StdError, io, io::Write};

use clap::Parser as _;
use periodic_glicko2::{deviance, Game, RatingSystem, Registry, Round};
use periodic_glicko2_research::{
    config::RatingSystemOpt, encounter::RawEncounter, init_logging, player::PlayerIds,
};
use tracing::{debug, info};

/// Reads `round,first,second,result` rows from stdin, rates each round and
/// writes the final leaderboard as CSV to stdout.
#[derive(clap::Parser)]
struct Opt {
    #[clap(flatten)]
    rating_system: RatingSystemOpt,
}

#[derive(Default)]
struct Stats {
    total_deviance: f64,
    total_games: u64,
}

impl Stats {
    fn avg_deviance(&self) -> f64 {
        self.total_deviance / self.total_games as f64
    }
}

fn process_batch(
    rating_system: &RatingSystem,
    registry: &mut Registry,
    batch: &mut Vec<Game>,
    stats: &mut Stats,
) -> Result<(), Box<dyn StdError>> {
    for game in batch.iter() {
        let first = registry.get(&game.first());
        let second = registry.get(&game.second());
        let (Some(first), Some(second)) = (first, second) else {
            continue;
        };
        stats.total_deviance += deviance(
            rating_system.expected_score(first.current(), second.current()),
            game.result().first_score(),
        );
        stats.total_games += 1;
    }

    let summary = registry.process_round(rating_system, batch)?;
    debug!(
        round = summary.round.0,
        games = batch.len(),
        active = summary.active,
        inactive = summary.inactive,
        "processed round"
    );
    batch.clear();
    Ok(())
}

fn main() -> Result<(), Box<dyn StdError>> {
    init_logging();
    let opt = Opt::parse();
    let rating_system = opt.rating_system.rating_system()?;

    let mut reader = csv::Reader::from_reader(io::stdin().lock());

    let mut registry = Registry::new();
    let mut players = PlayerIds::default();
    let mut stats = Stats::default();
    let mut batch = Vec::new();
    let mut current_round = Round(1);

    for encounter in reader.deserialize() {
        let encounter: RawEncounter = encounter?;
        encounter.check_order(current_round)?;

        // Rounds without any rows still decay deviations.
        while current_round < encounter.round() {
            process_batch(&rating_system, &mut registry, &mut batch, &mut stats)?;
            current_round = current_round.next();
        }

        let first = players.get_or_insert(&encounter.first, &mut registry, &rating_system);
        let second = players.get_or_insert(&encounter.second, &mut registry, &rating_system);
        batch.push(encounter.to_game(first, second));
    }

    if !batch.is_empty() {
        process_batch(&rating_system, &mut registry, &mut batch, &mut stats)?;
    }

    info!(
        players = players.len(),
        rounds = registry.round().0,
        games = stats.total_games,
        "replay finished"
    );

    let mut leaderboard: Vec<_> = players
        .iter()
        .filter_map(|(name, id)| registry.get(&id).map(|player| (name, player)))
        .collect();
    leaderboard.sort_by(|(_, a), (_, b)| b.rating().0.total_cmp(&a.rating().0));

    let mut out = io::stdout().lock();
    writeln!(out, "player,rating,deviation,volatility,low,high")?;
    for (name, player) in leaderboard {
        let interval = player.confidence_interval();
        writeln!(
            out,
            "{},{:.2},{:.2},{:.6},{:.2},{:.2}",
            name,
            player.rating().0,
            player.deviation().0,
            player.volatility().0,
            interval.low.0,
            interval.high.0
        )?;
    }
    writeln!(out, "# ---")?;
    writeln!(out, "# Distinct players: {}", players.len())?;
    writeln!(out, "# Processed rounds: {}", registry.round().0)?;
    writeln!(out, "# Processed games: {}", stats.total_games)?;
    if stats.total_games > 0 {
        writeln!(out, "# Avg deviance: {}", stats.avg_deviance())?;
    }

    Ok(())
}
