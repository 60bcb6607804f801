use periodic_glicko2::{
    Game, GameResult, MissingOpponentPolicy, Player, PlayerId, Rating, RatingDifference,
    RatingError, RatingScalar, RatingSystem, Registry, Round, Volatility,
};

fn rating(rating: f64, deviation: f64) -> Rating {
    Rating {
        rating: RatingScalar(rating),
        deviation: RatingDifference(deviation),
        volatility: Volatility(0.06),
    }
}

fn register(registry: &mut Registry, initial: Rating) -> PlayerId {
    let id = PlayerId::random();
    registry.register(Player::new(id, initial)).unwrap();
    id
}

#[test]
fn glickman_example() {
    let rating_system = RatingSystem::new();
    let mut registry = Registry::new();
    let a = register(&mut registry, rating(1500.0, 200.0));
    let b = register(&mut registry, rating(1400.0, 30.0));
    let c = register(&mut registry, rating(1550.0, 100.0));
    let d = register(&mut registry, rating(1700.0, 300.0));

    registry
        .process_round(
            &rating_system,
            &[
                Game::new(a, b, GameResult::FirstWon),
                Game::new(a, c, GameResult::SecondWon),
                Game::new(a, d, GameResult::SecondWon),
            ],
        )
        .unwrap();

    let a = registry.get(&a).unwrap();
    assert!((a.rating().0 - 1464.0507).abs() < 1e-4);
    assert!((a.deviation().0 - 151.5165).abs() < 1e-4);
    assert!((a.volatility().0 - 0.059996).abs() < 1e-6);
    assert_eq!(
        a.confidence_interval().to_string(),
        "1464.05 ± 303.03 ( 1161.02 - 1767.08 )"
    );
}

#[test]
fn draw_then_losses() {
    let rating_system = RatingSystem::new();
    let mut registry = Registry::new();
    let a = register(&mut registry, rating(1500.0, 200.0));
    let b = register(&mut registry, rating(1400.0, 30.0));
    let c = register(&mut registry, rating(1550.0, 100.0));
    let d = register(&mut registry, rating(1700.0, 300.0));

    registry
        .process_round(
            &rating_system,
            &[
                Game::new(a, b, GameResult::Draw),
                Game::new(a, c, GameResult::SecondWon),
                Game::new(a, d, GameResult::SecondWon),
            ],
        )
        .unwrap();

    let a = registry.get(&a).unwrap();
    assert!((a.rating().0 - 1398.2718).abs() < 1e-3);
    assert!(a.deviation() < RatingDifference(200.0));
    assert!((a.volatility().0 - 0.06).abs() < 1e-4);
}

#[test]
fn history_is_append_only() {
    let rating_system = RatingSystem::new();
    let mut registry = Registry::new();
    let a = registry.create_player(&rating_system);
    let b = registry.create_player(&rating_system);

    let rounds = [
        vec![Game::new(a, b, GameResult::FirstWon)],
        vec![],
        vec![Game::new(a, b, GameResult::Draw), Game::new(b, a, GameResult::FirstWon)],
    ];

    for (i, games) in rounds.iter().enumerate() {
        let before: Vec<Rating> = registry.get(&a).unwrap().history().to_vec();
        registry.process_round(&rating_system, games).unwrap();

        let player = registry.get(&a).unwrap();
        assert_eq!(player.round(), Round(i + 1));
        assert_eq!(player.history().len(), before.len() + 1);
        assert_eq!(&player.history()[..before.len()], &before[..]);
        assert_eq!(player.ratings().count(), player.deviations().count());
        assert_eq!(player.ratings().count(), player.volatilities().count());
    }

    assert_eq!(registry.round(), Round(3));
}

#[test]
fn single_game_between_new_players() {
    let rating_system = RatingSystem::new();
    let mut registry = Registry::new();
    let a = registry.create_player(&rating_system);
    let b = registry.create_player(&rating_system);

    registry
        .process_round(&rating_system, &[Game::new(a, b, GameResult::FirstWon)])
        .unwrap();

    let a = registry.get(&a).unwrap();
    let b = registry.get(&b).unwrap();
    assert!((a.rating().0 - 1662.3109).abs() < 1e-3);
    assert!((a.deviation().0 - 290.3190).abs() < 1e-3);
    assert!((a.rating().0 - 1500.0 + b.rating().0 - 1500.0).abs() < 1e-9);
    assert_eq!(a.deviation(), b.deviation());
}

#[test]
fn strict_mode_rejects_unknown_opponents() {
    let rating_system = RatingSystem::builder()
        .missing_opponents(MissingOpponentPolicy::Reject)
        .build()
        .unwrap();
    let mut registry = Registry::new();
    let a = registry.create_player(&rating_system);
    let stranger = PlayerId::random();

    let err = registry
        .process_round(&rating_system, &[Game::new(a, stranger, GameResult::Draw)])
        .unwrap_err();
    assert_eq!(
        err,
        RatingError::OpponentNotFound {
            player: a,
            opponent: stranger
        }
    );
    assert_eq!(registry.get(&a).unwrap().history().len(), 1);
}

#[test]
fn order_of_games_does_not_matter() {
    let rating_system = RatingSystem::new();
    let mut registry = Registry::new();
    let players: Vec<PlayerId> = [(1500.0, 200.0), (1400.0, 30.0), (1550.0, 100.0), (1700.0, 300.0)]
        .into_iter()
        .map(|(r, d)| register(&mut registry, rating(r, d)))
        .collect();

    let games = vec![
        Game::new(players[0], players[1], GameResult::FirstWon),
        Game::new(players[1], players[2], GameResult::Draw),
        Game::new(players[2], players[3], GameResult::SecondWon),
        Game::new(players[3], players[0], GameResult::FirstWon),
    ];
    let mut reversed = games.clone();
    reversed.reverse();

    let mut forward = registry.clone();
    forward.process_round(&rating_system, &games).unwrap();
    let mut backward = registry;
    backward.process_round(&rating_system, &reversed).unwrap();

    for id in &players {
        let f = forward.get(id).unwrap().current();
        let b = backward.get(id).unwrap().current();
        assert!((f.rating.0 - b.rating.0).abs() < 1e-9);
        assert!((f.deviation.0 - b.deviation.0).abs() < 1e-9);
        assert!((f.volatility.0 - b.volatility.0).abs() < 1e-12);
    }
}
