use std::time::Duration;

use grid_snake::config::GameConfig;
use grid_snake::food::Food;
use grid_snake::game::{DeathReason, GamePhase, GameSession, TickOutcome};
use grid_snake::input::Direction;
use grid_snake::snake::Position;
use pretty_assertions::assert_eq;

fn positions(session: &GameSession) -> Vec<Position> {
    session.segments().iter().map(|s| s.position).collect()
}

#[test]
fn straight_run_into_food_scores() {
    let mut session =
        GameSession::new_with_seed(GameConfig::default(), 42).expect("default config is valid");
    session.food = Food::new(Position { x: 5, y: 0 });
    let interval = session.tick_interval();

    assert_eq!(session.tick(Direction::None), Ok(TickOutcome::Running));
    assert_eq!(session.tick(Direction::None), Ok(TickOutcome::Running));
    assert_eq!(session.tick(Direction::None), Ok(TickOutcome::Scored));

    assert_eq!(session.chain.head(), Position { x: 5, y: 0 });
    assert_eq!(session.chain.len(), 4);
    assert_eq!(session.score(), 1);
    assert_eq!(
        session.tick_interval(),
        interval - Duration::from_millis(10)
    );
    assert!(!session.chain.occupies(session.food().position));
    assert!(session.food().position.is_within_bounds(session.bounds()));
    assert_eq!(
        positions(&session),
        vec![
            Position { x: 5, y: 0 },
            Position { x: 4, y: 0 },
            Position { x: 3, y: 0 },
            Position { x: 2, y: 0 },
        ]
    );
}

#[test]
fn running_off_the_right_edge_ends_the_game() {
    let config = GameConfig {
        initial_segments: vec![
            Position { x: 9, y: 4 },
            Position { x: 8, y: 4 },
            Position { x: 7, y: 4 },
        ],
        ..GameConfig::default()
    };
    let mut session = GameSession::new_with_seed(config, 7).expect("config is valid");
    session.food = Food::new(Position { x: 0, y: 19 });

    assert_eq!(session.tick(Direction::None), Ok(TickOutcome::GameOver));
    assert_eq!(session.phase(), GamePhase::GameOver);
    assert_eq!(session.death_reason(), Some(DeathReason::WallCollision));

    let frozen = positions(&session);
    for _ in 0..3 {
        assert_eq!(session.tick(Direction::Down), Ok(TickOutcome::GameOver));
        assert_eq!(session.phase(), GamePhase::GameOver);
    }
    assert_eq!(positions(&session), frozen);
}

#[test]
fn rapid_reversal_is_dropped_for_that_tick_only() {
    let mut session =
        GameSession::new_with_seed(GameConfig::default(), 3).expect("default config is valid");
    session.food = Food::new(Position { x: 0, y: 19 });

    // Reversal is ignored, the snake keeps heading right.
    assert_eq!(session.tick(Direction::Left), Ok(TickOutcome::Running));
    assert_eq!(session.chain.head(), Position { x: 3, y: 0 });

    // Nothing was buffered: the next tick also continues straight.
    assert_eq!(session.tick(Direction::None), Ok(TickOutcome::Running));
    assert_eq!(session.chain.head(), Position { x: 4, y: 0 });

    assert_eq!(session.tick(Direction::Down), Ok(TickOutcome::Running));
    assert_eq!(session.tick(Direction::Left), Ok(TickOutcome::Running));
    assert_eq!(session.chain.head(), Position { x: 3, y: 1 });
    assert_eq!(
        positions(&session),
        vec![
            Position { x: 3, y: 1 },
            Position { x: 4, y: 1 },
            Position { x: 4, y: 0 },
        ]
    );
}

#[test]
fn seeded_sessions_place_food_identically() {
    let mut first =
        GameSession::new_with_seed(GameConfig::default(), 99).expect("default config is valid");
    let mut second =
        GameSession::new_with_seed(GameConfig::default(), 99).expect("default config is valid");
    assert_eq!(first.food(), second.food());

    let target = Food::new(Position { x: 3, y: 0 });
    first.food = target;
    second.food = target;

    assert_eq!(first.tick(Direction::None), Ok(TickOutcome::Scored));
    assert_eq!(second.tick(Direction::None), Ok(TickOutcome::Scored));
    assert_eq!(first.food(), second.food());
}
