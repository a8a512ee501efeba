use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{GameConfig, GridSize};
use crate::error::GameError;
use crate::food::{Food, FoodSpawner};
use crate::input::Direction;
use crate::snake::{Collision, Segment, SnakeChain};

/// Lifecycle of one session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GamePhase {
    NotStarted,
    Running,
    GameOver,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    Running,
    Scored,
    GameOver,
}

/// Reason the game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

impl From<Collision> for DeathReason {
    fn from(collision: Collision) -> Self {
        match collision {
            Collision::Wall => Self::WallCollision,
            Collision::SelfIntersection => Self::SelfCollision,
        }
    }
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameSession<R = StdRng> {
    pub chain: SnakeChain,
    pub food: Food,
    score: u32,
    tick_interval: Duration,
    phase: GamePhase,
    death_reason: Option<DeathReason>,
    tick_count: u64,
    spawner: FoodSpawner,
    config: GameConfig,
    rng: R,
}

impl GameSession<StdRng> {
    /// Creates a session from `config`, seeding food placement from
    /// `config.seed` or from the thread rng when no seed is given.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().r#gen());
        Self::new_with_seed(config, seed)
    }

    /// Creates a deterministic session for tests and reproducible runs.
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameSession<R> {
    /// Creates a session that draws food positions from `rng`.
    pub fn with_rng(config: GameConfig, mut rng: R) -> Result<Self, GameError> {
        config.validate()?;

        let bounds = config.bounds();
        let chain = SnakeChain::new(
            config.initial_segments.iter().copied(),
            config.initial_facing,
            bounds,
        )?;
        let spawner = FoodSpawner::new(bounds, config.max_food_attempts);
        let food = spawner.spawn(&mut rng, &chain)?;

        Ok(Self {
            chain,
            food,
            score: 0,
            tick_interval: config.initial_tick_interval(),
            phase: GamePhase::NotStarted,
            death_reason: None,
            tick_count: 0,
            spawner,
            config,
            rng,
        })
    }

    /// Moves a fresh session into [`GamePhase::Running`]. Has no effect in
    /// any other phase.
    pub fn start(&mut self) {
        if self.phase == GamePhase::NotStarted {
            info!(
                "session started on {}x{} board",
                self.config.width, self.config.height
            );
            self.phase = GamePhase::Running;
        }
    }

    /// Advances simulation by one gameplay tick.
    ///
    /// A fresh session starts on its first tick. Once the game is over every
    /// further tick returns [`TickOutcome::GameOver`] without touching state.
    /// A food placement failure ends the session and is returned as `Err`.
    pub fn tick(&mut self, pending: Direction) -> Result<TickOutcome, GameError> {
        match self.phase {
            GamePhase::GameOver => return Ok(TickOutcome::GameOver),
            GamePhase::NotStarted => self.start(),
            GamePhase::Running => {}
        }

        self.tick_count += 1;
        let moved = self.chain.move_forward(pending);
        debug!(
            "tick {}: head at ({}, {})",
            self.tick_count, moved.head.x, moved.head.y
        );

        if let Some(collision) = moved.collision {
            self.phase = GamePhase::GameOver;
            self.death_reason = Some(collision.into());
            info!(
                "game over after {} ticks ({collision:?}), score {}",
                self.tick_count, self.score
            );
            return Ok(TickOutcome::GameOver);
        }

        if moved.head != self.food.position {
            return Ok(TickOutcome::Running);
        }

        self.chain.grow();
        self.score += 1;
        self.tick_interval = self
            .tick_interval
            .saturating_sub(self.config.tick_interval_step())
            .max(self.config.min_tick_interval());
        info!(
            "scored {} (length {}, interval {}ms)",
            self.score,
            self.chain.len(),
            self.tick_interval.as_millis()
        );

        match self.spawner.spawn(&mut self.rng, &self.chain) {
            Ok(food) => {
                self.food = food;
                Ok(TickOutcome::Scored)
            }
            Err(error) => {
                self.phase = GamePhase::GameOver;
                Err(error)
            }
        }
    }

    /// Builds a fresh session from the same configuration, continuing this
    /// session's rng so the new board differs.
    pub fn restart(self) -> Result<Self, GameError> {
        Self::with_rng(self.config, self.rng)
    }
}

impl<R> GameSession<R> {
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        self.chain.segments()
    }

    #[must_use]
    pub fn food(&self) -> Food {
        self.food
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Time the driver should wait between ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.config.bounds()
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::config::GameConfig;
    use crate::error::GameError;
    use crate::food::Food;
    use crate::input::Direction;
    use crate::snake::{Position, SnakeChain};

    use super::{DeathReason, GamePhase, GameSession, TickOutcome};

    fn session(seed: u64) -> GameSession {
        GameSession::new_with_seed(GameConfig::default(), seed).expect("default config is valid")
    }

    #[test]
    fn new_session_waits_to_start() {
        let mut state = session(1);

        assert_eq!(state.phase(), GamePhase::NotStarted);
        assert_eq!(state.score(), 0);
        assert_eq!(state.tick_interval(), Duration::from_millis(500));
        assert!(!state.chain.occupies(state.food().position));

        state.start();
        assert_eq!(state.phase(), GamePhase::Running);
    }

    #[test]
    fn first_tick_starts_the_session() {
        let mut state = session(2);
        state.food = Food::new(Position { x: 9, y: 19 });

        let outcome = state.tick(Direction::None).expect("tick should succeed");

        assert_eq!(outcome, TickOutcome::Running);
        assert_eq!(state.phase(), GamePhase::Running);
        assert_eq!(state.chain.head(), Position { x: 3, y: 0 });
    }

    #[test]
    fn invalid_configuration_fails_fast() {
        let config = GameConfig {
            height: 0,
            ..GameConfig::default()
        };

        assert!(matches!(
            GameSession::new_with_seed(config, 1),
            Err(GameError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn snake_grows_after_eating_food() {
        let mut state = session(3);
        state.food = Food::new(Position { x: 4, y: 0 });

        assert_eq!(state.tick(Direction::None), Ok(TickOutcome::Running));
        assert_eq!(state.chain.len(), 3);

        assert_eq!(state.tick(Direction::None), Ok(TickOutcome::Scored));
        assert_eq!(state.chain.len(), 4);
        assert_eq!(state.score(), 1);
        assert!(!state.chain.occupies(state.food().position));
    }

    #[test]
    fn tick_interval_is_floored() {
        let config = GameConfig {
            initial_tick_interval_ms: 60,
            tick_interval_step_ms: 15,
            min_tick_interval_ms: 50,
            ..GameConfig::default()
        };
        let mut state = GameSession::new_with_seed(config, 4).expect("config is valid");
        state.food = Food::new(Position { x: 3, y: 0 });

        assert_eq!(state.tick(Direction::None), Ok(TickOutcome::Scored));

        assert_eq!(state.tick_interval(), Duration::from_millis(50));
    }

    #[test]
    fn wall_collision_sets_game_over() {
        let mut state = session(5);
        state.food = Food::new(Position { x: 9, y: 19 });

        let outcome = state.tick(Direction::Up).expect("tick should succeed");

        assert_eq!(outcome, TickOutcome::GameOver);
        assert_eq!(state.phase(), GamePhase::GameOver);
        assert_eq!(state.death_reason(), Some(DeathReason::WallCollision));
    }

    #[test]
    fn self_collision_sets_game_over() {
        let mut state = session(6);
        state.chain = SnakeChain::new(
            [
                Position { x: 2, y: 2 },
                Position { x: 3, y: 2 },
                Position { x: 3, y: 3 },
                Position { x: 2, y: 3 },
                Position { x: 1, y: 3 },
                Position { x: 1, y: 2 },
            ],
            Direction::Left,
            state.bounds(),
        )
        .expect("layout should build");
        state.food = Food::new(Position { x: 9, y: 19 });

        assert_eq!(state.tick(Direction::Down), Ok(TickOutcome::GameOver));
        assert_eq!(state.death_reason(), Some(DeathReason::SelfCollision));
    }

    #[test]
    fn game_over_is_terminal() {
        let mut state = session(7);
        state.food = Food::new(Position { x: 9, y: 19 });
        assert_eq!(state.tick(Direction::Up), Ok(TickOutcome::GameOver));
        let head = state.chain.head();
        let ticks = state.tick_count();

        for direction in [Direction::None, Direction::Down, Direction::Right] {
            assert_eq!(state.tick(direction), Ok(TickOutcome::GameOver));
        }

        assert_eq!(state.chain.head(), head);
        assert_eq!(state.tick_count(), ticks);
        assert_eq!(state.phase(), GamePhase::GameOver);
    }

    #[test]
    fn exhausted_food_placement_ends_the_session() {
        // 4x1 board: eating the food fills every cell.
        let config = GameConfig {
            width: 4,
            height: 1,
            ..GameConfig::default()
        };
        let mut state = GameSession::new_with_seed(config, 8).expect("config is valid");
        assert_eq!(state.food().position, Position { x: 3, y: 0 });

        assert_eq!(
            state.tick(Direction::None),
            Err(GameError::FoodPlacementExhausted { attempts: 0 })
        );
        assert_eq!(state.phase(), GamePhase::GameOver);
        assert_eq!(state.tick(Direction::None), Ok(TickOutcome::GameOver));
    }

    #[test]
    fn restart_begins_a_fresh_session() {
        let mut state = session(9);
        state.food = Food::new(Position { x: 9, y: 19 });
        assert_eq!(state.tick(Direction::Up), Ok(TickOutcome::GameOver));

        let state = state.restart().expect("restart should succeed");

        assert_eq!(state.phase(), GamePhase::NotStarted);
        assert_eq!(state.score(), 0);
        assert_eq!(state.chain.head(), Position { x: 2, y: 0 });
        assert_eq!(state.death_reason(), None);
    }
}
