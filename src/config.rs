use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, GameError};
use crate::input::Direction;
use crate::snake::Position;

const APP_DIR_NAME: &str = "grid-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default board width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 10;

/// Default board height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Tick interval at the start of a session, in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 500;

/// Amount the tick interval shrinks per food eaten, in milliseconds.
pub const DEFAULT_TICK_INTERVAL_STEP_MS: u64 = 10;

/// Floor for the tick interval, in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 50;

/// Upper bound on random samples when placing food.
pub const DEFAULT_MAX_FOOD_ATTEMPTS: u32 = 10_000;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// Everything needed to construct a [`GameSession`](crate::game::GameSession).
///
/// Missing fields in a config file fall back to the defaults below.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    pub initial_tick_interval_ms: u64,
    pub tick_interval_step_ms: u64,
    pub min_tick_interval_ms: u64,
    pub max_food_attempts: u32,
    /// Seed for food placement. A random seed is drawn when absent.
    pub seed: Option<u64>,
    /// Starting cells, head first.
    pub initial_segments: Vec<Position>,
    pub initial_facing: Direction,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            initial_tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            tick_interval_step_ms: DEFAULT_TICK_INTERVAL_STEP_MS,
            min_tick_interval_ms: MIN_TICK_INTERVAL_MS,
            max_food_attempts: DEFAULT_MAX_FOOD_ATTEMPTS,
            seed: None,
            initial_segments: vec![
                Position { x: 2, y: 0 },
                Position { x: 1, y: 0 },
                Position { x: 0, y: 0 },
            ],
            initial_facing: Direction::Right,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn bounds(&self) -> GridSize {
        GridSize {
            width: self.width,
            height: self.height,
        }
    }

    #[must_use]
    pub fn initial_tick_interval(&self) -> Duration {
        Duration::from_millis(self.initial_tick_interval_ms)
    }

    #[must_use]
    pub fn tick_interval_step(&self) -> Duration {
        Duration::from_millis(self.tick_interval_step_ms)
    }

    #[must_use]
    pub fn min_tick_interval(&self) -> Duration {
        Duration::from_millis(self.min_tick_interval_ms)
    }

    /// Checks board dimensions, the starting layout and the pacing values.
    pub fn validate(&self) -> Result<(), GameError> {
        self.check().map_err(|reason| {
            warn!("rejected configuration: {reason}");
            GameError::InvalidConfiguration(reason)
        })
    }

    fn check(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "board dimensions must be positive, got {}x{}",
                self.width, self.height
            ));
        }

        if self.initial_segments.is_empty() {
            return Err("initial segment layout is empty".to_owned());
        }

        if self.initial_facing == Direction::None {
            return Err("initial facing must be a movement direction".to_owned());
        }

        let bounds = self.bounds();
        let mut seen = HashSet::with_capacity(self.initial_segments.len());
        for &position in &self.initial_segments {
            if !position.is_within_bounds(bounds) {
                return Err(format!(
                    "initial segment ({}, {}) lies outside the {}x{} board",
                    position.x, position.y, self.width, self.height
                ));
            }
            if !seen.insert(position) {
                return Err(format!(
                    "initial segments overlap at ({}, {})",
                    position.x, position.y
                ));
            }
        }

        if self.initial_segments.len() >= bounds.total_cells() {
            return Err("initial layout leaves no free cell for food".to_owned());
        }

        if self.initial_tick_interval_ms == 0 || self.min_tick_interval_ms == 0 {
            return Err("tick intervals must be positive".to_owned());
        }

        if self.min_tick_interval_ms > self.initial_tick_interval_ms {
            return Err(format!(
                "minimum tick interval {}ms exceeds initial interval {}ms",
                self.min_tick_interval_ms, self.initial_tick_interval_ms
            ));
        }

        if self.max_food_attempts == 0 {
            return Err("max_food_attempts must be positive".to_owned());
        }

        Ok(())
    }
}

/// Returns the platform-correct config file path.
#[must_use]
pub fn config_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    base
}

/// Loads the configuration from `path`.
///
/// Returns the defaults when the file does not exist. Returns `Err` when the
/// file exists but cannot be read or parsed, or when its values are invalid.
pub fn load_config(path: &Path) -> Result<GameConfig, ConfigError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(GameConfig::default()),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_owned(),
                source,
            });
        }
    };

    let config: GameConfig = serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
        path: path.to_owned(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}
