use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that prevent a session from being created or continued.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("no free cell for food after {attempts} attempts")]
    FoodPlacementExhausted { attempts: u32 },
}

/// Failures while reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Game(#[from] GameError),
}
