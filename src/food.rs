use rand::Rng;

use crate::config::GridSize;
use crate::error::GameError;
use crate::snake::{Position, Positioned, SnakeChain};

/// Food currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

impl Positioned for Food {
    fn position(&self) -> Position {
        self.position
    }
}

/// Picks random free cells for food by rejection sampling.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct FoodSpawner {
    bounds: GridSize,
    max_attempts: u32,
}

impl FoodSpawner {
    #[must_use]
    pub fn new(bounds: GridSize, max_attempts: u32) -> Self {
        Self {
            bounds,
            max_attempts,
        }
    }

    /// Samples uniformly random cells until one is not occupied by `chain`.
    ///
    /// Fails with [`GameError::FoodPlacementExhausted`] once `max_attempts`
    /// samples have all landed on the chain, or immediately when the chain
    /// covers every cell.
    pub fn place<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        chain: &SnakeChain,
    ) -> Result<Position, GameError> {
        if self.bounds.width == 0
            || self.bounds.height == 0
            || chain.len() >= self.bounds.total_cells()
        {
            return Err(GameError::FoodPlacementExhausted { attempts: 0 });
        }

        for _ in 0..self.max_attempts {
            let position = Position {
                x: rng.gen_range(0..i32::from(self.bounds.width)),
                y: rng.gen_range(0..i32::from(self.bounds.height)),
            };
            if !chain.occupies(position) {
                return Ok(position);
            }
        }

        Err(GameError::FoodPlacementExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Places a new [`Food`] on a free cell.
    pub fn spawn<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        chain: &SnakeChain,
    ) -> Result<Food, GameError> {
        self.place(rng, chain).map(Food::new)
    }
}
