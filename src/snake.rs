use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::GridSize;
use crate::error::GameError;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Anything drawn on the board at a single cell.
pub trait Positioned {
    fn position(&self) -> Position;
}

/// One body cell and the direction that last moved it there.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Segment {
    pub position: Position,
    pub facing: Direction,
}

impl Positioned for Segment {
    fn position(&self) -> Position {
        self.position
    }
}

/// Why a move ended the game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Collision {
    Wall,
    SelfIntersection,
}

/// Outcome of advancing the chain by one cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct MoveResult {
    pub head: Position,
    pub collision: Option<Collision>,
}

impl MoveResult {
    #[must_use]
    pub fn collided(self) -> bool {
        self.collision.is_some()
    }
}

/// Ordered snake body, head first.
///
/// Each segment stores the direction it moved in on the last tick. A move
/// hands every segment the direction its predecessor held before the move,
/// so the body follows the path the head has taken.
#[derive(Debug, Clone)]
pub struct SnakeChain {
    segments: Vec<Segment>,
    bounds: GridSize,
    /// Tail footprint from before the most recent move, reused by `grow`.
    vacated_tail: Segment,
}

impl SnakeChain {
    /// Creates a chain from `positions` (head first), every segment facing
    /// `facing`.
    ///
    /// An empty layout or a `facing` of [`Direction::None`] is rejected.
    /// Overlapping or off-board layouts are accepted and show up as
    /// collisions on the next move.
    pub fn new(
        positions: impl IntoIterator<Item = Position>,
        facing: Direction,
        bounds: GridSize,
    ) -> Result<Self, GameError> {
        if facing == Direction::None {
            return Err(GameError::InvalidConfiguration(
                "snake chain needs a movement direction to face".to_owned(),
            ));
        }

        let segments: Vec<Segment> = positions
            .into_iter()
            .map(|position| Segment { position, facing })
            .collect();

        let Some(&tail) = segments.last() else {
            return Err(GameError::InvalidConfiguration(
                "snake chain needs at least one segment".to_owned(),
            ));
        };

        Ok(Self {
            segments,
            bounds,
            vacated_tail: tail,
        })
    }

    /// Resolves a requested turn against the head's current facing.
    ///
    /// Repeating the current heading or reversing onto it yields
    /// [`Direction::None`], meaning "keep going straight".
    #[must_use]
    pub fn validate_direction(requested: Direction, current: Direction) -> Direction {
        if requested == current || requested == current.opposite() {
            Direction::None
        } else {
            requested
        }
    }

    /// Advances every segment by one cell and reports collisions.
    pub fn move_forward(&mut self, requested: Direction) -> MoveResult {
        let head_facing = self.head_segment().facing;
        let resolved = match Self::validate_direction(requested, head_facing) {
            Direction::None => head_facing,
            turn => turn,
        };

        self.vacated_tail = *self.tail_segment();

        let mut carried = resolved;
        for segment in &mut self.segments {
            let previous = segment.facing;
            segment.facing = carried;
            segment.position = segment.position.step(carried);
            carried = previous;
        }

        MoveResult {
            head: self.head(),
            collision: self.detect_collision(),
        }
    }

    /// Appends a segment on the cell the tail vacated during the last move.
    pub fn grow(&mut self) {
        self.segments.push(self.vacated_tail);
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.segments
            .iter()
            .any(|segment| segment.position == position)
    }

    /// Returns the collision the chain is currently in, if any.
    #[must_use]
    pub fn detect_collision(&self) -> Option<Collision> {
        if !self.head().is_within_bounds(self.bounds) {
            return Some(Collision::Wall);
        }

        let mut seen = HashSet::with_capacity(self.segments.len());
        if self
            .segments
            .iter()
            .any(|segment| !seen.insert(segment.position))
        {
            return Some(Collision::SelfIntersection);
        }

        None
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.head_segment().position
    }

    /// Returns the direction the head moved in last.
    #[must_use]
    pub fn facing(&self) -> Direction {
        self.head_segment().facing
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments from head to tail.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    fn head_segment(&self) -> &Segment {
        self.segments
            .first()
            .expect("snake chain must always contain at least one segment")
    }

    fn tail_segment(&self) -> &Segment {
        self.segments
            .last()
            .expect("snake chain must always contain at least one segment")
    }
}
