use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use serde::{Deserialize, Serialize};

/// Movement directions for the snake. `None` means "no change requested".
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    None,
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    /// Returns the opposite direction. `None` has no opposite.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::None => Self::None,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the `(dx, dy)` grid offset of one step in this direction.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::None => (0, 0),
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// High-level input events consumed by the driver loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Confirm,
    Quit,
}

impl GameInput {
    /// Maps a key press to a game input. Returns `None` for unbound keys.
    #[must_use]
    pub fn from_key_event(key: KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let input = match key.code {
            KeyCode::Up | KeyCode::Char('w' | 'W') => Self::Direction(Direction::Up),
            KeyCode::Down | KeyCode::Char('s' | 'S') => Self::Direction(Direction::Down),
            KeyCode::Left | KeyCode::Char('a' | 'A') => Self::Direction(Direction::Left),
            KeyCode::Right | KeyCode::Char('d' | 'D') => Self::Direction(Direction::Right),
            KeyCode::Enter | KeyCode::Char(' ') => Self::Confirm,
            KeyCode::Esc | KeyCode::Char('q' | 'Q') => Self::Quit,
            _ => return None,
        };
        Some(input)
    }
}

/// Polls the terminal for keyboard input.
#[derive(Debug, Clone, Copy)]
pub struct InputHandler {
    poll_timeout: Duration,
}

impl InputHandler {
    #[must_use]
    pub fn new(poll_timeout: Duration) -> Self {
        Self { poll_timeout }
    }

    /// Waits up to the poll timeout for one key press and maps it.
    pub fn poll_input(&mut self) -> io::Result<Option<GameInput>> {
        if !event::poll(self.poll_timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => Ok(GameInput::from_key_event(key)),
            _ => Ok(None),
        }
    }
}

/// Holds at most one direction between ticks.
///
/// The first direction pressed after a tick wins; later presses are dropped
/// until the slot is taken by the next tick.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct PendingDirection {
    slot: Direction,
}

impl PendingDirection {
    /// Records `direction` unless one is already pending.
    pub fn offer(&mut self, direction: Direction) {
        if self.slot == Direction::None {
            self.slot = direction;
        }
    }

    /// Returns the pending direction and clears the slot.
    pub fn take(&mut self) -> Direction {
        std::mem::take(&mut self.slot)
    }
}
