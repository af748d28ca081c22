//! Go engine data structures.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Smallest supported board side.
pub const MIN_BOARD_SIZE: usize = 5;
/// Largest supported board side.
pub const MAX_BOARD_SIZE: usize = 25;
/// Board side used when nothing else is configured.
pub const DEFAULT_BOARD_SIZE: usize = 9;

/// Stone color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stone {
    Black,
    White,
}

impl Stone {
    pub fn opponent(&self) -> Self {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stone::Black => "Black",
            Stone::White => "White",
        }
    }

    /// Single-character board symbol.
    pub fn symbol(&self) -> char {
        match self {
            Stone::Black => 'X',
            Stone::White => 'O',
        }
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A move in Go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoMove {
    Place(usize, usize),
    Pass,
}

/// Why a move was rejected. Rejection is an ordinary outcome, not a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum IllegalMove {
    #[error("that point is off the board")]
    OutOfBounds,
    #[error("that point is already occupied")]
    Occupied,
    #[error("suicide is not allowed")]
    Suicide,
    #[error("ko: the previous position may not be repeated")]
    Ko,
}

/// Contract errors raised by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("board size {0} is not supported (expected {}..={})", MIN_BOARD_SIZE, MAX_BOARD_SIZE)]
    InvalidSize(usize),
    #[error("malformed board text: {0}")]
    Malformed(String),
}

/// Result of a finished Go game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoResult {
    Win(Stone),
    Draw,
}

impl GoResult {
    pub fn winner(&self) -> Option<Stone> {
        match self {
            GoResult::Win(stone) => Some(*stone),
            GoResult::Draw => None,
        }
    }
}

/// Check that a board side is within the supported range.
pub fn check_board_size(size: usize) -> Result<usize, GameError> {
    if (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(GameError::InvalidSize(size))
    }
}
