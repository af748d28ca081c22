//! Go rules engine: board, groups and liberties, move validation, scoring.

pub mod board;
pub mod game;
pub mod group;
pub mod rules;
pub mod scoring;
pub mod types;

pub use board::Board;
pub use game::{new_game, GameState};
pub use group::{count_liberties, find_group, has_liberty, liberties, liberties_at};
pub use rules::{place_stone, validate, Placement};
pub use scoring::{regions, score_board, Region, Score, Tally};
pub use types::*;
