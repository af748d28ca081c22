//! Goban - Two-Player Go Library
//!
//! The rules engine lives in [`engine`]; everything else is the terminal
//! front end built around it.

pub mod config;
pub mod coords;
pub mod engine;
pub mod input;
pub mod logging;
pub mod session;

// UI internals stay private; only the frame entry point is exported
mod ui;

pub use engine::{new_game, Board, GameState, GoMove, GoResult, IllegalMove, Score, Stone};
pub use session::{GoInput, Session};
pub use ui::draw_ui;
