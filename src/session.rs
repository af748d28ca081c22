//! Interactive session around a `GameState`: cursor, typed coordinates,
//! feedback messages and the end-of-game record.

use crate::coords::{format_point, parse_point};
use crate::engine::{GameError, GameState, GoResult, Score, Stone};
use tracing::info;

/// Longest coordinate that can be typed, e.g. `T19`.
const MAX_ENTRY_LEN: usize = 3;

/// Input actions for a Go session (UI-agnostic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoInput {
    Up,
    Down,
    Left,
    Right,
    /// Place at the cursor, or submit a typed coordinate
    Place,
    Pass,
    Resign,
    /// Start typing a coordinate
    StartEntry,
    Char(char),
    Backspace,
    Cancel,
    Other,
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    TwoPasses,
    Resignation { resigned: Stone },
}

#[derive(Debug, Clone)]
pub struct Session {
    pub game: GameState,
    /// Cursor position (row, col)
    pub cursor: (usize, usize),
    /// Coordinate being typed, if entry mode is open
    pub entry: Option<String>,
    /// Feedback for the last action
    pub message: Option<String>,
    /// Resignation confirmation pending
    pub resign_pending: bool,
    /// Game result (None if in progress)
    pub result: Option<GoResult>,
    pub end_reason: Option<EndReason>,
    /// Score frozen when the game ended
    pub final_score: Option<Score>,
}

impl Session {
    pub fn new(game: GameState) -> Self {
        let center = game.size() / 2;
        Self {
            game,
            cursor: (center, center),
            entry: None,
            message: None,
            resign_pending: false,
            result: None,
            end_reason: None,
            final_score: None,
        }
    }

    /// Start a fresh session on a board of the given size.
    pub fn with_size(size: usize) -> Result<Self, GameError> {
        Ok(Self::new(GameState::new(size)?))
    }

    /// Throw the current game away and start again on the same board size.
    pub fn restart(&mut self) -> Result<(), GameError> {
        *self = Self::with_size(self.game.size())?;
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    pub fn size(&self) -> usize {
        self.game.size()
    }

    /// Move cursor in a direction
    pub fn move_cursor(&mut self, d_row: i32, d_col: i32) {
        let max = self.size() as i32 - 1;
        let new_row = (self.cursor.0 as i32 + d_row).clamp(0, max) as usize;
        let new_col = (self.cursor.1 as i32 + d_col).clamp(0, max) as usize;
        self.cursor = (new_row, new_col);
    }

    /// Process one input. Returns true if the input was handled.
    /// Does nothing once the game is over.
    pub fn process_input(&mut self, input: GoInput) -> bool {
        if self.is_finished() {
            return false;
        }

        if self.entry.is_some() {
            return self.process_entry_input(input);
        }

        // Handle resign confirmation (double-press pattern)
        if self.resign_pending {
            self.resign_pending = false;
            if input == GoInput::Resign {
                self.resign();
            } else {
                self.message = Some("Resignation cancelled".to_string());
            }
            return true;
        }

        match input {
            GoInput::Up => self.move_cursor(-1, 0),
            GoInput::Down => self.move_cursor(1, 0),
            GoInput::Left => self.move_cursor(0, -1),
            GoInput::Right => self.move_cursor(0, 1),
            GoInput::Place => {
                let (row, col) = self.cursor;
                self.play_at(row, col);
            }
            GoInput::Pass => self.pass(),
            GoInput::Resign => {
                self.resign_pending = true;
                self.message = Some(format!(
                    "{} resigns? Press R again to confirm",
                    self.game.to_move()
                ));
            }
            GoInput::StartEntry => {
                self.entry = Some(String::new());
            }
            GoInput::Cancel => {
                self.message = None;
            }
            GoInput::Char(_) | GoInput::Backspace | GoInput::Other => return false,
        }
        true
    }

    fn process_entry_input(&mut self, input: GoInput) -> bool {
        let Some(entry) = self.entry.as_mut() else {
            return false;
        };
        match input {
            GoInput::Char(c) if c.is_ascii_alphanumeric() && entry.len() < MAX_ENTRY_LEN => {
                entry.push(c.to_ascii_uppercase());
            }
            GoInput::Backspace => {
                entry.pop();
            }
            GoInput::Place => {
                let text = entry.clone();
                self.entry = None;
                self.submit_entry(&text);
            }
            GoInput::Cancel => {
                self.entry = None;
            }
            _ => return false,
        }
        true
    }

    fn submit_entry(&mut self, text: &str) {
        match parse_point(text, self.size()) {
            Ok((row, col)) => {
                self.cursor = (row, col);
                self.play_at(row, col);
            }
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    /// Play for the side to move. Returns true if the stone was placed.
    pub fn play_at(&mut self, row: usize, col: usize) -> bool {
        let stone = self.game.to_move();
        let point = format_point(row, col, self.size());
        match self.game.apply_move(row, col) {
            Ok(0) => {
                self.message = Some(format!("{} {}", stone, point));
                true
            }
            Ok(captured) => {
                let plural = if captured == 1 { "" } else { "s" };
                self.message = Some(format!(
                    "{} {} captures {} stone{}",
                    stone, point, captured, plural
                ));
                true
            }
            Err(reason) => {
                self.message = Some(format!("{} is not playable: {}", point, reason));
                false
            }
        }
    }

    /// Pass for the side to move; the second pass in a row ends the game.
    pub fn pass(&mut self) {
        let stone = self.game.to_move();
        self.game.pass_turn();
        self.message = Some(format!("{} passed", stone));
        if self.game.is_over() {
            let score = self.game.score();
            self.finish(EndReason::TwoPasses, score.result());
        }
    }

    /// The side to move resigns.
    pub fn resign(&mut self) {
        let resigned = self.game.to_move();
        let winner = self.game.resign();
        self.message = Some(format!("{} resigned", resigned));
        self.finish(EndReason::Resignation { resigned }, GoResult::Win(winner));
    }

    fn finish(&mut self, reason: EndReason, result: GoResult) {
        let score = self.game.score();
        info!(
            ?reason,
            ?result,
            black = score.total.black,
            white = score.total.white,
            "game finished"
        );
        self.final_score = Some(score);
        self.end_reason = Some(reason);
        self.result = Some(result);
        self.resign_pending = false;
        self.entry = None;
    }

    /// One-line summary of a finished game.
    pub fn summary(&self) -> Option<String> {
        let result = self.result?;
        let score = self.final_score.unwrap_or_else(|| self.game.score());
        let outcome = match (result, self.end_reason) {
            (GoResult::Win(winner), Some(EndReason::Resignation { .. })) => {
                format!("{} wins by resignation", winner)
            }
            (GoResult::Win(winner), _) => format!("{} wins by {}", winner, score.margin()),
            (GoResult::Draw, _) => "Draw".to_string(),
        };
        Some(format!(
            "{} (Black {} = {} stones + {} territory, White {} = {} stones + {} territory)",
            outcome,
            score.total.black,
            score.stones.black,
            score.territory.black,
            score.total.white,
            score.stones.white,
            score.territory.white,
        ))
    }
}
