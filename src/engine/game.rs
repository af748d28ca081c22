//! Game state: turn order, captures, ko snapshot and pass tracking.

use super::board::Board;
use super::rules::validate;
use super::scoring::{score_board, Score};
use super::types::{check_board_size, GameError, GoMove, IllegalMove, Stone};
use serde::Serialize;
use tracing::{debug, info};

/// Main Go game state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    board: Board,
    /// Current player's turn
    to_move: Stone,
    /// Stones captured by Black (White's prisoners)
    captured_by_black: u32,
    /// Stones captured by White (Black's prisoners)
    captured_by_white: u32,
    /// Board as it was before the most recent move or pass (ko reference)
    previous: Option<Board>,
    /// Count of consecutive passes (2 = game over)
    consecutive_passes: u8,
    last_move: Option<GoMove>,
    /// Moves and passes played so far
    move_number: u32,
}

/// Start a new game on a `size` x `size` board.
pub fn new_game(size: usize) -> Result<GameState, GameError> {
    GameState::new(size)
}

impl GameState {
    pub fn new(size: usize) -> Result<Self, GameError> {
        let size = check_board_size(size)?;
        info!(size, "new game");
        Ok(Self {
            board: Board::new(size),
            to_move: Stone::Black, // Black plays first in Go
            captured_by_black: 0,
            captured_by_white: 0,
            previous: None,
            consecutive_passes: 0,
            last_move: None,
            move_number: 0,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn to_move(&self) -> Stone {
        self.to_move
    }

    /// Enemy stones removed by `stone` so far.
    pub fn captures(&self, stone: Stone) -> u32 {
        match stone {
            Stone::Black => self.captured_by_black,
            Stone::White => self.captured_by_white,
        }
    }

    pub fn consecutive_passes(&self) -> u8 {
        self.consecutive_passes
    }

    pub fn previous_board(&self) -> Option<&Board> {
        self.previous.as_ref()
    }

    pub fn last_move(&self) -> Option<GoMove> {
        self.last_move
    }

    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    /// Two passes in a row end the game. The engine only reports this;
    /// it keeps accepting actions.
    pub fn is_over(&self) -> bool {
        self.consecutive_passes >= 2
    }

    /// Check whether the player to move may play at (row, col).
    pub fn validate_move(&self, row: usize, col: usize) -> Result<(), IllegalMove> {
        validate(&self.board, self.previous.as_ref(), row, col, self.to_move).map(|_| ())
    }

    /// Play a stone for the player to move. Returns the number of stones
    /// captured. The move is always re-validated; on error nothing changes.
    pub fn apply_move(&mut self, row: usize, col: usize) -> Result<usize, IllegalMove> {
        let stone = self.to_move;
        let placement = match validate(&self.board, self.previous.as_ref(), row, col, stone) {
            Ok(placement) => placement,
            Err(reason) => {
                debug!(%stone, row, col, %reason, "move rejected");
                return Err(reason);
            }
        };

        let captured = placement.captured;
        self.previous = Some(std::mem::replace(&mut self.board, placement.board));
        match stone {
            Stone::Black => self.captured_by_black += captured as u32,
            Stone::White => self.captured_by_white += captured as u32,
        }
        self.finish_turn(GoMove::Place(row, col));
        self.consecutive_passes = 0;

        debug!(%stone, row, col, captured, "stone placed");
        Ok(captured)
    }

    /// Pass the turn. The current board becomes the ko reference.
    pub fn pass_turn(&mut self) {
        let stone = self.to_move;
        self.previous = Some(self.board.clone());
        self.consecutive_passes = self.consecutive_passes.saturating_add(1);
        self.finish_turn(GoMove::Pass);
        debug!(%stone, passes = self.consecutive_passes, "pass");
        if self.is_over() {
            info!(moves = self.move_number, "two consecutive passes");
        }
    }

    /// The player to move resigns; returns the winner. The board is untouched.
    pub fn resign(&self) -> Stone {
        let winner = self.to_move.opponent();
        info!(loser = %self.to_move, %winner, "resignation");
        winner
    }

    /// Area score of the current position.
    pub fn score(&self) -> Score {
        score_board(&self.board)
    }

    /// Every point the player to move could legally play.
    pub fn legal_moves(&self) -> Vec<(usize, usize)> {
        self.board
            .points()
            .filter(|&(row, col)| self.board.get(row, col).is_none())
            .filter(|&(row, col)| self.validate_move(row, col).is_ok())
            .collect()
    }

    fn finish_turn(&mut self, mv: GoMove) {
        self.last_move = Some(mv);
        self.move_number += 1;
        self.to_move = self.to_move.opponent();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game() {
        let game = GameState::new(9).unwrap();
        assert_eq!(game.size(), 9);
        assert_eq!(game.to_move(), Stone::Black);
        assert_eq!(game.consecutive_passes(), 0);
        assert!(game.previous_board().is_none());
        assert!(game.last_move().is_none());
        assert!(!game.is_over());
    }

    #[test]
    fn test_new_game_rejects_bad_sizes() {
        assert_eq!(new_game(4), Err(GameError::InvalidSize(4)));
        assert_eq!(new_game(0), Err(GameError::InvalidSize(0)));
        assert_eq!(new_game(26), Err(GameError::InvalidSize(26)));
        assert!(new_game(5).is_ok());
        assert!(new_game(25).is_ok());
    }

    #[test]
    fn test_simple_move() {
        let mut game = GameState::new(5).unwrap();
        assert_eq!(game.apply_move(0, 0), Ok(0));
        assert_eq!(game.board().get(0, 0), Some(Stone::Black));
        assert_eq!(game.to_move(), Stone::White);
        assert_eq!(game.last_move(), Some(GoMove::Place(0, 0)));
        assert_eq!(game.previous_board(), Some(&Board::new(5)));
        assert_eq!(game.move_number(), 1);
    }

    #[test]
    fn test_rejected_move_changes_nothing() {
        let mut game = GameState::new(5).unwrap();
        game.apply_move(2, 2).unwrap();
        let before = game.clone();
        assert_eq!(game.apply_move(2, 2), Err(IllegalMove::Occupied));
        assert_eq!(game.apply_move(9, 9), Err(IllegalMove::OutOfBounds));
        assert_eq!(game, before);
    }

    #[test]
    fn test_pass_updates_snapshot_and_turn() {
        let mut game = GameState::new(5).unwrap();
        game.apply_move(1, 1).unwrap();
        game.pass_turn();
        assert_eq!(game.consecutive_passes(), 1);
        assert_eq!(game.to_move(), Stone::Black);
        assert_eq!(game.previous_board(), Some(game.board()));
        assert_eq!(game.last_move(), Some(GoMove::Pass));
    }

    #[test]
    fn test_move_resets_pass_counter() {
        let mut game = GameState::new(5).unwrap();
        game.pass_turn();
        assert_eq!(game.consecutive_passes(), 1);
        game.apply_move(0, 0).unwrap();
        assert_eq!(game.consecutive_passes(), 0);
        game.pass_turn();
        game.pass_turn();
        assert!(game.is_over());
    }

    #[test]
    fn test_resign_names_opponent_without_mutation() {
        let mut game = GameState::new(5).unwrap();
        let before = game.clone();
        assert_eq!(game.resign(), Stone::White);
        assert_eq!(game, before);
        game.pass_turn();
        assert_eq!(game.resign(), Stone::Black);
    }

    #[test]
    fn test_legal_moves_on_empty_board() {
        let game = GameState::new(5).unwrap();
        assert_eq!(game.legal_moves().len(), 25);
    }

    #[test]
    fn test_validate_does_not_apply() {
        let game = GameState::new(5).unwrap();
        assert_eq!(game.validate_move(3, 3), Ok(()));
        assert!(game.board().is_empty(3, 3));
        assert_eq!(game.validate_move(5, 0), Err(IllegalMove::OutOfBounds));
    }
}
