//! Square Go board stored as a flat row-major grid.

use super::types::{check_board_size, GameError, Stone};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Orthogonal neighbour offsets (up, down, left, right).
const DIRECTIONS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Go board, `None` = empty intersection.
///
/// Boards are plain values: cloning one gives an independent scratch copy,
/// and two boards compare equal exactly when every intersection matches.
/// Deserialized boards are checked for a supported size and a full grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    size: usize,
    cells: Vec<Option<Stone>>,
}

/// Unchecked wire form of a `Board`.
#[derive(Deserialize)]
struct RawBoard {
    size: usize,
    cells: Vec<Option<Stone>>,
}

impl TryFrom<RawBoard> for Board {
    type Error = GameError;

    fn try_from(raw: RawBoard) -> Result<Self, Self::Error> {
        let size = check_board_size(raw.size)?;
        if raw.cells.len() != size * size {
            return Err(GameError::Malformed(format!(
                "{} cells for a {}x{} board",
                raw.cells.len(),
                size,
                size
            )));
        }
        Ok(Self {
            size,
            cells: raw.cells,
        })
    }
}

impl Board {
    /// Create an empty board. Size limits are enforced by `GameState::new`.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Parse the text form produced by `Display`: one line per row,
    /// `.` empty, `X` black, `O` white. Whitespace inside a row is ignored.
    pub fn from_rows(rows: &[&str]) -> Result<Self, GameError> {
        let size = rows.len();
        if size == 0 {
            return Err(GameError::Malformed("no rows".to_string()));
        }

        let mut board = Board::new(size);
        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != size {
                return Err(GameError::Malformed(format!(
                    "row {} has {} points, expected {}",
                    row,
                    symbols.len(),
                    size
                )));
            }
            for (col, symbol) in symbols.into_iter().enumerate() {
                let cell = match symbol {
                    '.' | '+' => None,
                    'X' | 'x' | 'B' | 'b' => Some(Stone::Black),
                    'O' | 'o' | 'W' | 'w' => Some(Stone::White),
                    other => {
                        return Err(GameError::Malformed(format!(
                            "unexpected symbol '{}' at row {}",
                            other, row
                        )))
                    }
                };
                board.set(row, col, cell);
            }
        }
        Ok(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    /// Stone at a point. Off-board points read as empty.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Stone> {
        if self.in_bounds(row, col) {
            self.cells[row * self.size + col]
        } else {
            None
        }
    }

    /// Overwrite a point. Off-board writes are ignored.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, cell: Option<Stone>) {
        if self.in_bounds(row, col) {
            self.cells[row * self.size + col] = cell;
        }
    }

    /// Check if a position is on the board and empty.
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        self.in_bounds(row, col) && self.get(row, col).is_none()
    }

    /// On-board orthogonal neighbours of a point.
    pub fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
        let size = self.size as i32;
        DIRECTIONS.into_iter().filter_map(move |(dr, dc)| {
            let nr = row as i32 + dr;
            let nc = col as i32 + dc;
            if nr >= 0 && nr < size && nc >= 0 && nc < size {
                Some((nr as usize, nc as usize))
            } else {
                None
            }
        })
    }

    /// Every point on the board in row-major order.
    pub fn points(&self) -> impl Iterator<Item = (usize, usize)> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| (row, col)))
    }

    /// Number of stones of one color.
    pub fn count(&self, stone: Stone) -> usize {
        self.cells.iter().filter(|c| **c == Some(stone)).count()
    }

    /// Number of empty intersections.
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Clear every point of a group.
    pub fn remove_group(&mut self, group: &HashSet<(usize, usize)>) {
        for &(row, col) in group {
            self.set(row, col, None);
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let symbol = self.get(row, col).map_or('.', |s| s.symbol());
                write!(f, "{}", symbol)?;
            }
            if row + 1 < self.size {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(9);
        assert_eq!(board.size(), 9);
        assert_eq!(board.empty_count(), 81);
        assert!(board.is_empty(4, 4));
    }

    #[test]
    fn test_off_board_reads_empty_but_is_not_playable() {
        let board = Board::new(5);
        assert_eq!(board.get(5, 0), None);
        assert!(!board.is_empty(5, 0));
        assert!(!board.in_bounds(0, 5));
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::new(5);
        board.set(1, 2, Some(Stone::White));
        assert_eq!(board.get(1, 2), Some(Stone::White));
        assert_eq!(board.count(Stone::White), 1);
        assert_eq!(board.count(Stone::Black), 0);
    }

    #[test]
    fn test_neighbors_corner_edge_center() {
        let board = Board::new(5);
        assert_eq!(board.neighbors(0, 0).count(), 2);
        assert_eq!(board.neighbors(0, 2).count(), 3);
        assert_eq!(board.neighbors(2, 2).count(), 4);
        assert_eq!(board.neighbors(4, 4).count(), 2);
    }

    #[test]
    fn test_text_round_trip() {
        let rows = [".X...", "XO...", ".....", "...O.", "....X"];
        let board = Board::from_rows(&rows).expect("valid board");
        assert_eq!(board.get(0, 1), Some(Stone::Black));
        assert_eq!(board.get(1, 1), Some(Stone::White));
        assert_eq!(board.to_string(), rows.join("\n"));
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        assert!(matches!(
            Board::from_rows(&["...", ".."]),
            Err(GameError::Malformed(_))
        ));
        assert!(matches!(Board::from_rows(&[]), Err(GameError::Malformed(_))));
        assert!(matches!(
            Board::from_rows(&["?.", ".."]),
            Err(GameError::Malformed(_))
        ));
    }

    #[test]
    fn test_deserialize_checks_size_and_cells() {
        let mut board = Board::new(5);
        board.set(2, 3, Some(Stone::White));
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), board);

        // Short grid would index out of range on every read
        let err = serde_json::from_str::<Board>(r#"{"size":5,"cells":[]}"#).unwrap_err();
        assert!(err.to_string().contains("0 cells"), "{}", err);

        let cells = serde_json::to_string(&[None::<Stone>; 9]).unwrap();
        let tiny = format!(r#"{{"size":3,"cells":{}}}"#, cells);
        let err = serde_json::from_str::<Board>(&tiny).unwrap_err();
        assert!(err.to_string().contains("board size 3"), "{}", err);
    }

    #[test]
    fn test_boards_compare_by_content() {
        let mut a = Board::new(5);
        let mut b = Board::new(5);
        assert_eq!(a, b);
        a.set(2, 2, Some(Stone::Black));
        assert_ne!(a, b);
        b.set(2, 2, Some(Stone::Black));
        assert_eq!(a, b);
    }
}
