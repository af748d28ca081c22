//! Move validation: placement, capture resolution, suicide and ko.
//!
//! Every check runs on a scratch copy of the board. The caller's board is
//! never modified, so a rejected move leaves no trace.

use super::board::Board;
use super::group::{dead_groups_around, find_group, has_liberty};
use super::types::{IllegalMove, Stone};

/// Outcome of a legal placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Board after the stone is placed and captures are removed
    pub board: Board,
    /// Number of enemy stones removed
    pub captured: usize,
}

/// Place a stone on a scratch copy and resolve captures.
///
/// Rejects off-board and occupied points, and moves that leave the new
/// stone's group without liberties once captured enemies are removed.
/// Ko is not considered here; see [`validate`].
pub fn place_stone(
    board: &Board,
    row: usize,
    col: usize,
    stone: Stone,
) -> Result<Placement, IllegalMove> {
    if !board.in_bounds(row, col) {
        return Err(IllegalMove::OutOfBounds);
    }
    if board.get(row, col).is_some() {
        return Err(IllegalMove::Occupied);
    }

    let mut scratch = board.clone();
    scratch.set(row, col, Some(stone));

    // Decide every capture before clearing anything
    let dead = dead_groups_around(&scratch, row, col, stone.opponent());
    let mut captured = 0;
    for group in &dead {
        captured += group.len();
        scratch.remove_group(group);
    }

    // Suicide is judged after captures, so taking stones can rescue the move
    let own = find_group(&scratch, row, col);
    if !has_liberty(&scratch, &own) {
        return Err(IllegalMove::Suicide);
    }

    Ok(Placement {
        board: scratch,
        captured,
    })
}

/// Full legality check for `stone` at (row, col).
///
/// `previous` is the position just before the last move or pass; a move
/// that would recreate it is a ko violation.
pub fn validate(
    board: &Board,
    previous: Option<&Board>,
    row: usize,
    col: usize,
    stone: Stone,
) -> Result<Placement, IllegalMove> {
    let placement = place_stone(board, row, col, stone)?;
    if previous == Some(&placement.board) {
        return Err(IllegalMove::Ko);
    }
    Ok(placement)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&str]) -> Board {
        Board::from_rows(rows).expect("test board")
    }

    #[test]
    fn test_rejects_off_board() {
        let b = Board::new(5);
        assert_eq!(
            place_stone(&b, 5, 0, Stone::Black),
            Err(IllegalMove::OutOfBounds)
        );
        assert_eq!(
            place_stone(&b, 0, 7, Stone::Black),
            Err(IllegalMove::OutOfBounds)
        );
    }

    #[test]
    fn test_rejects_occupied() {
        let b = board(&["X....", ".....", ".....", ".....", "....."]);
        assert_eq!(
            place_stone(&b, 0, 0, Stone::White),
            Err(IllegalMove::Occupied)
        );
    }

    #[test]
    fn test_simple_placement() {
        let b = Board::new(5);
        let placement = place_stone(&b, 2, 2, Stone::Black).unwrap();
        assert_eq!(placement.captured, 0);
        assert_eq!(placement.board.get(2, 2), Some(Stone::Black));
        // Input board untouched
        assert_eq!(b.get(2, 2), None);
    }

    #[test]
    fn test_suicide_in_corner() {
        let b = board(&[".X...", "X....", ".....", ".....", "....."]);
        assert_eq!(
            place_stone(&b, 0, 0, Stone::White),
            Err(IllegalMove::Suicide)
        );
    }

    #[test]
    fn test_multi_stone_suicide() {
        // White filling its last liberty kills its own pair
        let b = board(&["O.X..", "XX...", ".....", ".....", "....."]);
        assert_eq!(
            place_stone(&b, 0, 1, Stone::White),
            Err(IllegalMove::Suicide)
        );
    }

    #[test]
    fn test_capture_gives_liberty() {
        // Black at (0, 0) has no liberties until the white pair is removed
        let b = board(&[".OX..", "OX...", "X....", ".....", "....."]);
        let placement = place_stone(&b, 0, 0, Stone::Black).unwrap();
        assert_eq!(placement.captured, 2);
        assert_eq!(placement.board.get(0, 1), None);
        assert_eq!(placement.board.get(1, 0), None);
        assert_eq!(placement.board.get(0, 0), Some(Stone::Black));
    }

    #[test]
    fn test_captures_several_groups_at_once() {
        let b = board(&["..X..", ".XOX.", "XO.OX", ".XOX.", "..X.."]);
        // Black at (2, 2) would be surrounded, but each white stone is in atari
        let placement = place_stone(&b, 2, 2, Stone::Black).unwrap();
        assert_eq!(placement.captured, 4);
    }

    #[test]
    fn test_ko_rejected_only_against_previous() {
        let before = board(&[".XO..", "XO.O.", ".XO..", ".....", "....."]);
        let after_capture = place_stone(&before, 1, 2, Stone::Black).unwrap().board;
        assert_eq!(after_capture.get(1, 1), None);

        // Immediate recapture recreates `before`
        assert_eq!(
            validate(&after_capture, Some(&before), 1, 1, Stone::White),
            Err(IllegalMove::Ko)
        );
        // Without that snapshot the same move is fine
        let recapture = validate(&after_capture, None, 1, 1, Stone::White).unwrap();
        assert_eq!(recapture.captured, 1);
        assert_eq!(recapture.board, before);
    }
}
