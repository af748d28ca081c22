//! Board coordinate notation.
//!
//! Columns are letters starting at `A`, skipping `I`; rows are numbered from
//! 1 at the bottom edge. `D4` on a 9x9 board is matrix point (5, 3).

use thiserror::Error;

/// Column letters in order. Exactly 25 entries, enough for the largest board.
const COLUMN_LETTERS: &[u8; 25] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordError {
    #[error("enter a point like D4")]
    Empty,
    #[error("'{0}' is not a column letter")]
    BadColumn(char),
    #[error("'{0}' is not a row number")]
    BadRow(String),
    #[error("{0} is off the board")]
    OffBoard(String),
}

/// Letter for a matrix column, if the column exists on any supported board.
pub fn column_label(col: usize) -> Option<char> {
    COLUMN_LETTERS.get(col).map(|&b| b as char)
}

/// Printed row number for a matrix row.
pub fn row_label(row: usize, size: usize) -> usize {
    size - row
}

/// Format a matrix point as notation, e.g. `(8, 0)` on 9x9 is `A1`.
pub fn format_point(row: usize, col: usize, size: usize) -> String {
    match column_label(col) {
        Some(letter) if row < size => format!("{}{}", letter, row_label(row, size)),
        _ => format!("({}, {})", row, col),
    }
}

/// Parse notation like `d4` or `Q16` into a matrix point on a `size` board.
pub fn parse_point(text: &str, size: usize) -> Result<(usize, usize), CoordError> {
    let text = text.trim();
    let mut chars = text.chars();
    let letter = chars.next().ok_or(CoordError::Empty)?.to_ascii_uppercase();

    let col = COLUMN_LETTERS
        .iter()
        .position(|&b| b as char == letter)
        .ok_or(CoordError::BadColumn(letter))?;

    // Digits only: `usize::from_str` would also take a leading `+`
    let digits = chars.as_str();
    let number = Some(digits)
        .filter(|d| d.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|d| d.parse::<usize>().ok())
        .ok_or_else(|| CoordError::BadRow(digits.to_string()))?;

    if col >= size || number == 0 || number > size {
        return Err(CoordError::OffBoard(text.to_uppercase()));
    }
    Ok((size - number, col))
}
