//! Area scoring: stones on the board plus surrounded territory.
//!
//! Empty points are split into maximal 4-connected regions. A region counts
//! as territory for a color only when every stone bordering it is that color;
//! regions touching both colors, or no stones at all, are neutral.

use super::board::Board;
use super::types::{GoResult, Stone};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Per-color counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub black: u32,
    pub white: u32,
}

impl Tally {
    pub fn get(&self, stone: Stone) -> u32 {
        match stone {
            Stone::Black => self.black,
            Stone::White => self.white,
        }
    }

    fn add(&mut self, stone: Stone, amount: u32) {
        match stone {
            Stone::Black => self.black += amount,
            Stone::White => self.white += amount,
        }
    }
}

/// Score breakdown for a position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub stones: Tally,
    pub territory: Tally,
    /// Stones plus territory
    #[serde(rename = "final")]
    pub total: Tally,
}

impl Score {
    /// Compare totals; equal totals are a draw (no komi).
    pub fn result(&self) -> GoResult {
        use std::cmp::Ordering;
        match self.total.black.cmp(&self.total.white) {
            Ordering::Greater => GoResult::Win(Stone::Black),
            Ordering::Less => GoResult::Win(Stone::White),
            Ordering::Equal => GoResult::Draw,
        }
    }

    /// Winning margin in points (0 for a draw).
    pub fn margin(&self) -> u32 {
        self.total.black.abs_diff(self.total.white)
    }
}

/// A maximal connected set of empty points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub points: Vec<(usize, usize)>,
    /// Color of every bordering stone, or `None` if the border is mixed or empty
    pub owner: Option<Stone>,
}

/// Partition the empty points of the board into regions.
///
/// Each point is visited once across all fills.
pub fn regions(board: &Board) -> Vec<Region> {
    let size = board.size();
    let mut visited = vec![false; size * size];
    let mut regions = Vec::new();

    for (row, col) in board.points() {
        if visited[row * size + col] || board.get(row, col).is_some() {
            continue;
        }

        let mut points = Vec::new();
        let mut borders: HashSet<Stone> = HashSet::new();
        let mut stack = vec![(row, col)];
        visited[row * size + col] = true;

        while let Some((r, c)) = stack.pop() {
            points.push((r, c));
            for (nr, nc) in board.neighbors(r, c) {
                match board.get(nr, nc) {
                    Some(stone) => {
                        borders.insert(stone);
                    }
                    None if !visited[nr * size + nc] => {
                        visited[nr * size + nc] = true;
                        stack.push((nr, nc));
                    }
                    None => {}
                }
            }
        }

        let owner = if borders.len() == 1 {
            borders.into_iter().next()
        } else {
            None
        };
        regions.push(Region { points, owner });
    }
    regions
}

/// Score a position by area counting.
pub fn score_board(board: &Board) -> Score {
    let mut score = Score::default();

    for stone in [Stone::Black, Stone::White] {
        score.stones.add(stone, board.count(stone) as u32);
    }

    for region in regions(board) {
        if let Some(owner) = region.owner {
            score.territory.add(owner, region.points.len() as u32);
        }
    }

    for stone in [Stone::Black, Stone::White] {
        score
            .total
            .add(stone, score.stones.get(stone) + score.territory.get(stone));
    }
    score
}
