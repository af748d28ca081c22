//! Group discovery and liberty counting.

use super::board::Board;
use super::types::Stone;
use std::collections::HashSet;

/// Get all stones in the same group as the stone at (row, col).
/// Returns empty set if position is empty.
pub fn find_group(board: &Board, row: usize, col: usize) -> HashSet<(usize, usize)> {
    let mut group = HashSet::new();
    let Some(stone) = board.get(row, col) else {
        return group;
    };

    let mut stack = vec![(row, col)];
    while let Some((r, c)) = stack.pop() {
        if group.contains(&(r, c)) {
            continue;
        }
        if board.get(r, c) == Some(stone) {
            group.insert((r, c));
            stack.extend(board.neighbors(r, c).filter(|p| !group.contains(p)));
        }
    }
    group
}

/// Empty points adjacent to any member of a group.
pub fn liberties(board: &Board, group: &HashSet<(usize, usize)>) -> HashSet<(usize, usize)> {
    let mut liberties = HashSet::new();
    for &(row, col) in group {
        for (nr, nc) in board.neighbors(row, col) {
            if board.get(nr, nc).is_none() {
                liberties.insert((nr, nc));
            }
        }
    }
    liberties
}

/// Count liberties (empty adjacent points) of a group.
pub fn count_liberties(board: &Board, group: &HashSet<(usize, usize)>) -> usize {
    liberties(board, group).len()
}

/// True as soon as one liberty is found.
pub fn has_liberty(board: &Board, group: &HashSet<(usize, usize)>) -> bool {
    group.iter().any(|&(row, col)| {
        board
            .neighbors(row, col)
            .any(|(nr, nc)| board.get(nr, nc).is_none())
    })
}

/// Get liberties count for the group containing the stone at (row, col).
pub fn liberties_at(board: &Board, row: usize, col: usize) -> usize {
    let group = find_group(board, row, col);
    count_liberties(board, &group)
}

/// Every distinct `enemy` group touching (row, col) that has no liberties.
///
/// All groups are identified before the caller removes any of them.
pub fn dead_groups_around(
    board: &Board,
    row: usize,
    col: usize,
    enemy: Stone,
) -> Vec<HashSet<(usize, usize)>> {
    let mut seen: HashSet<(usize, usize)> = HashSet::new();
    let mut dead = Vec::new();
    for (nr, nc) in board.neighbors(row, col) {
        if board.get(nr, nc) != Some(enemy) || seen.contains(&(nr, nc)) {
            continue;
        }
        let group = find_group(board, nr, nc);
        seen.extend(group.iter().copied());
        if !has_liberty(board, &group) {
            dead.push(group);
        }
    }
    dead
}
