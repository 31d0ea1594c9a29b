//! Win detection for Crossway.
//!
//! Black wins by linking the first and last rows, White by linking the first
//! and last columns, through chains of same-coloured stones connected in any
//! of the eight king-move directions.

use super::super::board::Board;
use super::super::types::{FIRST, Intersection, LAST, PlayerColor};
use std::collections::HashSet;
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// Checks if `color` has a chain joining its two edges.
///
/// The search starts from whichever of the colour's two edge lines holds
/// fewer of its stones (the first line on a tie) and succeeds on reaching the
/// other line. The visited set is shared by every starting stone, so each
/// stone is expanded at most once per call.
#[instrument(skip(board))]
pub fn check_win(board: &Board, color: PlayerColor) -> bool {
    let (start, target) = start_and_target_lines(board, color);
    let starting_stones = occupied_on_line(board, color, start);
    debug!(start, target, starting = starting_stones.len(), "Searching for winning chain");

    let mut visited = HashSet::new();
    for stone in starting_stones {
        if reaches_line(board, color, stone, target, &mut visited) {
            debug!(%stone, "Winning chain found");
            return true;
        }
    }
    false
}

/// Returns the colour that has completed a chain, if any.
///
/// Both colours cannot win at once on a legal board; Black is reported first
/// if a hand-built board says otherwise.
#[instrument(skip(board))]
pub fn winner(board: &Board) -> Option<PlayerColor> {
    PlayerColor::iter().find(|&color| check_win(board, color))
}

/// Picks the edge line to search from and the one that must be reached.
fn start_and_target_lines(board: &Board, color: PlayerColor) -> (i32, i32) {
    let first = occupied_on_line(board, color, FIRST).len();
    let last = occupied_on_line(board, color, LAST).len();
    if first <= last {
        (FIRST, LAST)
    } else {
        (LAST, FIRST)
    }
}

fn occupied_on_line(board: &Board, color: PlayerColor, line: i32) -> Vec<Intersection> {
    match color {
        PlayerColor::Black => board.intersections_occupied_by_player_in_row(line, color),
        PlayerColor::White => board.intersections_occupied_by_player_in_column(line, color),
    }
}

/// Iterative depth-first search from `from` over stones of `color`.
fn reaches_line(
    board: &Board,
    color: PlayerColor,
    from: Intersection,
    target: i32,
    visited: &mut HashSet<Intersection>,
) -> bool {
    let mut stack = vec![from];

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        if current.line_for(color) == target {
            return true;
        }
        for neighbour in Board::adjacent_intersections(current) {
            if board.stone_color_at(neighbour) == Some(color) && !visited.contains(&neighbour) {
                stack.push(neighbour);
            }
        }
    }

    false
}
