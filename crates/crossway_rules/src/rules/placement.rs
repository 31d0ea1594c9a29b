//! Placement legality: bounds, occupancy and the diagonal rule.

use super::super::action::{PlacementIntent, PlacementViolation};
use super::super::board::Board;
use super::super::types::{FIRST, Intersection, LAST, PlayerColor};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One of the four diagonal directions around an intersection.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Direction {
    /// Up and right.
    NorthEast,
    /// Up and left.
    NorthWest,
    /// Down and right.
    SouthEast,
    /// Down and left.
    SouthWest,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Row offset (north is towards the first row).
    pub const fn rows(self) -> i32 {
        match self {
            Direction::NorthEast | Direction::NorthWest => -1,
            Direction::SouthEast | Direction::SouthWest => 1,
        }
    }

    /// Column offset (west is towards the first column).
    pub const fn columns(self) -> i32 {
        match self {
            Direction::NorthEast | Direction::SouthEast => 1,
            Direction::NorthWest | Direction::SouthWest => -1,
        }
    }

    /// The direction pointing the other way.
    pub const fn opposite(self) -> Self {
        match self {
            Direction::NorthEast => Direction::SouthWest,
            Direction::NorthWest => Direction::SouthEast,
            Direction::SouthEast => Direction::NorthWest,
            Direction::SouthWest => Direction::NorthEast,
        }
    }

    /// Directions worth checking at `intersection`.
    ///
    /// A direction whose orthogonal neighbours fall off the board can never
    /// form a crossing, so edge rows and columns only look inwards.
    pub fn checked_at(intersection: Intersection) -> &'static [Direction] {
        use Direction::*;

        if Board::is_first_row(intersection.row()) {
            &[SouthEast, SouthWest]
        } else if Board::is_last_row(intersection.row()) {
            &[NorthEast, NorthWest]
        } else if Board::is_first_column(intersection.column()) {
            &[NorthEast, SouthEast]
        } else if Board::is_last_column(intersection.column()) {
            &[NorthWest, SouthWest]
        } else {
            &Self::ALL
        }
    }
}

/// Checks a placement against the board without changing it.
///
/// Checks run in order: board bounds, occupancy, then the diagonal rule.
#[instrument(skip(board), fields(intent = %intent))]
pub fn validate_placement_intent(
    board: &Board,
    intent: &PlacementIntent,
) -> Result<(), PlacementViolation> {
    if Board::is_placement_out_of_board_boundaries(intent.row, intent.column) {
        debug!("Out of board");
        return Err(PlacementViolation::OutOfBoard {
            row: intent.row,
            column: intent.column,
        });
    }

    let intersection = intent.intersection();
    if !board.is_empty_at(intersection) {
        debug!("Intersection occupied");
        return Err(PlacementViolation::CellOccupied { intersection });
    }

    if let Some(direction) = is_diagonal_violation(board, intersection, intent.color) {
        debug!(%direction, "Diagonal violation");
        return Err(PlacementViolation::DiagonalViolation {
            intersection,
            direction,
        });
    }

    Ok(())
}

/// Returns the first direction in which placing `color` at `intersection`
/// would cross an opposing diagonal pair.
///
/// In direction `(dr, dc)` that means both orthogonal neighbours
/// `(r+dr, c)` and `(r, c+dc)` hold the opponent while the diagonal
/// neighbour `(r+dr, c+dc)` holds `color`.
pub fn is_diagonal_violation(
    board: &Board,
    intersection: Intersection,
    color: PlayerColor,
) -> Option<Direction> {
    if !intersection.is_on_board() {
        return None;
    }
    Direction::checked_at(intersection)
        .iter()
        .copied()
        .find(|&direction| crosses(board, intersection, color, direction))
}

/// Every direction in which placing `color` at `intersection` would cross
/// an opposing diagonal pair.
pub fn diagonal_violations(
    board: &Board,
    intersection: Intersection,
    color: PlayerColor,
) -> Vec<Direction> {
    if !intersection.is_on_board() {
        return Vec::new();
    }
    Direction::checked_at(intersection)
        .iter()
        .copied()
        .filter(|&direction| crosses(board, intersection, color, direction))
        .collect()
}

fn crosses(board: &Board, at: Intersection, color: PlayerColor, direction: Direction) -> bool {
    let opponent = Some(color.opponent());
    let (rows, columns) = (direction.rows(), direction.columns());

    board.stone_color_at(at.offset(rows, 0)) == opponent
        && board.stone_color_at(at.offset(0, columns)) == opponent
        && board.stone_color_at(at.offset(rows, columns)) == Some(color)
}

/// Every intersection where `color` could legally place a stone.
#[instrument(skip(board))]
pub fn legal_placements(board: &Board, color: PlayerColor) -> Vec<Intersection> {
    (FIRST..=LAST)
        .flat_map(|row| (FIRST..=LAST).map(move |column| Intersection::new(row, column)))
        .filter(|&i| board.is_empty_at(i) && is_diagonal_violation(board, i, color).is_none())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use PlayerColor::{Black, White};

    fn board_with(stones: &[(i32, i32, PlayerColor)]) -> Board {
        let mut board = Board::new();
        for &(row, column, color) in stones {
            board
                .place_stone(Intersection::new(row, column), color)
                .unwrap();
        }
        board
    }

    fn violation(board: &Board, row: i32, column: i32, color: PlayerColor) -> Option<Direction> {
        match validate_placement_intent(board, &PlacementIntent::new(row, column, color)) {
            Err(PlacementViolation::DiagonalViolation { direction, .. }) => Some(direction),
            _ => None,
        }
    }

    #[test]
    fn test_south_west_violation_on_first_row() {
        for (own, other) in [(Black, White), (White, Black)] {
            let board = board_with(&[(1, 2, other), (2, 3, other), (2, 2, own)]);
            assert_eq!(violation(&board, 1, 3, own), Some(Direction::SouthWest));
        }
    }

    #[test]
    fn test_north_west_violation() {
        for (own, other) in [(Black, White), (White, Black)] {
            let board = board_with(&[(1, 4, other), (2, 3, other), (1, 3, own)]);
            assert_eq!(violation(&board, 2, 4, own), Some(Direction::NorthWest));
        }
    }

    #[test]
    fn test_north_east_violation() {
        for (own, other) in [(Black, White), (White, Black)] {
            let board = board_with(&[(3, 4, other), (2, 3, other), (2, 4, own)]);
            assert_eq!(violation(&board, 3, 3, own), Some(Direction::NorthEast));
        }
    }

    #[test]
    fn test_south_east_violation() {
        for (own, other) in [(Black, White), (White, Black)] {
            let board = board_with(&[(2, 5, other), (3, 4, other), (3, 5, own)]);
            assert_eq!(violation(&board, 2, 4, own), Some(Direction::SouthEast));
        }
    }

    #[test]
    fn test_far_off_board_has_no_violation() {
        let board = board_with(&[(1, 2, Black), (2, 3, Black), (2, 2, White)]);
        for at in [
            Intersection::new(i32::MAX, i32::MAX),
            Intersection::new(i32::MIN, i32::MIN),
            Intersection::new(i32::MAX, i32::MIN),
        ] {
            assert_eq!(is_diagonal_violation(&board, at, White), None);
            assert!(diagonal_violations(&board, at, White).is_empty());
        }
    }

    #[test]
    fn test_all_violated_directions_listed() {
        // White at (5,5) would cross Black pairs both north-east and south-west.
        let board = board_with(&[
            (4, 5, Black),
            (5, 6, Black),
            (4, 6, White),
            (6, 5, Black),
            (5, 4, Black),
            (6, 4, White),
        ]);
        assert_eq!(
            diagonal_violations(&board, Intersection::new(5, 5), White),
            vec![Direction::NorthEast, Direction::SouthWest]
        );
        assert_eq!(
            is_diagonal_violation(&board, Intersection::new(5, 5), White),
            Some(Direction::NorthEast)
        );
    }

    #[test]
    fn test_same_pattern_is_legal_for_the_other_color() {
        let board = board_with(&[(1, 2, Black), (2, 3, Black), (2, 2, White)]);
        assert!(validate_placement_intent(&board, &PlacementIntent::new(1, 3, Black)).is_ok());
    }

    #[test]
    fn test_incomplete_pattern_is_legal() {
        let board = board_with(&[(2, 5, Black), (3, 5, White)]);
        assert!(validate_placement_intent(&board, &PlacementIntent::new(2, 4, White)).is_ok());
    }

    #[test]
    fn test_last_column_only_looks_west() {
        let board = board_with(&[(5, 18, Black), (4, 19, Black), (4, 18, White)]);
        assert_eq!(violation(&board, 5, 19, White), Some(Direction::NorthWest));
    }

    #[test]
    fn test_checks_run_in_order() {
        let board = board_with(&[(4, 4, Black)]);
        assert!(matches!(
            validate_placement_intent(&board, &PlacementIntent::new(0, 4, White)),
            Err(PlacementViolation::OutOfBoard { row: 0, column: 4 })
        ));
        assert!(matches!(
            validate_placement_intent(&board, &PlacementIntent::new(4, 4, White)),
            Err(PlacementViolation::CellOccupied { .. })
        ));
    }

    #[test]
    fn test_legal_placements_excludes_occupied_and_crossing() {
        let board = board_with(&[(1, 2, Black), (2, 3, Black), (2, 2, White)]);
        let legal = legal_placements(&board, White);
        assert_eq!(legal.len(), 19 * 19 - 4);
        assert!(!legal.contains(&Intersection::new(1, 3)));
        assert!(!legal.contains(&Intersection::new(2, 2)));
        assert!(legal_placements(&board, Black).contains(&Intersection::new(1, 3)));
    }

    #[test]
    fn test_direction_offsets_are_rotations() {
        for direction in Direction::ALL {
            let opposite = direction.opposite();
            assert_eq!(direction.rows(), -opposite.rows());
            assert_eq!(direction.columns(), -opposite.columns());
        }
    }
}
