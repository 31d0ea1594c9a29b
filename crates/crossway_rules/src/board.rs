//! Board storage and geometric queries.

use super::types::{FIRST, Intersection, LAST, PlayerColor, Square};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Error returned when a stone cannot be stored on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum BoardError {
    /// The intersection lies outside `[FIRST, LAST]`.
    #[display("Intersection {} is outside the board", _0)]
    OutOfBoard(Intersection),

    /// The intersection already holds a stone.
    #[display("Intersection {} is already occupied", _0)]
    Occupied(Intersection),
}

impl std::error::Error for BoardError {}

/// The Crossway board: a sparse map of occupied intersections.
///
/// Stones are only ever added. Once an intersection holds a stone it keeps
/// that stone for the life of the match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardSnapshot", into = "BoardSnapshot")]
pub struct Board {
    stones: BTreeMap<Intersection, PlayerColor>,
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a stone, refusing off-board or already occupied intersections.
    #[instrument(skip(self))]
    pub fn place_stone(
        &mut self,
        intersection: Intersection,
        color: PlayerColor,
    ) -> Result<(), BoardError> {
        if !intersection.is_on_board() {
            debug!("Rejected off-board stone");
            return Err(BoardError::OutOfBoard(intersection));
        }
        if self.stones.contains_key(&intersection) {
            debug!("Rejected stone on occupied intersection");
            return Err(BoardError::Occupied(intersection));
        }
        self.stones.insert(intersection, color);
        Ok(())
    }

    /// Returns the stone colour at the intersection, if any.
    ///
    /// Off-board intersections read as empty.
    pub fn stone_color_at(&self, intersection: Intersection) -> Option<PlayerColor> {
        self.stones.get(&intersection).copied()
    }

    /// Returns the state of the intersection.
    pub fn get(&self, intersection: Intersection) -> Square {
        self.stone_color_at(intersection).into()
    }

    /// Checks if an intersection is empty.
    pub fn is_empty_at(&self, intersection: Intersection) -> bool {
        !self.stones.contains_key(&intersection)
    }

    /// Number of stones on the board.
    pub fn len(&self) -> usize {
        self.stones.len()
    }

    /// True when no stone has been placed.
    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }

    /// Iterates over placed stones in row-major order.
    pub fn stones(&self) -> impl Iterator<Item = (Intersection, PlayerColor)> + '_ {
        self.stones.iter().map(|(&i, &c)| (i, c))
    }

    /// Number of stones of the given colour.
    pub fn count(&self, color: PlayerColor) -> usize {
        self.stones.values().filter(|&&c| c == color).count()
    }

    /// Checks if the row is the first one.
    pub fn is_first_row(row: i32) -> bool {
        row == FIRST
    }

    /// Checks if the row is the last one.
    pub fn is_last_row(row: i32) -> bool {
        row == LAST
    }

    /// Checks if the column is the first one.
    pub fn is_first_column(column: i32) -> bool {
        column == FIRST
    }

    /// Checks if the column is the last one.
    pub fn is_last_column(column: i32) -> bool {
        column == LAST
    }

    /// True when either coordinate falls outside `[FIRST, LAST]`.
    pub fn is_placement_out_of_board_boundaries(row: i32, column: i32) -> bool {
        !Intersection::new(row, column).is_on_board()
    }

    /// Returns the up to eight on-board neighbours of an intersection.
    pub fn adjacent_intersections(intersection: Intersection) -> Vec<Intersection> {
        let mut result = Vec::with_capacity(8);
        for rows in -1..=1 {
            for columns in -1..=1 {
                if rows == 0 && columns == 0 {
                    continue;
                }
                let neighbour = intersection.offset(rows, columns);
                if neighbour.is_on_board() {
                    result.push(neighbour);
                }
            }
        }
        result
    }

    /// Intersections in `row` holding a stone of `color`, left to right.
    pub fn intersections_occupied_by_player_in_row(
        &self,
        row: i32,
        color: PlayerColor,
    ) -> Vec<Intersection> {
        self.stones
            .range(Intersection::new(row, i32::MIN)..=Intersection::new(row, i32::MAX))
            .filter(|&(_, &c)| c == color)
            .map(|(&i, _)| i)
            .collect()
    }

    /// Intersections in `column` holding a stone of `color`, top to bottom.
    pub fn intersections_occupied_by_player_in_column(
        &self,
        column: i32,
        color: PlayerColor,
    ) -> Vec<Intersection> {
        self.stones
            .iter()
            .filter(|&(i, &c)| i.column() == column && c == color)
            .map(|(&i, _)| i)
            .collect()
    }
}

/// A single stone as plain data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stone {
    /// Row index.
    pub row: i32,
    /// Column index.
    pub column: i32,
    /// Stone colour.
    pub color: PlayerColor,
}

/// Serialized form of a [`Board`]: the list of placed stones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Stones in row-major order.
    pub stones: Vec<Stone>,
}

impl From<Board> for BoardSnapshot {
    fn from(board: Board) -> Self {
        Self {
            stones: board
                .stones()
                .map(|(i, color)| Stone {
                    row: i.row(),
                    column: i.column(),
                    color,
                })
                .collect(),
        }
    }
}

impl TryFrom<BoardSnapshot> for Board {
    type Error = BoardError;

    fn try_from(snapshot: BoardSnapshot) -> Result<Self, Self::Error> {
        let mut board = Board::new();
        for stone in snapshot.stones {
            board.place_stone(Intersection::new(stone.row, stone.column), stone.color)?;
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_and_read_back() {
        let mut board = Board::new();
        board
            .place_stone(Intersection::new(3, 4), PlayerColor::Black)
            .unwrap();
        assert_eq!(
            board.stone_color_at(Intersection::new(3, 4)),
            Some(PlayerColor::Black)
        );
        assert_eq!(board.get(Intersection::new(4, 3)), Square::Empty);
    }

    #[test]
    fn test_occupied_is_never_overwritten() {
        let mut board = Board::new();
        let at = Intersection::new(6, 6);
        board.place_stone(at, PlayerColor::White).unwrap();
        assert_eq!(
            board.place_stone(at, PlayerColor::Black),
            Err(BoardError::Occupied(at))
        );
        assert_eq!(board.stone_color_at(at), Some(PlayerColor::White));
    }

    #[test]
    fn test_out_of_board_rejected() {
        let mut board = Board::new();
        let at = Intersection::new(0, 5);
        assert_eq!(
            board.place_stone(at, PlayerColor::Black),
            Err(BoardError::OutOfBoard(at))
        );
        assert!(board.is_empty());
    }

    #[test]
    fn test_adjacency_counts() {
        assert_eq!(Board::adjacent_intersections(Intersection::new(FIRST, FIRST)).len(), 3);
        assert_eq!(Board::adjacent_intersections(Intersection::new(FIRST, 10)).len(), 5);
        assert_eq!(Board::adjacent_intersections(Intersection::new(LAST, 10)).len(), 5);
        assert_eq!(Board::adjacent_intersections(Intersection::new(10, 10)).len(), 8);
        assert_eq!(Board::adjacent_intersections(Intersection::new(LAST, LAST)).len(), 3);
    }

    #[test]
    fn test_adjacency_at_integer_limits() {
        for at in [
            Intersection::new(i32::MAX, i32::MAX),
            Intersection::new(i32::MIN, i32::MIN),
            Intersection::new(i32::MIN, i32::MAX),
        ] {
            assert!(Board::adjacent_intersections(at).is_empty());
        }
        // Just off the edge still touches the board.
        assert_eq!(Board::adjacent_intersections(Intersection::new(0, 10)).len(), 3);
    }

    #[test]
    fn test_row_and_column_filters() {
        let mut board = Board::new();
        board.place_stone(Intersection::new(1, 2), PlayerColor::Black).unwrap();
        board.place_stone(Intersection::new(1, 5), PlayerColor::White).unwrap();
        board.place_stone(Intersection::new(1, 9), PlayerColor::Black).unwrap();
        board.place_stone(Intersection::new(4, 2), PlayerColor::Black).unwrap();

        assert_eq!(
            board.intersections_occupied_by_player_in_row(1, PlayerColor::Black),
            vec![Intersection::new(1, 2), Intersection::new(1, 9)]
        );
        assert_eq!(
            board.intersections_occupied_by_player_in_column(2, PlayerColor::Black),
            vec![Intersection::new(1, 2), Intersection::new(4, 2)]
        );
        assert!(
            board
                .intersections_occupied_by_player_in_column(5, PlayerColor::Black)
                .is_empty()
        );
    }

    #[test]
    fn test_snapshot_rejects_duplicates() {
        let snapshot = BoardSnapshot {
            stones: vec![
                Stone { row: 2, column: 2, color: PlayerColor::Black },
                Stone { row: 2, column: 2, color: PlayerColor::White },
            ],
        };
        assert!(Board::try_from(snapshot).is_err());
    }

    #[test]
    fn test_boundary_classification() {
        assert!(Board::is_first_row(FIRST));
        assert!(Board::is_last_row(LAST));
        assert!(Board::is_first_column(FIRST));
        assert!(Board::is_last_column(LAST));
        assert!(!Board::is_last_column(LAST - 1));
        assert!(Board::is_placement_out_of_board_boundaries(-1, 30));
        assert!(!Board::is_placement_out_of_board_boundaries(FIRST, LAST));
    }
}
