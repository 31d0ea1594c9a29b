//! Core domain types for Crossway.

use serde::{Deserialize, Serialize};

/// Lowest valid row or column index.
pub const FIRST: i32 = 1;

/// Highest valid row or column index.
pub const LAST: i32 = 19;

/// Number of intersections along one side of the board.
pub const BOARD_SIDE: i32 = LAST - FIRST + 1;

/// Colour of a player's stones.
///
/// Black connects the first and last rows, White the first and last columns.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum PlayerColor {
    /// Moves first; connects top and bottom.
    Black,
    /// Moves second; connects left and right.
    White,
}

impl PlayerColor {
    /// Returns the opposing colour.
    pub fn opponent(self) -> Self {
        match self {
            PlayerColor::Black => PlayerColor::White,
            PlayerColor::White => PlayerColor::Black,
        }
    }
}

/// State of a single intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// No stone.
    Empty,
    /// Holds a stone of the given colour.
    Occupied(PlayerColor),
}

impl Square {
    /// Returns the stone colour, if any.
    pub fn color(self) -> Option<PlayerColor> {
        match self {
            Square::Empty => None,
            Square::Occupied(color) => Some(color),
        }
    }
}

impl From<Option<PlayerColor>> for Square {
    fn from(color: Option<PlayerColor>) -> Self {
        color.map_or(Square::Empty, Square::Occupied)
    }
}

/// A grid point identified by row and column.
///
/// Construction is unchecked so that out-of-range coordinates can still be
/// expressed and rejected by the rules; the board never stores one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Intersection {
    row: i32,
    column: i32,
}

impl Intersection {
    /// Creates an intersection without bounds checking.
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Creates an intersection only if it lies on the board.
    pub fn checked(row: i32, column: i32) -> Option<Self> {
        if is_on_board(row) && is_on_board(column) {
            Some(Self::new(row, column))
        } else {
            None
        }
    }

    /// Row index.
    pub const fn row(self) -> i32 {
        self.row
    }

    /// Column index.
    pub const fn column(self) -> i32 {
        self.column
    }

    /// Returns the intersection shifted by the given offsets.
    ///
    /// Saturates at the `i32` limits, so a far off-board point stays off the
    /// board instead of overflowing.
    pub const fn offset(self, rows: i32, columns: i32) -> Self {
        Self::new(self.row.saturating_add(rows), self.column.saturating_add(columns))
    }

    /// True when both coordinates lie within `[FIRST, LAST]`.
    pub fn is_on_board(self) -> bool {
        is_on_board(self.row) && is_on_board(self.column)
    }

    /// Returns the coordinate that decides progress for the given colour:
    /// the row for Black, the column for White.
    pub const fn line_for(self, color: PlayerColor) -> i32 {
        match color {
            PlayerColor::Black => self.row,
            PlayerColor::White => self.column,
        }
    }
}

impl std::fmt::Display for Intersection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.row, self.column)
    }
}

fn is_on_board(coord: i32) -> bool {
    (FIRST..=LAST).contains(&coord)
}
