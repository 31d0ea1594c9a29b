//! First-class action types for Crossway.
//!
//! A placement is a request, not a side effect: it is validated against the
//! board before anything changes, and a rejected request leaves the match
//! exactly as it was.

use super::board::BoardError;
use super::rules::Direction;
use super::turn::TurnError;
use super::types::{Intersection, PlayerColor};
use serde::{Deserialize, Serialize};

/// A candidate move: a colour asking to place a stone at `(row, column)`.
///
/// Coordinates are not range-checked here; the rules reject off-board values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacementIntent {
    /// Target row.
    pub row: i32,
    /// Target column.
    pub column: i32,
    /// Colour of the stone to place.
    pub color: PlayerColor,
}

impl PlacementIntent {
    /// Creates a new placement intent.
    pub fn new(row: i32, column: i32, color: PlayerColor) -> Self {
        Self { row, column, color }
    }

    /// Target intersection (possibly off-board).
    pub fn intersection(&self) -> Intersection {
        Intersection::new(self.row, self.column)
    }
}

impl std::fmt::Display for PlacementIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {},{}", self.color, self.row, self.column)
    }
}

/// What the player to move chooses to do with their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnAction {
    /// Place a stone of the colour to move.
    Place {
        /// Target row.
        row: i32,
        /// Target column.
        column: i32,
    },
    /// Swap sides instead of placing (turn 2 only).
    ClaimPieRule,
}

/// Why a placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum PlacementViolation {
    /// The target lies outside the board.
    #[display("Placement not allowed: out of board violation ({},{})", row, column)]
    OutOfBoard {
        /// Requested row.
        row: i32,
        /// Requested column.
        column: i32,
    },

    /// The target already holds a stone.
    #[display("Placement not allowed: intersection {} is occupied", intersection)]
    CellOccupied {
        /// The occupied intersection.
        intersection: Intersection,
    },

    /// The stone would cross an opposing diagonal pair.
    #[display("Placement not allowed: diagonal violation ({} at {})", direction, intersection)]
    DiagonalViolation {
        /// The rejected intersection.
        intersection: Intersection,
        /// Direction of the crossing pattern.
        direction: Direction,
    },
}

impl std::error::Error for PlacementViolation {}

impl From<BoardError> for PlacementViolation {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::OutOfBoard(i) => PlacementViolation::OutOfBoard {
                row: i.row(),
                column: i.column(),
            },
            BoardError::Occupied(intersection) => PlacementViolation::CellOccupied { intersection },
        }
    }
}

/// Error that can occur when playing a turn.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum MatchError {
    /// The placement broke a rule.
    #[from]
    #[display("{}", _0)]
    Placement(PlacementViolation),

    /// The turn state machine refused the transition.
    #[from]
    #[display("{}", _0)]
    Turn(TurnError),

    /// The match already has a winner.
    #[display("Match is already over")]
    MatchOver,

    /// The intent's colour is not the colour to move.
    #[display("It's not {}'s turn", _0)]
    WrongPlayer(PlayerColor),

    /// A post-condition failed after a transition.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MatchError::Placement(err) => Some(err),
            MatchError::Turn(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BoardError> for MatchError {
    fn from(err: BoardError) -> Self {
        MatchError::Placement(err.into())
    }
}
