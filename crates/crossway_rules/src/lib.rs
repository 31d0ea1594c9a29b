//! Crossway rule engine.
//!
//! Crossway is a two-player connection game on a 19×19 grid. Black links the
//! top and bottom edges, White the left and right edges. A stone may not
//! cross an opposing diagonal pair, and after the first stone the second
//! player may claim the pie rule and swap sides.
//!
//! # Architecture
//!
//! - **Board**: sparse map of placed stones plus geometric queries
//! - **Rules**: pure placement validation and win detection
//! - **Turn**: turn number, colour to move, pie-rule window
//! - **Match**: validate → place → check win → advance turn
//!
//! # Example
//!
//! ```
//! use crossway_rules::{Match, MatchStatus, TurnAction};
//!
//! let mut game = Match::new();
//! let status = game.play_turn(TurnAction::Place { row: 1, column: 4 })?;
//! assert_eq!(status, MatchStatus::InProgress);
//! assert_eq!(game.turn().turn_number(), 2);
//! # Ok::<(), crossway_rules::MatchError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod contracts;
mod game;
pub mod invariants;
pub mod rules;
mod turn;
mod types;

pub use action::{MatchError, PlacementIntent, PlacementViolation, TurnAction};
pub use board::{Board, BoardError, BoardSnapshot, Stone};
pub use contracts::{
    ConsistentState, Contract, LegalPlacement, MatchInProgress, PieRuleContract,
    PlacementContract, PlayersTurn,
};
pub use game::{Match, MatchEvent, MatchSnapshot, MatchStatus, Seat, Seats};
pub use rules::{
    Direction, check_win, diagonal_violations, is_diagonal_violation, legal_placements,
    validate_placement_intent, winner,
};
pub use turn::{PIE_RULE_TURN, Turn, TurnError, TurnSnapshot};
pub use types::{BOARD_SIDE, FIRST, Intersection, LAST, PlayerColor, Square};
