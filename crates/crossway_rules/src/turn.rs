//! Turn progression and the pie-rule window.

use super::types::PlayerColor;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Turn on which the second player may claim the pie rule.
pub const PIE_RULE_TURN: u32 = 2;

/// Error returned when a turn transition is not allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum TurnError {
    /// The pie rule was requested outside its window.
    #[display("Pie rule can only be claimed on turn {}, not turn {}", PIE_RULE_TURN, turn_number)]
    PieRuleUnavailable {
        /// The turn on which it was requested.
        turn_number: u32,
    },

    /// The pie rule was already claimed this match.
    #[display("Pie rule has already been claimed")]
    PieRuleAlreadyApplied,

    /// Turn numbers start at 1.
    #[display("Invalid turn number {}", turn_number)]
    InvalidTurnNumber {
        /// The rejected value.
        turn_number: u32,
    },

    /// The colour to move does not match the turn's parity.
    #[display("Turn {} belongs to {}, not {}", turn_number, expected, found)]
    ColorMismatch {
        /// The turn in question.
        turn_number: u32,
        /// Colour that moves on that turn.
        expected: PlayerColor,
        /// Colour that was recorded.
        found: PlayerColor,
    },
}

impl std::error::Error for TurnError {}

/// Turn state: how many turns have started and whose move it is.
///
/// Colours alternate strictly, Black on odd turns and White on even ones.
/// Claiming the pie rule swaps who controls each colour but never the
/// alternation itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TurnSnapshot", into = "TurnSnapshot")]
pub struct Turn {
    turn_number: u32,
    color: PlayerColor,
    pie_rule_applied: bool,
}

impl Turn {
    /// Creates the first turn of a match.
    pub fn new() -> Self {
        Self {
            turn_number: 1,
            color: PlayerColor::Black,
            pie_rule_applied: false,
        }
    }

    /// Creates a turn at an arbitrary point of a match.
    ///
    /// The colour to move follows from the parity of `turn_number`.
    #[instrument]
    pub fn at(turn_number: u32) -> Result<Self, TurnError> {
        if turn_number == 0 {
            return Err(TurnError::InvalidTurnNumber { turn_number });
        }
        Ok(Self {
            turn_number,
            color: Self::color_for(turn_number),
            pie_rule_applied: false,
        })
    }

    /// Colour that moves on the given turn.
    pub fn color_for(turn_number: u32) -> PlayerColor {
        if turn_number % 2 == 1 {
            PlayerColor::Black
        } else {
            PlayerColor::White
        }
    }

    /// Resets to turn 1 with Black to move.
    #[instrument(skip(self))]
    pub fn init_first_turn(&mut self) {
        *self = Self::new();
    }

    /// Advances to the next turn, flipping the colour to move.
    #[instrument(skip(self), fields(turn_number = self.turn_number))]
    pub fn next_turn(&mut self) {
        self.turn_number += 1;
        self.color = self.color.opponent();
        debug!(turn_number = self.turn_number, color = %self.color, "Turn advanced");
    }

    /// Records a pie-rule claim.
    ///
    /// Only valid once, on turn 2. The turn number and colour to move are
    /// left untouched; the caller advances the turn as usual.
    #[instrument(skip(self), fields(turn_number = self.turn_number))]
    pub fn apply_pie_rule(&mut self) -> Result<(), TurnError> {
        if !self.is_pie_rule_turn() {
            return Err(TurnError::PieRuleUnavailable {
                turn_number: self.turn_number,
            });
        }
        if self.pie_rule_applied {
            return Err(TurnError::PieRuleAlreadyApplied);
        }
        self.pie_rule_applied = true;
        Ok(())
    }

    /// True while the pie rule may be claimed.
    pub fn is_pie_rule_turn(&self) -> bool {
        self.turn_number == PIE_RULE_TURN
    }

    /// Current turn number (starting at 1).
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Colour to move.
    pub fn current_color(&self) -> PlayerColor {
        self.color
    }

    /// Colour waiting for its move.
    pub fn current_opponent(&self) -> PlayerColor {
        self.color.opponent()
    }

    /// Whether the pie rule has been claimed.
    pub fn pie_rule_applied(&self) -> bool {
        self.pie_rule_applied
    }
}

impl Default for Turn {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialized form of a [`Turn`], checked on the way back in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSnapshot {
    /// Turn number, starting at 1.
    pub turn_number: u32,
    /// Colour to move.
    pub color: PlayerColor,
    /// Whether the pie rule has been claimed.
    pub pie_rule_applied: bool,
}

impl From<Turn> for TurnSnapshot {
    fn from(turn: Turn) -> Self {
        Self {
            turn_number: turn.turn_number,
            color: turn.color,
            pie_rule_applied: turn.pie_rule_applied,
        }
    }
}

impl TryFrom<TurnSnapshot> for Turn {
    type Error = TurnError;

    fn try_from(snapshot: TurnSnapshot) -> Result<Self, Self::Error> {
        let mut turn = Turn::at(snapshot.turn_number)?;
        if turn.color != snapshot.color {
            return Err(TurnError::ColorMismatch {
                turn_number: snapshot.turn_number,
                expected: turn.color,
                found: snapshot.color,
            });
        }
        // The claim happens on the pie turn, so it cannot predate it.
        if snapshot.pie_rule_applied && snapshot.turn_number < PIE_RULE_TURN {
            return Err(TurnError::PieRuleUnavailable {
                turn_number: snapshot.turn_number,
            });
        }
        turn.pie_rule_applied = snapshot.pie_rule_applied;
        Ok(turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_turn_is_black() {
        let mut turn = Turn::at(7).unwrap();
        turn.init_first_turn();
        assert_eq!(turn.turn_number(), 1);
        assert_eq!(turn.current_color(), PlayerColor::Black);
        assert_eq!(turn.current_opponent(), PlayerColor::White);
    }

    #[test]
    fn test_next_turn_flips_color() {
        let mut turn = Turn::new();
        turn.next_turn();
        assert_eq!(turn.turn_number(), 2);
        assert_eq!(turn.current_color(), PlayerColor::White);
    }

    #[test]
    fn test_pie_rule_then_next_turn() {
        let mut turn = Turn::at(2).unwrap();
        turn.apply_pie_rule().unwrap();
        assert_eq!(turn.turn_number(), 2);
        assert_eq!(turn.current_color(), PlayerColor::White);

        turn.next_turn();
        assert_eq!(turn.turn_number(), 3);
        assert_eq!(turn.current_color(), PlayerColor::Black);
        assert!(turn.pie_rule_applied());
    }

    #[test]
    fn test_pie_rule_outside_window_leaves_state() {
        for turn_number in [1, 3, 4, 20] {
            let mut turn = Turn::at(turn_number).unwrap();
            let before = turn;
            assert_eq!(
                turn.apply_pie_rule(),
                Err(TurnError::PieRuleUnavailable { turn_number })
            );
            assert_eq!(turn, before);
        }
    }

    #[test]
    fn test_pie_rule_only_once() {
        let mut turn = Turn::at(2).unwrap();
        turn.apply_pie_rule().unwrap();
        let before = turn;
        assert_eq!(turn.apply_pie_rule(), Err(TurnError::PieRuleAlreadyApplied));
        assert_eq!(turn, before);
    }

    #[test]
    fn test_turn_zero_rejected() {
        assert_eq!(
            Turn::at(0),
            Err(TurnError::InvalidTurnNumber { turn_number: 0 })
        );
    }
}
