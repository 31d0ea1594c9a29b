//! Contract-based validation for Crossway.
//!
//! Contracts pair the preconditions a transition needs with the
//! postconditions it must leave behind: {P} action {Q}.

use super::action::{MatchError, PlacementIntent};
use super::game::{Match, MatchEvent, MatchStatus, Seats};
use super::invariants::{CrosswayInvariants, InvariantSet, InvariantViolation};
use super::rules;
use super::turn::TurnError;
use tracing::instrument;

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MatchError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MatchError>;
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: nobody has won yet.
pub struct MatchInProgress;

impl MatchInProgress {
    /// Fails once the match has a winner.
    #[instrument(skip(game))]
    pub fn check(game: &Match) -> Result<(), MatchError> {
        if game.is_over() {
            Err(MatchError::MatchOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the intent is for the colour to move.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Fails when the intent's colour is not the one to move.
    #[instrument(skip(game))]
    pub fn check(intent: &PlacementIntent, game: &Match) -> Result<(), MatchError> {
        if intent.color != game.turn().current_color() {
            Err(MatchError::WrongPlayer(intent.color))
        } else {
            Ok(())
        }
    }
}

/// Composite precondition for placing a stone.
pub struct LegalPlacement;

impl LegalPlacement {
    /// Validates match status, turn order and the placement rules.
    #[instrument(skip(game))]
    pub fn check(intent: &PlacementIntent, game: &Match) -> Result<(), MatchError> {
        MatchInProgress::check(game)?;
        PlayersTurn::check(intent, game)?;
        rules::validate_placement_intent(game.board(), intent)?;
        Ok(())
    }
}

/// Precondition: a match restored from outside is internally consistent.
///
/// The status agrees with the board, the pie-rule record agrees with the
/// seats and the turn, and every invariant holds.
pub struct ConsistentState;

impl ConsistentState {
    /// Fails when the parts of the match contradict each other.
    #[instrument(skip(game))]
    pub fn check(game: &Match) -> Result<(), MatchError> {
        let expected = match rules::winner(game.board()) {
            Some(color) => MatchStatus::Won(color),
            None => MatchStatus::InProgress,
        };
        if game.status() != expected {
            return Err(MatchError::InvariantViolation(format!(
                "Status {:?} does not match the board ({:?})",
                game.status(),
                expected
            )));
        }

        let claims = game
            .history()
            .iter()
            .filter(|event| matches!(event, MatchEvent::PieRuleClaimed { .. }))
            .count();
        let swapped = *game.seats() != Seats::default();
        let applied = game.turn().pie_rule_applied();
        if claims > 1 || swapped != applied || (claims == 1 && !applied) {
            return Err(MatchError::InvariantViolation(
                "Pie rule record does not match the seats".to_string(),
            ));
        }

        CrosswayInvariants::check_all(game).map_err(|violations| {
            MatchError::InvariantViolation(format!(
                "Inconsistent match: {}",
                describe(&violations)
            ))
        })
    }
}

// ─────────────────────────────────────────────────────────────
//  Transition Contracts
// ─────────────────────────────────────────────────────────────

/// Contract for stone placement.
///
/// Preconditions: match in progress, colour to move, legal placement.
/// Postconditions: board grew by exactly one stone and all invariants hold.
pub struct PlacementContract;

impl Contract<Match, PlacementIntent> for PlacementContract {
    fn pre(game: &Match, intent: &PlacementIntent) -> Result<(), MatchError> {
        LegalPlacement::check(intent, game)
    }

    fn post(before: &Match, after: &Match) -> Result<(), MatchError> {
        if after.board().len() != before.board().len() + 1 {
            return Err(MatchError::InvariantViolation(
                "Placement must add exactly one stone".to_string(),
            ));
        }
        check_invariants(after)
    }
}

/// Contract for claiming the pie rule.
///
/// Preconditions: match in progress, pie-rule window open.
/// Postconditions: board untouched, seats swapped, all invariants hold.
pub struct PieRuleContract;

impl Contract<Match, ()> for PieRuleContract {
    fn pre(game: &Match, _action: &()) -> Result<(), MatchError> {
        MatchInProgress::check(game)?;
        if !rules::is_pie_rule_turn(game.turn()) {
            return Err(TurnError::PieRuleUnavailable {
                turn_number: game.turn().turn_number(),
            }
            .into());
        }
        Ok(())
    }

    fn post(before: &Match, after: &Match) -> Result<(), MatchError> {
        if before.board() != after.board() {
            return Err(MatchError::InvariantViolation(
                "Pie rule must not touch the board".to_string(),
            ));
        }
        if before.seats() == after.seats() {
            return Err(MatchError::InvariantViolation(
                "Pie rule must swap seats".to_string(),
            ));
        }
        check_invariants(after)
    }
}

fn check_invariants(game: &Match) -> Result<(), MatchError> {
    CrosswayInvariants::check_all(game).map_err(|violations| {
        MatchError::InvariantViolation(format!("Postcondition failed: {}", describe(&violations)))
    })
}

fn describe(violations: &[InvariantViolation]) -> String {
    violations
        .iter()
        .map(|v| v.description.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
