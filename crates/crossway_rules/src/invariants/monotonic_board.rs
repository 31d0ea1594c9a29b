//! Monotonic board invariant: stones are only ever added.

use super::super::{Match, MatchEvent};
use super::Invariant;

/// Invariant: every stone on the board is either preset or recorded in the
/// history, and every recorded stone is still there with its colour.
pub struct MonotonicBoardInvariant;

impl Invariant<Match> for MonotonicBoardInvariant {
    fn holds(game: &Match) -> bool {
        let mut placed = 0;
        for event in game.history() {
            if let MatchEvent::Placed {
                intersection, color, ..
            } = *event
            {
                if game.board().stone_color_at(intersection) != Some(color) {
                    return false;
                }
                placed += 1;
            }
        }
        game.board().len() == game.preset_stones() + placed
    }

    fn description() -> &'static str {
        "Board stones are monotonic (never overwritten or removed)"
    }
}
