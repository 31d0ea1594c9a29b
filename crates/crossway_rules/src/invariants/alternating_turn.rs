//! Alternating turn invariant: Black on odd turns, White on even ones.

use super::super::{Match, MatchEvent, MatchStatus, Turn};
use super::Invariant;

/// Invariant: recorded turns are consecutive, each stone matches the colour
/// of its turn, and the current turn follows the last recorded one.
///
/// A winning placement does not advance the turn, so a finished match sits on
/// the turn of its last stone.
pub struct AlternatingTurnInvariant;

impl Invariant<Match> for AlternatingTurnInvariant {
    fn holds(game: &Match) -> bool {
        let history = game.history();

        for event in history {
            if let MatchEvent::Placed {
                turn_number, color, ..
            } = *event
                && Turn::color_for(turn_number) != color
            {
                return false;
            }
        }

        for window in history.windows(2) {
            if window[1].turn_number() != window[0].turn_number() + 1 {
                return false;
            }
        }

        if game.turn().current_color() != Turn::color_for(game.turn().turn_number()) {
            return false;
        }

        match (history.last(), game.status()) {
            (None, _) => true,
            (Some(last), MatchStatus::InProgress) => {
                game.turn().turn_number() == last.turn_number() + 1
            }
            (Some(last), MatchStatus::Won(_)) => game.turn().turn_number() == last.turn_number(),
        }
    }

    fn description() -> &'static str {
        "Turns alternate (BLACK on odd turns, WHITE on even turns)"
    }
}
