//! Game rules for Crossway.
//!
//! Pure functions over a borrowed [`Board`](crate::Board): placement
//! legality and win detection. Nothing here mutates state, so the rules can
//! be evaluated from any thread against a board that is not being changed.

pub mod placement;
pub mod win;

pub use placement::{
    Direction, diagonal_violations, is_diagonal_violation, legal_placements,
    validate_placement_intent,
};
pub use win::{check_win, winner};

use super::turn::Turn;

/// True on the one turn where the pie rule may be claimed.
pub fn is_pie_rule_turn(turn: &Turn) -> bool {
    turn.is_pie_rule_turn()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pie_window_is_turn_two_only() {
        let open: Vec<u32> = (1..=6)
            .filter(|&n| Turn::at(n).is_ok_and(|turn| is_pie_rule_turn(&turn)))
            .collect();
        assert_eq!(open, vec![2]);
    }
}
