//! Match orchestration: one game of Crossway from first stone to winner.

use super::action::{MatchError, PlacementIntent, TurnAction};
use super::board::Board;
use super::contracts::{ConsistentState, Contract, PieRuleContract, PlacementContract};
use super::rules;
use super::turn::Turn;
use super::types::{Intersection, PlayerColor};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// A participant, independent of the colour they currently play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Seat {
    /// The participant who opened the match.
    First,
    /// The participant who joined it.
    Second,
}

impl Seat {
    /// Returns the other seat.
    pub fn other(self) -> Self {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }
}

/// Which seat controls which colour.
///
/// Starts with the first seat on Black; the pie rule swaps the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seats {
    black: Seat,
}

impl Seats {
    /// Seat currently playing `color`.
    pub fn seat_of(&self, color: PlayerColor) -> Seat {
        match color {
            PlayerColor::Black => self.black,
            PlayerColor::White => self.black.other(),
        }
    }

    /// Colour currently played by `seat`.
    pub fn color_of(&self, seat: Seat) -> PlayerColor {
        if seat == self.black {
            PlayerColor::Black
        } else {
            PlayerColor::White
        }
    }

    fn swap(&mut self) {
        self.black = self.black.other();
    }
}

impl Default for Seats {
    fn default() -> Self {
        Self { black: Seat::First }
    }
}

/// Something that happened on a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// A stone was placed.
    Placed {
        /// Turn on which it was placed.
        turn_number: u32,
        /// Where it was placed.
        intersection: Intersection,
        /// Its colour.
        color: PlayerColor,
    },
    /// The seats were swapped.
    PieRuleClaimed {
        /// Turn on which it was claimed.
        turn_number: u32,
    },
}

impl MatchEvent {
    /// Turn on which the event happened.
    pub fn turn_number(&self) -> u32 {
        match *self {
            MatchEvent::Placed { turn_number, .. } | MatchEvent::PieRuleClaimed { turn_number } => {
                turn_number
            }
        }
    }
}

/// Current status of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Still being played.
    InProgress,
    /// A colour completed its chain.
    Won(PlayerColor),
}

/// A single Crossway match.
///
/// Owns the board and turn state for the whole game. The rules borrow them
/// read-only; the only mutations happen through [`Match::place`] and
/// [`Match::claim_pie_rule`], and a rejected call changes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MatchSnapshot", into = "MatchSnapshot")]
pub struct Match {
    pub(crate) board: Board,
    pub(crate) turn: Turn,
    pub(crate) seats: Seats,
    pub(crate) status: MatchStatus,
    pub(crate) history: Vec<MatchEvent>,
    pub(crate) preset_stones: usize,
}

impl Match {
    /// Creates a new match on an empty board with Black to move.
    #[instrument]
    pub fn new() -> Self {
        Self::at_state(Board::new(), Turn::new())
    }

    /// Creates a match on a pre-seeded board, starting at turn 1.
    #[instrument(skip(board))]
    pub fn with_board(board: Board) -> Self {
        Self::at_state(board, Turn::new())
    }

    /// Resumes a match from an arbitrary board and turn.
    #[instrument(skip(board))]
    pub fn at_state(board: Board, turn: Turn) -> Self {
        let status = match rules::winner(&board) {
            Some(color) => MatchStatus::Won(color),
            None => MatchStatus::InProgress,
        };
        Self {
            preset_stones: board.len(),
            board,
            turn,
            seats: Seats::default(),
            status,
            history: Vec::new(),
        }
    }

    /// Puts the turn state back to turn 1, Black to move.
    #[instrument(skip(self))]
    pub fn start(&mut self) {
        self.turn.init_first_turn();
    }

    /// Plays the colour to move's chosen action.
    #[instrument(skip(self))]
    pub fn play_turn(&mut self, action: TurnAction) -> Result<MatchStatus, MatchError> {
        match action {
            TurnAction::Place { row, column } => {
                let intent = PlacementIntent::new(row, column, self.turn.current_color());
                self.place(intent)
            }
            TurnAction::ClaimPieRule => self.claim_pie_rule(),
        }
    }

    /// Validates and applies a placement, then checks for a win.
    ///
    /// The turn only advances when the placement did not win.
    #[instrument(skip(self), fields(intent = %intent))]
    pub fn place(&mut self, intent: PlacementIntent) -> Result<MatchStatus, MatchError> {
        PlacementContract::pre(self, &intent)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let intersection = intent.intersection();
        self.board.place_stone(intersection, intent.color)?;
        self.history.push(MatchEvent::Placed {
            turn_number: self.turn.turn_number(),
            intersection,
            color: intent.color,
        });

        if rules::check_win(&self.board, intent.color) {
            info!(winner = %intent.color, turn_number = self.turn.turn_number(), "Match won");
            self.status = MatchStatus::Won(intent.color);
        } else {
            self.turn.next_turn();
        }

        #[cfg(debug_assertions)]
        if let Err(err) = PlacementContract::post(&before, self) {
            *self = before;
            return Err(err);
        }

        Ok(self.status)
    }

    /// Swaps seats instead of placing a stone, then advances the turn.
    ///
    /// Only allowed on turn 2, while the match is in progress.
    #[instrument(skip(self))]
    pub fn claim_pie_rule(&mut self) -> Result<MatchStatus, MatchError> {
        PieRuleContract::pre(self, &())?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let turn_number = self.turn.turn_number();
        self.turn.apply_pie_rule()?;
        self.seats.swap();
        self.history.push(MatchEvent::PieRuleClaimed { turn_number });
        self.turn.next_turn();
        info!(turn_number, black = %self.seats.seat_of(PlayerColor::Black), "Pie rule claimed");

        #[cfg(debug_assertions)]
        if let Err(err) = PieRuleContract::post(&before, self) {
            *self = before;
            return Err(err);
        }

        Ok(self.status)
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the turn state.
    pub fn turn(&self) -> &Turn {
        &self.turn
    }

    /// Returns the seat assignment.
    pub fn seats(&self) -> &Seats {
        &self.seats
    }

    /// Returns the match status.
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    /// Returns everything that happened since the match was created.
    pub fn history(&self) -> &[MatchEvent] {
        &self.history
    }

    /// Number of stones that were on the board before the first turn.
    pub fn preset_stones(&self) -> usize {
        self.preset_stones
    }

    /// Returns the winner, if any.
    pub fn winner(&self) -> Option<PlayerColor> {
        match self.status {
            MatchStatus::Won(color) => Some(color),
            MatchStatus::InProgress => None,
        }
    }

    /// True once a colour has won.
    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    /// Seat that must act now.
    pub fn seat_to_move(&self) -> Seat {
        self.seats.seat_of(self.turn.current_color())
    }

    /// Every intersection the colour to move may play.
    #[instrument(skip(self))]
    pub fn legal_placements(&self) -> Vec<Intersection> {
        rules::legal_placements(&self.board, self.turn.current_color())
    }

    /// Replays actions on a fresh match.
    #[instrument(skip(actions))]
    pub fn replay(actions: &[TurnAction]) -> Result<Self, MatchError> {
        let mut game = Self::new();
        for action in actions {
            game.play_turn(*action)?;
        }
        Ok(game)
    }
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialized form of a [`Match`].
///
/// Restoring one runs [`ConsistentState`], so a snapshot whose status,
/// seats or history contradict its board is refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    /// Stones on the board.
    pub board: Board,
    /// Turn state.
    pub turn: Turn,
    /// Seat assignment.
    pub seats: Seats,
    /// Match status.
    pub status: MatchStatus,
    /// Recorded events.
    pub history: Vec<MatchEvent>,
    /// Stones present before the first recorded event.
    pub preset_stones: usize,
}

impl From<Match> for MatchSnapshot {
    fn from(game: Match) -> Self {
        Self {
            board: game.board,
            turn: game.turn,
            seats: game.seats,
            status: game.status,
            history: game.history,
            preset_stones: game.preset_stones,
        }
    }
}

impl TryFrom<MatchSnapshot> for Match {
    type Error = MatchError;

    fn try_from(snapshot: MatchSnapshot) -> Result<Self, Self::Error> {
        let game = Match {
            board: snapshot.board,
            turn: snapshot.turn,
            seats: snapshot.seats,
            status: snapshot.status,
            history: snapshot.history,
            preset_stones: snapshot.preset_stones,
        };
        ConsistentState::check(&game)?;
        Ok(game)
    }
}
