//! Match orchestration between two players.

use crate::players::Player;
use anyhow::Result;
use crossway_rules::{Board, Intersection, Match, MatchStatus, PlayerColor, Seat, TurnAction};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// Messages sent from the orchestrator (and players) to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A new turn is waiting for a decision.
    TurnStarted {
        /// Turn number.
        turn_number: u32,
        /// Colour to move.
        color: PlayerColor,
        /// Name of the player to move.
        player: String,
    },
    /// Board as the player to move sees it.
    BoardChanged {
        /// Current board.
        board: Board,
        /// Colour marked as "you" in the legend.
        viewer: PlayerColor,
    },
    /// A stone was accepted.
    StonePlaced {
        /// Who placed it.
        player: String,
        /// Where.
        intersection: Intersection,
        /// Its colour.
        color: PlayerColor,
    },
    /// The second player swapped sides.
    PieRuleClaimed {
        /// Who claimed it.
        player: String,
        /// Colour they play from now on.
        now_playing: PlayerColor,
    },
    /// A decision was refused; the match is unchanged.
    MoveRejected {
        /// Whose decision it was.
        player: String,
        /// Why.
        reason: String,
    },
    /// Text a player wants shown before it reads input.
    Prompt(String),
    /// The match is over.
    Won {
        /// Name of the winner.
        player: String,
        /// Winning colour.
        color: PlayerColor,
    },
    /// A player left before the match ended.
    Abandoned {
        /// Who left.
        player: String,
    },
}

/// Drives one match, asking each seat's player in turn.
pub struct Orchestrator {
    game: Match,
    first: Box<dyn Player>,
    second: Box<dyn Player>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl Orchestrator {
    /// Creates an orchestrator for a fresh match.
    pub fn new(
        first: Box<dyn Player>,
        second: Box<dyn Player>,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self::with_match(Match::new(), first, second, event_tx)
    }

    /// Creates an orchestrator that continues an existing match.
    pub fn with_match(
        game: Match,
        first: Box<dyn Player>,
        second: Box<dyn Player>,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            game,
            first,
            second,
            event_tx,
        }
    }

    /// The match being played.
    pub fn game(&self) -> &Match {
        &self.game
    }

    /// Consumes the orchestrator, returning the match in its final state.
    pub fn into_game(self) -> Match {
        self.game
    }

    fn name_of(&self, seat: Seat) -> String {
        match seat {
            Seat::First => self.first.name().to_string(),
            Seat::Second => self.second.name().to_string(),
        }
    }

    /// Runs the match until a colour wins or a player leaves.
    ///
    /// Returns the winning colour, or `None` if the match was abandoned.
    /// Rejected decisions are reported and the same player is asked again.
    #[instrument(skip(self), fields(first = %self.first.name(), second = %self.second.name()))]
    pub async fn run(&mut self) -> Result<Option<PlayerColor>> {
        info!("Starting match orchestration");

        loop {
            if let MatchStatus::Won(color) = self.game.status() {
                let player = self.name_of(self.game.seats().seat_of(color));
                info!(player = %player, %color, "Match won");
                self.event_tx.send(GameEvent::BoardChanged {
                    board: self.game.board().clone(),
                    viewer: color,
                })?;
                self.event_tx.send(GameEvent::Won { player, color })?;
                return Ok(Some(color));
            }

            let seat = self.game.seat_to_move();
            let color = self.game.turn().current_color();
            let player_name = self.name_of(seat);

            self.event_tx.send(GameEvent::TurnStarted {
                turn_number: self.game.turn().turn_number(),
                color,
                player: player_name.clone(),
            })?;
            self.event_tx.send(GameEvent::BoardChanged {
                board: self.game.board().clone(),
                viewer: color,
            })?;

            let player = match seat {
                Seat::First => &mut self.first,
                Seat::Second => &mut self.second,
            };

            debug!(player = %player_name, "Waiting for decision");
            let Some(action) = player.choose_action(&self.game).await? else {
                info!(player = %player_name, "Player left the match");
                self.event_tx.send(GameEvent::Abandoned {
                    player: player_name,
                })?;
                return Ok(None);
            };

            match self.game.play_turn(action) {
                Ok(_) => {
                    let event = match action {
                        TurnAction::Place { row, column } => GameEvent::StonePlaced {
                            player: player_name,
                            intersection: Intersection::new(row, column),
                            color,
                        },
                        TurnAction::ClaimPieRule => GameEvent::PieRuleClaimed {
                            player: player_name,
                            now_playing: self.game.seats().color_of(seat),
                        },
                    };
                    self.event_tx.send(event)?;
                }
                Err(error) => {
                    debug!(player = %player_name, %error, "Decision rejected");
                    self.event_tx.send(GameEvent::MoveRejected {
                        player: player_name,
                        reason: error.to_string(),
                    })?;
                    player.rejected(&error).await?;
                }
            }
        }
    }
}
