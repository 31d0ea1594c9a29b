//! Text rendering of boards and match events.

use crate::orchestrator::GameEvent;
use crossway_rules::{Board, FIRST, Intersection, LAST, Match, MatchStatus, PlayerColor};
use std::fmt::Write as _;
use std::io::{self, Write};
use strum::IntoEnumIterator;
use tokio::sync::mpsc;
use tracing::{debug, instrument};

/// Symbol drawn for a stone of `color`.
pub fn symbol(color: PlayerColor) -> char {
    match color {
        PlayerColor::Black => 'O',
        PlayerColor::White => 'x',
    }
}

/// Renders the board as a grid with a legend, row numbers on the left and
/// column numbers underneath.
///
/// `viewer`, when given, is marked "(you)" in the legend.
pub fn render_board(board: &Board, viewer: Option<PlayerColor>) -> String {
    let mut out = String::from("\n");
    for color in PlayerColor::iter() {
        let you = if viewer == Some(color) { " (you)" } else { "" };
        let _ = writeln!(out, "{} --> {} stones{}", symbol(color), color, you);
    }
    out.push('\n');

    let separator = format!("   -{}", "----".repeat((LAST - FIRST + 1) as usize));
    out.push_str(&separator);
    out.push('\n');
    for row in FIRST..=LAST {
        let _ = write!(out, "{row:<3}");
        for column in FIRST..=LAST {
            let cell = board
                .stone_color_at(Intersection::new(row, column))
                .map_or(' ', symbol);
            let _ = write!(out, "| {cell} ");
        }
        out.push_str("|\n");
    }
    out.push_str(&separator);
    out.push('\n');

    out.push_str("     ");
    for column in FIRST..=LAST {
        let _ = write!(out, "{column:<4}");
    }
    out.truncate(out.trim_end().len());
    out.push('\n');
    out
}

/// One-line description of where the match stands.
pub fn render_status(game: &Match) -> String {
    match game.status() {
        MatchStatus::Won(color) => format!("{color} has won!"),
        MatchStatus::InProgress => format!(
            "No winner yet: turn {}, {} to play",
            game.turn().turn_number(),
            game.turn().current_color()
        ),
    }
}

/// Writes [`GameEvent`]s as console text.
pub struct Renderer<W> {
    out: W,
    show_boards: bool,
}

impl<W: Write> Renderer<W> {
    /// Creates a renderer that draws the board at every turn.
    pub fn new(out: W) -> Self {
        Self {
            out,
            show_boards: true,
        }
    }

    /// Stops drawing the board on [`GameEvent::BoardChanged`].
    pub fn without_boards(mut self) -> Self {
        self.show_boards = false;
        self
    }

    /// Writes a single event.
    pub fn render(&mut self, event: &GameEvent) -> io::Result<()> {
        match event {
            GameEvent::TurnStarted {
                turn_number,
                color,
                player,
            } => {
                writeln!(self.out, "\n===================")?;
                writeln!(self.out, "Turn {turn_number}: {color} plays ({player})")?;
                writeln!(self.out, "===================")?;
            }
            GameEvent::BoardChanged { board, viewer } => {
                if self.show_boards {
                    write!(self.out, "{}", render_board(board, Some(*viewer)))?;
                }
            }
            GameEvent::StonePlaced {
                player,
                intersection,
                color,
            } => writeln!(self.out, "{player} placed a {color} stone at {intersection}")?,
            GameEvent::PieRuleClaimed {
                player,
                now_playing,
            } => writeln!(
                self.out,
                "{player} claimed the pie rule and now plays {now_playing}"
            )?,
            GameEvent::MoveRejected { reason, .. } => writeln!(self.out, "{reason}")?,
            GameEvent::Prompt(text) => writeln!(self.out, "{text}")?,
            GameEvent::Won { player, color } => {
                writeln!(self.out, "{color} has won! Congratulations {player}")?
            }
            GameEvent::Abandoned { player } => writeln!(self.out, "{player} left the match")?,
        }
        self.out.flush()
    }

    /// Renders events until every sender is dropped, then returns the writer.
    #[instrument(skip_all)]
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<GameEvent>) -> io::Result<W> {
        while let Some(event) = events.recv().await {
            self.render(&event)?;
        }
        debug!("Event channel closed");
        Ok(self.out)
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_grid_layout() {
        let mut board = Board::new();
        board
            .place_stone(Intersection::new(1, 1), PlayerColor::Black)
            .unwrap();
        board
            .place_stone(Intersection::new(19, 19), PlayerColor::White)
            .unwrap();

        let text = render_board(&board, Some(PlayerColor::White));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], "O --> BLACK stones");
        assert_eq!(lines[2], "x --> WHITE stones (you)");
        assert!(lines[5].starts_with("1  | O |   |"));
        assert!(lines[23].starts_with("19 |   |"));
        assert!(lines[23].ends_with("| x |"));
        assert!(lines[25].starts_with("     1   2   3"));
        assert!(lines[25].ends_with("18  19"));
    }

    #[test]
    fn test_status_lines() {
        assert_eq!(
            render_status(&Match::new()),
            "No winner yet: turn 1, BLACK to play"
        );
    }

    #[test]
    fn test_renderer_hides_boards_on_request() {
        let mut renderer = Renderer::new(Vec::new()).without_boards();
        renderer
            .render(&GameEvent::BoardChanged {
                board: Board::new(),
                viewer: PlayerColor::Black,
            })
            .unwrap();
        renderer
            .render(&GameEvent::Won {
                player: "Ada".into(),
                color: PlayerColor::Black,
            })
            .unwrap();

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(text, "BLACK has won! Congratulations Ada\n");
    }

    #[tokio::test]
    async fn test_run_preserves_event_order() {
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(GameEvent::Prompt("first".into())).unwrap();
        tx.send(GameEvent::Abandoned {
            player: "Ada".into(),
        })
        .unwrap();
        drop(tx);

        let out = Renderer::new(Vec::new()).run(rx).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "first\nAda left the match\n");
    }
}
