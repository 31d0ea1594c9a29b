//! Human player typing at a console.

use super::Player;
use crate::input::{Command, parse_answer, parse_command};
use crate::orchestrator::GameEvent;
use anyhow::Result;
use crossway_rules::{Match, TurnAction};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info};

/// Line reader shared by every player seated at the same console.
pub type SharedInput<R> = Arc<Mutex<Lines<BufReader<R>>>>;

/// Wraps a reader so several hot-seat players can take turns on it.
pub fn shared_input<R: AsyncRead + Unpin>(reader: R) -> SharedInput<R> {
    Arc::new(Mutex::new(BufReader::new(reader).lines()))
}

/// Human player reading `row,column` lines.
///
/// Prompts go out as [`GameEvent::Prompt`] so they stay in order with the
/// rest of the match output.
pub struct ConsolePlayer<R> {
    name: String,
    input: SharedInput<R>,
    events: mpsc::UnboundedSender<GameEvent>,
    offer_pie_rule: bool,
    show_legal_moves: bool,
    pie_answered: bool,
}

impl<R> ConsolePlayer<R>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    /// Creates a new console player.
    pub fn new(
        name: impl Into<String>,
        input: SharedInput<R>,
        events: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        let name = name.into();
        info!(player = %name, "Creating console player");
        Self {
            name,
            input,
            events,
            offer_pie_rule: true,
            show_legal_moves: false,
            pie_answered: false,
        }
    }

    /// Sets whether this player is asked about the pie rule on turn 2.
    pub fn with_pie_rule(mut self, offer: bool) -> Self {
        self.offer_pie_rule = offer;
        self
    }

    /// Sets whether the prompt shows the number of legal placements.
    pub fn with_legal_moves(mut self, show: bool) -> Self {
        self.show_legal_moves = show;
        self
    }

    fn prompt(&self, text: impl Into<String>) -> Result<()> {
        self.events.send(GameEvent::Prompt(text.into()))?;
        Ok(())
    }

    async fn read_line(&self) -> Result<Option<String>> {
        Ok(self.input.lock().await.next_line().await?)
    }

    /// Asks Y/N until a valid answer arrives; `None` on end of input.
    async fn ask_pie_rule(&self) -> Result<Option<bool>> {
        loop {
            self.prompt("Do you want to claim the pie rule? Y-yes N-No")?;
            let Some(line) = self.read_line().await? else {
                return Ok(None);
            };
            match parse_answer(&line) {
                Ok(answer) => return Ok(Some(answer)),
                Err(e) => self.prompt(e.to_string())?,
            }
        }
    }
}

#[async_trait::async_trait]
impl<R> Player for ConsolePlayer<R>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    async fn choose_action(&mut self, game: &Match) -> Result<Option<TurnAction>> {
        let turn = game.turn();
        if self.offer_pie_rule
            && !self.pie_answered
            && turn.is_pie_rule_turn()
            && !turn.pie_rule_applied()
        {
            let Some(claim) = self.ask_pie_rule().await? else {
                return Ok(None);
            };
            self.pie_answered = true;
            if claim {
                debug!(player = %self.name, "Claiming pie rule");
                return Ok(Some(TurnAction::ClaimPieRule));
            }
        }

        loop {
            let mut text =
                String::from("Insert a valid placement for your stone (e.g. 3,4), or q to quit");
            if self.show_legal_moves {
                text.push_str(&format!(
                    " [{} legal placements]",
                    game.legal_placements().len()
                ));
            }
            self.prompt(text)?;

            let Some(line) = self.read_line().await? else {
                debug!(player = %self.name, "Input closed");
                return Ok(None);
            };
            match parse_command(&line) {
                Ok(Command::Quit) => return Ok(None),
                Ok(Command::Place { row, column }) => {
                    return Ok(Some(TurnAction::Place { row, column }));
                }
                Err(e) => self.prompt(e.to_string())?,
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossway_rules::PlayerColor;

    fn player(script: &'static str) -> (ConsolePlayer<&'static [u8]>, mpsc::UnboundedReceiver<GameEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ConsolePlayer::new("Ada", shared_input(script.as_bytes()), tx), rx)
    }

    fn prompts(rx: &mut mpsc::UnboundedReceiver<GameEvent>) -> Vec<String> {
        let mut out = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let GameEvent::Prompt(text) = event {
                out.push(text);
            }
        }
        out
    }

    #[tokio::test]
    async fn test_reprompts_after_malformed_line() {
        let (mut ada, mut rx) = player("nonsense\n4,5\n");
        let action = ada.choose_action(&Match::new()).await.unwrap();
        assert_eq!(action, Some(TurnAction::Place { row: 4, column: 5 }));

        let prompts = prompts(&mut rx);
        assert_eq!(prompts.len(), 3);
        assert!(prompts[1].contains("invalid input"));
    }

    #[tokio::test]
    async fn test_quit_and_end_of_input_leave() {
        let (mut ada, _rx) = player("q\n");
        assert_eq!(ada.choose_action(&Match::new()).await.unwrap(), None);
        assert_eq!(ada.choose_action(&Match::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_pie_prompt_reasks_then_claims() {
        let game = Match::replay(&[TurnAction::Place { row: 1, column: 1 }]).unwrap();
        assert_eq!(game.turn().current_color(), PlayerColor::White);

        let (mut ada, mut rx) = player("maybe\ny\n");
        let action = ada.choose_action(&game).await.unwrap();
        assert_eq!(action, Some(TurnAction::ClaimPieRule));
        assert!(prompts(&mut rx).contains(&"Input not allowed, insert either Y or N".to_string()));
    }

    #[tokio::test]
    async fn test_declined_pie_is_not_asked_again() {
        let game = Match::replay(&[TurnAction::Place { row: 1, column: 1 }]).unwrap();
        let (mut ada, mut rx) = player("N\n1,1\n2,2\n");

        assert_eq!(
            ada.choose_action(&game).await.unwrap(),
            Some(TurnAction::Place { row: 1, column: 1 })
        );
        // Same turn again, as after a rejected placement.
        assert_eq!(
            ada.choose_action(&game).await.unwrap(),
            Some(TurnAction::Place { row: 2, column: 2 })
        );
        let asked = prompts(&mut rx)
            .iter()
            .filter(|p| p.contains("pie rule"))
            .count();
        assert_eq!(asked, 1);
    }

    #[tokio::test]
    async fn test_pie_rule_disabled_skips_question() {
        let game = Match::replay(&[TurnAction::Place { row: 1, column: 1 }]).unwrap();
        let (ada, _rx) = player("y\n");
        let mut ada = ada.with_pie_rule(false);
        assert!(ada.choose_action(&game).await.is_ok_and(|a| a.is_none()));
    }

    #[tokio::test]
    async fn test_prompt_lists_legal_placements() {
        let (ada, mut rx) = player("3,3\n");
        let mut ada = ada.with_legal_moves(true);
        ada.choose_action(&Match::new()).await.unwrap();
        assert!(prompts(&mut rx)[0].ends_with("[361 legal placements]"));
    }
}
