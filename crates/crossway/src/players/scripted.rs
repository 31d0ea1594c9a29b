//! Player that replays a prepared move list.

use super::Player;
use crate::input::parse_script_line;
use anyhow::{Context, Result};
use crossway_rules::{Match, MatchError, TurnAction};
use derive_more::{Display, Error};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// One action of a script, with the line it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptedAction {
    /// 1-based line number in the script text.
    pub line: usize,
    /// Action on that line.
    pub action: TurnAction,
}

/// A parsed move list, consumed from the front by both seats.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    actions: VecDeque<ScriptedAction>,
}

impl Script {
    /// Parses script text, skipping blank lines and `#` comments.
    #[instrument(skip(text))]
    pub fn parse(text: &str) -> Result<Self> {
        let mut actions = VecDeque::new();
        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            if let Some(action) =
                parse_script_line(raw).with_context(|| format!("Line {line} is not a move"))?
            {
                actions.push_back(ScriptedAction { line, action });
            }
        }
        debug!(actions = actions.len(), "Parsed script");
        Ok(Self { actions })
    }

    /// Number of actions not yet played.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether every action has been played.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Takes the next unplayed action.
    pub fn next_action(&mut self) -> Option<ScriptedAction> {
        self.actions.pop_front()
    }

    /// Wraps the script so both seats can draw from it.
    pub fn shared(self) -> Arc<Mutex<Script>> {
        Arc::new(Mutex::new(self))
    }
}

impl From<Vec<TurnAction>> for Script {
    fn from(actions: Vec<TurnAction>) -> Self {
        Self {
            actions: actions
                .into_iter()
                .enumerate()
                .map(|(index, action)| ScriptedAction {
                    line: index + 1,
                    action,
                })
                .collect(),
        }
    }
}

/// A scripted action the match refused.
#[derive(Debug, Clone, PartialEq, Display, Error)]
#[display("Line {line} rejected: {source}")]
pub struct RejectedLine {
    /// Line of the refused action.
    pub line: usize,
    /// Why the match refused it.
    pub source: MatchError,
}

/// Plays whatever the shared script says next.
///
/// Stops the match on the first refused action.
pub struct ScriptedPlayer {
    name: String,
    script: Arc<Mutex<Script>>,
    last_line: usize,
}

impl ScriptedPlayer {
    /// Creates a scripted player drawing from `script`.
    pub fn new(name: impl Into<String>, script: Arc<Mutex<Script>>) -> Self {
        Self {
            name: name.into(),
            script,
            last_line: 0,
        }
    }
}

#[async_trait::async_trait]
impl Player for ScriptedPlayer {
    async fn choose_action(&mut self, _game: &Match) -> Result<Option<TurnAction>> {
        let next = self.script.lock().await.next_action();
        Ok(next.map(|ScriptedAction { line, action }| {
            debug!(player = %self.name, line, ?action, "Playing scripted action");
            self.last_line = line;
            action
        }))
    }

    async fn rejected(&mut self, error: &MatchError) -> Result<()> {
        Err(RejectedLine {
            line: self.last_line,
            source: error.clone(),
        }
        .into())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_line_numbers() {
        let script = Script::parse("# opening\n1,4\n\npie\n  7,7  \n").unwrap();
        let lines: Vec<_> = script.actions.iter().map(|a| a.line).collect();
        assert_eq!(lines, vec![2, 4, 5]);
        assert_eq!(script.actions[1].action, TurnAction::ClaimPieRule);
    }

    #[test]
    fn test_parse_reports_bad_line() {
        let err = Script::parse("1,1\n2,2\nhello\n").unwrap_err();
        assert!(err.to_string().contains("Line 3"));
    }

    #[tokio::test]
    async fn test_seats_share_one_script() {
        let script = Script::from(vec![
            TurnAction::Place { row: 1, column: 1 },
            TurnAction::Place { row: 2, column: 2 },
        ])
        .shared();
        let mut first = ScriptedPlayer::new("first", script.clone());
        let mut second = ScriptedPlayer::new("second", script.clone());
        let game = Match::new();

        assert_eq!(
            first.choose_action(&game).await.unwrap(),
            Some(TurnAction::Place { row: 1, column: 1 })
        );
        assert_eq!(
            second.choose_action(&game).await.unwrap(),
            Some(TurnAction::Place { row: 2, column: 2 })
        );
        assert_eq!(first.choose_action(&game).await.unwrap(), None);
        assert!(script.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_rejection_carries_line() {
        let script = Script::parse("\n\n5,5\n").unwrap().shared();
        let mut player = ScriptedPlayer::new("p", script);
        player.choose_action(&Match::new()).await.unwrap();

        let err = player.rejected(&MatchError::MatchOver).await.unwrap_err();
        let rejected = err.downcast_ref::<RejectedLine>().unwrap();
        assert_eq!(rejected.line, 3);
        assert_eq!(rejected.source, MatchError::MatchOver);
    }
}
