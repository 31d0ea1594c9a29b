//! Replaying a move list through the orchestrator.

use crate::orchestrator::{GameEvent, Orchestrator};
use crate::players::{RejectedLine, Script, ScriptedPlayer};
use anyhow::{Context, Result};
use crossway_rules::Match;
use std::path::Path;
use tokio::sync::mpsc;
use tracing::{info, instrument};

/// Where a replay ended.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayOutcome {
    /// The match after the last accepted action.
    pub game: Match,
    /// The action that stopped the replay, if any was refused.
    pub rejected: Option<RejectedLine>,
}

/// Reads and parses a script file.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_script(path: impl AsRef<Path>) -> Result<Script> {
    let text = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read {}", path.as_ref().display()))?;
    Script::parse(&text)
}

/// Plays `script` from an empty board, both seats drawing from it in turn.
///
/// Stops at the first refused action and reports it in the outcome. Actions
/// left over once the match is won are refused as well.
#[instrument(skip_all, fields(actions = script.len()))]
pub async fn replay(script: Script, events: mpsc::UnboundedSender<GameEvent>) -> Result<ReplayOutcome> {
    let script = script.shared();
    let mut orchestrator = Orchestrator::new(
        Box::new(ScriptedPlayer::new("First", script.clone())),
        Box::new(ScriptedPlayer::new("Second", script.clone())),
        events,
    );

    let result = orchestrator.run().await;
    let mut game = orchestrator.into_game();

    match result {
        Ok(Some(winner)) => {
            let rejected = match script.lock().await.next_action() {
                Some(next) => game.play_turn(next.action).err().map(|source| RejectedLine {
                    line: next.line,
                    source,
                }),
                None => None,
            };
            match &rejected {
                Some(rejected) => {
                    info!(%winner, line = rejected.line, "Script continues past the win")
                }
                None => info!(%winner, "Replay finished"),
            }
            Ok(ReplayOutcome { game, rejected })
        }
        Ok(None) => {
            info!("Replay ran out of actions");
            Ok(ReplayOutcome {
                game,
                rejected: None,
            })
        }
        Err(err) => match err.downcast::<RejectedLine>() {
            Ok(rejected) => {
                info!(line = rejected.line, "Replay stopped on a refused action");
                Ok(ReplayOutcome {
                    game,
                    rejected: Some(rejected),
                })
            }
            Err(err) => Err(err),
        },
    }
}
