//! Player trait and implementations.

mod console;
mod scripted;

pub use console::{ConsolePlayer, SharedInput, shared_input};
pub use scripted::{RejectedLine, Script, ScriptedAction, ScriptedPlayer};

use anyhow::Result;
use crossway_rules::{Match, MatchError, TurnAction};

/// Trait for players that decide what to do with a turn.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Chooses an action for the turn the match is waiting on.
    ///
    /// Returns `None` when the player leaves the match.
    async fn choose_action(&mut self, game: &Match) -> Result<Option<TurnAction>>;

    /// Called when the last chosen action was refused.
    ///
    /// The match is unchanged and the same player will be asked again.
    /// Returning an error stops the match.
    async fn rejected(&mut self, _error: &MatchError) -> Result<()> {
        Ok(())
    }

    /// Returns the player's display name.
    fn name(&self) -> &str;
}
