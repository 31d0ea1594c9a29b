//! Crossway console front-end.
//!
//! Wires two [`Player`]s to a [`crossway_rules::Match`] through an
//! [`Orchestrator`], which reports everything that happens as
//! [`GameEvent`]s for a [`Renderer`] to print.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod input;
pub mod orchestrator;
pub mod players;
pub mod render;
pub mod replay;

pub use config::{ConfigError, MatchConfig};
pub use input::{Command, InputError, parse_answer, parse_command, parse_placement, parse_script_line};
pub use orchestrator::{GameEvent, Orchestrator};
pub use players::{
    ConsolePlayer, Player, RejectedLine, Script, ScriptedAction, ScriptedPlayer, SharedInput,
    shared_input,
};
pub use render::{Renderer, render_board, render_status};
pub use replay::{ReplayOutcome, load_script, replay};
