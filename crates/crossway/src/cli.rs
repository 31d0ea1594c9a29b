//! Command-line interface for crossway.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Crossway - connection game for two players on a 19x19 board
#[derive(Parser, Debug)]
#[command(name = "crossway")]
#[command(about = "Play or replay Crossway matches in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a hot-seat match on this console
    Play {
        /// Path to a TOML match config (defaults apply when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Replay a move list and print the result
    Replay {
        /// File with one `row,column` or `pie` per line
        file: PathBuf,

        /// Print the final match as JSON instead of a board
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_play_with_config() {
        let cli = Cli::try_parse_from(["crossway", "play", "--config", "match.toml"]).unwrap();
        match cli.command {
            Command::Play { config } => assert_eq!(config, Some(PathBuf::from("match.toml"))),
            other => panic!("Unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_replay_json() {
        let cli = Cli::try_parse_from(["crossway", "replay", "moves.txt", "--json"]).unwrap();
        match cli.command {
            Command::Replay { file, json } => {
                assert_eq!(file, PathBuf::from("moves.txt"));
                assert!(json);
            }
            other => panic!("Unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_replay_requires_file() {
        assert!(Cli::try_parse_from(["crossway", "replay"]).is_err());
    }
}
