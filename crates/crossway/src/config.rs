//! Match configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings for a console match.
///
/// Names belong to seats, not colours: the first player opens as Black, and
/// a pie-rule claim swaps which name plays which colour.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Name of the player who opens the match.
    #[serde(default = "default_first_player")]
    first_player: String,

    /// Name of the player who joins the match.
    #[serde(default = "default_second_player")]
    second_player: String,

    /// Whether the second player is offered the pie rule on turn 2.
    #[serde(default = "default_pie_rule")]
    pie_rule: bool,

    /// Whether prompts show how many legal placements remain.
    #[serde(default)]
    show_legal_moves: bool,
}

fn default_first_player() -> String {
    "Player 1".to_string()
}

fn default_second_player() -> String {
    "Player 2".to_string()
}

fn default_pie_rule() -> bool {
    true
}

impl MatchConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            first = %config.first_player,
            second = %config.second_player,
            pie_rule = config.pie_rule,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads the file when a path is given, defaults otherwise.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            first_player: default_first_player(),
            second_player: default_second_player(),
            pie_rule: default_pie_rule(),
            show_legal_moves: false,
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
