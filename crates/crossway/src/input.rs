//! Parsing of console and script lines.

use crossway_rules::TurnAction;
use derive_more::Display;
use tracing::debug;

/// Line typed to leave the match.
pub const QUIT: &str = "q";

/// Script keyword for a pie-rule claim.
pub const PIE: &str = "pie";

/// Malformed user input.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum InputError {
    /// The line is not of the form `row,column`.
    #[display("{_0:?} is an invalid input! Expected row,column (e.g. 3,4)")]
    InvalidInput(String),

    /// A yes/no question got some other answer.
    #[display("Input not allowed, insert either Y or N")]
    InvalidAnswer(String),
}

impl std::error::Error for InputError {}

/// What a player typed at the placement prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Place a stone.
    Place {
        /// Row of the stone.
        row: i32,
        /// Column of the stone.
        column: i32,
    },
    /// Leave the match.
    Quit,
}

/// Parses a `row,column` pair of unsigned decimal numbers.
///
/// Surrounding whitespace is ignored, whitespace around the comma is not.
/// Values too large for a coordinate are rejected here rather than wrapped,
/// so any number that survives reaches the board-boundary check intact.
pub fn parse_placement(line: &str) -> Result<(i32, i32), InputError> {
    let invalid = || InputError::InvalidInput(line.trim().to_string());
    let (row, column) = line.trim().split_once(',').ok_or_else(invalid)?;

    let number = |part: &str| {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        part.parse::<i32>().map_err(|_| invalid())
    };

    Ok((number(row)?, number(column)?))
}

/// Parses a line typed at the placement prompt.
pub fn parse_command(line: &str) -> Result<Command, InputError> {
    if line.trim() == QUIT {
        return Ok(Command::Quit);
    }
    let (row, column) = parse_placement(line)?;
    Ok(Command::Place { row, column })
}

/// Parses the answer to a Y/N question, case-insensitively.
pub fn parse_answer(line: &str) -> Result<bool, InputError> {
    match line.trim() {
        answer if answer.eq_ignore_ascii_case("y") => Ok(true),
        answer if answer.eq_ignore_ascii_case("n") => Ok(false),
        other => Err(InputError::InvalidAnswer(other.to_string())),
    }
}

/// Parses one line of a move script.
///
/// Blank lines and `#` comments yield `None`.
pub fn parse_script_line(line: &str) -> Result<Option<TurnAction>, InputError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    if line.eq_ignore_ascii_case(PIE) {
        return Ok(Some(TurnAction::ClaimPieRule));
    }
    let (row, column) = parse_placement(line)?;
    debug!(row, column, "Parsed script placement");
    Ok(Some(TurnAction::Place { row, column }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_placement() {
        assert_eq!(parse_placement("3,4"), Ok((3, 4)));
        assert_eq!(parse_placement(" 19,1\n"), Ok((19, 1)));
        assert_eq!(parse_placement("0,30"), Ok((0, 30)));
    }

    #[test]
    fn test_parse_placement_rejects_malformed() {
        for line in ["", "3", "3,", ",4", "3;4", "3, 4", "-1,2", "a,b", "1,2,3", "99999999999,1"] {
            assert!(
                matches!(parse_placement(line), Err(InputError::InvalidInput(_))),
                "{line:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("q"), Ok(Command::Quit));
        assert_eq!(parse_command("2,7"), Ok(Command::Place { row: 2, column: 7 }));
        assert!(parse_command("quit").is_err());
    }

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("Y"), Ok(true));
        assert_eq!(parse_answer("n"), Ok(false));
        assert_eq!(
            parse_answer("yes"),
            Err(InputError::InvalidAnswer("yes".to_string()))
        );
    }

    #[test]
    fn test_parse_script_line() {
        assert_eq!(parse_script_line("# opening"), Ok(None));
        assert_eq!(parse_script_line("   "), Ok(None));
        assert_eq!(parse_script_line("PIE"), Ok(Some(TurnAction::ClaimPieRule)));
        assert_eq!(
            parse_script_line("10,10"),
            Ok(Some(TurnAction::Place { row: 10, column: 10 }))
        );
        assert!(parse_script_line("ten,ten").is_err());
    }

    #[test]
    fn test_invalid_input_message() {
        let err = parse_placement("x").unwrap_err();
        assert!(err.to_string().contains("invalid input"));
    }
}
