//! Meta-commands
//!
//! Classifies accumulated REPL input as one of the dot commands or as SQL
//! text. Only an exact match of the whole (trimmed) input counts as a
//! meta-command; anything else, including unknown dot commands, is SQL.

use crate::database::engine;

/// One line of help shown by `.help`
pub const HELP_TEXT: &str = "Enter SQL code and press enter.";

/// Classified REPL input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `.version`: print the SQLite library version
    Version,
    /// `.help`: print a usage hint
    Help,
    /// `.quit`: leave the shell
    Quit,
    /// Anything else, handed to the engine
    Sql { text: String },
}

impl Command {
    /// Classify accumulated input
    pub fn classify(source: &str) -> Self {
        match source.trim() {
            ".version" => Command::Version,
            ".help" => Command::Help,
            ".quit" => Command::Quit,
            _ => Command::Sql {
                text: source.to_string(),
            },
        }
    }

    /// Output printed by the informational meta-commands
    pub fn output(&self) -> Option<String> {
        match self {
            Command::Version => Some(engine::sqlite_version().to_string()),
            Command::Help => Some(HELP_TEXT.to_string()),
            Command::Quit | Command::Sql { .. } => None,
        }
    }
}
