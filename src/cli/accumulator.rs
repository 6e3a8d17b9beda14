//! Statement accumulation
//!
//! Lines typed at the REPL are collected until they form a meta-command or a
//! complete SQL statement sequence. The buffer is empty while awaiting a new
//! statement and non-empty while a statement is being continued; no other
//! state is kept.

use crate::cli::commands::Command;
use crate::database::engine;

/// Result of feeding one line to the buffer
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The input was blank; nothing to do
    Blank,
    /// More input is needed to finish the statement
    Incomplete,
    /// A meta-command or complete SQL is ready; the buffer has been cleared
    Ready(Command),
}

/// Lines accumulated since the last statement boundary
#[derive(Debug, Default)]
pub struct StatementBuffer {
    lines: Vec<String>,
}

impl StatementBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while awaiting the start of a new statement
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Accumulated text, lines joined with `\n`
    pub fn source(&self) -> String {
        self.lines.join("\n")
    }

    /// Drop anything accumulated so far
    pub fn reset(&mut self) {
        self.lines.clear();
    }

    /// Append `line` and decide whether the accumulated input is ready.
    ///
    /// Meta-commands are recognized before completeness is checked, so they
    /// never reach the engine.
    pub fn push(&mut self, line: &str) -> Step {
        self.lines.push(line.to_string());
        let source = self.source();

        if source.trim().is_empty() {
            self.reset();
            return Step::Blank;
        }

        match Command::classify(&source) {
            Command::Sql { text } => {
                if !engine::is_complete(&text) {
                    return Step::Incomplete;
                }
                self.reset();
                Step::Ready(Command::Sql { text })
            }
            command => {
                self.reset();
                Step::Ready(command)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_statement_is_ready() {
        let mut buffer = StatementBuffer::new();
        assert_eq!(
            buffer.push("SELECT 1;"),
            Step::Ready(Command::Sql {
                text: "SELECT 1;".to_string()
            })
        );
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_incomplete_prefix_is_retained_verbatim() {
        let mut buffer = StatementBuffer::new();
        assert_eq!(buffer.push("SELECT 1"), Step::Incomplete);
        assert!(!buffer.is_empty());
        assert_eq!(buffer.source(), "SELECT 1");
    }

    #[test]
    fn test_statement_spanning_lines() {
        let mut buffer = StatementBuffer::new();
        assert_eq!(buffer.push("SELECT"), Step::Incomplete);
        assert_eq!(buffer.push("  1"), Step::Incomplete);
        assert_eq!(
            buffer.push(";"),
            Step::Ready(Command::Sql {
                text: "SELECT\n  1\n;".to_string()
            })
        );
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_blank_lines_when_awaiting() {
        let mut buffer = StatementBuffer::new();
        assert_eq!(buffer.push(""), Step::Blank);
        assert_eq!(buffer.push("   "), Step::Blank);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_blank_line_while_continuing_is_kept() {
        let mut buffer = StatementBuffer::new();
        assert_eq!(buffer.push("SELECT 'a"), Step::Incomplete);
        assert_eq!(buffer.push(""), Step::Incomplete);
        assert_eq!(buffer.source(), "SELECT 'a\n");
    }

    #[test]
    fn test_meta_commands_clear_buffer() {
        let mut buffer = StatementBuffer::new();
        assert_eq!(buffer.push(".version"), Step::Ready(Command::Version));
        assert!(buffer.is_empty());
        assert_eq!(buffer.push(".help"), Step::Ready(Command::Help));
        assert!(buffer.is_empty());
        assert_eq!(buffer.push(".quit"), Step::Ready(Command::Quit));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_meta_command_after_partial_sql_is_not_special() {
        let mut buffer = StatementBuffer::new();
        assert_eq!(buffer.push("SELECT"), Step::Incomplete);
        assert_eq!(buffer.push(".quit"), Step::Incomplete);
        assert_eq!(buffer.source(), "SELECT\n.quit");
    }

    #[test]
    fn test_multi_statement_input_is_one_unit() {
        let mut buffer = StatementBuffer::new();
        let sql = "CREATE TABLE t(x); INSERT INTO t VALUES (1); SELECT * FROM t;";
        assert_eq!(
            buffer.push(sql),
            Step::Ready(Command::Sql {
                text: sql.to_string()
            })
        );
    }

    #[test]
    fn test_terminator_in_literal_keeps_waiting() {
        let mut buffer = StatementBuffer::new();
        assert_eq!(buffer.push("SELECT ';"), Step::Incomplete);
        assert!(matches!(buffer.push("';"), Step::Ready(Command::Sql { .. })));
    }

    #[test]
    fn test_reset_discards_partial_input() {
        let mut buffer = StatementBuffer::new();
        buffer.push("SELECT");
        buffer.reset();
        assert!(buffer.is_empty());
        assert_eq!(buffer.source(), "");
    }
}
