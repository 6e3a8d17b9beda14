//! REPL implementation
//!
//! This module implements the interactive Read-Eval-Print Loop. Lines are fed
//! to a [`StatementBuffer`]; meta-commands are handled directly and complete
//! SQL runs on a single cursor that lives as long as the loop.

use crate::cli::accumulator::{StatementBuffer, Step};
use crate::cli::commands::Command;
use crate::cli::input::{Input, LineReader};
use crate::database::engine;
use crate::database::executor::{self, ErrorMode};
use crate::database::session::Cursor;
use crate::error::Result;
use crate::output::Console;
use tracing::debug;

/// Primary prompt, shown while awaiting a new statement
pub const PRIMARY_PROMPT: &str = "sqlite> ";
/// Continuation prompt, shown while a statement is incomplete
pub const CONTINUATION_PROMPT: &str = "    ... ";

/// Prompt strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompts {
    pub primary: String,
    pub continuation: String,
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            primary: PRIMARY_PROMPT.to_string(),
            continuation: CONTINUATION_PROMPT.to_string(),
        }
    }
}

/// Whether the loop keeps going after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Why the loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// `.quit` was entered
    Quit,
    /// Input ran out
    EndOfInput,
}

/// SQLite REPL
pub struct Repl<'s> {
    cursor: Cursor<'s>,
    buffer: StatementBuffer,
    console: Console,
    prompts: Prompts,
}

impl<'s> Repl<'s> {
    /// Create a REPL executing on `cursor`
    pub fn new(cursor: Cursor<'s>, console: Console, prompts: Prompts) -> Self {
        Self {
            cursor,
            buffer: StatementBuffer::new(),
            console,
            prompts,
        }
    }

    /// The prompt matching the current buffer state
    pub fn prompt(&self) -> &str {
        if self.buffer.is_empty() {
            &self.prompts.primary
        } else {
            &self.prompts.continuation
        }
    }

    pub fn buffer(&self) -> &StatementBuffer {
        &self.buffer
    }

    pub fn cursor(&self) -> &Cursor<'s> {
        &self.cursor
    }

    /// Print the banner to the error stream
    pub fn print_banner(&mut self, database: &str) -> Result<()> {
        let eof_key = if cfg!(windows) { "CTRL-Z" } else { "CTRL-D" };
        let banner = format!(
            "sqlite-repl, running on SQLite version {}\n\
             Connected to {}\n\
             \n\
             Each statement runs on a single cursor shared by the whole session.\n\
             Type \".help\" for more information; type \".quit\" or {} to quit.",
            engine::sqlite_version(),
            database,
            eof_key
        );
        self.console.notice(&banner)?;
        Ok(())
    }

    /// Read and evaluate lines until `.quit` or end of input
    pub async fn run<R: LineReader>(&mut self, reader: &mut R) -> Result<Exit> {
        let exit = loop {
            let prompt = self.prompt().to_string();
            let input = match reader.read_line(&prompt) {
                Ok(input) => input,
                Err(e) => {
                    reader.finish();
                    return Err(e);
                }
            };

            match input {
                Input::Line(line) => {
                    if self.handle_line(&line).await? == Flow::Quit {
                        break Exit::Quit;
                    }
                }
                Input::Interrupted => {
                    self.buffer.reset();
                    self.console.notice("^C")?;
                }
                Input::Eof => {
                    self.console.notice("")?;
                    break Exit::EndOfInput;
                }
            }
        };

        reader.finish();
        debug!(?exit, "repl finished");
        Ok(exit)
    }

    /// Feed one line of input
    pub async fn handle_line(&mut self, line: &str) -> Result<Flow> {
        match self.buffer.push(line) {
            Step::Blank | Step::Incomplete => Ok(Flow::Continue),
            Step::Ready(command) => self.dispatch(command).await,
        }
    }

    async fn dispatch(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Quit => Ok(Flow::Quit),
            Command::Sql { text } => {
                executor::execute(&mut self.cursor, &text, &mut self.console, ErrorMode::Suppress)
                    .await?;
                Ok(Flow::Continue)
            }
            informational => {
                if let Some(output) = informational.output() {
                    self.console.line(&output)?;
                }
                Ok(Flow::Continue)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::input::ScriptedReader;
    use crate::database::session::{Session, MEMORY_PATH};

    #[tokio::test]
    async fn test_prompt_follows_buffer_state() {
        let mut session = Session::open(MEMORY_PATH).await.unwrap();
        let (console, _captured) = Console::in_memory();
        let mut repl = Repl::new(session.cursor(), console, Prompts::default());

        assert_eq!(repl.prompt(), PRIMARY_PROMPT);
        repl.handle_line("SELECT 1").await.unwrap();
        assert_eq!(repl.prompt(), CONTINUATION_PROMPT);
        repl.handle_line(";").await.unwrap();
        assert_eq!(repl.prompt(), PRIMARY_PROMPT);
    }

    #[tokio::test]
    async fn test_valid_sql() {
        let mut session = Session::open(MEMORY_PATH).await.unwrap();
        let (console, captured) = Console::in_memory();
        let mut repl = Repl::new(session.cursor(), console, Prompts::default());
        let mut reader = ScriptedReader::new(["SELECT 1;"]);

        assert_eq!(repl.run(&mut reader).await.unwrap(), Exit::EndOfInput);
        assert_eq!(captured.stdout(), "(1,)\n");
        assert_eq!(reader.prompts(), &[PRIMARY_PROMPT, PRIMARY_PROMPT]);
    }

    #[tokio::test]
    async fn test_version_and_help() {
        let mut session = Session::open(MEMORY_PATH).await.unwrap();
        let (console, captured) = Console::in_memory();
        let mut repl = Repl::new(session.cursor(), console, Prompts::default());
        let mut reader = ScriptedReader::new([".version", ".help"]);

        repl.run(&mut reader).await.unwrap();
        assert_eq!(
            captured.stdout(),
            format!(
                "{}\n{}\n",
                engine::sqlite_version(),
                crate::cli::commands::HELP_TEXT
            )
        );
        assert_eq!(reader.prompts().len(), 3);
        assert!(reader.prompts().iter().all(|p| p == PRIMARY_PROMPT));
    }

    #[tokio::test]
    async fn test_quit_stops_reading() {
        let mut session = Session::open(MEMORY_PATH).await.unwrap();
        let (console, captured) = Console::in_memory();
        let mut repl = Repl::new(session.cursor(), console, Prompts::default());
        let mut reader = ScriptedReader::new([".quit", "SELECT 2;"]);

        assert_eq!(repl.run(&mut reader).await.unwrap(), Exit::Quit);
        assert_eq!(reader.remaining(), 1);
        assert_eq!(captured.stdout(), "");
        assert_eq!(reader.prompts(), &[PRIMARY_PROMPT]);
    }

    #[tokio::test]
    async fn test_quit_after_partial_sql_is_sql_text() {
        let mut session = Session::open(MEMORY_PATH).await.unwrap();
        let (console, captured) = Console::in_memory();
        let mut repl = Repl::new(session.cursor(), console, Prompts::default());
        let mut reader = ScriptedReader::new(["SELECT 1", ".quit", ";"]);

        assert_eq!(repl.run(&mut reader).await.unwrap(), Exit::EndOfInput);
        assert_eq!(reader.remaining(), 0);
        assert!(captured.stderr().starts_with("OperationalError (SQLITE_ERROR): "));
    }

    #[tokio::test]
    async fn test_incomplete_sql_waits_for_more() {
        let mut session = Session::open(MEMORY_PATH).await.unwrap();
        let (console, captured) = Console::in_memory();
        let mut repl = Repl::new(session.cursor(), console, Prompts::default());
        let mut reader = ScriptedReader::new(["SELECT 1"]);

        repl.run(&mut reader).await.unwrap();
        assert_eq!(captured.stdout(), "");
        assert_eq!(reader.prompts(), &[PRIMARY_PROMPT, CONTINUATION_PROMPT]);
        assert_eq!(repl.buffer().source(), "SELECT 1");
    }

    #[tokio::test]
    async fn test_multiline_sql() {
        let mut session = Session::open(MEMORY_PATH).await.unwrap();
        let (console, captured) = Console::in_memory();
        let mut repl = Repl::new(session.cursor(), console, Prompts::default());
        let mut reader = ScriptedReader::new(["SELECT 1", ";"]);

        repl.run(&mut reader).await.unwrap();
        assert_eq!(captured.stdout(), "(1,)\n");
        assert_eq!(
            reader.prompts(),
            &[PRIMARY_PROMPT, CONTINUATION_PROMPT, PRIMARY_PROMPT]
        );
    }

    #[tokio::test]
    async fn test_blank_lines_are_ignored() {
        let mut session = Session::open(MEMORY_PATH).await.unwrap();
        let (console, captured) = Console::in_memory();
        let mut repl = Repl::new(session.cursor(), console, Prompts::default());
        let mut reader = ScriptedReader::new(["", " "]);

        repl.run(&mut reader).await.unwrap();
        assert_eq!(captured.stdout(), "");
        assert_eq!(captured.stderr(), "\n");
        assert_eq!(reader.prompts(), &[PRIMARY_PROMPT; 3]);
    }

    #[tokio::test]
    async fn test_interrupt_discards_partial_statement() {
        let mut session = Session::open(MEMORY_PATH).await.unwrap();
        let (console, captured) = Console::in_memory();
        let mut repl = Repl::new(session.cursor(), console, Prompts::default());
        let mut reader = ScriptedReader::from_inputs([
            Input::Line("SELECT 'oops".to_string()),
            Input::Interrupted,
            Input::Line("SELECT 2;".to_string()),
        ]);

        repl.run(&mut reader).await.unwrap();
        assert_eq!(captured.stdout(), "(2,)\n");
        assert!(captured.stderr().starts_with("^C\n"));
        assert_eq!(
            reader.prompts(),
            &[
                PRIMARY_PROMPT,
                CONTINUATION_PROMPT,
                PRIMARY_PROMPT,
                PRIMARY_PROMPT
            ]
        );
    }

    #[tokio::test]
    async fn test_error_does_not_end_session() {
        let mut session = Session::open(MEMORY_PATH).await.unwrap();
        let (console, captured) = Console::in_memory();
        let mut repl = Repl::new(session.cursor(), console, Prompts::default());
        let mut reader =
            ScriptedReader::new(["sel;", "CREATE TABLE t(x);", "SELECT count(*) FROM t;"]);

        repl.run(&mut reader).await.unwrap();
        assert!(captured
            .stderr()
            .starts_with("OperationalError (SQLITE_ERROR): near \"sel\": syntax error\n"));
        assert_eq!(captured.stdout(), "(0,)\n");
    }

    #[tokio::test]
    async fn test_unknown_dot_command_is_reported_as_sql_error() {
        let mut session = Session::open(MEMORY_PATH).await.unwrap();
        let (console, captured) = Console::in_memory();
        let mut repl = Repl::new(session.cursor(), console, Prompts::default());
        let mut reader = ScriptedReader::new([".unknown_command;"]);

        repl.run(&mut reader).await.unwrap();
        assert!(captured
            .stderr()
            .starts_with("OperationalError (SQLITE_ERROR): near \".\": syntax error"));
        assert_eq!(reader.prompts(), &[PRIMARY_PROMPT, PRIMARY_PROMPT]);
    }

    #[tokio::test]
    async fn test_banner_goes_to_error_stream() {
        let mut session = Session::open(MEMORY_PATH).await.unwrap();
        let name = session.display_name();
        let (console, captured) = Console::in_memory();
        let mut repl = Repl::new(session.cursor(), console, Prompts::default());

        repl.print_banner(&name).unwrap();
        assert!(captured
            .stderr()
            .contains("Connected to a transient in-memory database"));
        assert!(captured.stderr().contains(engine::sqlite_version()));
        assert_eq!(captured.stdout(), "");
    }

    #[tokio::test]
    async fn test_cursor_is_shared_across_inputs() {
        let mut session = Session::open(MEMORY_PATH).await.unwrap();
        let (console, _captured) = Console::in_memory();
        let mut repl = Repl::new(session.cursor(), console, Prompts::default());

        repl.handle_line("CREATE TABLE t(x);").await.unwrap();
        repl.handle_line("INSERT INTO t VALUES ('a');").await.unwrap();
        assert_eq!(repl.cursor().lastrowid(), Some(1));

        repl.handle_line("SELECT * FROM t;").await.unwrap();
        repl.handle_line(".help").await.unwrap();
        assert_eq!(repl.cursor().lastrowid(), Some(1));
    }

    #[tokio::test]
    async fn test_custom_prompts() {
        let mut session = Session::open(MEMORY_PATH).await.unwrap();
        let (console, _captured) = Console::in_memory();
        let prompts = Prompts {
            primary: "db> ".to_string(),
            continuation: "..> ".to_string(),
        };
        let mut repl = Repl::new(session.cursor(), console, prompts);
        let mut reader = ScriptedReader::new(["SELECT"]);

        repl.run(&mut reader).await.unwrap();
        assert_eq!(reader.prompts(), &["db> ", "..> "]);
    }
}
