//! Line sources for the REPL
//!
//! The REPL reads through [`LineReader`] so it can be driven by the terminal
//! (rustyline) or by a fixed script.

use crate::cli::completion::SqlHelper;
use crate::error::Result;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config, Editor};
use std::collections::VecDeque;
use std::path::PathBuf;
use tracing::{debug, warn};

/// What a read produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(String),
    /// The user pressed the interrupt key
    Interrupted,
    /// End of input
    Eof,
}

/// Something the REPL can read lines from
pub trait LineReader {
    /// Show `prompt` and read one line
    fn read_line(&mut self, prompt: &str) -> Result<Input>;

    /// Called once when the REPL stops reading
    fn finish(&mut self) {}
}

/// Interactive terminal input with history and keyword completion
pub struct TerminalReader {
    editor: Editor<SqlHelper, DefaultHistory>,
    history_path: Option<PathBuf>,
}

impl TerminalReader {
    /// Create a reader; history is loaded from `history_path` when given
    pub fn new(color: bool, history_path: Option<PathBuf>) -> Result<Self> {
        let config = Config::builder()
            .history_ignore_space(true)
            .completion_type(CompletionType::List)
            .auto_add_history(true)
            .build();

        let mut editor = Editor::<SqlHelper, DefaultHistory>::with_config(config)?;
        editor.set_helper(Some(SqlHelper::new(color)));

        if let Some(path) = &history_path {
            // History file doesn't exist yet on first run, that's fine
            if let Err(e) = editor.load_history(path) {
                debug!(path = %path.display(), error = %e, "history not loaded");
            }
        }

        Ok(Self {
            editor,
            history_path,
        })
    }
}

impl LineReader for TerminalReader {
    fn read_line(&mut self, prompt: &str) -> Result<Input> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Input::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => Ok(Input::Eof),
            Err(e) => Err(e.into()),
        }
    }

    fn finish(&mut self) {
        let Some(path) = &self.history_path else {
            return;
        };
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!(path = %parent.display(), error = %e, "could not create history directory");
                return;
            }
        }
        match self.editor.save_history(path) {
            Ok(()) => debug!(path = %path.display(), "history saved"),
            Err(e) => warn!(path = %path.display(), error = %e, "could not save history"),
        }
    }
}

/// Reads from a fixed list of inputs, recording every prompt shown
#[derive(Debug, Default)]
pub struct ScriptedReader {
    inputs: VecDeque<Input>,
    prompts: Vec<String>,
}

impl ScriptedReader {
    /// Script of plain lines, followed by end of input
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_inputs(lines.into_iter().map(|line| Input::Line(line.into())))
    }

    /// Script of arbitrary inputs, followed by end of input
    pub fn from_inputs(inputs: impl IntoIterator<Item = Input>) -> Self {
        Self {
            inputs: inputs.into_iter().collect(),
            prompts: Vec::new(),
        }
    }

    /// Prompts shown so far, in order
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Inputs not consumed yet
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl LineReader for ScriptedReader {
    fn read_line(&mut self, prompt: &str) -> Result<Input> {
        self.prompts.push(prompt.to_string());
        Ok(self.inputs.pop_front().unwrap_or(Input::Eof))
    }
}
