//! Application driver
//!
//! Opens the session, runs either one SQL string or the REPL, and closes the
//! session. Every way out of the run (normal end, `.quit`, a failed one-shot
//! statement, an error) passes through the single close in [`run_session`].

use crate::cli::args::Args;
use crate::cli::input::{LineReader, TerminalReader};
use crate::cli::repl::{Prompts, Repl};
use crate::config::storage;
use crate::database::engine;
use crate::database::executor::{self, ErrorMode};
use crate::database::session::Session;
use crate::error::{Result, ShellError};
use crate::output::Console;
use std::process::ExitCode;
use tracing::{debug, warn};

/// How the shell finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// A one-shot statement failed and was reported
    Failure,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Failure => ExitCode::from(1),
        }
    }
}

/// What to do once the session is open
pub enum Mode<'r, R: LineReader> {
    /// Run one SQL string against the session and stop
    OneShot(&'r str),
    /// Read statements from `reader`
    Interactive { reader: &'r mut R, prompts: Prompts },
}

/// Run the shell as invoked from the command line
pub async fn run(args: Args) -> Result<Outcome> {
    if args.version {
        println!("SQLite version {}", engine::sqlite_version());
        return Ok(Outcome::Success);
    }

    let config = storage::load(args.config.as_deref())?;
    let color = config.color.enabled();
    let console = Console::stdio(color);

    match args.one_shot_sql() {
        Some(sql) => {
            run_session::<TerminalReader>(&args.filename, Mode::OneShot(sql), console).await
        }
        None => {
            let mut reader = TerminalReader::new(color, config.history.path())?;
            let mode = Mode::Interactive {
                reader: &mut reader,
                prompts: config.prompts(),
            };
            run_session(&args.filename, mode, console).await
        }
    }
}

/// Open the database at `path`, drive it according to `mode`, then close it.
pub async fn run_session<R: LineReader>(
    path: &str,
    mode: Mode<'_, R>,
    mut console: Console,
) -> Result<Outcome> {
    let mut session = Session::open(path).await?;

    let outcome = match mode {
        Mode::OneShot(sql) => executor::execute(&mut session, sql, &mut console, ErrorMode::Fatal)
            .await
            .map(|()| Outcome::Success),
        Mode::Interactive { reader, prompts } => {
            let name = session.display_name();
            let mut repl = Repl::new(session.cursor(), console, prompts);
            interact(&mut repl, &name, reader).await
        }
    };

    if let Err(e) = session.close().await {
        warn!(error = %e, "failed to close session");
        if outcome.is_ok() {
            return Err(e);
        }
    }

    match outcome {
        Err(ShellError::StatementFailed) => Ok(Outcome::Failure),
        other => other,
    }
}

async fn interact<R: LineReader>(
    repl: &mut Repl<'_>,
    name: &str,
    reader: &mut R,
) -> Result<Outcome> {
    repl.print_banner(name)?;
    let exit = repl.run(reader).await?;
    debug!(?exit, "interactive session ended");
    Ok(Outcome::Success)
}
