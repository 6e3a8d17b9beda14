// sqlite-repl: an interactive shell for SQLite databases
//
// This is the main entry point for the sqlite-repl application.

use anyhow::Result;
use clap::Parser;
use sqlite_repl::app;
use sqlite_repl::cli::Args;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    sqlite_repl::logging::init_stderr_logging();

    let outcome = app::run(args).await?;
    Ok(outcome.into())
}
