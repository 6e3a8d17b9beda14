//! Command-line arguments

use crate::database::session::MEMORY_PATH;
use clap::Parser;
use std::path::PathBuf;

/// Interactive shell for SQLite databases
#[derive(Parser, Debug)]
#[command(name = "sqlite-repl", about, long_about = None, disable_version_flag = true)]
pub struct Args {
    /// SQLite database to open (defaults to ':memory:').
    /// A new database is created if the file does not previously exist.
    #[arg(default_value = MEMORY_PATH)]
    pub filename: String,

    /// An SQL query to execute. Any returned rows are printed to stdout.
    pub sql: Option<String>,

    /// Print underlying SQLite library version
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// SQL to run in one-shot mode; an empty argument counts as none
    pub fn one_shot_sql(&self) -> Option<&str> {
        self.sql.as_deref().filter(|sql| !sql.is_empty())
    }
}
