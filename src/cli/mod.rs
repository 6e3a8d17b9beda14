//! CLI module
//!
//! This module provides the command-line interface for sqlite-repl,
//! including argument parsing, the REPL implementation and meta-commands.

pub mod accumulator;
pub mod args;
pub mod commands;
pub mod completion;
pub mod input;
pub mod repl;

// Re-exports
pub use args::Args;
pub use repl::Repl;
