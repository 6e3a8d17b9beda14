//! sqlite-repl Library
//!
//! This is the library interface for sqlite-repl.
//! The main binary is in src/main.rs.

pub mod app;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod output;
