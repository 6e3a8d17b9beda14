//! Database module
//!
//! This module provides the session and cursor over one SQLite database,
//! statement execution, and the engine capabilities the shell relies on.

pub mod engine;
pub mod errors;
pub mod executor;
pub mod session;
pub mod statement;
pub mod value;

// Re-exports
pub use executor::{execute, ErrorMode};
pub use session::{Cursor, QueryTarget, Session};
