//! Database sessions and cursors
//!
//! A [`Session`] owns the single connection to one database. A [`Cursor`]
//! borrows it to run statements while remembering per-cursor state across
//! executions.

use crate::database::statement::StatementKind;
use crate::error::{Result, ShellError};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteQueryResult};
use sqlx::{ConnectOptions, Connection};
use std::str::FromStr;
use tracing::{debug, info};

/// Path that selects a transient in-memory database
pub const MEMORY_PATH: &str = ":memory:";

/// Anything statements can be executed against
pub trait QueryTarget {
    /// The connection statements run on
    fn connection(&mut self) -> &mut SqliteConnection;

    /// Called with the result of each statement that ran to completion
    fn record(&mut self, _kind: StatementKind, _result: &SqliteQueryResult) {}
}

/// An open connection to exactly one database
pub struct Session {
    conn: SqliteConnection,
    path: String,
}

impl Session {
    /// Open (or create) the database at `path`; `:memory:` opens a transient
    /// in-memory database.
    pub async fn open(path: &str) -> Result<Self> {
        let options = if path == MEMORY_PATH {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| ShellError::open(path, e))?
        } else {
            SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
        };

        let conn = options
            .foreign_keys(false)
            .connect()
            .await
            .map_err(|e| ShellError::open(path, e))?;

        info!(path, "session opened");
        Ok(Self {
            conn,
            path: path.to_string(),
        })
    }

    /// Path the session was opened with
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_memory(&self) -> bool {
        self.path == MEMORY_PATH
    }

    /// Human-readable name of the database, as shown in the banner
    pub fn display_name(&self) -> String {
        if self.is_memory() {
            "a transient in-memory database".to_string()
        } else {
            format!("'{}'", self.path)
        }
    }

    /// Create a cursor bound to this session
    pub fn cursor(&mut self) -> Cursor<'_> {
        debug!(path = %self.path, "cursor created");
        Cursor {
            conn: &mut self.conn,
            lastrowid: None,
            rowcount: -1,
        }
    }

    /// Close the connection. Consuming `self` makes a second close impossible.
    pub async fn close(self) -> Result<()> {
        let path = self.path;
        self.conn.close().await?;
        info!(path = %path, "session closed");
        Ok(())
    }
}

impl QueryTarget for Session {
    fn connection(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }
}

/// A reusable execution handle bound to a [`Session`]
pub struct Cursor<'s> {
    conn: &'s mut SqliteConnection,
    lastrowid: Option<i64>,
    rowcount: i64,
}

impl Cursor<'_> {
    /// Row id of the most recent insert through this cursor that added a row
    pub fn lastrowid(&self) -> Option<i64> {
        self.lastrowid
    }

    /// Rows changed by the most recent statement when it was an insert, update
    /// or delete; -1 before any statement and after any other kind
    pub fn rowcount(&self) -> i64 {
        self.rowcount
    }
}

impl QueryTarget for Cursor<'_> {
    fn connection(&mut self) -> &mut SqliteConnection {
        self.conn
    }

    fn record(&mut self, kind: StatementKind, result: &SqliteQueryResult) {
        if !kind.changes_rows() {
            self.rowcount = -1;
            return;
        }

        self.rowcount = i64::try_from(result.rows_affected()).unwrap_or(i64::MAX);
        // The connection's insert rowid is stale after anything but an insert
        if kind == StatementKind::Insert && result.rows_affected() > 0 {
            self.lastrowid = Some(result.last_insert_rowid());
        }
    }
}
