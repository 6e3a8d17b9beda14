//! Statement executor
//!
//! Runs SQL text (possibly several `;`-separated statements) against a
//! [`QueryTarget`] one statement at a time, printing each returned row as it
//! arrives. Database errors never escape as faults: they are reported on the
//! error stream and, depending on the [`ErrorMode`], either swallowed or turned
//! into [`ShellError::StatementFailed`].

use crate::database::errors::ErrorReport;
use crate::database::session::QueryTarget;
use crate::database::statement::{self, Statement};
use crate::database::value::Row;
use crate::error::{Result, ShellError};
use crate::output::Console;
use futures::TryStreamExt;
use sqlx::sqlite::SqliteQueryResult;
use sqlx::{Either, Executor, Statement as _};
use tracing::debug;

/// What to do after a database error has been reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorMode {
    /// Report and carry on (interactive use)
    Suppress,
    /// Report and fail the run (one-shot use)
    Fatal,
}

/// Execute `sql` against `target`, streaming rows to `console`.
///
/// Statements run in order and the first failure stops the rest. Errors
/// writing to the console are returned as-is. Database errors are reported and
/// then handled according to `mode`; they are never retried.
pub async fn execute<T: QueryTarget>(
    target: &mut T,
    sql: &str,
    console: &mut Console,
    mode: ErrorMode,
) -> Result<()> {
    for statement in statement::split(sql) {
        if let Err(report) = run_statement(target, &statement, console).await? {
            debug!(error = %report, "statement failed");
            console.error(&report)?;
            return match mode {
                ErrorMode::Suppress => Ok(()),
                ErrorMode::Fatal => Err(ShellError::StatementFailed),
            };
        }
    }
    Ok(())
}

/// Run one statement. The outer error is a console failure, the inner one a
/// database failure to report.
async fn run_statement<T: QueryTarget>(
    target: &mut T,
    statement: &Statement<'_>,
    console: &mut Console,
) -> Result<std::result::Result<(), ErrorReport>> {
    debug!(sql = statement.text(), kind = ?statement.kind(), "executing");
    let conn = target.connection();

    let parameters = match (&mut *conn).prepare(statement.text()).await {
        Ok(prepared) => match prepared.parameters() {
            Some(Either::Left(types)) => types.len(),
            Some(Either::Right(count)) => count,
            None => 0,
        },
        Err(e) => return Ok(Err(ErrorReport::from(&e))),
    };
    if parameters > 0 {
        return Ok(Err(ErrorReport::unbound_parameters(parameters, 0)));
    }

    let mut done = SqliteQueryResult::default();
    {
        let mut stream = conn.fetch_many(statement.text());
        loop {
            match stream.try_next().await {
                Ok(Some(Either::Left(result))) => done.extend([result]),
                Ok(Some(Either::Right(row))) => match Row::from_sqlite(&row) {
                    Ok(row) => console.row(&row)?,
                    Err(e) => return Ok(Err(ErrorReport::from(&e))),
                },
                Ok(None) => break,
                Err(e) => return Ok(Err(ErrorReport::from(&e))),
            }
        }
    }

    target.record(statement.kind(), &done);
    Ok(Ok(()))
}
