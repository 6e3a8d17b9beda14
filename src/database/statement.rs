//! Statement splitting
//!
//! SQL text is cut into single statements at the terminators the engine
//! itself recognises, so each one can be checked and run on its own.

use crate::database::engine;

/// What a statement does to the database, judged by its leading keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// `INSERT` or `REPLACE`
    Insert,
    /// `UPDATE` or `DELETE`
    Modify,
    /// Queries, DDL, transaction control and everything else
    Other,
}

impl StatementKind {
    /// Classify `sql`, skipping leading whitespace and comments
    pub fn of(sql: &str) -> Self {
        let body = strip_leading_comments(sql);
        let end = body
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(body.len());
        let keyword = &body[..end];

        if keyword.eq_ignore_ascii_case("insert") || keyword.eq_ignore_ascii_case("replace") {
            StatementKind::Insert
        } else if keyword.eq_ignore_ascii_case("update") || keyword.eq_ignore_ascii_case("delete")
        {
            StatementKind::Modify
        } else {
            StatementKind::Other
        }
    }

    /// Whether the statement reports a count of changed rows
    pub fn changes_rows(self) -> bool {
        !matches!(self, StatementKind::Other)
    }
}

/// One statement cut out of a larger SQL text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statement<'a> {
    text: &'a str,
    kind: StatementKind,
}

impl<'a> Statement<'a> {
    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }
}

/// Split `sql` into statements, each ending at its terminating `;`.
///
/// Text after the last terminator is kept as a final statement. Pieces holding
/// nothing but whitespace, comments and a bare `;` are dropped.
pub fn split(sql: &str) -> Vec<Statement<'_>> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for (index, _) in sql.match_indices(';') {
        let candidate = &sql[start..=index];
        if engine::is_complete(candidate) {
            pieces.push(candidate);
            start = index + 1;
        }
    }
    pieces.push(&sql[start..]);

    pieces
        .into_iter()
        .filter(|piece| !is_empty_statement(piece))
        .map(|text| Statement {
            text,
            kind: StatementKind::of(text),
        })
        .collect()
}

fn is_empty_statement(piece: &str) -> bool {
    let body = strip_leading_comments(piece);
    body.is_empty() || body == ";"
}

fn strip_leading_comments(sql: &str) -> &str {
    let mut rest = sql.trim_start();
    loop {
        if let Some(tail) = rest.strip_prefix("--") {
            rest = tail.split_once('\n').map_or("", |(_, after)| after);
        } else if let Some(tail) = rest.strip_prefix("/*") {
            rest = tail.split_once("*/").map_or("", |(_, after)| after);
        } else {
            return rest.trim_end();
        }
        rest = rest.trim_start();
    }
}
