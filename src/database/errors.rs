//! Database error naming
//!
//! Turns driver errors into the `<Category> (<Code>): <message>` lines shown to
//! the user. Categories follow the engine's primary result code; the symbolic
//! code is the `SQLITE_*` name of the extended result code.

use std::fmt;

/// Broad classes of database failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Generic database failure (corruption, unknown codes)
    Database,
    /// Failure tied to the database's operation (syntax, locking, I/O)
    Operational,
    /// Constraint and type-mismatch violations
    Integrity,
    /// Values too large or undecodable
    Data,
    /// API misuse such as out-of-range bindings
    Interface,
    /// Statements the shell cannot run as given, such as unbound parameters
    Programming,
    /// Engine-internal faults
    Internal,
    /// Allocation failure inside the engine
    Memory,
}

impl ErrorCategory {
    /// Category for an extended result code
    pub fn from_code(code: i32) -> Self {
        match code & 0xff {
            2 | 12 => ErrorCategory::Internal,
            7 => ErrorCategory::Memory,
            1 | 3 | 4 | 5 | 6 | 8 | 9 | 10 | 13 | 14 | 15 | 16 | 17 | 22 | 23 => {
                ErrorCategory::Operational
            }
            18 => ErrorCategory::Data,
            19 | 20 => ErrorCategory::Integrity,
            21 | 25 => ErrorCategory::Interface,
            _ => ErrorCategory::Database,
        }
    }

    /// Name shown at the start of an error line
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCategory::Database => "DatabaseError",
            ErrorCategory::Operational => "OperationalError",
            ErrorCategory::Integrity => "IntegrityError",
            ErrorCategory::Data => "DataError",
            ErrorCategory::Interface => "InterfaceError",
            ErrorCategory::Programming => "ProgrammingError",
            ErrorCategory::Internal => "InternalError",
            ErrorCategory::Memory => "MemoryError",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const PRIMARY_CODES: &[(i32, &str)] = &[
    (0, "SQLITE_OK"),
    (1, "SQLITE_ERROR"),
    (2, "SQLITE_INTERNAL"),
    (3, "SQLITE_PERM"),
    (4, "SQLITE_ABORT"),
    (5, "SQLITE_BUSY"),
    (6, "SQLITE_LOCKED"),
    (7, "SQLITE_NOMEM"),
    (8, "SQLITE_READONLY"),
    (9, "SQLITE_INTERRUPT"),
    (10, "SQLITE_IOERR"),
    (11, "SQLITE_CORRUPT"),
    (12, "SQLITE_NOTFOUND"),
    (13, "SQLITE_FULL"),
    (14, "SQLITE_CANTOPEN"),
    (15, "SQLITE_PROTOCOL"),
    (16, "SQLITE_EMPTY"),
    (17, "SQLITE_SCHEMA"),
    (18, "SQLITE_TOOBIG"),
    (19, "SQLITE_CONSTRAINT"),
    (20, "SQLITE_MISMATCH"),
    (21, "SQLITE_MISUSE"),
    (22, "SQLITE_NOLFS"),
    (23, "SQLITE_AUTH"),
    (24, "SQLITE_FORMAT"),
    (25, "SQLITE_RANGE"),
    (26, "SQLITE_NOTADB"),
    (27, "SQLITE_NOTICE"),
    (28, "SQLITE_WARNING"),
    (100, "SQLITE_ROW"),
    (101, "SQLITE_DONE"),
];

const EXTENDED_CODES: &[(i32, &str)] = &[
    (257, "SQLITE_ERROR_MISSING_COLLSEQ"),
    (513, "SQLITE_ERROR_RETRY"),
    (769, "SQLITE_ERROR_SNAPSHOT"),
    (516, "SQLITE_ABORT_ROLLBACK"),
    (261, "SQLITE_BUSY_RECOVERY"),
    (517, "SQLITE_BUSY_SNAPSHOT"),
    (773, "SQLITE_BUSY_TIMEOUT"),
    (262, "SQLITE_LOCKED_SHAREDCACHE"),
    (518, "SQLITE_LOCKED_VTAB"),
    (264, "SQLITE_READONLY_RECOVERY"),
    (520, "SQLITE_READONLY_CANTLOCK"),
    (776, "SQLITE_READONLY_ROLLBACK"),
    (1032, "SQLITE_READONLY_DBMOVED"),
    (1288, "SQLITE_READONLY_CANTINIT"),
    (1544, "SQLITE_READONLY_DIRECTORY"),
    (266, "SQLITE_IOERR_READ"),
    (522, "SQLITE_IOERR_SHORT_READ"),
    (778, "SQLITE_IOERR_WRITE"),
    (1034, "SQLITE_IOERR_FSYNC"),
    (1290, "SQLITE_IOERR_DIR_FSYNC"),
    (1546, "SQLITE_IOERR_TRUNCATE"),
    (1802, "SQLITE_IOERR_FSTAT"),
    (2058, "SQLITE_IOERR_UNLOCK"),
    (2314, "SQLITE_IOERR_RDLOCK"),
    (2570, "SQLITE_IOERR_DELETE"),
    (2826, "SQLITE_IOERR_BLOCKED"),
    (3082, "SQLITE_IOERR_NOMEM"),
    (3338, "SQLITE_IOERR_ACCESS"),
    (3594, "SQLITE_IOERR_CHECKRESERVEDLOCK"),
    (3850, "SQLITE_IOERR_LOCK"),
    (4106, "SQLITE_IOERR_CLOSE"),
    (4362, "SQLITE_IOERR_DIR_CLOSE"),
    (4618, "SQLITE_IOERR_SHMOPEN"),
    (4874, "SQLITE_IOERR_SHMSIZE"),
    (5130, "SQLITE_IOERR_SHMLOCK"),
    (5386, "SQLITE_IOERR_SHMMAP"),
    (5642, "SQLITE_IOERR_SEEK"),
    (5898, "SQLITE_IOERR_DELETE_NOENT"),
    (6154, "SQLITE_IOERR_MMAP"),
    (6410, "SQLITE_IOERR_GETTEMPPATH"),
    (6666, "SQLITE_IOERR_CONVPATH"),
    (6922, "SQLITE_IOERR_VNODE"),
    (7178, "SQLITE_IOERR_AUTH"),
    (7434, "SQLITE_IOERR_BEGIN_ATOMIC"),
    (7690, "SQLITE_IOERR_COMMIT_ATOMIC"),
    (7946, "SQLITE_IOERR_ROLLBACK_ATOMIC"),
    (8202, "SQLITE_IOERR_DATA"),
    (8458, "SQLITE_IOERR_CORRUPTFS"),
    (267, "SQLITE_CORRUPT_VTAB"),
    (523, "SQLITE_CORRUPT_SEQUENCE"),
    (779, "SQLITE_CORRUPT_INDEX"),
    (270, "SQLITE_CANTOPEN_NOTEMPDIR"),
    (526, "SQLITE_CANTOPEN_ISDIR"),
    (782, "SQLITE_CANTOPEN_FULLPATH"),
    (1038, "SQLITE_CANTOPEN_CONVPATH"),
    (1550, "SQLITE_CANTOPEN_SYMLINK"),
    (275, "SQLITE_CONSTRAINT_CHECK"),
    (531, "SQLITE_CONSTRAINT_COMMITHOOK"),
    (787, "SQLITE_CONSTRAINT_FOREIGNKEY"),
    (1043, "SQLITE_CONSTRAINT_FUNCTION"),
    (1299, "SQLITE_CONSTRAINT_NOTNULL"),
    (1555, "SQLITE_CONSTRAINT_PRIMARYKEY"),
    (1811, "SQLITE_CONSTRAINT_TRIGGER"),
    (2067, "SQLITE_CONSTRAINT_UNIQUE"),
    (2323, "SQLITE_CONSTRAINT_VTAB"),
    (2579, "SQLITE_CONSTRAINT_ROWID"),
    (2835, "SQLITE_CONSTRAINT_PINNED"),
    (3091, "SQLITE_CONSTRAINT_DATATYPE"),
    (279, "SQLITE_AUTH_USER"),
    (283, "SQLITE_NOTICE_RECOVER_WAL"),
    (539, "SQLITE_NOTICE_RECOVER_ROLLBACK"),
    (284, "SQLITE_WARNING_AUTOINDEX"),
];

/// Symbolic `SQLITE_*` name for a result code.
///
/// Unknown extended codes fall back to the name of their primary code.
pub fn code_name(code: i32) -> Option<&'static str> {
    let lookup = |table: &[(i32, &'static str)], code: i32| {
        table
            .iter()
            .find(|(value, _)| *value == code)
            .map(|(_, name)| *name)
    };

    lookup(EXTENDED_CODES, code)
        .or_else(|| lookup(PRIMARY_CODES, code))
        .or_else(|| lookup(PRIMARY_CODES, code & 0xff))
}

/// A rendered database error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    category: ErrorCategory,
    code_name: Option<&'static str>,
    message: String,
}

impl ErrorReport {
    /// A statement with parameter placeholders run without any values
    pub fn unbound_parameters(used: usize, supplied: usize) -> Self {
        Self {
            category: ErrorCategory::Programming,
            code_name: None,
            message: format!(
                "Incorrect number of bindings supplied. The current statement uses {}, \
                 and there are {} supplied.",
                used, supplied
            ),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    pub fn code_name(&self) -> Option<&'static str> {
        self.code_name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Category plus symbolic code when one is known
    pub fn head(&self) -> String {
        match self.code_name {
            Some(code) => format!("{} ({})", self.category, code),
            None => self.category.to_string(),
        }
    }
}

impl From<&sqlx::Error> for ErrorReport {
    fn from(err: &sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            let code = db_err.code().and_then(|c| c.parse::<i32>().ok());
            return Self {
                category: code
                    .map(ErrorCategory::from_code)
                    .unwrap_or(ErrorCategory::Database),
                code_name: code.and_then(code_name),
                message: db_err.message().to_string(),
            };
        }

        let category = match err {
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => ErrorCategory::Data,
            sqlx::Error::Protocol(_) => ErrorCategory::Interface,
            _ => ErrorCategory::Database,
        };
        Self {
            category,
            code_name: None,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.head(), self.message)
    }
}
