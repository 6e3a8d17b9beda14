//! Direct calls into the SQLite library
//!
//! Statement completeness and the library version come straight from the
//! engine sqlx links against, so the shell never tokenizes SQL itself.

use std::ffi::{CStr, CString};

/// Whether `sql` ends with one or more complete, terminated statements.
///
/// Quoting, comments and trigger bodies are handled by the engine. Text with an
/// interior NUL byte cannot be handed to the classifier and is reported as
/// complete, so the engine gets to reject it.
pub fn is_complete(sql: &str) -> bool {
    let Ok(text) = CString::new(sql) else {
        return true;
    };
    // SAFETY: `text` is a valid NUL-terminated string that outlives the call.
    unsafe { libsqlite3_sys::sqlite3_complete(text.as_ptr()) == 1 }
}

/// Version string of the linked SQLite library, e.g. `3.46.0`
pub fn sqlite_version() -> &'static str {
    // SAFETY: sqlite3_libversion returns a pointer to a static NUL-terminated
    // string owned by the library.
    let version = unsafe { CStr::from_ptr(libsqlite3_sys::sqlite3_libversion()) };
    version.to_str().unwrap_or("unknown")
}
