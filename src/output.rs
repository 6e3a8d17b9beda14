//! Output streams
//!
//! Result rows and meta-command output go to standard output; errors, the
//! banner and interaction notices go to standard error. Keeping the two apart
//! lets callers redirect one without the other.

use crate::database::errors::ErrorReport;
use crate::database::value::Row;
use crossterm::style::Stylize;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Output sinks used by the executor and the REPL
pub struct Console {
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
    color: bool,
}

impl Console {
    /// Console over the process's standard streams
    pub fn stdio(color: bool) -> Self {
        Self {
            out: Box::new(io::stdout()),
            err: Box::new(io::stderr()),
            color,
        }
    }

    /// Console writing into memory, for capturing output in tests
    pub fn in_memory() -> (Self, Captured) {
        let captured = Captured::default();
        let console = Self {
            out: Box::new(captured.out.clone()),
            err: Box::new(captured.err.clone()),
            color: false,
        };
        (console, captured)
    }

    /// Print one result row
    pub fn row(&mut self, row: &Row) -> io::Result<()> {
        writeln!(self.out, "{}", row)?;
        self.out.flush()
    }

    /// Print a line of regular output
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()
    }

    /// Print a notice (banner, interrupt marker) to the error stream
    pub fn notice(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.err, "{}", text)?;
        self.err.flush()
    }

    /// Print a database error report
    pub fn error(&mut self, report: &ErrorReport) -> io::Result<()> {
        if self.color {
            writeln!(
                self.err,
                "{}: {}",
                report.head().magenta().bold(),
                report.message().magenta()
            )?;
        } else {
            writeln!(self.err, "{}", report)?;
        }
        self.err.flush()
    }
}

/// Shared in-memory buffer implementing [`Write`]
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    /// Contents written so far, lossily decoded
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut bytes = self.0.lock().unwrap_or_else(|e| e.into_inner());
        bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Handles on the streams of an in-memory [`Console`]
#[derive(Clone, Default)]
pub struct Captured {
    out: SharedBuffer,
    err: SharedBuffer,
}

impl Captured {
    /// Everything written to standard output
    pub fn stdout(&self) -> String {
        self.out.contents()
    }

    /// Everything written to standard error
    pub fn stderr(&self) -> String {
        self.err.contents()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::value::Value;

    #[test]
    fn test_streams_are_separate() {
        let (mut console, captured) = Console::in_memory();
        console.line("3.46.0").unwrap();
        console.notice("Connected").unwrap();

        assert_eq!(captured.stdout(), "3.46.0\n");
        assert_eq!(captured.stderr(), "Connected\n");
    }

    #[test]
    fn test_row_output() {
        let (mut console, captured) = Console::in_memory();
        console
            .row(&Row::new(vec![Value::Integer(1), Value::Text("a".into())]))
            .unwrap();
        assert_eq!(captured.stdout(), "(1, 'a')\n");
    }
}
