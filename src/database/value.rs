//! Field values and row rendering
//!
//! Rows are printed as tuples of field literals, e.g. `(1, 'a', None)`.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row as _, TypeInfo, ValueRef};
use std::fmt;

/// A single field value, one per SQLite storage class
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

/// One result row in result-column order
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Decode a driver row using each field's runtime storage class
    pub fn from_sqlite(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let mut values = Vec::with_capacity(row.len());
        for index in 0..row.len() {
            values.push(decode_field(row, index)?);
        }
        Ok(Self { values })
    }
}

/// Decode a single field.
///
/// The declared column type is ignored; SQLite is dynamically typed and the
/// value's own storage class decides the variant.
fn decode_field(row: &SqliteRow, index: usize) -> Result<Value, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let storage_class = raw.type_info().name().to_string();

    let value = match storage_class.as_str() {
        "INTEGER" => Value::Integer(row.try_get_unchecked::<i64, _>(index)?),
        "REAL" => Value::Real(row.try_get_unchecked::<f64, _>(index)?),
        "BLOB" => Value::Blob(row.try_get_unchecked::<Vec<u8>, _>(index)?),
        _ => Value::Text(row.try_get_unchecked::<String, _>(index)?),
    };
    Ok(value)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("None"),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Real(v) => f.write_str(&format_real(*v)),
            Value::Text(s) => f.write_str(&quote_text(s)),
            Value::Blob(b) => f.write_str(&quote_blob(b)),
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", value)?;
        }
        if self.values.len() == 1 {
            f.write_str(",")?;
        }
        f.write_str(")")
    }
}

/// Shortest round-trip form; integral values keep a `.0`, very large or very
/// small magnitudes switch to a signed two-digit exponent.
fn format_real(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = v.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let formatted = format!("{:e}", v);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) => {
                let exponent: i32 = exponent.parse().unwrap_or(0);
                let sign = if exponent < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exponent.abs())
            }
            None => formatted,
        };
    }

    let formatted = format!("{}", v);
    if formatted.contains('.') {
        formatted
    } else {
        format!("{}.0", formatted)
    }
}

fn quote_text(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if is_unprintable(c) => out.push_str(&escape_char(c)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Controls, separators other than the plain space, format characters and
/// private-use code points
fn is_unprintable(c: char) -> bool {
    c.is_control()
        || matches!(
            c,
            '\u{a0}'
                | '\u{ad}'
                | '\u{61c}'
                | '\u{1680}'
                | '\u{180e}'
                | '\u{2000}'..='\u{200f}'
                | '\u{2028}'..='\u{202f}'
                | '\u{205f}'..='\u{2064}'
                | '\u{2066}'..='\u{206f}'
                | '\u{3000}'
                | '\u{e000}'..='\u{f8ff}'
                | '\u{feff}'
                | '\u{fff9}'..='\u{fffb}'
                | '\u{f0000}'..='\u{10ffff}'
        )
}

fn escape_char(c: char) -> String {
    let code = c as u32;
    if code <= 0xff {
        format!("\\x{:02x}", code)
    } else if code <= 0xffff {
        format!("\\u{:04x}", code)
    } else {
        format!("\\U{:08x}", code)
    }
}

fn quote_blob(bytes: &[u8]) -> String {
    let quote = if bytes.contains(&b'\'') && !bytes.contains(&b'"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(bytes.len() + 3);
    out.push('b');
    out.push(quote);
    for &b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            b if b as char == quote => {
                out.push('\\');
                out.push(b as char);
            }
            0x20..=0x7e => out.push(b as char),
            b => out.push_str(&format!("\\x{:02x}", b)),
        }
    }
    out.push(quote);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: Vec<Value>) -> String {
        Row::new(values).to_string()
    }

    #[test]
    fn test_single_field_row_has_trailing_comma() {
        assert_eq!(row(vec![Value::Integer(1)]), "(1,)");
    }

    #[test]
    fn test_multi_field_row() {
        assert_eq!(
            row(vec![Value::Integer(1), Value::Null, Value::Text("x".into())]),
            "(1, None, 'x')"
        );
    }

    #[test]
    fn test_real_formatting() {
        assert_eq!(format_real(1.0), "1.0");
        assert_eq!(format_real(-2.5), "-2.5");
        assert_eq!(format_real(0.1), "0.1");
        assert_eq!(format_real(0.0), "0.0");
        assert_eq!(format_real(1e20), "1e+20");
        assert_eq!(format_real(1.5e-7), "1.5e-07");
        assert_eq!(format_real(f64::INFINITY), "inf");
        assert_eq!(format_real(f64::NAN), "nan");
    }

    #[test]
    fn test_text_quoting() {
        assert_eq!(quote_text("plain"), "'plain'");
        assert_eq!(quote_text("it's"), "\"it's\"");
        assert_eq!(quote_text("both ' and \""), "'both \\' and \"'");
        assert_eq!(quote_text("a\nb\\c"), "'a\\nb\\\\c'");
        assert_eq!(quote_text("\u{1}"), "'\\x01'");
    }

    #[test]
    fn test_unprintable_text_escapes() {
        assert_eq!(quote_text("\u{85}\u{a0}"), "'\\x85\\xa0'");
        assert_eq!(quote_text("a\u{2028}b\u{feff}"), "'a\\u2028b\\ufeff'");
        assert_eq!(quote_text("\u{f0000}"), "'\\U000f0000'");
        assert_eq!(quote_text("café ü €"), "'café ü €'");
    }

    #[test]
    fn test_blob_quoting() {
        assert_eq!(quote_blob(b"abc"), "b'abc'");
        assert_eq!(quote_blob(&[0x00, 0xff, b'A']), "b'\\x00\\xffA'");
    }
}
