//! Delimited-text reading and writing for [`Table`](crate::Table).
//!
//! The reader turns a character stream into a table: quoted fields may embed
//! the delimiter, doubled quotes and line breaks; every record must have the
//! same width; each column's element type is inferred from its full value
//! set unless an override callback forces a name and type. A failed read
//! produces no table. The writer emits a header row followed by one record
//! per row, quoting only where needed.

mod read;
mod write;

pub use read::read;
pub use write::write;

use thiserror::Error;

use crate::column::ColumnType;
use crate::err::TableError;

/// Field separator understood by the reader and writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Semicolon,
    Tab,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Semicolon => ';',
            Delimiter::Tab => '\t',
        }
    }
}

/// Per-column override: given the zero-based column index and the header
/// name, return `Some((name, type))` to rename the column and force its
/// element type, or `None` to keep the header name and infer.
pub type ColumnOverride = Box<dyn Fn(usize, &str) -> Option<(String, ColumnType)>>;

/// How [`read`] interprets its input.
pub struct ReadSettings {
    pub delimiter: Delimiter,
    /// When false, names are synthesized as `column1..columnN`.
    pub has_header: bool,
    pub column_override: Option<ColumnOverride>,
}

impl ReadSettings {
    pub fn new(delimiter: Delimiter, has_header: bool) -> ReadSettings {
        ReadSettings {
            delimiter,
            has_header,
            column_override: None,
        }
    }

    pub fn with_override<F>(mut self, callback: F) -> ReadSettings
    where
        F: Fn(usize, &str) -> Option<(String, ColumnType)> + 'static,
    {
        self.column_override = Some(Box::new(callback));
        self
    }
}

impl Default for ReadSettings {
    fn default() -> ReadSettings {
        ReadSettings::new(Delimiter::Comma, true)
    }
}

/// Failure of a delimited read or write.
#[derive(Error, Debug)]
pub enum DelimitedError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("the input contains no records")]
    Empty,

    #[error("record on line {line} has {found} field(s), expected {expected}")]
    RecordWidth {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("unclosed quote in the record starting on line {line}")]
    UnclosedQuote { line: usize },

    #[error("value `{found}` in column `{column}` is not a valid {expected}")]
    Value {
        column: String,
        found: String,
        expected: ColumnType,
    },

    #[error(transparent)]
    Table(#[from] TableError),
}
