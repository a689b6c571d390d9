use thiserror::Error;

use crate::column::ColumnType;

/// Failure of a core column or table operation.
///
/// Accessors with an expected, queryable failure (a probed index or element
/// type) also come as `try_`-variants returning [`Option`]; those absorb
/// `IndexOutOfRange` and `TypeMismatch` only. The remaining variants signal a
/// caller invariant violation and are always returned as errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("index {index} is out of range for {count} element(s)")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("requested `{requested}` elements from a `{actual}` column")]
    TypeMismatch {
        requested: ColumnType,
        actual: ColumnType,
    },

    #[error("expected {expected} element(s), found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("a column named `{0}` already exists")]
    DuplicateName(String),

    #[error("no column named `{0}`")]
    ColumnNotFound(String),
}
