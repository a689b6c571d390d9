use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::ColumnType;

/// One boxed element together with its tag.
///
/// The owned, untyped representation of column data: heterogeneous consumers
/// (the delimited writer, the snapshot transport, `map_rows`) receive
/// `Vec<CellValue>` instead of a typed slice. On the wire a cell is
/// adjacently tagged, e.g. `{"kind": "int", "value": 3}`, so that a real
/// holding a whole number survives a round-trip as a real.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum CellValue {
    Int(i32),
    Real(f64),
    Text(String),
    DateTime(NaiveDateTime),
    Boolean(bool),
}

impl CellValue {
    /// The tag of the element this cell boxes.
    pub fn kind(&self) -> ColumnType {
        match self {
            CellValue::Int(_) => ColumnType::Int,
            CellValue::Real(_) => ColumnType::Real,
            CellValue::Text(_) => ColumnType::Text,
            CellValue::DateTime(_) => ColumnType::DateTime,
            CellValue::Boolean(_) => ColumnType::Boolean,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(value) => write!(f, "{}", value),
            // Debug float formatting keeps a trailing `.0`, so a written
            // whole-number real re-reads as a real
            CellValue::Real(value) => write!(f, "{:?}", value),
            CellValue::Text(value) => f.write_str(value),
            CellValue::DateTime(value) => write!(f, "{}", value.format("%Y-%m-%dT%H:%M:%S")),
            CellValue::Boolean(value) => write!(f, "{}", value),
        }
    }
}
