//! Immutable, typed, column-oriented tables.
//!
//! ## Column
//!
//! - a [`Column`] is a fixed-length array value tagged with one element type
//!   out of a closed set ([`ColumnType`]: int, real, text, datetime, boolean)
//! - accessors are generic over the requested element type and re-check the
//!   tag on every call; a wrong request is an error ([`TableError`]) from the
//!   plain accessor and `None` from its `try_`-sibling, never a coercion
//! - column data materializes in four representations with identical content:
//!   the column wrapper itself, a borrowed typed view, an owned typed copy,
//!   and an owned boxed copy ([`CellValue`])
//! - [`map1`]/[`map2`]/[`map3`] combine equal-length columns element-wise
//!   with exact tag matching; [`map_rows`] is the boxed, arity-dynamic form
//!
//! ## Table
//!
//! - a [`Table`] is an ordered collection of uniquely-named, equal-length
//!   columns; growing it with [`Table::add`] yields a new table and leaves
//!   the input intact
//!
//! Everything is a synchronous pure function over values: no locks, no
//! interior mutability, nothing to await. The [`delimited`] module reads and
//! writes tables as delimited text; [`TableSnapshot`] is the serde-friendly
//! column-major wire shape for viewer clients.

mod column;
pub mod delimited;
mod err;
mod map;
mod snapshot;
mod table;

pub use column::{CellValue, Column, ColumnType, Element};
pub use delimited::{Delimiter, DelimitedError, ReadSettings};
pub use err::TableError;
pub use map::{map1, map2, map3, map_rows};
pub use snapshot::{SnapshotColumn, TableSnapshot};
pub use table::Table;
