//! Column-major snapshot of a table for transport to a viewer client.
//!
//! A snapshot carries the schema, the total row count and (a page of) the
//! data by columns, all serde-serializable; it is an adapter over the core
//! query surface, not part of it. Rebuilding a table re-validates every cell
//! against the column's declared type.

use serde::{Deserialize, Serialize};

use crate::column::{CellValue, Column, ColumnType, Element};
use crate::err::TableError;
use crate::table::Table;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    /// Row count of the source table, not of the carried page.
    pub total_rows: usize,
    pub columns: Vec<SnapshotColumn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotColumn {
    pub name: String,
    pub column_type: ColumnType,
    pub data: Vec<CellValue>,
}

impl TableSnapshot {
    /// Snapshot of the whole table.
    pub fn of(table: &Table) -> TableSnapshot {
        let columns = table
            .names()
            .iter()
            .zip(table.columns())
            .map(|(name, column)| SnapshotColumn {
                name: name.clone(),
                column_type: column.column_type(),
                data: column.to_cells(),
            })
            .collect();
        TableSnapshot {
            total_rows: table.count(),
            columns,
        }
    }

    /// Snapshot carrying only the rows `[start, start + rows)`.
    pub fn slice(table: &Table, start: usize, rows: usize) -> Result<TableSnapshot, TableError> {
        let mut columns = Vec::with_capacity(table.columns().len());
        for (name, column) in table.names().iter().zip(table.columns()) {
            columns.push(SnapshotColumn {
                name: name.clone(),
                column_type: column.column_type(),
                data: column.sub_cells(start, rows)?,
            });
        }
        Ok(TableSnapshot {
            total_rows: table.count(),
            columns,
        })
    }

    /// Rebuilds a table from a full snapshot.
    ///
    /// Every cell's kind must equal the column's declared type and every
    /// column must carry `total_rows` cells; name uniqueness comes from
    /// [`Table::add`].
    pub fn into_table(self) -> Result<Table, TableError> {
        let mut table = Table::empty();
        for column in self.columns {
            if column.data.len() != self.total_rows {
                return Err(TableError::LengthMismatch {
                    expected: self.total_rows,
                    found: column.data.len(),
                });
            }
            let rebuilt = match column.column_type {
                ColumnType::Int => typed::<i32>(column.data)?,
                ColumnType::Real => typed::<f64>(column.data)?,
                ColumnType::Text => typed::<String>(column.data)?,
                ColumnType::DateTime => typed::<chrono::NaiveDateTime>(column.data)?,
                ColumnType::Boolean => typed::<bool>(column.data)?,
            };
            table = table.add(column.name, rebuilt)?;
        }
        Ok(table)
    }
}

fn typed<T: Element>(cells: Vec<CellValue>) -> Result<Column, TableError> {
    let mut data = Vec::with_capacity(cells.len());
    for cell in cells {
        let actual = cell.kind();
        data.push(T::from_cell(cell).ok_or(TableError::TypeMismatch {
            requested: T::TYPE,
            actual,
        })?);
    }
    Ok(Column::new(data))
}
