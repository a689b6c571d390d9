use crate::column::{Column, ColumnType, Element};
use crate::err::TableError;

/// An immutable, ordered collection of uniquely-named, equal-length columns.
///
/// A table is a value: [`Table::add`] returns a new table and leaves the
/// input intact. Insertion order is canonical; [`Table::names`],
/// [`Table::columns`] and [`Table::types`] are parallel sequences in that
/// order. All element-level work delegates to [`Column`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Column>,
}

impl Table {
    /// The zero-column, zero-row table.
    pub fn empty() -> Table {
        Table::default()
    }

    /// A new table with `(name, column)` appended.
    ///
    /// Fails with [`TableError::DuplicateName`] when `name` is already
    /// present, and with [`TableError::LengthMismatch`] when the table
    /// already has columns of a different length. A first column fixes the
    /// row count, whatever its length.
    pub fn add(&self, name: impl Into<String>, column: Column) -> Result<Table, TableError> {
        let name = name.into();
        if self.names.iter().any(|existing| *existing == name) {
            return Err(TableError::DuplicateName(name));
        }
        if let Some(expected) = self.columns.first().map(Column::count) {
            if column.count() != expected {
                return Err(TableError::LengthMismatch {
                    expected,
                    found: column.count(),
                });
            }
        }
        let mut next = self.clone();
        next.names.push(name);
        next.columns.push(column);
        Ok(next)
    }

    /// Folds [`Table::add`] over an ordered sequence of pairs.
    pub fn from_columns<I, S>(pairs: I) -> Result<Table, TableError>
    where
        I: IntoIterator<Item = (S, Column)>,
        S: Into<String>,
    {
        pairs
            .into_iter()
            .try_fold(Table::empty(), |table, (name, column)| {
                table.add(name, column)
            })
    }

    /// Column names, in insertion order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Columns, in insertion order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column tags, parallel to [`Table::names`].
    pub fn types(&self) -> Vec<ColumnType> {
        self.columns.iter().map(Column::column_type).collect()
    }

    /// The shared row count; 0 for a column-less table.
    pub fn count(&self) -> usize {
        self.columns.first().map_or(0, Column::count)
    }

    /// The named column.
    pub fn column(&self, name: &str) -> Result<&Column, TableError> {
        self.position(name)
            .map(|index| &self.columns[index])
            .ok_or_else(|| TableError::ColumnNotFound(name.to_string()))
    }

    /// The named column's tag.
    pub fn column_type(&self, name: &str) -> Result<ColumnType, TableError> {
        Ok(self.column(name)?.column_type())
    }

    /// The element at `index` of the named column, requested as `T`.
    pub fn item<T: Element>(&self, name: &str, index: usize) -> Result<T, TableError> {
        self.column(name)?.item(index)
    }

    /// [`Table::item`] with an unknown name, a bad index or a wrong type all
    /// turned into `None`.
    pub fn try_item<T: Element>(&self, name: &str, index: usize) -> Option<T> {
        self.column(name).ok()?.try_item(index)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|existing| existing == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_leaves_the_input_table_intact() {
        let table = Table::empty();
        let grown = table.add("x", Column::new(vec![1i32, 2])).unwrap();
        assert_eq!(table, Table::empty());
        assert_eq!(grown.count(), 2);
        assert_eq!(grown.names(), ["x"]);
    }

    #[test]
    fn add_rejects_a_duplicate_name() {
        let table = Table::empty()
            .add("x", Column::new(vec![1i32]))
            .unwrap();
        assert_eq!(
            table.add("x", Column::new(vec![2i32])),
            Err(TableError::DuplicateName("x".to_string()))
        );
    }

    #[test]
    fn add_rejects_a_different_length() {
        let table = Table::empty()
            .add("x", Column::new(vec![1i32, 2]))
            .unwrap();
        assert_eq!(
            table.add("y", Column::new(vec![true])),
            Err(TableError::LengthMismatch {
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn a_zero_row_first_column_fixes_the_count() {
        let table = Table::empty()
            .add("x", Column::new(Vec::<i32>::new()))
            .unwrap();
        assert_eq!(table.count(), 0);
        assert!(matches!(
            table.add("y", Column::new(vec![false])),
            Err(TableError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn from_columns_preserves_order() {
        let table = Table::from_columns(vec![
            ("b", Column::new(vec![1i32])),
            ("a", Column::new(vec![2i32])),
        ])
        .unwrap();
        assert_eq!(table.names(), ["b", "a"]);
    }
}
