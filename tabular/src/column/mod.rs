mod cell;

pub use cell::CellValue;

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::err::TableError;

/// Tag identifying the element type a [`Column`] holds.
///
/// The set is closed: every column is tagged with exactly one of these kinds
/// and no user-defined element types exist. The wire spelling (lowercase) is
/// shared by the `Display` impl and the serde representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Int,
    Real,
    Text,
    DateTime,
    Boolean,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Int => "int",
            ColumnType::Real => "real",
            ColumnType::Text => "text",
            ColumnType::DateTime => "datetime",
            ColumnType::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

mod sealed {
    pub trait Sealed {}
}

/// One of the five element types a column can hold.
///
/// The trait is sealed: requesting a representation whose element type lies
/// outside the supported set is rejected by the compiler rather than at run
/// time. Accessors generic over `T: Element` re-check `T::TYPE` against the
/// column's tag on every call and never coerce.
pub trait Element: sealed::Sealed + Clone {
    /// Tag of the column variant holding this element type.
    const TYPE: ColumnType;

    fn into_column(data: Vec<Self>) -> Column;

    /// The backing store of `column`, if its tag matches `Self`.
    fn backing(column: &Column) -> Option<&[Self]>;

    fn into_cell(self) -> CellValue;

    /// Inverse of [`Element::into_cell`]; `None` if the cell holds another kind.
    fn from_cell(cell: CellValue) -> Option<Self>;
}

macro_rules! impl_element {
    ($ty:ty, $variant:ident) => {
        impl sealed::Sealed for $ty {}

        impl Element for $ty {
            const TYPE: ColumnType = ColumnType::$variant;

            fn into_column(data: Vec<Self>) -> Column {
                Column::$variant(data)
            }

            fn backing(column: &Column) -> Option<&[Self]> {
                match column {
                    Column::$variant(data) => Some(data),
                    _ => None,
                }
            }

            fn into_cell(self) -> CellValue {
                CellValue::$variant(self)
            }

            fn from_cell(cell: CellValue) -> Option<Self> {
                match cell {
                    CellValue::$variant(value) => Some(value),
                    _ => None,
                }
            }
        }
    };
}

impl_element!(i32, Int);
impl_element!(f64, Real);
impl_element!(String, Text);
impl_element!(NaiveDateTime, DateTime);
impl_element!(bool, Boolean);

/// An immutable, fixed-length array value tagged with one element type.
///
/// A column is a value: transforms return a fresh column and leave the input
/// intact, cloning copies the backing store, and no operation mutates a
/// backing store after construction. Element access comes in four
/// representations that hold identical content and order and differ only in
/// ownership and boxing:
///
/// 1. the column wrapper itself ([`Column::sub_column`])
/// 2. a borrowed typed view ([`Column::as_slice`], [`Column::sub_slice`])
/// 3. an owned typed copy ([`Column::to_vec`], [`Column::sub_vec`])
/// 4. an owned boxed copy ([`Column::to_cells`], [`Column::sub_cells`])
///
/// Typed accessors take the element type as a generic parameter and fail with
/// [`TableError::TypeMismatch`] when it differs from the column's tag. Each
/// fallible accessor has a `try_`-prefixed sibling that turns an index or
/// type failure into `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Int(Vec<i32>),
    Real(Vec<f64>),
    Text(Vec<String>),
    DateTime(Vec<NaiveDateTime>),
    Boolean(Vec<bool>),
}

impl Column {
    /// Builds a column tagged with the element type of `data`.
    pub fn new<T: Element>(data: Vec<T>) -> Column {
        T::into_column(data)
    }

    /// The tag of this column. O(1).
    pub fn column_type(&self) -> ColumnType {
        match self {
            Column::Int(_) => ColumnType::Int,
            Column::Real(_) => ColumnType::Real,
            Column::Text(_) => ColumnType::Text,
            Column::DateTime(_) => ColumnType::DateTime,
            Column::Boolean(_) => ColumnType::Boolean,
        }
    }

    /// Number of elements. O(1).
    pub fn count(&self) -> usize {
        match self {
            Column::Int(data) => data.len(),
            Column::Real(data) => data.len(),
            Column::Text(data) => data.len(),
            Column::DateTime(data) => data.len(),
            Column::Boolean(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Bounds-checks `[start, start + length)` and returns the exclusive end.
    ///
    /// Range validity does not depend on the requested representation, so a
    /// bounds failure is reported before any type check.
    fn check_range(&self, start: usize, length: usize) -> Result<usize, TableError> {
        let count = self.count();
        start
            .checked_add(length)
            .filter(|end| *end <= count)
            .ok_or(TableError::IndexOutOfRange {
                index: start.saturating_add(length),
                count,
            })
    }

    /// The element at `index`, requested as `T`.
    pub fn item<T: Element>(&self, index: usize) -> Result<T, TableError> {
        let count = self.count();
        if index >= count {
            return Err(TableError::IndexOutOfRange { index, count });
        }
        let data = T::backing(self).ok_or(TableError::TypeMismatch {
            requested: T::TYPE,
            actual: self.column_type(),
        })?;
        Ok(data[index].clone())
    }

    /// [`Column::item`] with index and type failures turned into `None`.
    pub fn try_item<T: Element>(&self, index: usize) -> Option<T> {
        self.item(index).ok()
    }

    /// Borrowed typed view over the full column.
    pub fn as_slice<T: Element>(&self) -> Result<&[T], TableError> {
        T::backing(self).ok_or(TableError::TypeMismatch {
            requested: T::TYPE,
            actual: self.column_type(),
        })
    }

    pub fn try_as_slice<T: Element>(&self) -> Option<&[T]> {
        self.as_slice().ok()
    }

    /// Borrowed typed view over `[start, start + length)`.
    pub fn sub_slice<T: Element>(&self, start: usize, length: usize) -> Result<&[T], TableError> {
        let end = self.check_range(start, length)?;
        Ok(&self.as_slice::<T>()?[start..end])
    }

    pub fn try_sub_slice<T: Element>(&self, start: usize, length: usize) -> Option<&[T]> {
        self.sub_slice(start, length).ok()
    }

    /// Owned typed copy of `[start, start + length)`.
    pub fn sub_vec<T: Element>(&self, start: usize, length: usize) -> Result<Vec<T>, TableError> {
        Ok(self.sub_slice::<T>(start, length)?.to_vec())
    }

    pub fn try_sub_vec<T: Element>(&self, start: usize, length: usize) -> Option<Vec<T>> {
        self.sub_vec(start, length).ok()
    }

    /// Owned typed copy of the full column.
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>, TableError> {
        Ok(self.as_slice::<T>()?.to_vec())
    }

    pub fn try_to_vec<T: Element>(&self) -> Option<Vec<T>> {
        self.to_vec().ok()
    }

    /// The slice `[start, start + length)` as a column of the same tag.
    ///
    /// The identity representation: it cannot type-mismatch, and slicing the
    /// full range round-trips the column.
    pub fn sub_column(&self, start: usize, length: usize) -> Result<Column, TableError> {
        let end = self.check_range(start, length)?;
        Ok(match self {
            Column::Int(data) => Column::Int(data[start..end].to_vec()),
            Column::Real(data) => Column::Real(data[start..end].to_vec()),
            Column::Text(data) => Column::Text(data[start..end].to_vec()),
            Column::DateTime(data) => Column::DateTime(data[start..end].to_vec()),
            Column::Boolean(data) => Column::Boolean(data[start..end].to_vec()),
        })
    }

    pub fn try_sub_column(&self, start: usize, length: usize) -> Option<Column> {
        self.sub_column(start, length).ok()
    }

    /// The element at `index`, boxed with its own tag.
    pub fn cell(&self, index: usize) -> Result<CellValue, TableError> {
        let count = self.count();
        if index >= count {
            return Err(TableError::IndexOutOfRange { index, count });
        }
        Ok(match self {
            Column::Int(data) => CellValue::Int(data[index]),
            Column::Real(data) => CellValue::Real(data[index]),
            Column::Text(data) => CellValue::Text(data[index].clone()),
            Column::DateTime(data) => CellValue::DateTime(data[index]),
            Column::Boolean(data) => CellValue::Boolean(data[index]),
        })
    }

    pub fn try_cell(&self, index: usize) -> Option<CellValue> {
        self.cell(index).ok()
    }

    /// Owned boxed copy of `[start, start + length)`.
    ///
    /// Like [`Column::sub_column`] this is type-independent; only the bounds
    /// can fail.
    pub fn sub_cells(&self, start: usize, length: usize) -> Result<Vec<CellValue>, TableError> {
        let end = self.check_range(start, length)?;
        Ok(match self {
            Column::Int(data) => data[start..end].iter().copied().map(CellValue::Int).collect(),
            Column::Real(data) => data[start..end].iter().copied().map(CellValue::Real).collect(),
            Column::Text(data) => data[start..end].iter().cloned().map(CellValue::Text).collect(),
            Column::DateTime(data) => data[start..end]
                .iter()
                .copied()
                .map(CellValue::DateTime)
                .collect(),
            Column::Boolean(data) => data[start..end]
                .iter()
                .copied()
                .map(CellValue::Boolean)
                .collect(),
        })
    }

    pub fn try_sub_cells(&self, start: usize, length: usize) -> Option<Vec<CellValue>> {
        self.sub_cells(start, length).ok()
    }

    /// Owned boxed copy of the full column.
    pub fn to_cells(&self) -> Vec<CellValue> {
        match self {
            Column::Int(data) => data.iter().copied().map(CellValue::Int).collect(),
            Column::Real(data) => data.iter().copied().map(CellValue::Real).collect(),
            Column::Text(data) => data.iter().cloned().map(CellValue::Text).collect(),
            Column::DateTime(data) => data.iter().copied().map(CellValue::DateTime).collect(),
            Column::Boolean(data) => data.iter().copied().map(CellValue::Boolean).collect(),
        }
    }
}

impl<T: Element> From<Vec<T>> for Column {
    fn from(data: Vec<T>) -> Self {
        T::into_column(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_checks_bounds_before_type() {
        let column = Column::new(vec![1i32, 2, 3]);
        assert_eq!(
            column.item::<f64>(5),
            Err(TableError::IndexOutOfRange { index: 5, count: 3 })
        );
        assert_eq!(
            column.item::<f64>(0),
            Err(TableError::TypeMismatch {
                requested: ColumnType::Real,
                actual: ColumnType::Int,
            })
        );
    }

    #[test]
    fn sub_slice_is_a_borrowed_view() {
        let column = Column::new(vec![10i32, 20, 30, 40]);
        assert_eq!(column.sub_slice::<i32>(1, 2).unwrap(), &[20, 30]);
        assert_eq!(column.sub_slice::<i32>(4, 0).unwrap(), &[] as &[i32]);
        assert_eq!(
            column.sub_slice::<i32>(3, 2),
            Err(TableError::IndexOutOfRange { index: 5, count: 4 })
        );
    }

    #[test]
    fn sub_column_keeps_the_tag() {
        let column = Column::new(vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        let sub = column.sub_column(1, 2).unwrap();
        assert_eq!(sub.column_type(), ColumnType::Text);
        assert_eq!(sub.to_vec::<String>().unwrap(), vec!["b", "c"]);
        // the input stays valid and unchanged
        assert_eq!(column.count(), 3);
    }

    #[test]
    fn range_overflow_is_a_bounds_error() {
        let column = Column::new(vec![true, false]);
        assert!(matches!(
            column.sub_column(usize::MAX, 2),
            Err(TableError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn boxed_cells_carry_their_own_tag() {
        let column = Column::new(vec![1.5f64, 2.5]);
        let cells = column.to_cells();
        assert_eq!(cells, vec![CellValue::Real(1.5), CellValue::Real(2.5)]);
        assert_eq!(cells[0].kind(), ColumnType::Real);
    }

    #[test]
    fn try_variants_never_error() {
        let column = Column::new(vec![1i32, 2]);
        assert_eq!(column.try_item::<i32>(1), Some(2));
        assert_eq!(column.try_item::<i32>(2), None);
        assert_eq!(column.try_item::<bool>(0), None);
        assert_eq!(column.try_sub_vec::<i32>(1, 2), None);
        assert_eq!(column.try_sub_column(0, 2).map(|c| c.count()), Some(2));
    }
}
