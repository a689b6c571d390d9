//! Element-wise combination of columns.
//!
//! The fixed-arity combinators check the tag of every input column against
//! the corresponding function parameter type and the counts of all inputs
//! before any per-element work; mixed or numerically-promotable element
//! types are rejected, never promoted. [`map_rows`] is the erased,
//! arity-dynamic variant combining boxed [`CellValue`] rows.

use itertools::izip;

use crate::column::{CellValue, Column, Element};
use crate::err::TableError;

/// `[f(a[0]), ..., f(a[n-1])]` over a single column tagged `A`.
pub fn map1<A, Out, F>(mut f: F, column: &Column) -> Result<Vec<Out>, TableError>
where
    A: Element,
    F: FnMut(&A) -> Out,
{
    let a = column.as_slice::<A>()?;
    Ok(a.iter().map(|x| f(x)).collect())
}

/// `[f(a[i], b[i])]` over two equal-length columns tagged `A` and `B`.
pub fn map2<A, B, Out, F>(mut f: F, left: &Column, right: &Column) -> Result<Vec<Out>, TableError>
where
    A: Element,
    B: Element,
    F: FnMut(&A, &B) -> Out,
{
    let a = left.as_slice::<A>()?;
    let b = right.as_slice::<B>()?;
    if a.len() != b.len() {
        return Err(TableError::LengthMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }
    Ok(izip!(a, b).map(|(x, y)| f(x, y)).collect())
}

/// `[f(a[i], b[i], c[i])]` over three equal-length columns.
pub fn map3<A, B, C, Out, F>(
    mut f: F,
    first: &Column,
    second: &Column,
    third: &Column,
) -> Result<Vec<Out>, TableError>
where
    A: Element,
    B: Element,
    C: Element,
    F: FnMut(&A, &B, &C) -> Out,
{
    let a = first.as_slice::<A>()?;
    let b = second.as_slice::<B>()?;
    let c = third.as_slice::<C>()?;
    if a.len() != b.len() {
        return Err(TableError::LengthMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }
    if a.len() != c.len() {
        return Err(TableError::LengthMismatch {
            expected: a.len(),
            found: c.len(),
        });
    }
    Ok(izip!(a, b, c).map(|(x, y, z)| f(x, y, z)).collect())
}

/// `[f(row_0), ..., f(row_n-1)]` where `row_i` is the boxed `i`-th element of
/// every input column, in input order.
///
/// No tag check happens here: each cell carries its own kind and `f` decides
/// what to accept. Counts must still agree across all inputs.
pub fn map_rows<Out, F>(mut f: F, columns: &[&Column]) -> Result<Vec<Out>, TableError>
where
    F: FnMut(&[CellValue]) -> Out,
{
    let Some(first) = columns.first() else {
        return Ok(Vec::new());
    };
    let count = first.count();
    for column in columns {
        if column.count() != count {
            return Err(TableError::LengthMismatch {
                expected: count,
                found: column.count(),
            });
        }
    }
    let mut out = Vec::with_capacity(count);
    let mut row = Vec::with_capacity(columns.len());
    for index in 0..count {
        row.clear();
        for column in columns {
            row.push(column.cell(index)?);
        }
        out.push(f(&row));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnType;

    #[test]
    fn map1_applies_in_order() {
        let column = Column::new(vec![1i32, 2, 3]);
        let out = map1(|x: &i32| *x as f64 + 0.5, &column).unwrap();
        assert_eq!(out, vec![1.5, 2.5, 3.5]);
    }

    #[test]
    fn map1_rejects_a_wrong_tag() {
        let column = Column::new(vec![1i32, 2, 3]);
        assert_eq!(
            map1(|x: &f64| *x, &column),
            Err(TableError::TypeMismatch {
                requested: ColumnType::Real,
                actual: ColumnType::Int,
            })
        );
    }

    #[test]
    fn map2_zips_equal_lengths() {
        let left = Column::new(vec![1i32, 2, 3]);
        let right = Column::new(vec![2.0f64, 3.0, 4.0]);
        let out = map2(|x: &i32, y: &f64| *x as f64 * y, &left, &right).unwrap();
        assert_eq!(out, vec![2.0, 6.0, 12.0]);
    }

    #[test]
    fn map2_rejects_unequal_lengths() {
        let left = Column::new(vec![1i32, 2, 3]);
        let right = Column::new(vec![1.0f64]);
        assert_eq!(
            map2(|x: &i32, y: &f64| *x as f64 + y, &left, &right),
            Err(TableError::LengthMismatch {
                expected: 3,
                found: 1,
            })
        );
    }

    #[test]
    fn map_rows_boxes_each_row() {
        let ints = Column::new(vec![1i32, 2]);
        let bools = Column::new(vec![true, false]);
        let out = map_rows(|row| format!("{}:{}", row[0], row[1]), &[&ints, &bools]).unwrap();
        assert_eq!(out, vec!["1:true", "2:false"]);
    }

    #[test]
    fn map_rows_over_nothing_is_empty() {
        let out: Vec<usize> = map_rows(|row| row.len(), &[]).unwrap();
        assert!(out.is_empty());
    }
}
