use std::io::BufRead;
use std::mem;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::column::{Column, ColumnType, Element};
use crate::table::Table;

use super::{DelimitedError, ReadSettings};

/// Parses a delimited character stream into a [`Table`].
///
/// The whole input is consumed before any table is assembled; on failure no
/// partial table escapes.
pub fn read<R: BufRead>(settings: &ReadSettings, mut reader: R) -> Result<Table, DelimitedError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;

    let mut records = parse_records(&input, settings.delimiter.as_char())?;
    if records.is_empty() {
        return Err(DelimitedError::Empty);
    }

    let header = if settings.has_header {
        Some(records.remove(0).1)
    } else {
        None
    };
    let width = match &header {
        Some(fields) => fields.len(),
        // a headerless input has at least one record here
        None => records[0].1.len(),
    };
    for (line, record) in &records {
        if record.len() != width {
            return Err(DelimitedError::RecordWidth {
                line: *line,
                expected: width,
                found: record.len(),
            });
        }
    }

    let names: Vec<String> = match &header {
        Some(fields) => fields.iter().map(|name| name.trim().to_string()).collect(),
        None => (1..=width).map(|index| format!("column{}", index)).collect(),
    };

    let mut pairs = Vec::with_capacity(width);
    for (index, header_name) in names.iter().enumerate() {
        let values: Vec<&str> = records
            .iter()
            .map(|(_, record)| record[index].as_str())
            .collect();
        let (name, forced) = match settings
            .column_override
            .as_ref()
            .and_then(|callback| callback(index, header_name))
        {
            Some((name, column_type)) => (name, Some(column_type)),
            None => (header_name.clone(), None),
        };
        let column_type = forced.unwrap_or_else(|| infer_type(&values));
        let column = build_column(&name, &values, column_type)?;
        pairs.push((name, column));
    }
    Ok(Table::from_columns(pairs)?)
}

/// Splits the input into records of unquoted field strings.
///
/// Each record is paired with the 1-based line it starts on. Blank lines are
/// skipped; a quoted field may span lines.
fn parse_records(input: &str, delimiter: char) -> Result<Vec<(usize, Vec<String>)>, DelimitedError> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut seen = false; // anything on the current record, even an empty field
    let mut line = 1usize;
    let mut record_line = 1usize;

    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    // a doubled quote is a literal quote
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                '\n' => {
                    line += 1;
                    field.push('\n');
                }
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' if field.is_empty() => {
                in_quotes = true;
                seen = true;
            }
            // a stray quote inside an unquoted field is kept verbatim
            '"' => field.push('"'),
            '\r' => {}
            '\n' => {
                line += 1;
                if seen || !record.is_empty() {
                    record.push(mem::take(&mut field));
                    records.push((record_line, mem::take(&mut record)));
                }
                seen = false;
                record_line = line;
            }
            c if c == delimiter => {
                record.push(mem::take(&mut field));
                seen = true;
            }
            _ => {
                field.push(c);
                seen = true;
            }
        }
    }
    if in_quotes {
        return Err(DelimitedError::UnclosedQuote { line: record_line });
    }
    if seen || !record.is_empty() {
        record.push(field);
        records.push((record_line, record));
    }
    Ok(records)
}

/// Picks the narrowest element type every value of a column parses as.
///
/// An empty cell (or an empty column) demotes to text; no default value is
/// ever substituted.
fn infer_type(values: &[&str]) -> ColumnType {
    if values.is_empty() || values.iter().any(|value| value.is_empty()) {
        return ColumnType::Text;
    }
    if values.iter().all(|value| value.parse::<i32>().is_ok()) {
        return ColumnType::Int;
    }
    if values.iter().all(|value| value.parse::<f64>().is_ok()) {
        return ColumnType::Real;
    }
    if values.iter().copied().all(|value| parse_bool(value).is_some()) {
        return ColumnType::Boolean;
    }
    if values
        .iter()
        .copied()
        .all(|value| parse_datetime(value).is_some())
    {
        return ColumnType::DateTime;
    }
    ColumnType::Text
}

fn build_column(
    name: &str,
    values: &[&str],
    column_type: ColumnType,
) -> Result<Column, DelimitedError> {
    match column_type {
        ColumnType::Int => typed(name, values, |value| value.parse::<i32>().ok()),
        ColumnType::Real => typed(name, values, |value| value.parse::<f64>().ok()),
        ColumnType::Boolean => typed(name, values, parse_bool),
        ColumnType::DateTime => typed(name, values, parse_datetime),
        ColumnType::Text => Ok(Column::new(
            values.iter().map(|value| value.to_string()).collect(),
        )),
    }
}

fn typed<T, F>(name: &str, values: &[&str], parse: F) -> Result<Column, DelimitedError>
where
    T: Element,
    F: Fn(&str) -> Option<T>,
{
    let mut data = Vec::with_capacity(values.len());
    for &value in values {
        data.push(parse(value).ok_or_else(|| DelimitedError::Value {
            column: name.to_string(),
            found: value.to_string(),
            expected: T::TYPE,
        })?);
    }
    Ok(Column::new(data))
}

fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed);
        }
    }
    // a bare date reads as midnight
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}
