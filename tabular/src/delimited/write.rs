use std::io::Write;

use crate::table::Table;

use super::{Delimiter, DelimitedError};

/// Writes `table` as delimited text: a header row of column names, then one
/// record per row, in column order.
pub fn write<W: Write>(
    delimiter: Delimiter,
    table: &Table,
    mut writer: W,
) -> Result<(), DelimitedError> {
    let separator = delimiter.as_char();
    let header: Vec<String> = table
        .names()
        .iter()
        .map(|name| quote_field(name, separator))
        .collect();
    writeln!(writer, "{}", header.join(&separator.to_string()))?;

    for index in 0..table.count() {
        let mut record = Vec::with_capacity(table.columns().len());
        for column in table.columns() {
            let cell = column.cell(index)?;
            record.push(quote_field(&cell.to_string(), separator));
        }
        writeln!(writer, "{}", record.join(&separator.to_string()))?;
    }
    Ok(())
}

/// Quotes a field when it embeds the separator, a quote or a line break;
/// literal quotes are doubled.
fn quote_field(value: &str, separator: char) -> String {
    let needs_quoting = value.contains(separator)
        || value.contains('"')
        || value.contains('\n')
        || value.contains('\r');
    if needs_quoting {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
