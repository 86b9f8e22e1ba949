//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::config::CsvOptions;
use crate::core::table::Table;
use crate::error::Result;

/// Writes a table to a CSV file.
///
/// # Format
/// - Delimiter: from [`CsvOptions`] (default `,`)
/// - Header row with the table's columns when `has_headers` is set
/// - Missing cells are written as empty fields
/// - Encoding: UTF-8
pub fn write_csv(table: &Table, output_path: impl AsRef<Path>, options: CsvOptions) -> Result<()> {
    let file = File::create(output_path)?;
    write_csv_to(table, file, options)
}

/// Converts a table to a CSV string.
pub fn to_csv(table: &Table, options: CsvOptions) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv_to(table, &mut buffer, options)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn write_csv_to<W: Write>(table: &Table, sink: W, options: CsvOptions) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(sink);

    if options.has_headers {
        writer.write_record(table.columns())?;
    }

    for row in table.rows() {
        writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or_default()))?;
    }

    writer.flush()?;
    Ok(())
}
