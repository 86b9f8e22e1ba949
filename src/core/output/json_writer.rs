//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::core::table::{RowRef, Table};
use crate::error::Result;

/// Writes a table to a JSON file as an array of objects.
///
/// # Format
/// ```json
/// [
///   {"Sender": "Alice", "Message": "привет", "Date": "15.03.2024", "Time": "14:32"},
///   {"Sender": null, "Message": "пока", "Date": "", "Time": ""}
/// ]
/// ```
///
/// Keys follow the table's column order; missing cells are `null`.
pub fn write_json(table: &Table, output_path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(table)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts a table to a pretty-printed JSON array.
pub fn to_json(table: &Table) -> Result<String> {
    let rows: Vec<RowRef<'_>> = table.records().collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}
