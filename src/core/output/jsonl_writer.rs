//! JSON Lines (JSONL) output writer.
//!
//! One object per line, which suits classifier batch jobs and streaming
//! consumers that read a row at a time.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::table::Table;
use crate::error::Result;

/// Writes a table to a JSONL file.
///
/// # Format
/// ```text
/// {"Sender":"Alice","Message":"привет"}
/// {"Sender":null,"Message":"пока"}
/// ```
pub fn write_jsonl(table: &Table, output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    for row in table.records() {
        serde_json::to_writer(&mut writer, &row)?;
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

/// Converts a table to a JSONL string, one object per line.
pub fn to_jsonl(table: &Table) -> Result<String> {
    let mut output = String::new();
    for row in table.records() {
        output.push_str(&serde_json::to_string(&row)?);
        output.push('\n');
    }
    Ok(output)
}
