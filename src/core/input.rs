//! CSV input into a [`Table`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::config::CsvOptions;
use crate::core::table::Table;
use crate::error::Result;

/// Reads a CSV table from any reader.
///
/// Empty cells become missing values. Without a header row the columns are
/// named `column_1`, `column_2`, and so on. Short rows are padded with
/// missing values; long rows are an error.
///
/// # Example
///
/// ```rust
/// use chatsense::config::CsvOptions;
/// use chatsense::core::read_csv;
///
/// let data = "Sender,Message\nAlice,привет\nBob,\n";
/// let table = read_csv(data.as_bytes(), CsvOptions::default()).unwrap();
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.get(1, "Message"), None);
/// ```
pub fn read_csv<R: Read>(reader: R, options: CsvOptions) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_headers)
        .flexible(true)
        .from_reader(reader);

    let mut columns: Vec<String> = if options.has_headers {
        reader.headers()?.iter().map(str::to_string).collect()
    } else {
        Vec::new()
    };

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if !options.has_headers && columns.len() < record.len() {
            columns.extend((columns.len() + 1..=record.len()).map(|i| format!("column_{i}")));
        }
        let row: Vec<Option<String>> = record
            .iter()
            .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
            .collect();
        rows.push(row);
    }

    let width = columns.len();
    let mut table = Table::new(columns);
    for mut row in rows {
        if row.len() < width {
            row.resize(width, None);
        }
        table.push_row(row)?;
    }

    debug!(
        columns = table.columns().len(),
        rows = table.len(),
        "read csv table"
    );
    Ok(table)
}

/// Reads a CSV table from a file.
pub fn read_csv_file(path: impl AsRef<Path>, options: CsvOptions) -> Result<Table> {
    let file = File::open(path.as_ref())?;
    read_csv(file, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_with_headers() {
        let data = "Message,Label\nпривет,1\n,0\n";
        let table = read_csv(data.as_bytes(), CsvOptions::default()).unwrap();
        assert_eq!(table.columns(), ["Message", "Label"]);
        assert_eq!(table.get(0, "Message"), Some("привет"));
        assert_eq!(table.get(1, "Message"), None);
        assert_eq!(table.get(1, "Label"), Some("0"));
    }

    #[test]
    fn test_read_semicolon_delimiter() {
        let data = "Sender;Message\nAlice;да, конечно\n";
        let options = CsvOptions::new().with_delimiter(b';');
        let table = read_csv(data.as_bytes(), options).unwrap();
        assert_eq!(table.get(0, "Message"), Some("да, конечно"));
    }

    #[test]
    fn test_read_without_headers() {
        let data = "a,b\nc,d,e\n";
        let options = CsvOptions::new().with_headers(false);
        let table = read_csv(data.as_bytes(), options).unwrap();
        assert_eq!(table.columns(), ["column_1", "column_2", "column_3"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0, "column_3"), None);
        assert_eq!(table.get(1, "column_3"), Some("e"));
    }

    #[test]
    fn test_read_short_row_padded() {
        let data = "A,B,C\n1\n";
        let table = read_csv(data.as_bytes(), CsvOptions::default()).unwrap();
        assert_eq!(table.get(0, "A"), Some("1"));
        assert_eq!(table.get(0, "C"), None);
    }

    #[test]
    fn test_read_long_row_is_error() {
        let data = "A\n1,2\n";
        assert!(read_csv(data.as_bytes(), CsvOptions::default()).is_err());
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_csv_file("/nonexistent/data.csv", CsvOptions::default()).unwrap_err();
        assert!(err.is_io());
    }
}
