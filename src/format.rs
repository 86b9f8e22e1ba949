//! Output formats for tables.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-io", feature = "json-output"))]
//! # fn example() -> chatsense::Result<()> {
//! use chatsense::ChatMessageRecord;
//! use chatsense::config::CsvOptions;
//! use chatsense::core::to_table;
//! use chatsense::format::{OutputFormat, to_format_string};
//!
//! let table = to_table(&[ChatMessageRecord::new("привет").with_sender("Alice")]);
//!
//! let format = OutputFormat::from_path("cleaned.jsonl")?;
//! let jsonl = to_format_string(&table, format, CsvOptions::default())?;
//! assert!(jsonl.starts_with('{'));
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::CsvOptions;
use crate::core::Table;
use crate::error::ChatsenseError;

/// Output format for tables.
///
/// - [`Csv`](OutputFormat::Csv) - Spreadsheet-friendly; what the classifier service accepts
/// - [`Json`](OutputFormat::Json) - Array of row objects
/// - [`Jsonl`](OutputFormat::Jsonl) - One row object per line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// CSV (default)
    #[default]
    Csv,

    /// JSON array of row objects
    Json,

    /// JSON Lines, also known as NDJSON
    Jsonl,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Returns all accepted format names.
    pub fn all_names() -> &'static [&'static str] {
        &["csv", "json", "jsonl", "ndjson"]
    }

    /// Detects the format from a file extension.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatsense::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path("out/chat.JSON").unwrap(), OutputFormat::Json);
    /// assert!(OutputFormat::from_path("chat.txt").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ChatsenseError> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();

        ext.parse().map_err(|_| {
            ChatsenseError::invalid_format(
                "output",
                format!("Unknown file extension: '.{ext}'. Expected one of: csv, json, jsonl"),
            )
        })
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

fn missing_feature(format: OutputFormat) -> ChatsenseError {
    let feature = match format {
        OutputFormat::Csv => "csv-io",
        OutputFormat::Json | OutputFormat::Jsonl => "json-output",
    };
    ChatsenseError::invalid_format(
        "output",
        format!("Output format {format} requires the '{feature}' feature to be enabled"),
    )
}

/// Writes a table to a file in the given format.
///
/// `csv` is only used for [`OutputFormat::Csv`].
///
/// # Errors
///
/// Returns an error if the format's feature is disabled or the file cannot
/// be written.
#[allow(unused_variables)]
pub fn write_to_format(
    table: &Table,
    path: impl AsRef<Path>,
    format: OutputFormat,
    csv: CsvOptions,
) -> Result<(), ChatsenseError> {
    match format {
        #[cfg(feature = "csv-io")]
        OutputFormat::Csv => crate::core::output::write_csv(table, path, csv),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(table, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(table, path),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

/// Converts a table to a string in the given format.
#[allow(unused_variables)]
pub fn to_format_string(
    table: &Table,
    format: OutputFormat,
    csv: CsvOptions,
) -> Result<String, ChatsenseError> {
    match format {
        #[cfg(feature = "csv-io")]
        OutputFormat::Csv => crate::core::output::to_csv(table, csv),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(table),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(table),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}
