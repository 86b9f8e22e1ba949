//! Tabular side of chatsense.
//!
//! This module contains:
//! - [`table`] - The [`Table`] type shared by parsing, preprocessing, and output
//! - [`assembly`] - Conversion of chat records into a table
//! - [`filter`] - Record filtering by date and sender
//! - [`input`] - CSV reading
//! - [`output`] - Format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! use chatsense::ChatMessageRecord;
//! use chatsense::core::{FilterConfig, apply_filters, to_table};
//!
//! let records = vec![
//!     ChatMessageRecord::new("привет").with_sender("Alice"),
//!     ChatMessageRecord::new("пока").with_sender("Bob"),
//! ];
//!
//! let records = apply_filters(records, &FilterConfig::new().with_sender("bob"));
//! let table = to_table(&records);
//! assert_eq!(table.get(0, "Message"), Some("пока"));
//! ```

pub mod assembly;
pub mod filter;
#[cfg(feature = "csv-io")]
pub mod input;
pub mod output;
pub mod table;

pub use assembly::{CHAT_COLUMNS, to_table};
pub use filter::{FilterConfig, apply_filters};
#[cfg(feature = "csv-io")]
pub use input::{read_csv, read_csv_file};
pub use table::{RowRef, Table};

#[cfg(feature = "csv-io")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
