//! Table writers.
//!
//! - [`write_csv`] / [`to_csv`] - CSV with configurable delimiter - requires `csv-io` feature
//! - [`write_json`] / [`to_json`] - JSON array of row objects - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one row object per line - requires `json-output` feature
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-io", feature = "json-output"))]
//! # fn main() -> chatsense::Result<()> {
//! use chatsense::ChatMessageRecord;
//! use chatsense::config::CsvOptions;
//! use chatsense::core::output::{to_csv, write_json, write_jsonl};
//! use chatsense::core::to_table;
//!
//! let table = to_table(&[ChatMessageRecord::new("привет").with_sender("Alice")]);
//!
//! write_json(&table, "chat.json")?;
//! write_jsonl(&table, "chat.jsonl")?;
//! let csv_string = to_csv(&table, CsvOptions::default())?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-io", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-io")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-io")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
