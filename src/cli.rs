//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - Global options and the chosen [`Command`]
//! - [`Command`] - `chat`, `clean`, and `text` subcommands
//! - [`FormatArg`] - Output format option, convertible to [`crate::format::OutputFormat`]
//!
//! The argument types are plain data; `main.rs` maps them onto
//! [`PipelineConfig`](crate::config::PipelineConfig),
//! [`FilterConfig`](crate::core::FilterConfig), and
//! [`CsvOptions`](crate::config::CsvOptions).

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::CsvOptions;
use crate::format::OutputFormat;

/// Parse Telegram HTML chat exports and normalize Russian text for
/// sentiment classification.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatsense")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatsense chat messages.html -o chat.csv
    chatsense chat messages.html --clean --after 2024-01-01 -f jsonl
    chatsense clean reviews.csv --column Text --delimiter ';'
    chatsense text \"Маша, мне очень понравились 2 фильма!\"")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Extra lemma dictionary (form<TAB>lemma per line); may be repeated
    #[arg(long = "lemma-dict", value_name = "TSV", global = true)]
    pub lemma_dicts: Vec<PathBuf>,

    /// Keep words missing from the lemma dictionaries as-is instead of stemming them
    #[arg(long, global = true)]
    pub keep_unknown: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// What to run.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Convert a Telegram HTML export into a table
    Chat(ChatArgs),

    /// Normalize one column of a CSV dataset
    Clean(CleanArgs),

    /// Print the normalized form of a single string
    Text {
        /// Text to normalize
        text: String,
    },
}

/// Options of the `chat` subcommand.
#[derive(clap::Args, Debug, Clone)]
pub struct ChatArgs {
    /// Path to the exported messages.html
    pub input: PathBuf,

    /// Path to output file
    #[arg(short, long, default_value = "chat.csv")]
    pub output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: FormatArg,

    /// Keep messages sent on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep messages sent on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Keep messages from this sender only
    #[arg(long, value_name = "USER")]
    pub from: Option<String>,

    /// Normalize the Message column before writing
    #[arg(long)]
    pub clean: bool,
}

/// Options of the `clean` subcommand.
#[derive(clap::Args, Debug, Clone)]
pub struct CleanArgs {
    /// Path to the input CSV file (with a header row)
    pub input: PathBuf,

    /// Column to normalize
    #[arg(long, default_value = "Message")]
    pub column: String,

    /// CSV field delimiter, used for reading and CSV output
    #[arg(long, default_value_t = ',', value_parser = parse_delimiter)]
    pub delimiter: char,

    /// Path to output file
    #[arg(short, long, default_value = "cleaned.csv")]
    pub output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: FormatArg,
}

impl CleanArgs {
    /// CSV options for reading the input and writing CSV output.
    pub fn csv_options(&self) -> CsvOptions {
        // parse_delimiter only accepts ASCII
        CsvOptions::new().with_delimiter(self.delimiter as u8)
    }
}

fn parse_delimiter(value: &str) -> Result<char, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c),
        (Some('\\'), Some('t')) if value.len() == 2 => Ok('\t'),
        _ => Err(format!(
            "delimiter must be a single ASCII character, got '{value}'"
        )),
    }
}

/// Output format options.
///
/// - [`Csv`](FormatArg::Csv) - What the classifier service accepts
/// - [`Json`](FormatArg::Json) - Array of row objects
/// - [`Jsonl`](FormatArg::Jsonl) - One row object per line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatArg {
    /// CSV (default)
    #[default]
    Csv,

    /// JSON array of rows
    Json,

    /// JSON Lines
    #[value(alias = "ndjson")]
    Jsonl,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> OutputFormat {
        match format {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Jsonl => OutputFormat::Jsonl,
        }
    }
}
