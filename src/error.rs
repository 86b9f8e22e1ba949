//! Unified error types for chatsense.
//!
//! This module provides a single [`ChatsenseError`] enum that covers all error
//! cases in the library: unreadable chat documents, missing table columns,
//! and failing text-normalization stages.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Developers** get the failing stage and the offending text

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::preprocess::Stage;

/// A specialized [`Result`] type for chatsense operations.
///
/// # Example
///
/// ```rust
/// use chatsense::error::Result;
/// use chatsense::ChatMessageRecord;
///
/// fn my_function() -> Result<Vec<ChatMessageRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatsenseError>;

/// The error type for all chatsense operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatsenseError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The source document could not be parsed at all.
    ///
    /// Block-level anomalies (missing sender, missing date) never produce
    /// this error; they degrade to empty fields.
    #[error("Failed to parse {format} export{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// The format being parsed (e.g., "Telegram HTML")
        format: &'static str,
        /// The underlying parse error
        #[source]
        source: ParseErrorKind,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The requested text column is absent from the input table.
    #[error("Column '{column}' not found. Available columns: [{}]", available.join(", "))]
    ColumnNotFound {
        /// The column that was requested
        column: String,
        /// The columns the table actually has
        available: Vec<String>,
    },

    /// A normalization stage failed on a given text.
    #[error("Preprocessing failed in stage '{stage}' for text {text:?}: {source}")]
    Preprocessing {
        /// The stage that failed
        stage: Stage,
        /// The input the stage was given
        text: String,
        /// What went wrong inside the stage
        #[source]
        source: StageErrorKind,
    },

    /// The file format doesn't match the expected structure.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// Invalid date format in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// The sentiment classifier failed.
    #[error("Classifier error: {0}")]
    Classifier(String),

    /// CSV reading or writing error.
    #[cfg(feature = "csv-io")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Kinds of parse errors that can occur.
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    /// The input contains no document at all
    #[error("document is empty")]
    Empty,
    /// The input bytes are not valid UTF-8
    #[error("{0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    /// A CSS selector failed to compile
    #[error("invalid selector '{0}'")]
    Selector(String),
    /// Generic parsing error
    #[error("{0}")]
    Other(String),
}

/// Kinds of failures raised inside a normalization stage.
#[derive(Debug, Error)]
pub enum StageErrorKind {
    /// The morphological analyzer could not produce a parse
    #[error("morphological analysis failed: {0}")]
    Morphology(String),
    /// The name extractor failed or returned unusable spans
    #[error("name extraction failed: {0}")]
    NameExtraction(String),
    /// Any other stage failure
    #[error("{0}")]
    Other(String),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatsenseError {
    /// Creates a parse error for the Telegram HTML format.
    pub fn telegram_html_parse(source: ParseErrorKind, path: Option<PathBuf>) -> Self {
        ChatsenseError::Parse {
            format: "Telegram HTML",
            source,
            path,
        }
    }

    /// Creates a column-not-found error listing the available columns.
    pub fn column_not_found(column: impl Into<String>, available: &[String]) -> Self {
        ChatsenseError::ColumnNotFound {
            column: column.into(),
            available: available.to_vec(),
        }
    }

    /// Creates a preprocessing error for the given stage and input.
    pub fn preprocessing(stage: Stage, text: impl Into<String>, source: StageErrorKind) -> Self {
        ChatsenseError::Preprocessing {
            stage,
            text: text.into(),
            source,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatsenseError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatsenseError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates a classifier error.
    pub fn classifier(message: impl Into<String>) -> Self {
        ChatsenseError::Classifier(message.into())
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatsenseError::Io(_))
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, ChatsenseError::Parse { .. })
    }

    /// Returns `true` if this is a missing-column error.
    pub fn is_column_not_found(&self) -> bool {
        matches!(self, ChatsenseError::ColumnNotFound { .. })
    }

    /// Returns `true` if this is a preprocessing error.
    pub fn is_preprocessing(&self) -> bool {
        matches!(self, ChatsenseError::Preprocessing { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatsenseError::InvalidDate { .. })
    }

    /// Returns the failing stage for preprocessing errors.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            ChatsenseError::Preprocessing { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
