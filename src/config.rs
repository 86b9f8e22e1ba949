//! Configuration types for parsing, preprocessing, and table I/O.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`TelegramHtmlConfig`] - CSS selectors for the Telegram HTML export
//! - [`PipelineConfig`] - Target column and language of the preprocessing pipeline
//! - [`CsvOptions`] - Delimiter and header handling for CSV tables
//!
//! # Example
//!
//! ```rust
//! use chatsense::config::{Language, PipelineConfig};
//!
//! let config = PipelineConfig::new()
//!     .with_target_column("MessageText")
//!     .with_language(Language::Russian)
//!     .with_retained_word("вообще");
//!
//! assert_eq!(config.target_column, "MessageText");
//! ```

use serde::{Deserialize, Serialize};

/// Language of the text being normalized.
///
/// Selects the stop-word corpus, the tokenizer rules, and the stemmer used
/// for unknown words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Language {
    /// Russian (Cyrillic script)
    #[default]
    Russian,
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::Russian => write!(f, "russian"),
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "russian" | "ru" => Ok(Language::Russian),
            _ => Err(format!("Unknown language: '{}'. Expected one of: russian, ru", s)),
        }
    }
}

/// CSS selectors used to walk a Telegram HTML export.
///
/// The defaults match the markup produced by Telegram Desktop. They are
/// only worth changing when a future export format renames its classes.
///
/// # Example
///
/// ```rust
/// use chatsense::config::TelegramHtmlConfig;
///
/// let config = TelegramHtmlConfig::new().with_text_selector("div.text, div.media_text");
/// assert_eq!(config.message_selector, "div.message");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramHtmlConfig {
    /// Top-level message block (default: `div.message`)
    pub message_selector: String,

    /// Sender display name node (default: `div.from_name`)
    pub from_name_selector: String,

    /// Message text node (default: `div.text`)
    pub text_selector: String,

    /// Forwarded sub-message region (default: `div.forwarded.body`)
    pub forwarded_selector: String,

    /// Node carrying the timestamp `title` attribute (default: `div.pull_right.date.details`)
    pub date_selector: String,

    /// Timestamp span embedded in a name node, excised before reading the
    /// name (default: `span.date.details`)
    pub name_date_selector: String,
}

impl Default for TelegramHtmlConfig {
    fn default() -> Self {
        Self {
            message_selector: "div.message".to_string(),
            from_name_selector: "div.from_name".to_string(),
            text_selector: "div.text".to_string(),
            forwarded_selector: "div.forwarded.body".to_string(),
            date_selector: "div.pull_right.date.details".to_string(),
            name_date_selector: "span.date.details".to_string(),
        }
    }
}

impl TelegramHtmlConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the message block selector.
    #[must_use]
    pub fn with_message_selector(mut self, selector: impl Into<String>) -> Self {
        self.message_selector = selector.into();
        self
    }

    /// Sets the text node selector.
    #[must_use]
    pub fn with_text_selector(mut self, selector: impl Into<String>) -> Self {
        self.text_selector = selector.into();
        self
    }

    /// Sets the date node selector.
    #[must_use]
    pub fn with_date_selector(mut self, selector: impl Into<String>) -> Self {
        self.date_selector = selector.into();
        self
    }
}

/// Configuration of a [`PreprocessingPipeline`](crate::preprocess::PreprocessingPipeline).
///
/// Fixed at construction; a pipeline never changes its configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Column of a tabular input that is transformed (default: `Message`)
    pub target_column: String,

    /// Language of the text (default: Russian)
    pub language: Language,

    /// Words kept by the stop-word filter in addition to the built-in
    /// sentiment-bearing set
    #[serde(default)]
    pub extra_retained_words: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            target_column: "Message".to_string(),
            language: Language::Russian,
            extra_retained_words: Vec::new(),
        }
    }
}

impl PipelineConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the column transformed by bulk preprocessing.
    #[must_use]
    pub fn with_target_column(mut self, column: impl Into<String>) -> Self {
        self.target_column = column.into();
        self
    }

    /// Sets the text language.
    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Adds a word the stop-word filter must keep.
    #[must_use]
    pub fn with_retained_word(mut self, word: impl Into<String>) -> Self {
        self.extra_retained_words.push(word.into());
        self
    }
}

/// Options for reading and writing CSV tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvOptions {
    /// Field delimiter (default: `,`)
    pub delimiter: u8,

    /// Whether the first record is a header row (default: true)
    pub has_headers: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
        }
    }
}

impl CsvOptions {
    /// Creates new options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether the first record is a header row.
    #[must_use]
    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }
}
