//! # chatsense
//!
//! A Rust library for turning Telegram HTML chat exports into tables and
//! normalizing Russian message text before sentiment classification.
//!
//! ## Overview
//!
//! The library covers the data-preparation half of a sentiment service:
//! - **Parsing** - Telegram Desktop HTML exports into [`ChatMessageRecord`]s,
//!   with sender attribution carried across joined and forwarded messages
//! - **Tables** - Records assembled into a `Sender, Message, Date, Time`
//!   [`Table`](core::Table), or CSV datasets read from disk
//! - **Normalization** - A fixed-order pipeline that strips numerals, redacts
//!   person names, removes noise characters, filters stop words (keeping
//!   negations and other sentiment-bearing words), and lemmatizes
//! - **Classification** - A [`Classifier`](classify::Classifier) seam with a
//!   hot-swappable [`ModelHandle`](classify::ModelHandle) and sentiment
//!   statistics over a classified chat
//!
//! ## Quick Start
//!
//! ```rust
//! use chatsense::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let html = r#"
//!         <div class="message default">
//!           <div class="pull_right date details" title="15.03.2024 14:32:10"></div>
//!           <div class="from_name">Алиса</div>
//!           <div class="text">Маша, мне очень понравились 2 фильма!</div>
//!         </div>"#;
//!
//!     let records = TelegramHtmlParser::new().parse_str(html)?;
//!     let table = to_table(&records);
//!
//!     let cleaned = PreprocessingPipeline::default().preprocess_dataset(&table)?;
//!     assert_eq!(cleaned.get(0, "Message"), Some("очень понравиться фильм"));
//!     assert_eq!(cleaned.get(0, "Sender"), Some("Алиса"));
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`ChatParser`](parser::ChatParser) trait (file or in-memory input)
//! - [`parsing`] - [`TelegramHtmlParser`](parsing::TelegramHtmlParser) and shared helpers
//! - [`record`] - [`ChatMessageRecord`]
//! - [`core`] - Tables, assembly, filtering, CSV input, and writers
//! - [`preprocess`] - [`Stage`](preprocess::Stage), [`TextNormalizer`](preprocess::TextNormalizer),
//!   [`PreprocessingPipeline`](preprocess::PreprocessingPipeline)
//! - [`classify`] - Sentiment labels, classifier interface, model handle
//! - [`analysis`] - Per-sender, per-hour, and per-label statistics
//! - [`progress`] - Stage progress callbacks
//! - [`config`] - [`PipelineConfig`](config::PipelineConfig), [`TelegramHtmlConfig`](config::TelegramHtmlConfig),
//!   [`CsvOptions`](config::CsvOptions)
//! - [`format`] - [`OutputFormat`](format::OutputFormat) and [`write_to_format`](format::write_to_format)
//! - [`error`] - [`ChatsenseError`], [`Result`]
//! - `cli` - clap argument types (feature `cli`)
//!
//! ## Feature Flags
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `csv-io` | CSV reading and writing |
//! | `json-output` | JSON and JSONL writers |
//! | `cli` | The `chatsense` binary |
//! | `full` | All of the above (default) |
//! | `gen-test` | The `gen_test` fixture generator |

pub mod analysis;
#[cfg(feature = "cli")]
pub mod cli;
pub mod classify;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod parser;
pub mod parsing;
pub mod preprocess;
pub mod progress;
pub mod record;

// Re-export the main types at the crate root for convenience
pub use error::{ChatsenseError, Result};
pub use record::ChatMessageRecord;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatsense::prelude::*;
/// ```
pub mod prelude {
    // Record and errors
    pub use crate::ChatMessageRecord;
    pub use crate::error::{ChatsenseError, Result};

    // Parsing
    pub use crate::parser::ChatParser;
    pub use crate::parsing::TelegramHtmlParser;

    // Configuration
    pub use crate::config::{CsvOptions, Language, PipelineConfig, TelegramHtmlConfig};

    // Tables
    pub use crate::core::{FilterConfig, Table, apply_filters, to_table};

    // Preprocessing
    pub use crate::preprocess::{PreprocessingPipeline, Stage, TextNormalizer};
    pub use crate::progress::{Progress, ProgressCallback};

    // Classification
    pub use crate::analysis::{ChatAnalysis, analyze_records};
    pub use crate::classify::{Classifier, ModelHandle, Prediction, Sentiment};

    // Output
    pub use crate::format::{OutputFormat, to_format_string, write_to_format};
}
