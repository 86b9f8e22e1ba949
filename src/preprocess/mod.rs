//! Russian text normalization.
//!
//! | Stage | Function | What it removes or changes |
//! |-------|----------|----------------------------|
//! | [`Stage::StripNumerals`] | [`strip_numerals`] | Standalone digit runs |
//! | [`Stage::RedactNames`] | [`TextNormalizer::redact_person_names`] | First names and patronymics |
//! | [`Stage::CleanCharacters`] | [`clean_characters`] | Tags, URLs, non-Cyrillic characters; lowercases |
//! | [`Stage::FilterStopwords`] | [`filter_stopwords`] | Stop words, except the [`RETAINED_WORDS`] |
//! | [`Stage::Lemmatize`] | [`TextNormalizer::lemmatize`] | Inflection |
//!
//! [`PreprocessingPipeline`] runs them in [`Stage::ORDER`] for both single
//! strings and table columns.
//!
//! # Example
//!
//! ```rust
//! use chatsense::preprocess::{PreprocessingPipeline, Stage};
//!
//! let pipeline = PreprocessingPipeline::default();
//! assert_eq!(Stage::ORDER[0], Stage::StripNumerals);
//! assert_eq!(pipeline.preprocess_text("Это не хорошо!").unwrap(), "это не хорошо");
//! ```

mod morph;
mod names;
mod normalizer;
mod pipeline;
mod stopwords;
mod tokenize;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use morph::{DictionaryLemmatizer, Lemmatizer, UnknownWords};
pub use names::{GazetteerNameExtractor, NameExtractor, NameFact, NameMatch, redact_names};
pub use normalizer::{TextNormalizer, clean_characters, strip_numerals};
pub use pipeline::PreprocessingPipeline;
pub use stopwords::{RETAINED_WORDS, RUSSIAN_STOPWORDS, StopWords, filter_stopwords};
pub use tokenize::{is_word, tokenize};

/// A normalization stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Remove standalone digit runs
    StripNumerals,
    /// Remove first names and patronymics
    #[serde(rename = "redact_person_names")]
    RedactNames,
    /// Remove tags, URLs, and non-Cyrillic characters; lowercase
    CleanCharacters,
    /// Remove stop words
    FilterStopwords,
    /// Reduce words to their normal form
    Lemmatize,
}

impl Stage {
    /// The order every pipeline applies the stages in.
    ///
    /// Name redaction must run before character cleaning, which lowercases
    /// the text.
    pub const ORDER: [Stage; 5] = [
        Stage::StripNumerals,
        Stage::RedactNames,
        Stage::CleanCharacters,
        Stage::FilterStopwords,
        Stage::Lemmatize,
    ];

    /// Stable snake_case name of the stage.
    pub fn name(self) -> &'static str {
        match self {
            Stage::StripNumerals => "strip_numerals",
            Stage::RedactNames => "redact_person_names",
            Stage::CleanCharacters => "clean_characters",
            Stage::FilterStopwords => "filter_stopwords",
            Stage::Lemmatize => "lemmatize",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
