//! The five text normalization stages.

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::config::{Language, PipelineConfig};
use crate::error::StageErrorKind;

use super::Stage;
use super::morph::{DictionaryLemmatizer, Lemmatizer};
use super::names::{GazetteerNameExtractor, NameExtractor, redact_names};
use super::stopwords::StopWords;

static NUMERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\b\d+\b").expect("NUMERAL: invalid pattern"));

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("HTML_TAG: invalid pattern"));

static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://\S+|www\.\S+").expect("URL: invalid pattern")
});

static NON_CYRILLIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^а-яА-ЯёЁ\s-]").expect("NON_CYRILLIC: invalid pattern"));

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s-]+").expect("SEPARATORS: invalid pattern"));

/// Removes standalone runs of digits together with the whitespace before
/// them. Digits inside a word (`5кг`, `mp3`) are kept.
///
/// # Example
///
/// ```
/// use chatsense::preprocess::strip_numerals;
///
/// assert_eq!(strip_numerals("встреча в 1990 году"), "встреча в году");
/// assert_eq!(strip_numerals("купил 5кг"), "купил 5кг");
/// ```
pub fn strip_numerals(text: &str) -> String {
    NUMERAL.replace_all(text, "").into_owned()
}

/// Strips HTML tags and URLs, replaces every character that is not a
/// Cyrillic letter, whitespace, or hyphen with a space, collapses runs of
/// whitespace and hyphens to one space, trims, and lowercases.
///
/// The result contains only lowercase Cyrillic letters and single inner
/// spaces, so applying it again changes nothing.
///
/// # Example
///
/// ```
/// use chatsense::preprocess::clean_characters;
///
/// assert_eq!(
///     clean_characters("<b>Смотри</b> https://t.me/x - Это СУПЕР!!!"),
///     "смотри это супер"
/// );
/// ```
pub fn clean_characters(text: &str) -> String {
    let text = HTML_TAG.replace_all(text, " ");
    let text = URL.replace_all(&text, " ");
    let text = NON_CYRILLIC.replace_all(&text, " ");
    let text = SEPARATORS.replace_all(&text, " ");
    text.trim().to_lowercase()
}

/// Single-string normalization stages.
///
/// Holds the long-lived resources the stages need: the stop-word set, the
/// name extractor, and the lemmatizer. None of them change between calls,
/// so one normalizer can be shared across threads.
#[derive(Clone)]
pub struct TextNormalizer {
    language: Language,
    stopwords: StopWords,
    names: Arc<dyn NameExtractor>,
    lemmatizer: Arc<dyn Lemmatizer>,
}

impl fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextNormalizer")
            .field("language", &self.language)
            .field("stopwords", &self.stopwords.len())
            .finish_non_exhaustive()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(&PipelineConfig::default())
    }
}

impl TextNormalizer {
    /// Creates a normalizer with the built-in name gazetteer and lemma table.
    pub fn new(config: &PipelineConfig) -> Self {
        Self::with_resources(
            config,
            Arc::new(GazetteerNameExtractor::builtin()),
            Arc::new(DictionaryLemmatizer::builtin()),
        )
    }

    /// Creates a normalizer with custom name-extraction and lemmatization
    /// resources.
    pub fn with_resources(
        config: &PipelineConfig,
        names: Arc<dyn NameExtractor>,
        lemmatizer: Arc<dyn Lemmatizer>,
    ) -> Self {
        Self {
            language: config.language,
            stopwords: StopWords::with_retained(config.language, &config.extra_retained_words),
            names,
            lemmatizer,
        }
    }

    /// Language the stages are configured for.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Removes spans recognised as a first name or patronymic.
    ///
    /// Only the name spans are cut; surrounding punctuation and whitespace
    /// stay where they were.
    pub fn redact_person_names(&self, text: &str) -> Result<String, StageErrorKind> {
        let matches = self.names.extract(text)?;
        redact_names(text, &matches)
    }

    /// See [`strip_numerals`].
    pub fn strip_numerals(&self, text: &str) -> String {
        strip_numerals(text)
    }

    /// See [`clean_characters`].
    pub fn clean_characters(&self, text: &str) -> String {
        clean_characters(text)
    }

    /// Drops stop words, keeping the sentiment-bearing retained set and any
    /// configured extra words.
    pub fn filter_stopwords(&self, text: &str) -> String {
        self.stopwords.filter(text)
    }

    /// Replaces every word with its normal form.
    pub fn lemmatize(&self, text: &str) -> Result<String, StageErrorKind> {
        self.lemmatizer.lemmatize(text)
    }

    /// Runs one stage on `text`.
    pub fn apply(&self, stage: Stage, text: &str) -> Result<String, StageErrorKind> {
        match stage {
            Stage::StripNumerals => Ok(self.strip_numerals(text)),
            Stage::RedactNames => self.redact_person_names(text),
            Stage::CleanCharacters => Ok(self.clean_characters(text)),
            Stage::FilterStopwords => Ok(self.filter_stopwords(text)),
            Stage::Lemmatize => self.lemmatize(text),
        }
    }
}
