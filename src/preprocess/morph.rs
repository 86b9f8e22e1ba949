//! Lemmatization: reducing inflected words to their dictionary form.
//!
//! [`Lemmatizer`] is the seam for a morphological analyzer. The built-in
//! [`DictionaryLemmatizer`] maps known forms through a lookup table. Words
//! missing from it are reduced with the Snowball Russian stemmer, and a stem
//! shared with exactly one known lemma resolves to that lemma, so `книгами`
//! becomes `книга` without being listed. See [`UnknownWords`].

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChatsenseError, StageErrorKind};

use super::tokenize::{fold, is_word, tokenize};

const BUILTIN_LEMMAS: &str = include_str!("data/lemmas_ru.tsv");

static RUSSIAN_STEMMER: LazyLock<Stemmer> = LazyLock::new(|| Stemmer::create(Algorithm::Russian));

fn stem(word: &str) -> String {
    RUSSIAN_STEMMER.stem(word).into_owned()
}

/// Maps a single word to its normal form.
///
/// Implementations are shared read-only across calls and threads.
pub trait Lemmatizer: Send + Sync {
    /// Returns the normal form of `word`. The result is lowercase.
    fn normal_form(&self, word: &str) -> Result<String, StageErrorKind>;

    /// Lemmatizes every word of `text`, passing punctuation through, and
    /// joins the tokens with single spaces.
    fn lemmatize(&self, text: &str) -> Result<String, StageErrorKind> {
        let mut lemmas = Vec::new();
        for token in tokenize(text) {
            if is_word(token) {
                lemmas.push(self.normal_form(token)?);
            } else {
                lemmas.push(token.to_string());
            }
        }
        Ok(lemmas.join(" "))
    }
}

/// What [`DictionaryLemmatizer`] does with a word missing from its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownWords {
    /// Keep the word, lowercased
    Keep,
    /// Stem the word; use the lemma that shares the stem when there is
    /// exactly one, else the stem itself
    #[default]
    Stem,
}

/// Table-driven lemmatizer.
///
/// Forms are matched lowercased with `ё` folded into `е`. Every lemma is
/// also its own form.
///
/// # Example
///
/// ```
/// use chatsense::preprocess::{DictionaryLemmatizer, Lemmatizer};
///
/// let lemmatizer = DictionaryLemmatizer::builtin();
/// assert_eq!(lemmatizer.lemmatize("фильмы хорошие").unwrap(), "фильм хороший");
/// // Not in the table, but shares its stem with "книга"
/// assert_eq!(lemmatizer.lemmatize("книгами").unwrap(), "книга");
/// ```
#[derive(Clone)]
pub struct DictionaryLemmatizer {
    forms: HashMap<String, String>,
    /// Stem of each lemma; `None` when several lemmas share it
    stems: HashMap<String, Option<String>>,
    unknown: UnknownWords,
}

impl fmt::Debug for DictionaryLemmatizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictionaryLemmatizer")
            .field("forms", &self.forms.len())
            .field("stems", &self.stems.len())
            .field("unknown", &self.unknown)
            .finish()
    }
}

impl Default for DictionaryLemmatizer {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DictionaryLemmatizer {
    /// Creates a lemmatizer with the built-in Russian table.
    pub fn builtin() -> Self {
        let mut lemmatizer = Self::empty();
        for (line_no, line) in BUILTIN_LEMMAS.lines().enumerate() {
            if let Some((form, lemma)) = split_entry(line, line_no).ok().flatten() {
                lemmatizer.insert(form, lemma);
            }
        }
        lemmatizer
    }

    /// Creates a lemmatizer with an empty table.
    pub fn empty() -> Self {
        Self {
            forms: HashMap::new(),
            stems: HashMap::new(),
            unknown: UnknownWords::default(),
        }
    }

    /// Loads a `form<TAB>lemma` table. Blank lines and lines starting with
    /// `#` are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ChatsenseError::InvalidFormat`] for a line without a tab and
    /// [`ChatsenseError::Io`] if reading fails.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ChatsenseError> {
        let mut lemmatizer = Self::empty();
        lemmatizer.extend_from_reader(reader)?;
        Ok(lemmatizer)
    }

    /// Adds entries from a `form<TAB>lemma` file on top of the current table.
    ///
    /// # Errors
    ///
    /// Same as [`from_reader`](Self::from_reader), plus I/O errors opening
    /// the file.
    pub fn with_dictionary(mut self, path: impl AsRef<Path>) -> Result<Self, ChatsenseError> {
        let file = File::open(path.as_ref())?;
        let added = self.extend_from_reader(BufReader::new(file))?;
        debug!(path = %path.as_ref().display(), added, "loaded lemma dictionary");
        Ok(self)
    }

    /// Sets the policy for words missing from the table.
    #[must_use]
    pub fn with_unknown_words(mut self, unknown: UnknownWords) -> Self {
        self.unknown = unknown;
        self
    }

    /// Adds a single `form -> lemma` entry. The lemma becomes a form of
    /// itself unless it is already listed.
    pub fn insert(&mut self, form: &str, lemma: &str) {
        let lemma = lemma.to_lowercase();
        self.forms.entry(fold(&lemma)).or_insert_with(|| lemma.clone());
        self.forms.insert(fold(form), lemma.clone());

        match self.stems.entry(stem(&fold(&lemma))) {
            Entry::Vacant(entry) => {
                entry.insert(Some(lemma));
            }
            Entry::Occupied(mut entry) => {
                if entry.get().as_deref() != Some(lemma.as_str()) {
                    entry.insert(None);
                }
            }
        }
    }

    /// Number of forms in the table.
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    /// Returns `true` if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    fn extend_from_reader<R: BufRead>(&mut self, reader: R) -> Result<usize, ChatsenseError> {
        let mut added = 0;
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if let Some((form, lemma)) = split_entry(&line, line_no)? {
                self.insert(form, lemma);
                added += 1;
            }
        }
        Ok(added)
    }
}

impl Lemmatizer for DictionaryLemmatizer {
    fn normal_form(&self, word: &str) -> Result<String, StageErrorKind> {
        if let Some(lemma) = self.forms.get(&fold(word)) {
            return Ok(lemma.clone());
        }

        let lower = word.to_lowercase();
        Ok(match self.unknown {
            UnknownWords::Keep => lower,
            UnknownWords::Stem => {
                let stemmed = stem(&fold(&lower));
                match self.stems.get(&stemmed) {
                    Some(Some(lemma)) => lemma.clone(),
                    _ => stemmed,
                }
            }
        })
    }
}

fn split_entry(line: &str, line_no: usize) -> Result<Option<(&str, &str)>, ChatsenseError> {
    let line = line.trim_end_matches('\r');
    if line.trim().is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    match line.split_once('\t') {
        Some((form, lemma)) if !form.trim().is_empty() && !lemma.trim().is_empty() => {
            Ok(Some((form.trim(), lemma.trim())))
        }
        _ => Err(ChatsenseError::invalid_format(
            "lemma dictionary",
            format!("line {}: expected 'form<TAB>lemma', got {line:?}", line_no + 1),
        )),
    }
}
