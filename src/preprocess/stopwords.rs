//! Stop-word filtering with a sentiment-preserving retained set.
//!
//! The base corpus is the standard Russian stop-word list (151 words, as
//! distributed with NLTK). Several of its entries carry polarity: negations,
//! intensifiers, modal particles, and evaluative adverbs. Dropping them turns
//! "это не хорошо" into "это хорошо", so they are subtracted from the corpus
//! before filtering.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::config::Language;

use super::tokenize::tokenize;

/// Standard Russian stop-word corpus.
pub const RUSSIAN_STOPWORDS: &[&str] = &[
    "и", "в", "во", "не", "что", "он", "на", "я", "с", "со", "как", "а", "то", "все", "она",
    "так", "его", "но", "да", "ты", "к", "у", "же", "вы", "за", "бы", "по", "только", "ее",
    "мне", "было", "вот", "от", "меня", "еще", "нет", "о", "из", "ему", "теперь", "когда",
    "даже", "ну", "вдруг", "ли", "если", "уже", "или", "ни", "быть", "был", "него", "до",
    "вас", "нибудь", "опять", "уж", "вам", "ведь", "там", "потом", "себя", "ничего", "ей",
    "может", "они", "тут", "где", "есть", "надо", "ней", "для", "мы", "тебя", "их", "чем",
    "была", "сам", "чтоб", "без", "будто", "чего", "раз", "тоже", "себе", "под", "будет",
    "ж", "тогда", "кто", "этот", "того", "потому", "этого", "какой", "совсем", "ним",
    "здесь", "этом", "один", "почти", "мой", "тем", "чтобы", "нее", "сейчас", "были",
    "куда", "зачем", "всех", "никогда", "можно", "при", "наконец", "два", "об", "другой",
    "хоть", "после", "над", "больше", "тот", "через", "эти", "нас", "про", "всего", "них",
    "какая", "много", "разве", "три", "эту", "моя", "впрочем", "хорошо", "свою", "этой",
    "перед", "иногда", "лучше", "чуть", "том", "нельзя", "такой", "им", "более", "всегда",
    "конечно", "всю", "между",
];

/// Stop words that carry sentiment and are never removed.
pub const RETAINED_WORDS: &[&str] = &[
    // Negations
    "не", "ни", "нет", "без", "никак", "вовсе", "отнюдь",
    // Intensifiers
    "очень", "совсем", "абсолютно", "совершенно", "крайне",
    // Modal and contrast particles
    "ли", "ведь", "либо", "даже",
    // Evaluative adverbs
    "хорошо", "плохо", "ужасно", "прекрасно",
];

static RUSSIAN: LazyLock<StopWords> = LazyLock::new(|| StopWords::for_language(Language::Russian));

/// A stop-word set: the language corpus minus the retained words.
#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Builds the set for `language` with the built-in retained words.
    pub fn for_language(language: Language) -> Self {
        Self::with_retained(language, std::iter::empty::<&str>())
    }

    /// Builds the set for `language`, additionally keeping `extra` words.
    pub fn with_retained<I, S>(language: Language, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let corpus = match language {
            Language::Russian => RUSSIAN_STOPWORDS,
        };

        let mut retained: HashSet<String> = RETAINED_WORDS.iter().map(|w| (*w).to_string()).collect();
        retained.extend(extra.into_iter().map(|w| w.as_ref().to_lowercase()));

        let words = corpus
            .iter()
            .map(|w| (*w).to_string())
            .filter(|w| !retained.contains(w))
            .collect();

        Self { words }
    }

    /// Returns `true` if `token` is removed by this set (case-insensitive).
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(&token.to_lowercase())
    }

    /// Number of words removed by this set.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the set removes nothing.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Tokenizes `text`, drops stop words, and rejoins the rest with single
    /// spaces.
    pub fn filter(&self, text: &str) -> String {
        tokenize(text)
            .into_iter()
            .filter(|token| !self.contains(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Removes stop words for `language`, keeping the sentiment-bearing
/// [`RETAINED_WORDS`].
///
/// # Example
///
/// ```
/// use chatsense::config::Language;
/// use chatsense::preprocess::filter_stopwords;
///
/// assert_eq!(filter_stopwords("это не хорошо", Language::Russian), "это не хорошо");
/// assert_eq!(filter_stopwords("он был там", Language::Russian), "");
/// ```
pub fn filter_stopwords(text: &str, language: Language) -> String {
    match language {
        Language::Russian => RUSSIAN.filter(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corpus_size() {
        assert_eq!(RUSSIAN_STOPWORDS.len(), 151);
    }

    #[test]
    fn test_retained_words_survive() {
        let stopwords = StopWords::for_language(Language::Russian);
        for word in RETAINED_WORDS {
            assert!(!stopwords.contains(word), "{word} must be retained");
        }
    }

    #[test]
    fn test_set_is_corpus_minus_retained() {
        let stopwords = StopWords::for_language(Language::Russian);
        let retained_in_corpus = RETAINED_WORDS
            .iter()
            .filter(|w| RUSSIAN_STOPWORDS.contains(w))
            .count();
        assert_eq!(stopwords.len(), RUSSIAN_STOPWORDS.len() - retained_in_corpus);
    }

    #[test]
    fn test_filter_removes_stopwords() {
        assert_eq!(
            filter_stopwords("я думаю что он не прав", Language::Russian),
            "думаю не прав"
        );
    }

    #[test]
    fn test_filter_case_insensitive() {
        assert_eq!(filter_stopwords("Он Был ОЧЕНЬ рад", Language::Russian), "ОЧЕНЬ рад");
    }

    #[test]
    fn test_filter_keeps_negation_and_evaluation() {
        assert_eq!(
            filter_stopwords("это не хорошо", Language::Russian),
            "это не хорошо"
        );
        assert_eq!(
            filter_stopwords("даже без тебя совсем плохо", Language::Russian),
            "даже без совсем плохо"
        );
    }

    #[test]
    fn test_filter_rejoins_with_single_spaces() {
        assert_eq!(filter_stopwords("  кот   и\tпёс ", Language::Russian), "кот пёс");
    }

    #[test]
    fn test_extra_retained_words() {
        let stopwords = StopWords::with_retained(Language::Russian, ["Всегда", "никогда"]);
        assert_eq!(stopwords.filter("всегда и никогда"), "всегда никогда");
    }
}
