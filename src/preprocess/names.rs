//! Person-name extraction and redaction.
//!
//! [`NameExtractor`] is the seam for the morphological name model. It returns
//! byte spans of recognised names together with the parts that were found
//! (first name, patronymic, surname). Redaction removes exactly the spans
//! that contain a first name or a patronymic; a lone surname is left alone.
//!
//! The built-in [`GazetteerNameExtractor`] works on capitalised Cyrillic
//! words. A word is a first name if it is one of the declined forms of a
//! gazetteer name. A patronymic counts only right after a first name, and a
//! surname only next to a first name or patronymic. Forms that are also
//! everyday words (`Кости`, `Вали`, `Жене`) count as names only next to a
//! patronymic or surname.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::StageErrorKind;

use super::tokenize::fold;

const BUILTIN_FIRST_NAMES: &str = include_str!("data/first_names_ru.txt");

static CAPITALIZED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[А-ЯЁ][а-яё]+(?:-[А-ЯЁ][а-яё]+)?\b").expect("CAPITALIZED: invalid pattern")
});

static PATRONYMIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[а-я]{2,}(?:(?:ович|евич|ьич)(?:а|у|ем|е)?|(?:овн|евн|ичн)(?:а|ы|е|у|ой|ою))$")
        .expect("PATRONYMIC: invalid pattern")
});

static SURNAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[а-я]{2,}(?:(?:ов|ев|ин|ын)(?:а|у|ым|ой|е|ых|ы)?|(?:ск|цк)(?:ий|ая|ого|ой|ому|им|ую|ом))$")
        .expect("SURNAME: invalid pattern")
});

/// Name forms that are also common words.
const COMMON_WORD_FORMS: &[&str] = &[
    "вали", "валю", "вера", "веры", "вере", "веру", "верой", "гене", "жене", "кости", "костей",
    "лев", "лева", "левы", "леве", "леву", "левой", "любовь", "марку", "марке", "надежда",
    "надежды", "надежде", "надежду", "надеждой", "роман", "романа", "роману", "романом",
    "романе", "слава", "славы", "славе", "славу", "славой",
];

/// Names whose stem changes in the oblique cases.
const FLEETING_VOWEL_STEMS: &[(&str, &str)] = &[("лев", "льв"), ("павел", "павл")];

// Genitive, dative, accusative, instrumental (and its variant) endings per
// declension class. Prepositional forms coincide with one of them.
const HARD_A_ENDINGS: &[&str] = &["ы", "е", "у", "ой", "ою"];
const VELAR_A_ENDINGS: &[&str] = &["и", "е", "у", "ой", "ою"];
const HUSHING_A_ENDINGS: &[&str] = &["и", "е", "у", "ей", "ею"];
const SOFT_YA_ENDINGS: &[&str] = &["и", "е", "ю", "ей", "ею"];
const IYA_ENDINGS: &[&str] = &["и", "ю", "ей", "ею"];
const HARD_CONSONANT_ENDINGS: &[&str] = &["а", "у", "ом", "е"];
const SOFT_CONSONANT_ENDINGS: &[&str] = &["я", "ю", "ем", "е"];
const IY_ENDINGS: &[&str] = &["я", "ю", "ем", "и"];
const NO_ENDINGS: &[&str] = &[];

/// The nominative plus the singular case forms of a lowercase first name.
fn declensions(name: &str) -> Vec<String> {
    let mut forms = vec![name.to_string()];
    let Some(last) = name.chars().last() else {
        return forms;
    };
    let stem = &name[..name.len() - last.len_utf8()];
    let before = stem.chars().last();

    let (stem, endings) = match last {
        'а' => match before {
            Some('ж' | 'ш' | 'щ' | 'ч' | 'ц') => (stem, HUSHING_A_ENDINGS),
            Some('г' | 'к' | 'х') => (stem, VELAR_A_ENDINGS),
            _ => (stem, HARD_A_ENDINGS),
        },
        'я' if before == Some('и') => (stem, IYA_ENDINGS),
        'я' => (stem, SOFT_YA_ENDINGS),
        'й' if before == Some('и') => (stem, IY_ENDINGS),
        'й' | 'ь' => (stem, SOFT_CONSONANT_ENDINGS),
        'б'..='я' if !"аеёиоуыэюя".contains(last) => {
            let oblique = FLEETING_VOWEL_STEMS
                .iter()
                .find(|(nominative, _)| *nominative == name)
                .map_or(name, |(_, oblique)| *oblique);
            (oblique, HARD_CONSONANT_ENDINGS)
        }
        _ => (stem, NO_ENDINGS),
    };

    forms.extend(endings.iter().map(|ending| format!("{stem}{ending}")));
    forms
}

/// The name parts found in one match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameFact {
    /// First (given) name
    pub first: Option<String>,
    /// Patronymic
    pub middle: Option<String>,
    /// Surname
    pub last: Option<String>,
}

impl NameFact {
    /// Returns `true` if the match names a person by first name or
    /// patronymic, which is what redaction removes.
    pub fn is_personal(&self) -> bool {
        self.first.is_some() || self.middle.is_some()
    }
}

/// A recognised name: byte span `start..stop` into the text, plus its parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameMatch {
    /// Byte offset where the name starts
    pub start: usize,
    /// Byte offset one past the end of the name
    pub stop: usize,
    /// The parts of the name
    pub fact: NameFact,
}

/// Finds personal names in text.
///
/// Implementations are shared read-only across calls and threads.
pub trait NameExtractor: Send + Sync {
    /// Returns the names found in `text`, in any order.
    fn extract(&self, text: &str) -> Result<Vec<NameMatch>, StageErrorKind>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    First,
    /// A first-name form that is also a common word
    MaybeFirst,
    Middle,
    Last,
    Other,
}

impl Role {
    fn is_given(self) -> bool {
        matches!(self, Role::First | Role::Middle)
    }
}

struct Candidate<'a> {
    start: usize,
    stop: usize,
    word: &'a str,
    role: Role,
}

/// Dictionary-backed Russian name extractor.
#[derive(Debug, Clone)]
pub struct GazetteerNameExtractor {
    /// Every declined form of every gazetteer name, folded
    forms: HashSet<String>,
}

impl Default for GazetteerNameExtractor {
    fn default() -> Self {
        Self::builtin()
    }
}

impl GazetteerNameExtractor {
    /// Creates an extractor with the built-in gazetteer of Russian first names.
    pub fn builtin() -> Self {
        Self::from_names(
            BUILTIN_FIRST_NAMES
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Creates an extractor from a custom list of first names, given in the
    /// nominative.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            forms: HashSet::new(),
        }
        .with_names(names)
    }

    /// Adds first names, given in the nominative, to the gazetteer.
    #[must_use]
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.forms.extend(declensions(&fold(name.as_ref())));
        }
        self
    }

    /// Returns `true` if `word` is a known first name in any singular case.
    pub fn is_first_name(&self, word: &str) -> bool {
        self.forms.contains(&fold(word))
    }

    fn role_of(&self, word: &str) -> Role {
        let folded = fold(word);
        if PATRONYMIC.is_match(&folded) {
            Role::Middle
        } else if self.forms.contains(&folded) {
            if COMMON_WORD_FORMS.contains(&folded.as_str()) {
                Role::MaybeFirst
            } else {
                Role::First
            }
        } else if SURNAME.is_match(&folded) {
            Role::Last
        } else {
            Role::Other
        }
    }

    /// Settles context-dependent roles within one run: an ambiguous first
    /// name needs a patronymic or surname beside it, and a patronymic needs
    /// a first name right before it.
    fn resolve_roles(run: &[Candidate<'_>]) -> Vec<Role> {
        let raw: Vec<Role> = run.iter().map(|candidate| candidate.role).collect();
        let qualifies = |index: Option<usize>| {
            index
                .and_then(|i| raw.get(i))
                .is_some_and(|role| matches!(role, Role::Middle | Role::Last))
        };

        let mut roles = raw.clone();
        for (i, role) in roles.iter_mut().enumerate() {
            if *role == Role::MaybeFirst {
                *role = if qualifies(i.checked_sub(1)) || qualifies(Some(i + 1)) {
                    Role::First
                } else {
                    Role::Other
                };
            }
        }
        for i in 0..roles.len() {
            if roles[i] == Role::Middle && (i == 0 || roles[i - 1] != Role::First) {
                roles[i] = Role::Other;
            }
        }
        roles
    }

    /// Turns one run of adjacent capitalised words into name matches.
    fn collect_run(run: &[Candidate<'_>], matches: &mut Vec<NameMatch>) {
        let roles = Self::resolve_roles(run);
        let mut i = 0;
        let mut consumed = 0;
        while i < run.len() {
            if !roles[i].is_given() {
                i += 1;
                continue;
            }

            let mut first = i;
            let mut last = i;
            while last + 1 < run.len() && roles[last + 1].is_given() {
                last += 1;
            }
            if first > consumed && roles[first - 1] == Role::Last {
                first -= 1;
            }
            if last + 1 < run.len() && roles[last + 1] == Role::Last {
                last += 1;
            }

            let mut fact = NameFact::default();
            for (candidate, role) in run[first..=last].iter().zip(&roles[first..=last]) {
                let slot = match role {
                    Role::First => &mut fact.first,
                    Role::Middle => &mut fact.middle,
                    Role::Last => &mut fact.last,
                    Role::MaybeFirst | Role::Other => continue,
                };
                if slot.is_none() {
                    *slot = Some(candidate.word.to_string());
                }
            }

            matches.push(NameMatch {
                start: run[first].start,
                stop: run[last].stop,
                fact,
            });
            i = last + 1;
            consumed = i;
        }
    }
}

impl NameExtractor for GazetteerNameExtractor {
    fn extract(&self, text: &str) -> Result<Vec<NameMatch>, StageErrorKind> {
        let mut matches = Vec::new();
        let mut run: Vec<Candidate<'_>> = Vec::new();

        for found in CAPITALIZED.find_iter(text) {
            if let Some(previous) = run.last() {
                let gap = &text[previous.stop..found.start()];
                if !gap.chars().all(char::is_whitespace) {
                    Self::collect_run(&run, &mut matches);
                    run.clear();
                }
            }
            run.push(Candidate {
                start: found.start(),
                stop: found.end(),
                word: found.as_str(),
                role: self.role_of(found.as_str()),
            });
        }
        Self::collect_run(&run, &mut matches);

        Ok(matches)
    }
}

/// Removes the spans of personal names from `text`.
///
/// Spans are sorted by start; overlapping or touching spans are merged into
/// their union before removal. The remaining fragments are concatenated in
/// their original order.
///
/// # Errors
///
/// Returns [`StageErrorKind::NameExtraction`] if a span is reversed, runs
/// past the end of the text, or splits a UTF-8 character.
///
/// # Example
///
/// ```
/// use chatsense::preprocess::{NameFact, NameMatch, redact_names};
///
/// let fact = NameFact { first: Some("Маша".into()), ..NameFact::default() };
/// let text = "Привет, Маша!";
/// let spans = [NameMatch { start: 14, stop: 22, fact }];
/// assert_eq!(redact_names(text, &spans).unwrap(), "Привет, !");
/// ```
pub fn redact_names(text: &str, matches: &[NameMatch]) -> Result<String, StageErrorKind> {
    let mut spans: Vec<(usize, usize)> = matches
        .iter()
        .filter(|m| m.fact.is_personal())
        .map(|m| (m.start, m.stop))
        .collect();

    for &(start, stop) in &spans {
        if start > stop
            || stop > text.len()
            || !text.is_char_boundary(start)
            || !text.is_char_boundary(stop)
        {
            return Err(StageErrorKind::NameExtraction(format!(
                "span {start}..{stop} does not fit a text of {} bytes",
                text.len()
            )));
        }
    }

    spans.sort_unstable();

    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(spans.len());
    for (start, stop) in spans {
        match merged.last_mut() {
            Some(previous) if start <= previous.1 => previous.1 = previous.1.max(stop),
            _ => merged.push((start, stop)),
        }
    }

    let mut redacted = String::with_capacity(text.len());
    let mut cursor = 0;
    for (start, stop) in merged {
        redacted.push_str(&text[cursor..start]);
        cursor = stop;
    }
    redacted.push_str(&text[cursor..]);

    Ok(redacted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> GazetteerNameExtractor {
        GazetteerNameExtractor::builtin()
    }

    fn redact(text: &str) -> String {
        let matches = extractor().extract(text).unwrap();
        redact_names(text, &matches).unwrap()
    }

    fn personal(start: usize, stop: usize) -> NameMatch {
        NameMatch {
            start,
            stop,
            fact: NameFact {
                first: Some("x".into()),
                ..NameFact::default()
            },
        }
    }

    #[test]
    fn test_first_name_forms() {
        let ex = extractor();
        assert!(ex.is_first_name("Иван"));
        assert!(ex.is_first_name("Ивану"));
        assert!(ex.is_first_name("Марии"));
        assert!(ex.is_first_name("Алексея"));
        assert!(ex.is_first_name("Игорем"));
        assert!(ex.is_first_name("Ольгой"));
        assert!(ex.is_first_name("Пётр"));
        assert!(!ex.is_first_name("Москва"));
        assert!(!ex.is_first_name("Привет"));
    }

    #[test]
    fn test_only_real_declensions_are_names() {
        let ex = extractor();
        assert!(ex.is_first_name("Льва"));
        assert!(ex.is_first_name("Павлом"));
        assert!(ex.is_first_name("Сашей"));
        assert!(ex.is_first_name("Дмитрии"));
        // Not case forms of any gazetteer name
        assert!(!ex.is_first_name("Ивании"));
        assert!(!ex.is_first_name("Лево"));
        assert!(!ex.is_first_name("Машой"));
    }

    #[test]
    fn test_common_words_are_not_redacted() {
        for text in [
            "Кости болят",
            "Вали отсюда",
            "Жене подарили цветы",
            "Левой рукой",
            "Слава богу",
            "Роман понравился",
        ] {
            assert!(extractor().extract(text).unwrap().is_empty(), "{text}");
            assert_eq!(redact(text), text);
        }
    }

    #[test]
    fn test_ambiguous_name_next_to_surname() {
        assert_eq!(redact("позвони Жене Петровой"), "позвони ");
        assert_eq!(redact("Роман Сергеевич пришёл"), " пришёл");
    }

    #[test]
    fn test_patronymic_alone_is_not_a_name() {
        for text in [
            "Основной вопрос решён",
            "Головной офис",
            "Условной единицей",
            "Виновна",
            "Петрович пришёл",
        ] {
            assert_eq!(redact(text), text);
        }
        // After a first name it still is
        assert_eq!(redact("Анна Сергеевна пришла"), " пришла");
    }

    #[test]
    fn test_extract_first_and_surname() {
        let matches = extractor().extract("Вчера Иван Петров позвонил").unwrap();
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(&"Вчера Иван Петров позвонил"[m.start..m.stop], "Иван Петров");
        assert_eq!(m.fact.first.as_deref(), Some("Иван"));
        assert_eq!(m.fact.last.as_deref(), Some("Петров"));
    }

    #[test]
    fn test_extract_full_name_with_patronymic() {
        let text = "Петрова Анна Сергеевна пришла";
        let matches = extractor().extract(text).unwrap();
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(&text[m.start..m.stop], "Петрова Анна Сергеевна");
        assert_eq!(m.fact.middle.as_deref(), Some("Сергеевна"));
    }

    #[test]
    fn test_lone_surname_is_not_personal() {
        let matches = extractor().extract("Петров опоздал").unwrap();
        assert!(matches.is_empty());
        assert_eq!(redact("Петров опоздал"), "Петров опоздал");
    }

    #[test]
    fn test_punctuation_breaks_runs() {
        let text = "Иван, Москва";
        let matches = extractor().extract(text).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(&text[matches[0].start..matches[0].stop], "Иван");
    }

    #[test]
    fn test_redact_keeps_surrounding_text() {
        assert_eq!(redact("Привет, Маша! Как дела?"), "Привет, ! Как дела?");
        assert_eq!(redact("спроси у Ивана Петровича"), "спроси у ");
    }

    #[test]
    fn test_redact_lowercase_not_touched() {
        assert_eq!(redact("иван пришёл"), "иван пришёл");
    }

    #[test]
    fn test_redact_output_not_longer() {
        let text = "Анна и Борис встретили Светлану Игоревну";
        assert!(redact(text).len() <= text.len());
        assert_eq!(redact(text), " и  встретили ");
    }

    #[test]
    fn test_redact_merges_overlapping_spans() {
        let text = "abcdefghij";
        let spans = [personal(6, 9), personal(2, 5), personal(4, 7)];
        assert_eq!(redact_names(text, &spans).unwrap(), "abj");
    }

    #[test]
    fn test_redact_ignores_surname_only_facts() {
        let spans = [NameMatch {
            start: 0,
            stop: 3,
            fact: NameFact {
                last: Some("abc".into()),
                ..NameFact::default()
            },
        }];
        assert_eq!(redact_names("abcdef", &spans).unwrap(), "abcdef");
    }

    #[test]
    fn test_redact_rejects_bad_spans() {
        assert!(redact_names("abc", &[personal(2, 10)]).is_err());
        assert!(redact_names("abc", &[personal(2, 1)]).is_err());
        // Splits the two-byte "п"
        assert!(redact_names("привет", &[personal(0, 1)]).is_err());
    }

    #[test]
    fn test_custom_gazetteer() {
        let ex = GazetteerNameExtractor::from_names(["Зульфия"]).with_names(["Айдар"]);
        assert!(ex.is_first_name("Зульфии"));
        assert!(ex.is_first_name("Айдару"));
        assert!(!ex.is_first_name("Иван"));
    }
}
