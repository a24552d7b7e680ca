/*!
 * Whole-word search helpers.
 *
 * Keyword sets used by the language and codepage heuristics are declared as
 * statics through `keyword_set!` and compiled once, on first use.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::TextError;

/// Build a case-sensitive whole-word regex for a literal word
pub fn make_word_search_regex(word: &str) -> Result<Regex, TextError> {
    compile(format!(r"\b{}\b", regex::escape(word)))
}

/// Build a regex for a literal word delimited by spaces or punctuation, so
/// that words glued to digits (`3rd`, `24h`) are still found
pub fn make_word_search_regex_with_numbers(word: &str) -> Result<Regex, TextError> {
    compile(format!(r"[ ,.?!]{}[ !.,\r\n?]", regex::escape(word)))
}

/// Whether `pattern` is a non-empty, compilable regex
pub fn is_valid_regex(pattern: &str) -> bool {
    !pattern.is_empty() && Regex::new(pattern).is_ok()
}

/// Compile a user-supplied pattern, reporting why it was rejected
pub fn compile_user_pattern(pattern: &str) -> Result<Regex, TextError> {
    if pattern.is_empty() {
        return Err(TextError::EmptyPattern);
    }
    compile(pattern.to_string())
}

fn compile(pattern: String) -> Result<Regex, TextError> {
    Regex::new(&pattern).map_err(|source| TextError::InvalidPattern { pattern, source })
}

/// Compile the whole-word matchers of a keyword set
pub fn compile_keywords(words: &[&str]) -> Vec<Regex> {
    words
        .iter()
        .map(|word| make_word_search_regex(word).expect("escaped keyword is a valid regex"))
        .collect()
}

/// A fixed, ordered list of marker words.
///
/// A word listed several times is counted several times; some tables rely on
/// that to weight a marker.
pub struct KeywordSet {
    words: &'static [&'static str],
    matchers: Lazy<Vec<Regex>>,
}

impl KeywordSet {
    pub const fn new(words: &'static [&'static str], compile: fn() -> Vec<Regex>) -> Self {
        Self {
            words,
            matchers: Lazy::new(compile),
        }
    }

    pub fn words(&self) -> &'static [&'static str] {
        self.words
    }

    /// Total number of whole-word occurrences of every listed word
    pub fn count(&self, text: &str) -> usize {
        self.matchers
            .iter()
            .map(|matcher| matcher.find_iter(text).count())
            .sum()
    }
}

impl std::fmt::Debug for KeywordSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordSet").field("words", &self.words).finish()
    }
}

/// Declare a lazily compiled `KeywordSet`
macro_rules! keyword_set {
    ($($word:expr),+ $(,)?) => {
        $crate::word_search::KeywordSet::new(
            &[$($word),+],
            || $crate::word_search::compile_keywords(&[$($word),+]),
        )
    };
}

pub(crate) use keyword_set;

/// Count whole-word occurrences of an ad-hoc list of words
pub fn count_keywords(text: &str, words: &[&str]) -> Result<usize, TextError> {
    let mut count = 0;
    for word in words {
        count += make_word_search_regex(word)?.find_iter(text).count();
    }
    Ok(count)
}
