/*!
 * Line breaking for subtitle cues.
 *
 * A cue is shown on at most two lines. `auto_break_line` flattens the text and
 * picks a break close to the middle, preferring sentence ends, then clause
 * boundaries and spaces, and only as a last resort a hyphenated hard wrap.
 * `unbreak_line` does the reverse.
 *
 * Lengths are counted in `char`s so that accented and non-Latin text is
 * measured the same way it is displayed.
 */

use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

/// Texts shorter than this are never touched
pub const DEFAULT_MINIMUM_LENGTH: usize = 5;

// Below this length a cue without sentence punctuation stays on one line
const SHORT_TEXT_LENGTH: usize = 40;

const STRICT_RADIUS: usize = 15;
const RELAXED_RADIUS: usize = 25;

const SENTENCE_TERMINALS: &[char] = &['.', '!', '?'];
const TRAILING_PUNCTUATION: &[char] = &['!', '?', '.', ':', ';'];
const STRICT_RUN: &[char] = &['.', '!', '?', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];
const RELAXED_CANDIDATES: &[char] = &['.', '!', '?', ',', ' '];
const RELAXED_RUN: &[char] = &[' ', '.', '!', '?'];

static MARKUP_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</?(?:i|b|u)>|</?font(?:\s[^>]*)?>").unwrap()
});

/// Inserts and removes the line break of a subtitle cue
#[derive(Debug, Clone)]
pub struct LineBreaker {
    // @field: Separator written between the two lines
    separator: String,
}

impl Default for LineBreaker {
    fn default() -> Self {
        Self::new("\n")
    }
}

impl LineBreaker {
    /// Create a breaker that joins lines with `separator`
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Break `text` into two balanced lines.
    ///
    /// Text shorter than `minimum_length` is returned as is. Short text
    /// without sentence punctuation is flattened onto a single line. Anything
    /// else is flattened and split once near the middle: first at a sentence
    /// end within 15 characters, then at punctuation or a space within 25
    /// characters, otherwise hard-wrapped at the middle with a hyphen.
    pub fn auto_break_line(&self, text: &str, minimum_length: usize) -> String {
        let length = text.chars().count();
        if length < minimum_length {
            return text.to_string();
        }

        let stripped = remove_html_tags(text);
        let stripped = stripped.trim_end_matches(TRAILING_PUNCTUATION);
        if length < SHORT_TEXT_LENGTH && !stripped.contains(SENTENCE_TERMINALS) {
            return self.flatten(text);
        }

        let chars: Vec<char> = self.flatten(text).chars().collect();
        // Whitespace-only input flattens to a single space
        if chars.len() < 3 {
            return chars.iter().collect::<String>().trim_end().to_string();
        }
        let mid = chars.len() / 2;

        let (chars, split) = match find_strict_split(&chars, mid).or_else(|| find_relaxed_split(&chars, mid)) {
            Some(split) => (chars, split),
            None => {
                trace!("No natural break point near position {}, hard wrapping", mid);
                let mut wrapped = Vec::with_capacity(chars.len() + 1);
                wrapped.extend_from_slice(&chars[..mid]);
                wrapped.push('-');
                wrapped.extend_from_slice(&chars[mid..]);
                (wrapped, mid + 1)
            }
        };

        let result = if split + 2 < chars.len() {
            let first: String = chars[..split].iter().collect();
            let second: String = chars[split..].iter().collect();
            format!("{}{}{}", first.trim_end(), self.separator, second.trim())
        } else {
            chars.iter().collect()
        };

        result.trim_end().to_string()
    }

    /// Join all lines of `text` into one, collapsing doubled spaces
    pub fn unbreak_line(&self, text: &str) -> String {
        if !self.contains_break(text) {
            return text.to_string();
        }
        self.flatten(text)
    }

    /// Whether `text` holds a line break in any of the accepted conventions
    pub fn contains_break(&self, text: &str) -> bool {
        (!self.separator.is_empty() && text.contains(self.separator.as_str())) || text.contains('\n')
    }

    fn flatten(&self, text: &str) -> String {
        // "\r\n" goes first so that a "\n" separator does not leave a stray '\r'
        let mut flat = text.replace("\r\n", " ");
        if !self.separator.is_empty() {
            flat = flat.replace(self.separator.as_str(), " ");
        }
        collapse_double_spaces(flat.replace('\n', " "))
    }
}

/// Break a cue using `\n` and the default minimum length
pub fn auto_break_line(text: &str) -> String {
    LineBreaker::default().auto_break_line(text, DEFAULT_MINIMUM_LENGTH)
}

/// Unbreak a cue that uses `\n` or `\r\n` line breaks
pub fn unbreak_line(text: &str) -> String {
    LineBreaker::default().unbreak_line(text)
}

/// Remove italic, bold, underline and font markup
pub fn remove_html_tags(text: &str) -> String {
    MARKUP_TAG_REGEX.replace_all(text, "").into_owned()
}

/// Length of the longest displayed line, markup excluded
pub fn max_line_length(text: &str) -> usize {
    text.lines()
        .map(|line| remove_html_tags(line).chars().count())
        .max()
        .unwrap_or(0)
}

/// Suggested minimum display time in milliseconds (on the low side)
pub fn display_duration_ms(text: &str) -> u64 {
    match text.chars().count() {
        0..=7 => 800,
        8..=14 => 1000,
        15..=24 => 1300,
        25..=34 => 1500,
        35..=49 => 2000,
        50..=74 => 2500,
        75..=89 => 3000,
        _ => 3500,
    }
}

fn collapse_double_spaces(mut text: String) -> String {
    while text.contains("  ") {
        text = text.replace("  ", " ");
    }
    text
}

// A '.' or ',' between two digits is a decimal or thousands separator
fn is_part_of_number(chars: &[char], position: usize) -> bool {
    matches!(chars[position], '.' | ',')
        && position > 0
        && position + 1 < chars.len()
        && chars[position - 1].is_ascii_digit()
        && chars[position + 1].is_ascii_digit()
}

fn absorb_run(chars: &[char], mut position: usize, run: &[char]) -> usize {
    while position < chars.len() && run.contains(&chars[position]) {
        position += 1;
    }
    position
}

/// Scan outward from `mid`, right side first, for the first matching character
fn scan_outward(chars: &[char], mid: usize, radius: usize, is_candidate: impl Fn(char) -> bool) -> Option<usize> {
    for j in 0..radius {
        if mid + j + 1 >= chars.len() || mid + j == 0 {
            continue;
        }
        // mid + j + 1 < len implies j < mid
        for position in [mid + j, mid - j] {
            if is_candidate(chars[position]) && !is_part_of_number(chars, position) {
                return Some(position);
            }
        }
    }
    None
}

fn find_strict_split(chars: &[char], mid: usize) -> Option<usize> {
    scan_outward(chars, mid, STRICT_RADIUS, |c| SENTENCE_TERMINALS.contains(&c))
        .map(|position| absorb_run(chars, position + 1, STRICT_RUN))
}

fn find_relaxed_split(chars: &[char], mid: usize) -> Option<usize> {
    scan_outward(chars, mid, RELAXED_RADIUS, |c| RELAXED_CANDIDATES.contains(&c))
        .map(|position| absorb_run(chars, position + 1, RELAXED_RUN))
}
