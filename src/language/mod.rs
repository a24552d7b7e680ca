/*!
 * Spoken-language guessing for subtitle text.
 *
 * The guess is a keyword frequency heuristic: each language profile counts a
 * handful of very common words and the first profile (in priority order) that
 * is frequent enough wins. Results are a best guess and should always be
 * overridable by the user.
 */

use log::debug;

pub mod profiles;

pub use profiles::{LanguageProfile, Rule, DICTIONARY_PROFILES, SPOKEN_PROFILES};

/// One keyword hit is expected per this many cues for a language to count
pub const PARAGRAPHS_PER_HIT: usize = 14;

/// Return the first language whose keyword count exceeds `best_count`
pub fn detect_language_with_threshold(text: &str, best_count: usize) -> Option<&'static str> {
    let detected = SPOKEN_PROFILES
        .iter()
        .find_map(|profile| evaluate_profile(profile, text, best_count, true));

    debug!("Language keyword scan (threshold {}): {:?}", best_count, detected);
    detected
}

/// Guess the language of `text` made of `paragraph_count` cues
pub fn guess_spoken_language(text: &str, paragraph_count: usize) -> Option<&'static str> {
    detect_language_with_threshold(text, paragraph_count / PARAGRAPHS_PER_HIT)
}

/// Pick the spell-check dictionary matching `text`.
///
/// `dictionaries` holds installed dictionary names, either bare codes
/// (`en_US`) or display names ending with the code in brackets
/// (`English (United States) [en_US]`). Every dictionary whose language
/// matches overrides the previous answer, so the last match wins. Returns
/// `current` when nothing matches.
pub fn detect_dictionary_language<S: AsRef<str>>(
    text: &str,
    paragraph_count: usize,
    dictionaries: &[S],
    current: &str,
) -> String {
    let best_count = paragraph_count / PARAGRAPHS_PER_HIT;
    let mut language = current.to_string();

    for name in dictionaries {
        let code = dictionary_code(name.as_ref());
        let Some((_, profile)) = DICTIONARY_PROFILES.iter().find(|(known, _)| *known == code) else {
            continue;
        };
        if evaluate_profile(profile, text, best_count, false).is_some() {
            language = code.to_string();
        }
    }

    language
}

/// Extract `xx_YY` from `Name [xx_YY]`, or return the input unchanged
pub fn dictionary_code(name: &str) -> &str {
    match (name.find('['), name.find(']')) {
        (Some(start), Some(end)) if start > 0 && end > start => &name[start + 1..end],
        _ => name.trim(),
    }
}

// Dictionary matching only applies the confusable exclusions
fn evaluate_profile(
    profile: &LanguageProfile,
    text: &str,
    best_count: usize,
    apply_all_rules: bool,
) -> Option<&'static str> {
    if profile.keywords.count(text) <= best_count {
        return None;
    }

    let mut tag = profile.tag;
    for rule in profile.rules {
        match *rule {
            Rule::Exclude { set, below } => {
                if set.count(text) >= below {
                    return None;
                }
            }
            Rule::Require { set, above } => {
                if apply_all_rules && set.count(text) <= above {
                    return None;
                }
            }
            Rule::Redirect { set, above, tag: redirect } => {
                if apply_all_rules && set.count(text) > above {
                    tag = redirect;
                }
            }
        }
    }
    Some(tag)
}
