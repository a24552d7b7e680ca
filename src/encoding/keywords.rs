/*!
 * Keyword overrides for the ANSI codepage guess.
 *
 * Some codepages are hard to tell apart statistically but easy to recognize
 * from a few very common words. Each probe decodes the buffer with its
 * codepage and wins when more than `KEYWORD_THRESHOLD` marker words appear.
 * Probes are tried in table order and the first hit is final.
 */

use log::debug;

use super::codepage::encoding_for_codepage;
use crate::language::profiles::{ARABIC, GREEK, HEBREW, HEBREW_DOMINANCE};
use crate::word_search::{KeywordSet, keyword_set};

/// A probe needs strictly more hits than this
pub const KEYWORD_THRESHOLD: usize = 5;

pub static RUSSIAN_CODEPAGE_MARKERS: KeywordSet = keyword_set!("что", "быть", "весь", "этот", "один", "такой");

/// Second probe consulted once the first one matched
#[derive(Debug)]
pub struct Takeover {
    pub codepage: u16,
    pub language: &'static str,
    pub keywords: &'static KeywordSet,
    /// Required hit count, exclusive
    pub above: usize,
}

#[derive(Debug)]
pub struct CodepageProbe {
    pub codepage: u16,
    /// Language tag reported with the codepage
    pub language: &'static str,
    pub keywords: &'static KeywordSet,
    pub takeover: Option<Takeover>,
}

/// Override probes in priority order
pub static CODEPAGE_PROBES: &[CodepageProbe] = &[
    CodepageProbe { codepage: 1253, language: "el", keywords: &GREEK, takeover: None },
    CodepageProbe { codepage: 1251, language: "ru", keywords: &RUSSIAN_CODEPAGE_MARKERS, takeover: None },
    CodepageProbe { codepage: 28595, language: "ru", keywords: &RUSSIAN_CODEPAGE_MARKERS, takeover: None },
    // Arabic and Hebrew ISO codepages share byte values for their most common words
    CodepageProbe {
        codepage: 28596,
        language: "ar",
        keywords: &ARABIC,
        takeover: Some(Takeover { codepage: 28598, language: "he", keywords: &HEBREW_DOMINANCE, above: 10 }),
    },
    CodepageProbe { codepage: 28598, language: "he", keywords: &HEBREW, takeover: None },
];

/// Codepage and language tag of the first probe whose keywords are frequent
/// enough in `buffer`
pub fn keyword_override(buffer: &[u8]) -> Option<(u16, &'static str)> {
    for probe in CODEPAGE_PROBES {
        let hits = count_decoded(buffer, probe.codepage, probe.keywords);
        if hits <= KEYWORD_THRESHOLD {
            continue;
        }

        debug!("Keyword probe {} ({}) matched {} times", probe.codepage, probe.language, hits);
        if let Some(takeover) = &probe.takeover {
            if count_decoded(buffer, takeover.codepage, takeover.keywords) > takeover.above {
                return Some((takeover.codepage, takeover.language));
            }
        }
        return Some((probe.codepage, probe.language));
    }
    None
}

fn count_decoded(buffer: &[u8], codepage: u16, keywords: &KeywordSet) -> usize {
    match encoding_for_codepage(codepage) {
        Some(encoding) => keywords.count(&encoding.decode_without_bom_handling(buffer).0),
        None => 0,
    }
}
