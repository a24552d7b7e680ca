/*!
 * Keyword profiles for spoken-language detection.
 *
 * Each profile lists six marker words. A profile matches when its marker
 * count exceeds the significance threshold and all of its rules hold. The
 * order of `SPOKEN_PROFILES` is the detection priority.
 *
 * The rule thresholds were tuned against real subtitle files and are kept
 * as they are.
 */

use crate::word_search::{KeywordSet, keyword_set};

/// Secondary condition evaluated after a profile's own count passes
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// The confusable language's markers must stay below `below`
    Exclude {
        set: &'static KeywordSet,
        below: usize,
    },
    /// These markers must appear more than `above` times
    Require {
        set: &'static KeywordSet,
        above: usize,
    },
    /// Report `tag` instead when these markers appear more than `above` times
    Redirect {
        set: &'static KeywordSet,
        above: usize,
        tag: &'static str,
    },
}

#[derive(Debug)]
pub struct LanguageProfile {
    /// Language tag reported on a match
    pub tag: &'static str,
    pub keywords: &'static KeywordSet,
    pub rules: &'static [Rule],
}

pub static ENGLISH: KeywordSet = keyword_set!("we", "are", "and", "you", "your", "what");
pub static DANISH_NORWEGIAN: KeywordSet = keyword_set!("vi", "er", "og", "jeg", "var", "men");
pub static NORWEGIAN_MARKERS: KeywordSet = keyword_set!("ut", "deg", "meg", "merkelig", "mye", "spørre");
pub static DANISH_MARKERS: KeywordSet = keyword_set!("siger", "dig", "mig", "mærkelig", "meget", "spørge");
pub static SWEDISH: KeywordSet = keyword_set!("vi", "är", "och", "Jag", "inte", "för");
pub static SPANISH: KeywordSet = keyword_set!("el", "bien", "Vamos", "Hola", "casa", "con");
pub static SPANISH_MARKERS: KeywordSet = keyword_set!("Hola", "nada", "Vamos", "pasa", "los", "como");
pub static FRENCH: KeywordSet = keyword_set!("un", "vous", "avec", "pas", "ce", "une");
pub static FRENCH_MARKERS: KeywordSet = keyword_set!("Cest", "cest", "pas", "vous", "pour", "suis");
pub static GERMAN: KeywordSet = keyword_set!("und", "auch", "sich", "bin", "hast", "möchte");
pub static DUTCH: KeywordSet = keyword_set!("van", "het", "een", "Het", "mij", "zijn");
pub static POLISH: KeywordSet = keyword_set!("Czy", "ale", "ty", "siê", "jest", "mnie");
pub static ITALIAN: KeywordSet = keyword_set!("Cosa", "sono", "Grazie", "Buongiorno", "bene", "questo");
pub static PORTUGUESE: KeywordSet = keyword_set!("não", "Não", "Estás", "Então", "isso", "com");
pub static GREEK: KeywordSet = keyword_set!("μου", "είναι", "Είναι", "αυτό", "Τόμπυ", "καλά");
pub static RUSSIAN: KeywordSet = keyword_set!("все", "это", "как", "Воробей", "сюда", "Давай");
pub static CROATIAN: KeywordSet = keyword_set!("sam", "öto", "äto", "ovo", "vas", "što");
pub static CROATIAN_MARKERS: KeywordSet =
    keyword_set!("htjeti ", "htjeti ", "htjeti ", "htjeti ", "htjeti ", "htjeti ");
pub static ARABIC: KeywordSet = keyword_set!("من", "هل", "لا", "فى", "لقد", "ما");
pub static HEBREW: KeywordSet = keyword_set!("אתה", "אולי", "הוא", "בסדר", "יודע", "טוב");
pub static HEBREW_DOMINANCE: KeywordSet = keyword_set!("אולי", "אולי", "אולי", "אולי", "טוב", "טוב");
pub static SERBIAN: KeywordSet = keyword_set!("sam", "što", "nije", "Šta", "ovde", "za");
pub static VIETNAMESE: KeywordSet = keyword_set!("không", "tôi", "anh", "đó", "Tôi", "ông");
pub static ROMANIAN: KeywordSet = keyword_set!("sunt", "fost", "Bine", "Haide", "Trebuie", "trebuie");

pub static ENGLISH_PROFILE: LanguageProfile = LanguageProfile { tag: "en", keywords: &ENGLISH, rules: &[] };
pub static DANISH_PROFILE: LanguageProfile = LanguageProfile {
    tag: "da",
    keywords: &DANISH_NORWEGIAN,
    rules: &[Rule::Exclude { set: &NORWEGIAN_MARKERS, below: 2 }],
};
pub static NORWEGIAN_PROFILE: LanguageProfile = LanguageProfile {
    tag: "no",
    keywords: &DANISH_NORWEGIAN,
    rules: &[Rule::Exclude { set: &DANISH_MARKERS, below: 2 }],
};
pub static SWEDISH_PROFILE: LanguageProfile = LanguageProfile { tag: "sv", keywords: &SWEDISH, rules: &[] };
pub static SPANISH_PROFILE: LanguageProfile = LanguageProfile {
    tag: "es",
    keywords: &SPANISH,
    rules: &[Rule::Exclude { set: &FRENCH_MARKERS, below: 2 }],
};
pub static FRENCH_PROFILE: LanguageProfile = LanguageProfile {
    tag: "fr",
    keywords: &FRENCH,
    rules: &[
        Rule::Exclude { set: &SPANISH_MARKERS, below: 2 },
        Rule::Exclude { set: &ITALIAN, below: 2 },
    ],
};
pub static GERMAN_PROFILE: LanguageProfile = LanguageProfile { tag: "de", keywords: &GERMAN, rules: &[] };
pub static DUTCH_PROFILE: LanguageProfile = LanguageProfile { tag: "nl", keywords: &DUTCH, rules: &[] };
pub static POLISH_PROFILE: LanguageProfile = LanguageProfile { tag: "pl", keywords: &POLISH, rules: &[] };
pub static ITALIAN_PROFILE: LanguageProfile = LanguageProfile {
    tag: "it",
    keywords: &ITALIAN,
    rules: &[
        Rule::Exclude { set: &FRENCH_MARKERS, below: 2 },
        Rule::Exclude { set: &SPANISH_MARKERS, below: 2 },
    ],
};
pub static PORTUGUESE_PROFILE: LanguageProfile = LanguageProfile { tag: "pt-PT", keywords: &PORTUGUESE, rules: &[] };
pub static GREEK_PROFILE: LanguageProfile = LanguageProfile { tag: "el", keywords: &GREEK, rules: &[] };
pub static RUSSIAN_PROFILE: LanguageProfile = LanguageProfile { tag: "ru", keywords: &RUSSIAN, rules: &[] };
pub static CROATIAN_PROFILE: LanguageProfile = LanguageProfile {
    tag: "hr",
    keywords: &CROATIAN,
    rules: &[Rule::Require { set: &CROATIAN_MARKERS, above: 0 }],
};
pub static ARABIC_PROFILE: LanguageProfile = LanguageProfile {
    tag: "ar",
    keywords: &ARABIC,
    rules: &[Rule::Redirect { set: &HEBREW_DOMINANCE, above: 10, tag: "he" }],
};
pub static HEBREW_PROFILE: LanguageProfile = LanguageProfile { tag: "he", keywords: &HEBREW, rules: &[] };
pub static SERBIAN_PROFILE: LanguageProfile = LanguageProfile { tag: "sr", keywords: &SERBIAN, rules: &[] };
pub static VIETNAMESE_PROFILE: LanguageProfile = LanguageProfile { tag: "vi", keywords: &VIETNAMESE, rules: &[] };
pub static ROMANIAN_PROFILE: LanguageProfile = LanguageProfile { tag: "ro", keywords: &ROMANIAN, rules: &[] };

/// Detection order for spoken-language guessing
pub static SPOKEN_PROFILES: &[&LanguageProfile] = &[
    &ENGLISH_PROFILE,
    &DANISH_PROFILE,
    &NORWEGIAN_PROFILE,
    &SWEDISH_PROFILE,
    &SPANISH_PROFILE,
    &FRENCH_PROFILE,
    &GERMAN_PROFILE,
    &DUTCH_PROFILE,
    &POLISH_PROFILE,
    &ITALIAN_PROFILE,
    &PORTUGUESE_PROFILE,
    &GREEK_PROFILE,
    &RUSSIAN_PROFILE,
    &CROATIAN_PROFILE,
    &ARABIC_PROFILE,
    &HEBREW_PROFILE,
    &SERBIAN_PROFILE,
    &VIETNAMESE_PROFILE,
];

/// Spell-check dictionary codes and the profile that recognizes them
pub static DICTIONARY_PROFILES: &[(&str, &LanguageProfile)] = &[
    ("da_DK", &DANISH_PROFILE),
    ("nb_NO", &NORWEGIAN_PROFILE),
    ("en_US", &ENGLISH_PROFILE),
    ("sv_SE", &SWEDISH_PROFILE),
    ("es_ES", &SPANISH_PROFILE),
    ("fr_FR", &FRENCH_PROFILE),
    ("it_IT", &ITALIAN_PROFILE),
    ("de_DE", &GERMAN_PROFILE),
    ("nl_NL", &DUTCH_PROFILE),
    ("pl_PL", &POLISH_PROFILE),
    ("el_GR", &GREEK_PROFILE),
    ("ru_RU", &RUSSIAN_PROFILE),
    ("ro_RO", &ROMANIAN_PROFILE),
    ("hr_HR", &CROATIAN_PROFILE),
    ("pt_PT", &PORTUGUESE_PROFILE),
    ("pt_BR", &PORTUGUESE_PROFILE),
];

/// Look up a spoken-language profile by tag
pub fn profile_for_tag(tag: &str) -> Option<&'static LanguageProfile> {
    SPOKEN_PROFILES
        .iter()
        .copied()
        .chain(std::iter::once(&ROMANIAN_PROFILE))
        .find(|profile| profile.tag == tag)
}
