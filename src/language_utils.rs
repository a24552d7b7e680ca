use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// Detected languages and dictionaries carry tags such as `en`, `pt-PT` or
/// `da_DK`. This module validates them, reduces them to their ISO 639 part
/// and names them.
/// Language code type
#[derive(Debug, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

// ISO 639-2/B codes that differ from their 639-2/T counterpart
const BIBLIOGRAPHIC_CODES: &[(&str, &str)] = &[
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// Language part of a tag: `pt` for `pt-PT`, `da` for `da_DK`
pub fn primary_subtag(tag: &str) -> String {
    tag.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

fn part2b_to_part2t(code: &str) -> Option<&'static str> {
    BIBLIOGRAPHIC_CODES
        .iter()
        .find(|(part2b, _)| *part2b == code)
        .map(|(_, part2t)| *part2t)
}

/// Validate if a language tag starts with a valid ISO 639-1 or ISO 639-2 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let primary = primary_subtag(code);

    match primary.len() {
        2 if Language::from_639_1(&primary).is_some() => Ok(LanguageCodeType::Part1),
        3 if Language::from_639_3(&primary).is_some() => Ok(LanguageCodeType::Part2T),
        3 if part2b_to_part2t(&primary).is_some() => Ok(LanguageCodeType::Part2B),
        _ => Err(anyhow!("Invalid language code: {}", code)),
    }
}

fn to_language(code: &str) -> Result<Language> {
    let primary = primary_subtag(code);

    let language = match primary.len() {
        2 => Language::from_639_1(&primary),
        3 => Language::from_639_3(part2b_to_part2t(&primary).unwrap_or(&primary)),
        _ => None,
    };

    language.ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Normalize a language tag to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    Ok(to_language(code)?.to_639_3().to_string())
}

/// Normalize a language tag to ISO 639-1 (2-letter) format if possible
/// Falls back to ISO 639-2/T if no ISO 639-1 code exists
pub fn normalize_to_part1_or_part2t(code: &str) -> Result<String> {
    let language = to_language(code)?;
    Ok(language
        .to_639_1()
        .unwrap_or_else(|| language.to_639_3())
        .to_string())
}

/// Check if two language tags name the same language, ignoring regions
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (normalize_to_part2t(code1), normalize_to_part2t(code2)) {
        (Ok(normalized1), Ok(normalized2)) => normalized1 == normalized2,
        _ => false,
    }
}

/// Get the English language name from a tag
pub fn get_language_name(code: &str) -> Result<String> {
    Ok(to_language(code)?.to_name().to_string())
}

/// Get the name of the language in the language itself, when known
pub fn get_native_name(code: &str) -> Option<&'static str> {
    to_language(code).ok()?.to_autonym()
}
