/*!
 * Tests for whole-word search helpers
 */

use subtext::errors::TextError;
use subtext::word_search::{
    compile_keywords, compile_user_pattern, count_keywords, is_valid_regex, make_word_search_regex,
    make_word_search_regex_with_numbers,
};

/// Test that only whole words match
#[test]
fn test_makeWordSearchRegex_withEmbeddedWord_shouldNotMatch() {
    let regex = make_word_search_regex("are").unwrap();
    assert!(regex.is_match("you are here"));
    assert!(regex.is_match("are"));
    assert!(!regex.is_match("careful"));
    assert!(!regex.is_match("Are you"));
}

/// Test that whole-word matching works outside of ASCII
#[test]
fn test_makeWordSearchRegex_withCyrillicWord_shouldMatchWholeWord() {
    let regex = make_word_search_regex("это").unwrap();
    assert!(regex.is_match("что это?"));
    assert!(!regex.is_match("этот"));
}

/// Test the delimiter-based variant used next to digits
#[test]
fn test_makeWordSearchRegexWithNumbers_withDelimiters_shouldRequireBothSides() {
    let regex = make_word_search_regex_with_numbers("km").unwrap();
    assert!(regex.is_match("It is 5 km away."));
    assert!(regex.is_match("Only 3,km!"));
    assert!(!regex.is_match("km at the start"));
    assert!(!regex.is_match("it is 5km"));
}

/// Test pattern validation
#[test]
fn test_isValidRegex_withVariousPatterns_shouldValidate() {
    assert!(is_valid_regex(r"\d+"));
    assert!(is_valid_regex("hello|world"));
    assert!(!is_valid_regex(""));
    assert!(!is_valid_regex("(unclosed"));
}

/// Test that user patterns report why they were rejected
#[test]
fn test_compileUserPattern_withBadPatterns_shouldReturnTypedErrors() {
    assert!(matches!(compile_user_pattern(""), Err(TextError::EmptyPattern)));

    match compile_user_pattern("[a-") {
        Err(TextError::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "[a-"),
        other => panic!("expected InvalidPattern, got {:?}", other.map(|r| r.to_string())),
    }

    assert!(compile_user_pattern("colou?r").unwrap().is_match("color"));
}

/// Test counting an ad-hoc word list
#[test]
fn test_countKeywords_withRepeatedWords_shouldSumOccurrences() {
    let text = "the cat and the dog, then the end";
    assert_eq!(count_keywords(text, &["the", "dog"]).unwrap(), 4);
    assert_eq!(count_keywords(text, &[]).unwrap(), 0);
}

/// Test that keywords holding regex metacharacters compile as literals
#[test]
fn test_compileKeywords_withMetacharacters_shouldMatchLiterally() {
    let regexes = compile_keywords(&["a.b", "c+d", "htjeti "]);
    assert_eq!(regexes.len(), 3);
    assert!(regexes[0].is_match("x a.b y"));
    assert!(!regexes[0].is_match("x axb y"));
    assert!(regexes[1].is_match("c+d"));
}
