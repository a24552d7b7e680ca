/*!
 * Tests for subtitle line breaking
 */

use subtext::line_breaker::{self, LineBreaker, auto_break_line, unbreak_line};

const LONG_SENTENCE: &str =
    "This is a test sentence that is long enough to need wrapping because it exceeds forty characters.";

/// Test that texts under the minimum length are returned unchanged
#[test]
fn test_autoBreakLine_withTextBelowMinimum_shouldReturnInput() {
    for text in ["", "a", "Hi!", "Ok.\n"] {
        assert_eq!(auto_break_line(text), text);
    }
}

/// Test that the long single sentence is split into two trimmed lines
#[test]
fn test_autoBreakLine_withLongSentence_shouldSplitIntoTwoTrimmedLines() {
    let result = auto_break_line(LONG_SENTENCE);

    let lines: Vec<&str> = result.split('\n').collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "This is a test sentence that is long enough to");
    assert_eq!(lines[1], "need wrapping because it exceeds forty characters.");
    for line in lines {
        assert_eq!(line, line.trim());
    }
}

/// Test that a sentence end near the middle wins over spaces
#[test]
fn test_autoBreakLine_withQuestion_shouldBreakAfterQuestionMark() {
    let result = auto_break_line("Are you coming? Yes, I am coming right now with you.");
    assert_eq!(result, "Are you coming?\nYes, I am coming right now with you.");

    let result = auto_break_line("Hello there, my friend. How are you?");
    assert_eq!(result, "Hello there, my friend.\nHow are you?");
}

/// Test that short text without sentence punctuation is joined onto one line
#[test]
fn test_autoBreakLine_withShortUnpunctuatedText_shouldFlatten() {
    assert_eq!(auto_break_line("He said\nhello"), "He said hello");
    assert_eq!(auto_break_line("Line one is here\r\nand line two follows"), "Line one is here and line two follows");
}

/// Test that decimal and thousands separators are never used as break points
#[test]
fn test_autoBreakLine_withNumbers_shouldNotBreakInsideNumbers() {
    let texts = [
        "The price rose from 3.50 to 4.75 dollars and nobody in town could afford it.",
        "It was 12,500 people, 3.5 million dollars, 1.000 more things to see today.",
    ];

    for text in texts {
        let result = auto_break_line(text);
        let (first, second) = result.split_once('\n').expect("text should be broken");
        let last = first.chars().last().unwrap();
        let next = second.chars().next().unwrap();
        assert!(
            !(last.is_ascii_digit() && next.is_ascii_digit()),
            "broke between digits: {:?}",
            result
        );
        assert!(!first.ends_with("3.") && !first.ends_with("12,"), "broke inside a number: {:?}", result);
    }

    assert_eq!(
        auto_break_line(texts[0]),
        "The price rose from 3.50 to 4.75 dollars\nand nobody in town could afford it."
    );
}

/// Test that markup survives breaking
#[test]
fn test_autoBreakLine_withItalics_shouldKeepTags() {
    let result = auto_break_line("<i>I told you already. We are leaving tonight.</i>");
    assert_eq!(result, "<i>I told you already.\nWe are leaving tonight.</i>");
}

/// Test that the configured separator is used for the break
#[test]
fn test_autoBreakLine_withCrLfSeparator_shouldUseIt() {
    let breaker = LineBreaker::new("\r\n");
    let result = breaker.auto_break_line("We are going home now, because it is late and we are tired.", 5);
    assert_eq!(result, "We are going home now, because\r\nit is late and we are tired.");
}

/// Test that a larger minimum length leaves the text alone
#[test]
fn test_autoBreakLine_withHighMinimum_shouldReturnInput() {
    let breaker = LineBreaker::default();
    let text = "Hi there. How are you doing today, my old friend?";
    assert_eq!(breaker.auto_break_line(text, 100), text);
}

/// Test that unbreaking removes every separator and doubled space
#[test]
fn test_unbreakLine_afterAutoBreak_shouldLeaveSingleLine() {
    let texts = [
        LONG_SENTENCE,
        "Are you coming? Yes, I am coming right now with you.",
        "Mom? Dad?  Where are you? I cannot find you anywhere here.",
        "abcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwxyzabcdefghij",
    ];

    for text in texts {
        let result = unbreak_line(&auto_break_line(text));
        assert!(!result.contains('\n'), "{:?}", result);
        assert!(!result.contains("  "), "{:?}", result);
    }
}

/// Test that unbreaking text without breaks returns it unchanged
#[test]
fn test_unbreakLine_withoutBreak_shouldReturnInput() {
    assert_eq!(unbreak_line("Already  one line"), "Already  one line");
}

/// Test that every break convention is joined
#[test]
fn test_unbreakLine_withMixedBreaks_shouldJoinAll() {
    let breaker = LineBreaker::new("<br />");
    assert_eq!(breaker.unbreak_line("one<br />two\r\nthree\nfour"), "one two three four");
    assert!(breaker.contains_break("a<br />b"));
    assert!(!breaker.contains_break("a b"));
}

/// Test that the longest line ignores markup
#[test]
fn test_maxLineLength_withTags_shouldIgnoreMarkup() {
    assert_eq!(line_breaker::max_line_length("<i>Hello</i>\nHi"), 5);
    assert_eq!(line_breaker::max_line_length(""), 0);
}
