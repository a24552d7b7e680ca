/*!
 * Tests for subtitle parsing, writing and cue processing
 */

use anyhow::Result;
use std::path::PathBuf;
use subtext::app_config::Config;
use subtext::encoding::{DetectionMethod, TextEncoding};
use subtext::line_breaker::LineBreaker;
use subtext::subtitle_processor::{SubtitleCollection, SubtitleEntry};
use crate::common;

fn collection_from(content: &str) -> Result<SubtitleCollection> {
    let mut collection = SubtitleCollection::new(PathBuf::from("test.srt"));
    collection.entries = SubtitleCollection::parse_srt_string(content)?;
    Ok(collection)
}

/// Test parsing the sample file
#[test]
fn test_parseSrtString_withValidContent_shouldParseAllEntries() -> Result<()> {
    let entries = SubtitleCollection::parse_srt_string(common::ENGLISH_SRT)?;

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].seq_num, 1);
    assert_eq!(entries[0].start_time_ms, 1_000);
    assert_eq!(entries[0].end_time_ms, 4_000);
    assert_eq!(entries[1].text, "What are you doing with your life?");
    Ok(())
}

/// Test that multi-line cues keep their line break
#[test]
fn test_parseSrtString_withMultiLineCue_shouldJoinWithNewline() -> Result<()> {
    let content = "1\r\n00:00:01,000 --> 00:00:02,000\r\nFirst line\r\nSecond line\r\n\r\n";
    let entries = SubtitleCollection::parse_srt_string(content)?;

    assert_eq!(entries[0].text, "First line\nSecond line");
    Ok(())
}

/// Test that broken blocks are skipped and the rest is sorted and renumbered
#[test]
fn test_parseSrtString_withBadAndUnsortedBlocks_shouldSkipAndRenumber() -> Result<()> {
    common::init_test_logging();
    let content = "\u{FEFF}7\n00:00:05,000 --> 00:00:06,000\nLater\n\n\
                   8\nnot a timing line\nBroken\n\n\
                   9\n00:00:01,000 --> 00:00:02,000\nEarlier\n\n\
                   10\n00:00:03,000 --> 00:00:02,000\nBackwards\n";
    let entries = SubtitleCollection::parse_srt_string(content)?;

    let texts: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, ["Earlier", "Later"]);
    assert_eq!(entries[0].seq_num, 1);
    assert_eq!(entries[1].seq_num, 2);
    Ok(())
}

/// Test that content without any cue is an error
#[test]
fn test_parseSrtString_withNoCues_shouldFail() {
    assert!(SubtitleCollection::parse_srt_string("").is_err());
    assert!(SubtitleCollection::parse_srt_string("just some text\nwith no timing").is_err());
}

/// Test timestamp formatting
#[test]
fn test_formatTimestamp_withVariousValues_shouldPadFields() {
    assert_eq!(SubtitleEntry::format_timestamp(0), "00:00:00,000");
    assert_eq!(SubtitleEntry::format_timestamp(3_723_004), "01:02:03,004");
}

/// Test that invalid entries are rejected
#[test]
fn test_newValidated_withBadInput_shouldFail() {
    assert!(SubtitleEntry::new_validated(1, 2_000, 1_000, "text").is_err());
    assert!(SubtitleEntry::new_validated(1, 1_000, 2_000, "   ").is_err());
    assert_eq!(SubtitleEntry::new_validated(1, 1_000, 2_000, " ok ").unwrap().text, "ok");
}

/// Test the display time check
#[test]
fn test_isShownTooBriefly_withShortDuration_shouldFlagEntry() -> Result<()> {
    let mut collection = collection_from(common::ENGLISH_SRT)?;
    collection.entries[1].end_time_ms = collection.entries[1].start_time_ms + 500;

    let flagged = collection.entries_shown_too_briefly();
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].seq_num, 2);
    Ok(())
}

/// Test breaking every cue of a collection
#[test]
fn test_autoBreakLines_withLongCues_shouldCountChanges() -> Result<()> {
    let mut collection = collection_from(common::ENGLISH_SRT)?;

    let changed = collection.auto_break_lines(&LineBreaker::default(), 5);

    // The 34 character question stays on one line
    assert_eq!(changed, 2);
    assert_eq!(collection.entries[0].text, "We are going to the house\nand you are with us today.");
    assert_eq!(collection.entries[1].text, "What are you doing with your life?");
    assert_eq!(collection.max_line_length(), 34);
    Ok(())
}

/// Test that unbreaking after breaking restores single-line cues
#[test]
fn test_unbreakLines_afterBreak_shouldRestoreText() -> Result<()> {
    let mut collection = collection_from(common::ENGLISH_SRT)?;
    let original: Vec<String> = collection.entries.iter().map(|e| e.text.clone()).collect();

    let breaker = LineBreaker::default();
    collection.auto_break_lines(&breaker, 5);
    let changed = collection.unbreak_lines(&breaker);

    assert_eq!(changed, 2);
    let restored: Vec<String> = collection.entries.iter().map(|e| e.text.clone()).collect();
    assert_eq!(restored, original);
    Ok(())
}

/// Test language detection on the collection
#[test]
fn test_detectLanguage_withEnglishCues_shouldReturnEn() -> Result<()> {
    let collection = collection_from(common::ENGLISH_SRT)?;
    assert_eq!(collection.detect_language("xx"), "en");
    assert_eq!(collection.detect_dictionary_language(&["de_DE", "en_US"], "de_DE"), "en_US");
    Ok(())
}

/// Test loading a file written in a legacy codepage
#[test]
fn test_load_withCyrillicCodepage_shouldDecodeText() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = "1\r\n00:00:01,000 --> 00:00:03,000\r\nПривет, мой друг. Как дела?\r\n\r\n\
                   2\r\n00:00:04,000 --> 00:00:06,000\r\nЯ думал о тебе весь день.\r\n";
    let path = common::create_test_bytes(
        temp_dir.path(),
        "cyrillic.srt",
        &common::encode_with_codepage(content, 1251),
    )?;

    let collection = SubtitleCollection::load(&path, &Config::default())?;

    assert_eq!(collection.entries.len(), 2);
    assert_eq!(collection.entries[0].text, "Привет, мой друг. Как дела?");
    let encoding = collection.encoding.expect("encoding is recorded");
    assert_eq!(encoding.encoding, TextEncoding::Codepage(1251));
    assert_eq!(encoding.method, DetectionMethod::AnsiHeuristic);
    Ok(())
}

/// Test that writing and loading gives the same cues back
#[test]
fn test_writeToSrt_withCollection_shouldLoadBackSameEntries() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let collection = collection_from(common::ENGLISH_SRT)?;
    let path = temp_dir.path().join("nested").join("out.srt");

    collection.write_to_srt(&path)?;
    let loaded = SubtitleCollection::load(&path, &Config::default())?;

    assert_eq!(loaded.entries, collection.entries);
    Ok(())
}
