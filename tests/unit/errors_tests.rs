/*!
 * Tests for error types
 */

use std::error::Error;
use std::io;
use subtext::errors::{AppError, DetectionError, SubtitleError, TextError};
use subtext::word_search::compile_user_pattern;

/// Test the messages of detection errors
#[test]
fn test_detectionErrorDisplay_shouldDescribeProblem() {
    assert_eq!(DetectionError::UnsupportedCodepage(437).to_string(), "Unsupported codepage: 437");
    let decode = DetectionError::Decode { encoding: "UTF-8".to_string() };
    assert_eq!(decode.to_string(), "Failed to decode buffer as UTF-8");
}

/// Test that I/O errors convert into detection errors
#[test]
fn test_detectionError_fromIo_shouldKeepSource() {
    let error: DetectionError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(error, DetectionError::Io(_)));
    assert!(error.to_string().contains("gone"));
}

/// Test that pattern errors expose the regex error as source
#[test]
fn test_textError_withInvalidPattern_shouldHaveSource() {
    let error = compile_user_pattern("(").unwrap_err();
    assert!(error.source().is_some());
    assert!(error.to_string().starts_with("Invalid search pattern '('"));
    assert!(TextError::EmptyPattern.source().is_none());
}

/// Test wrapping into the application error
#[test]
fn test_appError_fromComponentErrors_shouldWrap() {
    let app: AppError = SubtitleError::InvalidTimestamp("99:99".to_string()).into();
    assert_eq!(app.to_string(), "Subtitle error: Invalid timestamp: 99:99");

    let app: AppError = DetectionError::UnsupportedCodepage(1).into();
    assert!(matches!(app, AppError::Detection(_)));

    let app: AppError = io::Error::other("disk full").into();
    assert!(matches!(app, AppError::File(message) if message == "disk full"));

    let app: AppError = anyhow::anyhow!("boom").into();
    assert_eq!(app.to_string(), "Unknown error: boom");
}
