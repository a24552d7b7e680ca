/*!
 * Error types for the subtext library.
 *
 * Detection heuristics degrade to defaults instead of failing, so the
 * detection error type is only surfaced by the `try_*` entry points. Pattern
 * misuse is a caller bug and is always reported.
 */

use thiserror::Error;

/// Errors that can occur while probing or decoding a byte buffer
#[derive(Error, Debug)]
pub enum DetectionError {
    /// The file could not be opened or read
    #[error("I/O error while probing encoding: {0}")]
    Io(#[from] std::io::Error),

    /// The codepage has no decoder available
    #[error("Unsupported codepage: {0}")]
    UnsupportedCodepage(u16),

    /// The buffer is not valid in the chosen encoding
    #[error("Failed to decode buffer as {encoding}")]
    Decode {
        /// Name of the encoding that was attempted
        encoding: String,
    },
}

/// Errors raised by text helpers when the caller passes bad input
#[derive(Error, Debug)]
pub enum TextError {
    /// A search pattern failed to compile
    #[error("Invalid search pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Compiler error from the regex engine
        #[source]
        source: regex::Error,
    },

    /// An empty pattern was supplied
    #[error("Search pattern is empty")]
    EmptyPattern,
}

/// Errors that can occur during subtitle processing
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// The content held no usable cue
    #[error("No valid subtitle entries found in {0}")]
    NoEntries(String),

    /// A timestamp could not be parsed
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from encoding detection or decoding
    #[error("Detection error: {0}")]
    Detection(#[from] DetectionError),

    /// Error from a text helper
    #[error("Text error: {0}")]
    Text(#[from] TextError),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
