use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::encoding::{encoding_for_codepage, UTF8_SCAN_LIMIT};
use crate::file_utils::FileManager;
use crate::line_breaker::DEFAULT_MINIMUM_LENGTH;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Encoding detection settings
    #[serde(default)]
    pub encoding: EncodingConfig,

    /// Line breaking settings
    #[serde(default)]
    pub line_breaking: LineBreakConfig,

    /// Language detection settings
    #[serde(default)]
    pub language: LanguageConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Encoding detection configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EncodingConfig {
    // @field: Guess an ANSI codepage for files that are neither BOM-marked nor UTF-8
    #[serde(default = "default_true")]
    pub auto_guess_ansi_encoding: bool,

    // @field: Codepage used when nothing is detected
    #[serde(default = "default_codepage")]
    pub default_codepage: u16,

    // @field: Bytes read from the start of a file for detection
    #[serde(default = "default_utf8_scan_limit")]
    pub utf8_scan_limit: usize,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            auto_guess_ansi_encoding: true,
            default_codepage: default_codepage(),
            utf8_scan_limit: default_utf8_scan_limit(),
        }
    }
}

/// Line separator written between the two lines of a cue
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    // @returns: Separator string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

impl std::fmt::Display for LineEnding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lf => write!(f, "lf"),
            Self::CrLf => write!(f, "crlf"),
        }
    }
}

impl std::str::FromStr for LineEnding {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "lf" => Ok(Self::Lf),
            "crlf" => Ok(Self::CrLf),
            _ => Err(anyhow!("Invalid line ending: {}", s)),
        }
    }
}

/// Line breaking configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LineBreakConfig {
    /// Texts shorter than this are never broken
    #[serde(default = "default_minimum_length")]
    pub minimum_length: usize,

    /// Separator inserted by the line breaker
    #[serde(default)]
    pub line_ending: LineEnding,
}

impl Default for LineBreakConfig {
    fn default() -> Self {
        Self {
            minimum_length: default_minimum_length(),
            line_ending: LineEnding::default(),
        }
    }
}

/// Language detection configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LanguageConfig {
    /// Tag reported when no language is recognized
    #[serde(default = "default_fallback_language")]
    pub fallback_language: String,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            fallback_language: default_fallback_language(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_true() -> bool {
    true
}

fn default_codepage() -> u16 {
    1252 // Western European, the usual Windows ANSI default
}

fn default_utf8_scan_limit() -> usize {
    UTF8_SCAN_LIMIT
}

fn default_minimum_length() -> usize {
    DEFAULT_MINIMUM_LENGTH
}

fn default_fallback_language() -> String {
    "en".to_string()
}

impl Config {
    /// Load a configuration file and validate it
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let config: Config = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;

        FileManager::write_to_file(path, &config_json)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.encoding.utf8_scan_limit == 0 {
            return Err(anyhow!("encoding.utf8_scan_limit must be greater than zero"));
        }

        if encoding_for_codepage(self.encoding.default_codepage).is_none() {
            return Err(anyhow!(
                "encoding.default_codepage {} is not a supported codepage",
                self.encoding.default_codepage
            ));
        }

        if self.line_breaking.minimum_length == 0 {
            return Err(anyhow!("line_breaking.minimum_length must be greater than zero"));
        }

        // Validate fallback language
        crate::language_utils::validate_language_code(&self.language.fallback_language)
            .context("language.fallback_language is invalid")?;

        Ok(())
    }
}
