/*!
 * Character encoding detection for subtitle files.
 *
 * Detection runs in a fixed order:
 * 1. Byte order mark
 * 2. UTF-8 well-formedness scan (files longer than `BOM_PROBE_LENGTH` bytes)
 * 3. ANSI codepage guess with keyword overrides, when enabled in the config
 *
 * Anything that cannot be decided ends up as `TextEncoding::Default`, the
 * configured default codepage, flagged with `DetectionMethod::Fallback`.
 */

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::anyhow;
use encoding_rs::Encoding;
use log::{debug, warn};

use crate::app_config::EncodingConfig;
use crate::errors::DetectionError;
use crate::file_utils::FileManager;

pub mod codepage;
pub mod keywords;
pub mod utf8;

pub use codepage::{codepage_for_encoding, encoding_for_codepage, guess_codepage};
pub use keywords::keyword_override;
pub use utf8::is_valid_utf8;

/// Bytes inspected for a byte order mark; shorter files skip the content scan
pub const BOM_PROBE_LENGTH: u64 = 12;

/// Default number of bytes read for the content scan
pub const UTF8_SCAN_LIMIT: usize = 100_000;

/// Encoding of a text buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
    /// A Windows codepage number
    Codepage(u16),
    /// The configured default codepage
    Default,
}

impl TextEncoding {
    /// Map a Windows codepage number, folding the Unicode ones into their
    /// dedicated variants
    pub fn from_codepage(codepage: u16) -> Self {
        match codepage {
            65001 => Self::Utf8,
            1200 => Self::Utf16Le,
            1201 => Self::Utf16Be,
            12000 => Self::Utf32Le,
            12001 => Self::Utf32Be,
            other => Self::Codepage(other),
        }
    }

    /// Windows codepage number, resolving `Default` through `default_codepage`
    pub fn codepage(&self, default_codepage: u16) -> u16 {
        match self {
            Self::Utf8 => 65001,
            Self::Utf16Le => 1200,
            Self::Utf16Be => 1201,
            Self::Utf32Le => 12000,
            Self::Utf32Be => 12001,
            Self::Codepage(codepage) => *codepage,
            Self::Default => default_codepage,
        }
    }

    /// Standard name of the encoding
    pub fn name(&self) -> String {
        match self {
            Self::Utf8 => "UTF-8".to_string(),
            Self::Utf16Le => "UTF-16LE".to_string(),
            Self::Utf16Be => "UTF-16BE".to_string(),
            Self::Utf32Le => "UTF-32LE".to_string(),
            Self::Utf32Be => "UTF-32BE".to_string(),
            Self::Codepage(codepage) => format!("cp{}", codepage),
            Self::Default => "default".to_string(),
        }
    }

    pub fn is_unicode(&self) -> bool {
        !matches!(self, Self::Codepage(_) | Self::Default)
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Codepage(codepage) => match encoding_for_codepage(*codepage) {
                Some(encoding) => write!(f, "cp{} ({})", codepage, encoding.name()),
                None => write!(f, "cp{}", codepage),
            },
            other => write!(f, "{}", other.name()),
        }
    }
}

impl FromStr for TextEncoding {
    type Err = anyhow::Error;

    /// Accepts `utf-8`, `utf-16le`, `default`, codepage numbers (`1251`,
    /// `cp1251`) and any WHATWG label (`windows-1251`, `koi8-r`)
    fn from_str(s: &str) -> anyhow::Result<Self> {
        let label = s.trim().to_lowercase();
        match label.as_str() {
            "utf-8" | "utf8" => return Ok(Self::Utf8),
            "utf-16le" | "utf-16" => return Ok(Self::Utf16Le),
            "utf-16be" => return Ok(Self::Utf16Be),
            "utf-32le" | "utf-32" => return Ok(Self::Utf32Le),
            "utf-32be" => return Ok(Self::Utf32Be),
            "default" => return Ok(Self::Default),
            _ => {}
        }

        let number = label.strip_prefix("cp").unwrap_or(&label);
        if let Ok(codepage) = number.parse::<u16>() {
            return match encoding_for_codepage(codepage) {
                Some(_) => Ok(Self::from_codepage(codepage)),
                None => Err(anyhow!("Unsupported codepage: {}", codepage)),
            };
        }

        Encoding::for_label(label.as_bytes())
            .and_then(codepage_for_encoding)
            .map(Self::from_codepage)
            .ok_or_else(|| anyhow!("Unknown encoding: {}", s))
    }
}

/// How an encoding was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionMethod {
    ByteOrderMark,
    Utf8Scan,
    AnsiHeuristic,
    KeywordOverride,
    /// Nothing was detected, the default applies
    Fallback,
}

/// Outcome of an encoding detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingResult {
    pub encoding: TextEncoding,
    /// Language tag implied by a keyword override
    pub language: Option<&'static str>,
    pub method: DetectionMethod,
}

impl EncodingResult {
    pub fn new(encoding: TextEncoding, method: DetectionMethod) -> Self {
        Self {
            encoding,
            language: None,
            method,
        }
    }

    pub fn fallback() -> Self {
        Self::new(TextEncoding::Default, DetectionMethod::Fallback)
    }

    pub fn is_fallback(&self) -> bool {
        self.method == DetectionMethod::Fallback
    }
}

impl fmt::Display for EncodingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{:?}]", self.encoding, self.method)?;
        if let Some(language) = self.language {
            write!(f, " language={}", language)?;
        }
        Ok(())
    }
}

/// Detect the encoding of a file. Never fails: unreadable files are logged
/// and reported as a fallback.
pub fn detect_file_encoding<P: AsRef<Path>>(path: P, config: &EncodingConfig) -> EncodingResult {
    let path = path.as_ref();
    match try_detect_file_encoding(path, config) {
        Ok(result) => result,
        Err(e) => {
            warn!("Encoding detection failed for {}: {}", path.display(), e);
            EncodingResult::fallback()
        }
    }
}

/// Detect the encoding of a file, reporting I/O errors
pub fn try_detect_file_encoding<P: AsRef<Path>>(
    path: P,
    config: &EncodingConfig,
) -> Result<EncodingResult, DetectionError> {
    let path = path.as_ref();
    let (buffer, file_len) = FileManager::read_prefix(path, config.utf8_scan_limit)?;
    let result = detect_bytes_encoding(&buffer, file_len, config);

    debug!("Encoding of {}: {}", path.display(), result);
    Ok(result)
}

/// Detect the encoding of `buffer`, the first bytes of a file of `file_len`
/// bytes
pub fn detect_bytes_encoding(buffer: &[u8], file_len: u64, config: &EncodingConfig) -> EncodingResult {
    if let Some(encoding) = detect_bom(buffer) {
        return EncodingResult::new(encoding, DetectionMethod::ByteOrderMark);
    }

    if file_len <= BOM_PROBE_LENGTH {
        return EncodingResult::fallback();
    }

    if is_valid_utf8(buffer) {
        EncodingResult::new(TextEncoding::Utf8, DetectionMethod::Utf8Scan)
    } else if config.auto_guess_ansi_encoding {
        detect_ansi_codepage(buffer)
    } else {
        EncodingResult::fallback()
    }
}

/// Encoding announced by a leading byte order mark.
///
/// `00 00 FE FF` is reported as `Utf32Be`, the byte order it actually
/// spells. Some older tools label that mark UTF-32LE.
pub fn detect_bom(buffer: &[u8]) -> Option<TextEncoding> {
    match buffer {
        [0xEF, 0xBB, 0xBF, ..] => Some(TextEncoding::Utf8),
        [0xFF, 0xFE, ..] => Some(TextEncoding::Utf16Le),
        [0xFE, 0xFF, ..] => Some(TextEncoding::Utf16Be),
        [0x00, 0x00, 0xFE, 0xFF, ..] => Some(TextEncoding::Utf32Be),
        _ => None,
    }
}

/// Guess the ANSI codepage of a buffer that is not UTF-8.
///
/// A keyword override beats the statistical guess.
pub fn detect_ansi_codepage(buffer: &[u8]) -> EncodingResult {
    if let Some((codepage, language)) = keyword_override(buffer) {
        return EncodingResult {
            encoding: TextEncoding::from_codepage(codepage),
            language: Some(language),
            method: DetectionMethod::KeywordOverride,
        };
    }

    match guess_codepage(buffer) {
        Some(codepage) => {
            EncodingResult::new(TextEncoding::from_codepage(codepage), DetectionMethod::AnsiHeuristic)
        }
        None => EncodingResult::fallback(),
    }
}

/// Decode `buffer`, failing on malformed input. A matching BOM is removed.
pub fn decode(buffer: &[u8], encoding: TextEncoding, default_codepage: u16) -> Result<String, DetectionError> {
    match encoding {
        TextEncoding::Utf32Le => decode_utf32(buffer, false, false),
        TextEncoding::Utf32Be => decode_utf32(buffer, true, false),
        other => {
            let decoder = decoder_for(other, default_codepage)?;
            let (text, had_errors) = decoder.decode_with_bom_removal(buffer);
            if had_errors {
                return Err(DetectionError::Decode {
                    encoding: other.name(),
                });
            }
            Ok(text.into_owned())
        }
    }
}

/// Decode `buffer`, replacing malformed sequences with U+FFFD
pub fn decode_lossy(buffer: &[u8], encoding: TextEncoding, default_codepage: u16) -> Result<String, DetectionError> {
    match encoding {
        TextEncoding::Utf32Le => decode_utf32(buffer, false, true),
        TextEncoding::Utf32Be => decode_utf32(buffer, true, true),
        other => {
            let decoder = decoder_for(other, default_codepage)?;
            Ok(decoder.decode_with_bom_removal(buffer).0.into_owned())
        }
    }
}

fn decoder_for(encoding: TextEncoding, default_codepage: u16) -> Result<&'static Encoding, DetectionError> {
    let codepage = encoding.codepage(default_codepage);
    encoding_for_codepage(codepage).ok_or(DetectionError::UnsupportedCodepage(codepage))
}

// encoding_rs has no UTF-32 decoder
fn decode_utf32(buffer: &[u8], big_endian: bool, lossy: bool) -> Result<String, DetectionError> {
    let bom: &[u8] = if big_endian { &[0x00, 0x00, 0xFE, 0xFF] } else { &[0xFF, 0xFE, 0x00, 0x00] };
    let body = buffer.strip_prefix(bom).unwrap_or(buffer);
    let name = (if big_endian { TextEncoding::Utf32Be } else { TextEncoding::Utf32Le }).name();

    let chunks = body.chunks_exact(4);
    let trailing = !chunks.remainder().is_empty();
    let mut text = String::with_capacity(body.len() / 4);

    for chunk in chunks {
        let bytes = [chunk[0], chunk[1], chunk[2], chunk[3]];
        let value = if big_endian { u32::from_be_bytes(bytes) } else { u32::from_le_bytes(bytes) };
        match char::from_u32(value) {
            Some(c) => text.push(c),
            None if lossy => text.push(char::REPLACEMENT_CHARACTER),
            None => return Err(DetectionError::Decode { encoding: name }),
        }
    }

    if trailing {
        if !lossy {
            return Err(DetectionError::Decode { encoding: name });
        }
        text.push(char::REPLACEMENT_CHARACTER);
    }

    Ok(text)
}
