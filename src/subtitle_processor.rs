use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use regex::Regex;
use once_cell::sync::Lazy;
use anyhow::{Result, Context};
use std::path::{Path, PathBuf};
use log::{debug, info, warn};

use crate::app_config::Config;
use crate::encoding::EncodingResult;
use crate::errors::SubtitleError;
use crate::file_utils::FileManager;
use crate::language;
use crate::line_breaker::{self, LineBreaker};

// @module: Subtitle parsing, writing and cue-level text processing

// @const: SRT timing line, comma or dot before the milliseconds
static TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2}:\d{2}:\d{2}[,.]\d{1,3})\s*-->\s*(\d{1,2}:\d{2}:\d{2}[,.]\d{1,3})").unwrap()
});

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEntry {
    // @field: Sequence number
    pub seq_num: usize,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: Subtitle text
    pub text: String,
}

impl SubtitleEntry {
    pub fn new(seq_num: usize, start_time_ms: u64, end_time_ms: u64, text: String) -> Self {
        SubtitleEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text,
        }
    }

    // @creates: Validated subtitle entry
    // @validates: Time range and non-empty text
    pub fn new_validated(seq_num: usize, start_time_ms: u64, end_time_ms: u64, text: &str) -> Result<Self> {
        if end_time_ms <= start_time_ms {
            return Err(anyhow::anyhow!(
                "Invalid time range: end time {} <= start time {}",
                end_time_ms, start_time_ms
            ));
        }

        let trimmed_text = text.trim();
        if trimmed_text.is_empty() {
            return Err(anyhow::anyhow!("Empty subtitle text for entry {}", seq_num));
        }

        Ok(Self::new(seq_num, start_time_ms, end_time_ms, trimmed_text.to_string()))
    }

    /// Parse an SRT timestamp (`HH:MM:SS,mmm`, dot accepted) to milliseconds
    pub fn parse_timestamp(timestamp: &str) -> Result<u64, SubtitleError> {
        let invalid = || SubtitleError::InvalidTimestamp(timestamp.to_string());

        let parts: Vec<&str> = timestamp.trim().split([':', ',', '.']).collect();
        let [hours, minutes, seconds, millis] = parts.as_slice() else {
            return Err(invalid());
        };

        let hours: u64 = hours.parse().map_err(|_| invalid())?;
        let minutes: u64 = minutes.parse().map_err(|_| invalid())?;
        let seconds: u64 = seconds.parse().map_err(|_| invalid())?;
        // "5" after the comma means 500 ms
        let millis: u64 = format!("{:0<3}", millis).parse().map_err(|_| invalid())?;

        if minutes >= 60 || seconds >= 60 || millis >= 1000 {
            return Err(invalid());
        }

        Ok(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }

    pub fn duration_ms(&self) -> u64 {
        self.end_time_ms.saturating_sub(self.start_time_ms)
    }

    /// Whether the cue is shown for less time than its text needs
    pub fn is_shown_too_briefly(&self) -> bool {
        self.duration_ms() < line_breaker::display_duration_ms(&self.text)
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(
            f,
            "{} --> {}",
            Self::format_timestamp(self.start_time_ms),
            Self::format_timestamp(self.end_time_ms)
        )?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Collection of subtitle entries with metadata
#[derive(Debug)]
pub struct SubtitleCollection {
    /// Source filename
    pub source_file: PathBuf,

    /// List of subtitle entries
    pub entries: Vec<SubtitleEntry>,

    /// Encoding the source file was read with
    pub encoding: Option<EncodingResult>,
}

impl SubtitleCollection {
    /// Create an empty subtitle collection
    pub fn new(source_file: PathBuf) -> Self {
        SubtitleCollection {
            source_file,
            entries: Vec::new(),
            encoding: None,
        }
    }

    /// Load an SRT file in whatever encoding it was saved with
    pub fn load<P: AsRef<Path>>(path: P, config: &Config) -> Result<Self> {
        let path = path.as_ref();
        let (content, encoding) = FileManager::read_text_file(path, config)?;

        let entries = Self::parse_srt_string(&content)
            .with_context(|| format!("Failed to parse subtitle file: {:?}", path))?;
        info!("Loaded {} cues from {:?} ({})", entries.len(), path, encoding);

        Ok(SubtitleCollection {
            source_file: path.to_path_buf(),
            entries,
            encoding: Some(encoding),
        })
    }

    /// Write subtitles to an SRT file
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            FileManager::ensure_dir(parent)?;
        }

        let file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);

        for entry in &self.entries {
            write!(writer, "{}", entry)?;
        }
        writer.flush()
            .with_context(|| format!("Failed to write subtitle file: {}", path.display()))?;

        Ok(())
    }

    /// Parse SRT format string into subtitle entries.
    ///
    /// Malformed cues are skipped with a warning. The result is sorted by
    /// start time and renumbered from 1.
    pub fn parse_srt_string(content: &str) -> Result<Vec<SubtitleEntry>> {
        let content = content.trim_start_matches('\u{FEFF}');
        let mut entries = Vec::new();
        let mut block: Vec<&str> = Vec::new();

        for line in content.lines().chain(std::iter::once("")) {
            if !line.trim().is_empty() {
                block.push(line.trim_end());
                continue;
            }
            if block.is_empty() {
                continue;
            }

            match Self::parse_block(&block) {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!("Skipping subtitle block starting with {:?}: {}", block[0], e),
            }
            block.clear();
        }

        if entries.is_empty() {
            return Err(SubtitleError::NoEntries("SRT content".to_string()).into());
        }

        entries.sort_by_key(|entry| entry.start_time_ms);

        let overlap_count = entries
            .windows(2)
            .filter(|pair| pair[0].end_time_ms > pair[1].start_time_ms)
            .count();
        if overlap_count > 0 {
            warn!("Found {} overlapping subtitle entries", overlap_count);
        }

        for (i, entry) in entries.iter_mut().enumerate() {
            entry.seq_num = i + 1;
        }

        Ok(entries)
    }

    // One blank-line separated block: optional number, timing line, text
    fn parse_block(block: &[&str]) -> Result<SubtitleEntry> {
        let (seq_num, rest) = match block[0].trim().parse::<usize>() {
            Ok(num) => (num, &block[1..]),
            Err(_) => (0, block),
        };

        let (timing, text_lines) = rest
            .split_first()
            .ok_or_else(|| anyhow::anyhow!("missing timing line"))?;
        let caps = TIMING_REGEX
            .captures(timing.trim())
            .ok_or_else(|| anyhow::anyhow!("invalid timing line {:?}", timing))?;

        let start_ms = SubtitleEntry::parse_timestamp(&caps[1])?;
        let end_ms = SubtitleEntry::parse_timestamp(&caps[2])?;

        SubtitleEntry::new_validated(seq_num, start_ms, end_ms, &text_lines.join("\n"))
    }

    /// Break every cue that needs it; returns how many cues changed
    pub fn auto_break_lines(&mut self, breaker: &LineBreaker, minimum_length: usize) -> usize {
        self.apply_to_texts(|text| breaker.auto_break_line(text, minimum_length))
    }

    /// Join the lines of every cue; returns how many cues changed
    pub fn unbreak_lines(&mut self, breaker: &LineBreaker) -> usize {
        self.apply_to_texts(|text| breaker.unbreak_line(text))
    }

    fn apply_to_texts(&mut self, transform: impl Fn(&str) -> String) -> usize {
        let mut changed = 0;
        for entry in &mut self.entries {
            let updated = transform(&entry.text);
            if updated != entry.text {
                entry.text = updated;
                changed += 1;
            }
        }
        debug!("{} of {} cues changed", changed, self.entries.len());
        changed
    }

    /// All cue texts, one cue per line
    pub fn concatenated_text(&self) -> String {
        self.entries
            .iter()
            .map(|entry| entry.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Guess the spoken language of the cues, or `fallback`
    pub fn detect_language(&self, fallback: &str) -> String {
        language::guess_spoken_language(&self.concatenated_text(), self.entries.len())
            .unwrap_or(fallback)
            .to_string()
    }

    /// Pick the installed spell-check dictionary matching the cues
    pub fn detect_dictionary_language<S: AsRef<str>>(&self, dictionaries: &[S], current: &str) -> String {
        language::detect_dictionary_language(&self.concatenated_text(), self.entries.len(), dictionaries, current)
    }

    /// Cues displayed for less time than their text length calls for
    pub fn entries_shown_too_briefly(&self) -> Vec<&SubtitleEntry> {
        self.entries.iter().filter(|entry| entry.is_shown_too_briefly()).collect()
    }

    /// Longest line over all cues, markup excluded
    pub fn max_line_length(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| line_breaker::max_line_length(&entry.text))
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Collection")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        if let Some(encoding) = &self.encoding {
            writeln!(f, "Encoding: {}", encoding)?;
        }
        writeln!(f, "Entries: {}", self.entries.len())?;
        Ok(())
    }
}
