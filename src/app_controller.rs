use anyhow::{Result, Context, anyhow};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::encoding::{self, EncodingResult};
use crate::file_utils::FileManager;
use crate::language;
use crate::line_breaker::LineBreaker;
use crate::subtitle_processor::SubtitleCollection;

// @module: Application controller for subtitle text processing

/// What a reflow does to every cue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflowMode {
    /// Balance each cue over two lines
    Break,
    /// Join each cue onto one line
    Unbreak,
}

/// Detection outcome for one file
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub encoding: EncodingResult,
    /// Spoken language guessed from the decoded text
    pub language: Option<String>,
}

/// Outcome of a reflow run
#[derive(Debug, Clone)]
pub struct ReflowReport {
    pub output_path: PathBuf,
    pub cue_count: usize,
    pub changed_count: usize,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Invalid configuration")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // @creates: Line breaker using the configured line ending
    pub fn line_breaker(&self) -> LineBreaker {
        LineBreaker::new(self.config.line_breaking.line_ending.as_str())
    }

    /// Detect encoding and spoken language of a single file
    pub fn detect_file<P: AsRef<Path>>(&self, path: P) -> Result<FileReport> {
        let path = path.as_ref();
        if !FileManager::file_exists(path) {
            return Err(anyhow!("File does not exist: {:?}", path));
        }

        let encoding = encoding::detect_file_encoding(path, &self.config.encoding);
        let language = match self.guess_file_language(path) {
            Ok(language) => language,
            Err(e) => {
                warn!("Could not guess the language of {:?}: {}", path, e);
                None
            }
        };

        Ok(FileReport {
            path: path.to_path_buf(),
            encoding,
            language,
        })
    }

    /// Detect a file, or every subtitle file below a directory
    pub fn detect_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<FileReport>> {
        let path = path.as_ref();
        if FileManager::dir_exists(path) {
            self.detect_folder(path)
        } else {
            Ok(vec![self.detect_file(path)?])
        }
    }

    /// Run detection over every subtitle file of a directory
    /// Files that cannot be processed are logged and left out of the result
    pub fn detect_folder<P: AsRef<Path>>(&self, input_dir: P) -> Result<Vec<FileReport>> {
        let input_dir = input_dir.as_ref();
        let start_time = std::time::Instant::now();

        let files = FileManager::find_subtitle_files(input_dir)?;
        if files.is_empty() {
            return Err(anyhow!("No subtitle files found in directory: {:?}", input_dir));
        }

        let folder_pb = ProgressBar::new(files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));

        let mut reports = Vec::with_capacity(files.len());
        let mut error_count = 0;

        for file in &files {
            let file_name = file.file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Detecting: {}", file_name));

            match self.detect_file(file) {
                Ok(report) => reports.push(report),
                Err(e) => {
                    error!("Error processing file {}: {}", file_name, e);
                    error_count += 1;
                }
            }
            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder scan complete");

        let fallback_count = reports.iter().filter(|report| report.encoding.is_fallback()).count();
        info!(
            "Folder scan completed in {}: {} files, {} undetected, {} errors",
            Self::format_duration(start_time.elapsed()),
            reports.len(),
            fallback_count,
            error_count
        );

        Ok(reports)
    }

    /// Guess the spoken language of a subtitle or text file
    pub fn detect_language<P: AsRef<Path>>(&self, path: P) -> Result<String> {
        let language = self.guess_file_language(path.as_ref())?;
        Ok(language.unwrap_or_else(|| self.config.language.fallback_language.clone()))
    }

    // SRT files are judged per cue, anything else per non-empty line
    fn guess_file_language(&self, path: &Path) -> Result<Option<String>> {
        let (text, _) = FileManager::read_text_file(path, &self.config)?;

        let detected = match SubtitleCollection::parse_srt_string(&text) {
            Ok(entries) => {
                let collection = SubtitleCollection {
                    source_file: path.to_path_buf(),
                    entries,
                    encoding: None,
                };
                language::guess_spoken_language(&collection.concatenated_text(), collection.entries.len())
            }
            Err(_) => {
                debug!("{:?} is not SRT, scanning it as plain text", path);
                let paragraphs = text.lines().filter(|line| !line.trim().is_empty()).count();
                language::guess_spoken_language(&text, paragraphs)
            }
        };

        Ok(detected.map(str::to_string))
    }

    /// Break or unbreak every cue of an SRT file and write the result.
    ///
    /// Without an explicit output path the result lands next to the input
    /// as `<stem>.reflow.srt`. An existing output is only replaced with
    /// `force_overwrite`.
    pub fn reflow<P: AsRef<Path>>(
        &self,
        input_file: P,
        output_file: Option<PathBuf>,
        mode: ReflowMode,
        force_overwrite: bool,
    ) -> Result<ReflowReport> {
        let input_file = input_file.as_ref();
        let output_path = output_file.unwrap_or_else(|| {
            let output_dir = input_file.parent().unwrap_or_else(|| Path::new("."));
            FileManager::generate_output_path(input_file, output_dir, "reflow", "srt")
        });

        if output_path.exists() && !force_overwrite {
            return Err(anyhow!(
                "Output file already exists: {:?} (use -f to force overwrite)",
                output_path
            ));
        }

        let mut subtitles = SubtitleCollection::load(input_file, &self.config)?;
        let breaker = self.line_breaker();
        let changed_count = match mode {
            ReflowMode::Break => {
                subtitles.auto_break_lines(&breaker, self.config.line_breaking.minimum_length)
            }
            ReflowMode::Unbreak => subtitles.unbreak_lines(&breaker),
        };

        subtitles.write_to_srt(&output_path)?;
        info!(
            "Reflowed {} of {} cues into {:?}",
            changed_count,
            subtitles.entries.len(),
            output_path
        );

        Ok(ReflowReport {
            output_path,
            cue_count: subtitles.entries.len(),
            changed_count,
        })
    }

    /// Reflow a single text with the configured settings
    pub fn reflow_text(&self, text: &str, mode: ReflowMode) -> String {
        let breaker = self.line_breaker();
        match mode {
            ReflowMode::Break => breaker.auto_break_line(text, self.config.line_breaking.minimum_length),
            ReflowMode::Unbreak => breaker.unbreak_line(text),
        }
    }

    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
