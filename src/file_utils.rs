use anyhow::{Result, Context};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::app_config::Config;
use crate::encoding::{self, EncodingResult};

// @module: File and directory utilities

/// Extensions treated as subtitle files when scanning a folder
pub const SUBTITLE_EXTENSIONS: &[&str] = &["srt", "sub", "txt", "ass", "ssa", "vtt"];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    // @reads: At most `limit` leading bytes
    // @returns: Bytes read and the total file length
    pub fn read_prefix<P: AsRef<Path>>(path: P, limit: usize) -> io::Result<(Vec<u8>, u64)> {
        let file = File::open(path.as_ref())?;
        let file_len = file.metadata()?.len();

        let capacity = usize::try_from(file_len).map_or(limit, |len| len.min(limit));
        let mut buffer = Vec::with_capacity(capacity);
        file.take(limit as u64).read_to_end(&mut buffer)?;

        Ok((buffer, file_len))
    }

    // @generates: Output path next to the reflowed subtitle
    // @params: input_file, output_dir, suffix, extension
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        suffix: &str,
        extension: &str,
    ) -> PathBuf {
        let stem = input_file.as_ref().file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        if !suffix.is_empty() {
            output_filename.push('.');
            output_filename.push_str(suffix);
        }
        output_filename.push('.');
        output_filename.push_str(extension.trim_start_matches('.'));

        output_dir.as_ref().join(output_filename)
    }

    /// Find files with a specific extension in a directory
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        Self::find_files_matching(dir, &[extension.trim_start_matches('.')])
    }

    /// Find every subtitle file below a directory, sorted by path
    pub fn find_subtitle_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        Self::find_files_matching(dir, SUBTITLE_EXTENSIONS)
    }

    fn find_files_matching<P: AsRef<Path>>(dir: P, extensions: &[&str]) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }
            if let Some(ext) = path.extension() {
                let ext = ext.to_string_lossy();
                if extensions.iter().any(|wanted| ext.eq_ignore_ascii_case(wanted)) {
                    result.push(path.to_path_buf());
                }
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read a UTF-8 file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Read a text file in whatever encoding it was saved with.
    ///
    /// The encoding is detected from the file itself; a file that does not
    /// decode cleanly is decoded lossily rather than rejected.
    pub fn read_text_file<P: AsRef<Path>>(path: P, config: &Config) -> Result<(String, EncodingResult)> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read file: {:?}", path))?;

        let limit = config.encoding.utf8_scan_limit.min(bytes.len());
        let detected = encoding::detect_bytes_encoding(&bytes[..limit], bytes.len() as u64, &config.encoding);
        let default_codepage = config.encoding.default_codepage;

        let text = match encoding::decode(&bytes, detected.encoding, default_codepage) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("{:?} is not clean {}: {}, decoding lossily", path, detected.encoding, e);
                encoding::decode_lossy(&bytes, detected.encoding, default_codepage)
                    .with_context(|| format!("Failed to decode file: {:?}", path))?
            }
        };

        Ok((text, detected))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }
}
