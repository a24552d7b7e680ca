// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use log::{warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use subtext::app_config::{self, Config};
use subtext::app_controller::{Controller, FileReport, ReflowMode};
use subtext::encoding::TextEncoding;
use subtext::language_utils;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Detect the encoding and spoken language of a file or folder
    Detect {
        /// Subtitle file, or directory scanned recursively
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Guess the spoken language of a subtitle file
    Language {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Break (or unbreak) every cue of an SRT file
    Reflow {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output file (default: <stem>.reflow.srt next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Join lines instead of breaking them
        #[arg(long)]
        unbreak: bool,

        /// Force overwrite of existing output files
        #[arg(short, long)]
        force_overwrite: bool,
    },

    /// Break (or unbreak) a single text and print it
    Break {
        #[arg(value_name = "TEXT")]
        text: String,

        /// Join lines instead of breaking them
        #[arg(long)]
        unbreak: bool,
    },

    /// Generate shell completions for subtext
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// subtext - subtitle text toolkit
///
/// Detects the character encoding and spoken language of subtitle files and
/// balances subtitle lines.
#[derive(Parser, Debug)]
#[command(name = "subtext")]
#[command(version)]
#[command(about = "Subtitle encoding detection, language guessing and line breaking")]
#[command(long_about = "subtext detects the character encoding and spoken language of subtitle files and balances subtitle lines.

EXAMPLES:
    subtext detect movie.srt                    # Encoding and language of one file
    subtext detect /subtitles/                  # Scan a whole directory
    subtext language movie.srt                  # Spoken language only
    subtext reflow movie.srt                    # Write movie.reflow.srt
    subtext reflow --unbreak -o out.srt in.srt  # Join every cue onto one line
    subtext break \"Some long subtitle text. It needs two lines.\"
    subtext completions bash > subtext.bash     # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Do not guess ANSI codepages, fall back to the default codepage
    #[arg(long, global = true)]
    no_ansi_guess: bool,

    /// Encoding assumed when nothing is detected (e.g. 1252, cp1251, koi8-r)
    #[arg(long, value_name = "ENCODING", global = true)]
    default_encoding: Option<TextEncoding>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and marker for log level
    fn get_style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "❌ "),
            Level::Warn => ("1;33", "🚧 "),
            Level::Info => ("1;32", " "),
            Level::Debug => ("1;36", "🔍 "),
            Level::Trace => ("1;35", "📋 "),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, marker) = Self::get_style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, marker, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set through
    // log::set_max_level once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "subtext", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(cmd_log_level) = &cli.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let config = load_config(&cli)?;
    if cli.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Detect { path } => {
            if !path.exists() {
                return Err(anyhow!("Input path does not exist: {:?}", path));
            }
            for report in controller.detect_path(&path)? {
                print_report(&report);
            }
        }
        Commands::Language { file } => {
            let language = controller.detect_language(&file)?;
            let name = language_utils::get_language_name(&language)
                .unwrap_or_else(|_| "unknown".to_string());
            println!("{}\t{}", language, name);
        }
        Commands::Reflow { file, output, unbreak, force_overwrite } => {
            let mode = if unbreak { ReflowMode::Unbreak } else { ReflowMode::Break };
            let report = controller.reflow(&file, output, mode, force_overwrite)?;
            info!(
                "{} of {} cues changed, written to {}",
                report.changed_count,
                report.cue_count,
                report.output_path.display()
            );
        }
        Commands::Break { text, unbreak } => {
            let mode = if unbreak { ReflowMode::Unbreak } else { ReflowMode::Break };
            // Shells cannot easily pass a newline, accept a literal \n
            let text = text.replace("\\n", "\n");
            println!("{}", controller.reflow_text(&text, mode));
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}

// Load or create the configuration, then apply command line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let config_path = &cli.config_path;
    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config.save_to_file(config_path)?;
        config
    };

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }
    if cli.no_ansi_guess {
        config.encoding.auto_guess_ansi_encoding = false;
    }
    if let Some(encoding) = cli.default_encoding {
        config.encoding.default_codepage = encoding.codepage(config.encoding.default_codepage);
    }

    Ok(config)
}

fn print_report(report: &FileReport) {
    let mut line = format!("{}\t{}", report.path.display(), report.encoding);
    if let Some(language) = &report.language {
        line.push_str(&format!("\t{}", language));
    }
    println!("{}", line);
}
