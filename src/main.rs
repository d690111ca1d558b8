// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::{Config, SelectionPolicy};
use crate::app_controller::{CommentRecord, Controller};
use crate::time_utils::format_timestamp;

mod app_config;
mod app_controller;
mod comment_processor;
mod errors;
mod marker_renderer;
mod snippet_selector;
mod time_utils;

/// CLI Wrapper for SelectionPolicy to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliSelectionPolicy {
    LineProximity,
    AnchorBoundary,
}

impl From<CliSelectionPolicy> for SelectionPolicy {
    fn from(cli_policy: CliSelectionPolicy) -> Self {
        match cli_policy {
            CliSelectionPolicy::LineProximity => SelectionPolicy::LineProximity,
            CliSelectionPolicy::AnchorBoundary => SelectionPolicy::AnchorBoundary,
        }
    }
}

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
    /// Scan a comments file and print the markers it produces (default command)
    Scan(ScanArgs),

    /// Generate shell completions for ytcm
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ScanArgs {
    /// JSON file with an array of comment objects ({"id", "text", "anchors"?})
    #[arg(value_name = "COMMENTS_FILE")]
    comments_path: PathBuf,

    /// Video duration in seconds (the timeline markers are placed on)
    #[arg(short, long)]
    duration: f64,

    /// Snippet selection policy
    #[arg(short, long, value_enum)]
    policy: Option<CliSelectionPolicy>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// YTCM - YouTube Comment Timestamp Markers
///
/// Scans video-page comments for timestamp references and produces
/// seek-bar markers with tooltip text drawn from the surrounding comment.
#[derive(Parser, Debug)]
#[command(name = "ytcm")]
#[command(author = "YTCM Team")]
#[command(version = "1.0.0")]
#[command(about = "Comment timestamp marker engine")]
#[command(long_about = "YTCM detects timestamp references in video-page comments and turns them
into seek-bar markers with descriptive tooltips.

EXAMPLES:
    ytcm comments.json -d 600                  # Scan comments against a 10 minute timeline
    ytcm comments.json -d 600 -p anchor-boundary  # Use the legacy snippet policy
    ytcm --log-level debug comments.json -d 90 # Show per-anchor detection decisions
    ytcm completions bash > ytcm.bash          # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.

COMMENTS FILE:
    A JSON array of comment objects. Each object carries an \"id\", the rendered
    \"text\", and optionally \"anchors\" (label + href pairs in document order).
    Comments without explicit anchors have their timestamp tokens linkified
    automatically, the way the watch page renders them.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON file with an array of comment objects
    #[arg(value_name = "COMMENTS_FILE")]
    comments_path: Option<PathBuf>,

    /// Video duration in seconds
    #[arg(short, long)]
    duration: Option<f64>,

    /// Snippet selection policy
    #[arg(short, long, value_enum)]
    policy: Option<CliSelectionPolicy>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
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

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
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
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "ytcm", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Scan(args)) => run_scan(args),
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let comments_path = cli.comments_path.ok_or_else(|| {
                anyhow!("COMMENTS_FILE is required when no subcommand is specified")
            })?;
            let duration = cli.duration.ok_or_else(|| {
                anyhow!("--duration is required when no subcommand is specified")
            })?;

            let scan_args = ScanArgs {
                comments_path,
                duration,
                policy: cli.policy,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };

            run_scan(scan_args)
        }
    }
}

fn run_scan(options: ScanArgs) -> Result<()> {
    // Apply command line log level early so config loading is logged at the
    // requested verbosity
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter_for(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        // Override config with CLI options if provided
        if let Some(policy) = &options.policy {
            config.selection_policy = policy.clone().into();
        }

        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        config
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let mut config = Config::default();

        if let Some(policy) = &options.policy {
            config.selection_policy = policy.clone().into();
        }

        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Validate the configuration after loading and overriding
    config.validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter_for(&config.log_level));
    }

    if !options.duration.is_finite() || options.duration <= 0.0 {
        return Err(anyhow!("Video duration must be a positive number of seconds"));
    }

    // Read the comments file
    let file = File::open(&options.comments_path)
        .context(format!("Failed to open comments file: {:?}", options.comments_path))?;
    let reader = BufReader::new(file);
    let comments: Vec<CommentRecord> = serde_json::from_reader(reader)
        .context(format!("Failed to parse comments file: {:?}", options.comments_path))?;

    info!("Loaded {} comments from {:?}", comments.len(), options.comments_path);

    // Run the scan and print the resulting markers
    let mut controller = Controller::with_config(config, options.duration)?;
    controller.scan(&comments)?;

    let mut stdout = std::io::stdout();
    for marker in controller.markers() {
        let seconds = (marker.position_percent / 100.0 * options.duration).round() as u64;
        writeln!(
            stdout,
            "{:>8}  {:6.2}%  {}",
            format_timestamp(seconds),
            marker.position_percent,
            marker.tooltip
        )?;
    }

    Ok(())
}

fn level_filter_for(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}
