// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::Config;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod candidate_parser;
mod errors;
mod file_utils;
mod media_tools;
mod prompt;
mod providers;
mod subtitle_processor;
mod timecode;

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

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Turn a video URL into highlight clips (default command)
    Clip(ClipArgs),

    /// Generate shell completions for clipchop
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ClipArgs {
    /// Video URL to process
    #[arg(value_name = "URL")]
    url: String,

    /// Working directory for downloads and clips
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Number of highlight clips to request
    #[arg(short = 'n', long)]
    clips: Option<usize>,

    /// Model name to use for highlight discovery
    #[arg(short, long)]
    model: Option<String>,

    /// Subtitle language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    subtitle_language: Option<String>,

    /// Configuration file path
    #[arg(long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// clipchop - AI-powered highlight clipper
///
/// Downloads a video and its auto-generated subtitles, asks an LLM for the
/// most engaging moments, then cuts the clips and writes per-clip subtitles.
#[derive(Parser, Debug)]
#[command(name = "clipchop")]
#[command(version = "0.1.0")]
#[command(about = "AI-powered video highlight clipper")]
#[command(long_about = "clipchop downloads a video and its auto-generated subtitles, asks an LLM
to identify engaging moments, and cuts those moments into clips with
correctly re-timed subtitle files.

EXAMPLES:
    clipchop https://youtube.com/watch?v=...        # Clip using default config
    clipchop -n 5 <url>                             # Request five highlight clips
    clipchop -m gemini-2.5-flash <url>              # Use a specific model
    clipchop -o clips/ <url>                        # Write outputs into clips/
    clipchop --log-level debug <url>                # Verbose logging
    clipchop completions bash > clipchop.bash       # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically. The API key is read from the config or
    from the GEMINI_API_KEY environment variable.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Video URL to process
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Working directory for downloads and clips
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Number of highlight clips to request
    #[arg(short = 'n', long)]
    clips: Option<usize>,

    /// Model name to use for highlight discovery
    #[arg(short, long)]
    model: Option<String>,

    /// Subtitle language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    subtitle_language: Option<String>,

    /// Configuration file path
    #[arg(long, default_value = "conf.json")]
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
    fn color_for_level(level: Level) -> &'static str {
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
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} [{}] {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "clipchop", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Clip(args)) => run_clip(args).await,
        None => {
            // Default behavior - use top-level args for convenience
            let url = cli
                .url
                .ok_or_else(|| anyhow!("URL is required when no subcommand is specified"))?;

            let clip_args = ClipArgs {
                url,
                output_dir: cli.output_dir,
                force_overwrite: cli.force_overwrite,
                clips: cli.clips,
                model: cli.model,
                subtitle_language: cli.subtitle_language,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_clip(clip_args).await
        }
    }
}

async fn run_clip(options: ClipArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config
            .save_to_file(config_path)
            .context(format!("Failed to write default config to file: {}", config_path))?;
        config
    };

    // Override config with CLI options if provided
    if let Some(clips) = options.clips {
        config.clip.count = clips;
    }
    if let Some(model) = &options.model {
        config.provider.model = model.clone();
    }
    if let Some(language) = &options.subtitle_language {
        config.subtitle_language = language.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    let controller = Controller::with_config(config)?;
    let results = controller
        .run(&options.url, options.output_dir.clone(), options.force_overwrite)
        .await?;

    if results.is_empty() {
        warn!("No clips were produced");
    } else {
        for result in &results {
            info!(
                "Clip {:02}: {:?} (subtitles: {:?})",
                result.clip_number, result.video_path, result.subtitle_path
            );
        }
    }

    Ok(())
}
