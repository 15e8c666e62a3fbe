// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
// Add other lints specific to this module that you want to allow but not auto-fix

use anyhow::{Result, anyhow, Context};
use log::{warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::{AcquisitionProvider, Config};
use app_controller::Controller;

mod app_config;
mod app_controller;
mod cue_store;
mod errors;
mod file_utils;
mod language_utils;
mod playback_sync;
mod providers;
mod session;
mod time_codec;
mod track_serializer;

/// CLI Wrapper for AcquisitionProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliAcquisitionProvider {
    Mock,
    Fixture,
}

impl From<CliAcquisitionProvider> for AcquisitionProvider {
    fn from(cli_provider: CliAcquisitionProvider) -> Self {
        match cli_provider {
            CliAcquisitionProvider::Mock => AcquisitionProvider::Mock,
            CliAcquisitionProvider::Fixture => AcquisitionProvider::Fixture,
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
    /// Generate a caption track for a media file (default command)
    #[command(alias = "gen")]
    Generate(GenerateArgs),

    /// Parse and validate existing track files
    Check(CheckArgs),

    /// Replay a track file against a simulated playback clock
    Simulate(SimulateArgs),

    /// Generate shell completions for cuesync
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Media file to generate a caption track for
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Acquisition provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliAcquisitionProvider>,

    /// Transcript fixture file (implies the fixture provider)
    #[arg(long)]
    fixture: Option<PathBuf>,

    /// Source language code (e.g., 'en', 'es', 'ru')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'en', 'es', 'ru')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Directory for generated tracks (defaults to the media file's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Track file or directory of track files to validate
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Track file to replay
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Playback clock step in milliseconds
    #[arg(long, default_value_t = 100)]
    step_ms: u64,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// CueSync - Caption track generation and playback synchronization
///
/// Acquires transcripts, builds validated cue stores and renders WebVTT
/// caption tracks ready for playback.
#[derive(Parser, Debug)]
#[command(name = "cuesync")]
#[command(author = "CueSync Team")]
#[command(version = "0.1.0")]
#[command(about = "Caption track generation and synchronization tool")]
#[command(long_about = "CueSync acquires transcripts, builds validated cue stores and renders WebVTT caption tracks.

EXAMPLES:
    cuesync demo.mp4                                # Generate a track using default config
    cuesync -f demo.mp4                             # Force overwrite existing tracks
    cuesync -p fixture --fixture cues.json demo.mp4 # Acquire cues from a JSON fixture
    cuesync -s ru -t en demo.mp4                    # Label the track Russian to English
    cuesync check captions/                         # Validate every track in a directory
    cuesync simulate demo.en.vtt                    # Replay a track against a mock clock
    cuesync --log-level debug demo.mp4              # Generate with debug logging
    cuesync completions bash > cuesync.bash         # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.

SUPPORTED PROVIDERS:
    mock     - Simulated transcription pipeline delivering canned cues
    fixture  - JSON transcript fixture from disk (requires --fixture)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Media file to generate a caption track for
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Acquisition provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliAcquisitionProvider>,

    /// Transcript fixture file (implies the fixture provider)
    #[arg(long)]
    fixture: Option<PathBuf>,

    /// Source language code (e.g., 'en', 'es', 'ru')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'en', 'es', 'ru')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Directory for generated tracks (defaults to the media file's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

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

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
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

            let mut stderr = std::io::stderr();
            let _ = match record.level() {
                Level::Error => {
                    let emoji = Self::get_emoji_for_level(record.level());
                    writeln!(
                        stderr,
                        "\x1B[1;31m{} {} {}\x1B[0m",
                        now, emoji, record.args()
                    )
                },
                Level::Warn => {
                    let emoji = Self::get_emoji_for_level(record.level());
                    writeln!(
                        stderr,
                        "\x1B[1;33m{} {} {}\x1B[0m",
                        now, emoji, record.args()
                    )
                },
                Level::Info => {
                    let emoji = Self::get_emoji_for_level(record.level());
                    writeln!(
                        stderr,
                        "\x1B[1;32m{} {} {}\x1B[0m",
                        now, emoji, record.args()
                    )
                },
                Level::Debug => {
                    let emoji = Self::get_emoji_for_level(record.level());
                    writeln!(
                        stderr,
                        "\x1B[1;36m{} {} {}\x1B[0m",
                        now, emoji, record.args()
                    )
                },
                Level::Trace => {
                    let emoji = Self::get_emoji_for_level(record.level());
                    writeln!(
                        stderr,
                        "\x1B[1;35m{} {} {}\x1B[0m",
                        now, emoji, record.args()
                    )
                },
            };
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
            generate(shell, &mut cmd, "cuesync", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Generate(args)) => run_generate(args).await,
        Some(Commands::Check(args)) => run_check(args).await,
        Some(Commands::Simulate(args)) => run_simulate(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;

            let generate_args = GenerateArgs {
                input_path,
                force_overwrite: cli.force_overwrite,
                provider: cli.provider,
                fixture: cli.fixture,
                source_language: cli.source_language,
                target_language: cli.target_language,
                output_dir: cli.output_dir,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_generate(generate_args).await
        }
    }
}

// Map the config log level onto the log crate's filter
fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

// If a log level is set via command line, apply it immediately
fn apply_cli_log_level(log_level: Option<&CliLogLevel>) {
    if let Some(cmd_log_level) = log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }
}

// Load the configuration file, creating a default one if it does not exist
fn load_or_create_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        Ok(config)
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        Ok(config)
    }
}

// Validate the configuration and settle the effective log level
fn finalize_config(mut config: Config, log_level: Option<&CliLogLevel>) -> Result<Config> {
    // Update log level in config if specified via command line
    if let Some(cmd_log_level) = log_level {
        config.log_level = cmd_log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config.validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if log_level.is_none() {
        // Just update the max level without reinitializing the logger
        log::set_max_level(level_filter(&config.log_level));
    }

    Ok(config)
}

async fn run_generate(options: GenerateArgs) -> Result<()> {
    apply_cli_log_level(options.log_level.as_ref());

    let mut config = load_or_create_config(&options.config_path)?;

    // Override config with CLI options if provided
    if let Some(provider) = &options.provider {
        config.acquisition.provider = provider.clone().into();
    }

    if let Some(fixture) = &options.fixture {
        config.acquisition.provider = AcquisitionProvider::Fixture;
        config.acquisition.fixture_path = Some(fixture.clone());
    }

    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }

    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }

    if let Some(output_dir) = &options.output_dir {
        config.export.output_dir = Some(output_dir.clone());
    }

    let config = finalize_config(config, options.log_level.as_ref())?;

    // Create controller
    let controller = Controller::with_config(config.clone())?;

    if options.input_path.is_dir() {
        return Err(anyhow!(
            "Input path must be a file, use the 'check' command for directories: {:?}",
            options.input_path
        ));
    }

    // The media file itself may be absent, acquisition never reads it
    let output_dir = match config.export.output_dir.clone() {
        Some(dir) => dir,
        None => options.input_path.parent().unwrap_or(Path::new(".")).to_path_buf(),
    };

    controller.generate(options.input_path.clone(), output_dir, options.force_overwrite).await?;

    Ok(())
}

async fn run_check(options: CheckArgs) -> Result<()> {
    apply_cli_log_level(options.log_level.as_ref());

    let config = finalize_config(load_or_create_config(&options.config_path)?, options.log_level.as_ref())?;

    // Create controller
    let controller = Controller::with_config(config.clone())?;

    if options.input_path.is_file() {
        // Inspect a single file
        controller.check_file(options.input_path.clone()).await?;
    } else if options.input_path.is_dir() {
        // Inspect a directory
        let summary = controller.check_folder(options.input_path.clone()).await?;
        if summary.invalid > 0 {
            return Err(anyhow!("{} track file(s) failed validation", summary.invalid));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}

async fn run_simulate(options: SimulateArgs) -> Result<()> {
    apply_cli_log_level(options.log_level.as_ref());

    let config = finalize_config(load_or_create_config(&options.config_path)?, options.log_level.as_ref())?;

    // Create controller
    let controller = Controller::with_config(config.clone())?;

    if !options.input_path.is_file() {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    controller.simulate(options.input_path.clone(), options.step_ms).await?;

    Ok(())
}
