use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    pub source_language: String,

    /// Target language code (ISO)
    pub target_language: String,

    /// Transcript acquisition config
    #[serde(default)]
    pub acquisition: AcquisitionConfig,

    /// Track export config
    #[serde(default)]
    pub export: ExportConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Transcript acquisition provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AcquisitionProvider {
    // @provider: Simulated transcription pipeline
    #[default]
    Mock,
    // @provider: JSON fixture file on disk
    Fixture,
}

impl AcquisitionProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Mock => "Mock",
            Self::Fixture => "Fixture",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Mock => "mock".to_string(),
            Self::Fixture => "fixture".to_string(),
        }
    }
}

// Implement Display trait for AcquisitionProvider
impl std::fmt::Display for AcquisitionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for AcquisitionProvider
impl std::str::FromStr for AcquisitionProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "fixture" => Ok(Self::Fixture),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Transcript acquisition configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AcquisitionConfig {
    /// Acquisition provider to use
    #[serde(default)]
    pub provider: AcquisitionProvider,

    /// Acquisition timeout in seconds
    #[serde(default = "default_acquisition_timeout_secs")]
    pub timeout_secs: u64,

    /// Scale factor applied to the mock pipeline stage delays
    /// (0.0 disables the delays entirely)
    #[serde(default = "default_mock_delay_scale")]
    pub mock_delay_scale: f64,

    /// Path to the transcript fixture, required for the fixture provider
    #[serde(default)]
    pub fixture_path: Option<PathBuf>,
}

impl AcquisitionConfig {
    // @returns: Acquisition timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            provider: AcquisitionProvider::default(),
            timeout_secs: default_acquisition_timeout_secs(),
            mock_delay_scale: default_mock_delay_scale(),
            fixture_path: None,
        }
    }
}

/// Track export configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExportConfig {
    /// File extension for generated tracks
    #[serde(default = "default_track_extension")]
    pub extension: String,

    /// Directory for generated tracks, next to the media file when unset
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            extension: default_track_extension(),
            output_dir: None,
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

fn default_acquisition_timeout_secs() -> u64 {
    30
}

fn default_mock_delay_scale() -> f64 {
    1.0
}

fn default_track_extension() -> String {
    "vtt".to_string()
}

impl Config {

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate languages
        let _source_name = crate::language_utils::get_language_name(&self.source_language)?;
        let _target_name = crate::language_utils::get_language_name(&self.target_language)?;

        // Validate acquisition settings
        if self.acquisition.timeout_secs == 0 {
            return Err(anyhow!("Acquisition timeout must be at least one second"));
        }
        if !self.acquisition.mock_delay_scale.is_finite() || self.acquisition.mock_delay_scale < 0.0 {
            return Err(anyhow!(
                "Mock delay scale must be a non-negative number, got {}",
                self.acquisition.mock_delay_scale
            ));
        }
        if self.acquisition.provider == AcquisitionProvider::Fixture
            && self.acquisition.fixture_path.is_none()
        {
            return Err(anyhow!("A fixture path is required for the fixture provider"));
        }

        // Validate export settings
        if self.export.extension.is_empty() {
            return Err(anyhow!("Track extension must not be empty"));
        }

        Ok(())
    }


}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: "ru".to_string(),
            target_language: "en".to_string(),
            acquisition: AcquisitionConfig::default(),
            export: ExportConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
