use anyhow::{Result, Context};
use log::{error, warn, info, debug};
use std::path::PathBuf;
use std::sync::Arc;
use futures::stream::{self, StreamExt};
use crate::app_config::{AcquisitionProvider, Config};
use crate::cue_store::{CueStore, RawCue};
use crate::errors::ProviderError;
use crate::file_utils::{FileManager, FileType};
use crate::language_utils;
use crate::playback_sync::Synchronizer;
use crate::providers::fixture::FixtureTranscriber;
use crate::providers::mock::MockTranscriber;
use crate::providers::{TranscriptRequest, TranscriptionProvider};
use crate::session::{SessionCreateParams, SessionManager};
use crate::time_codec;
use crate::track_serializer;

// @module: Application controller for caption track generation

/// Maximum number of track files inspected concurrently in folder mode
const CHECK_CONCURRENCY: usize = 4;

/// Main application controller for caption track generation
pub struct Controller {
    // @field: App configuration
    pub config: Config,
    // @field: Playback session registry
    sessions: SessionManager,
}

/// Shape of a single inspected track file
#[derive(Debug, Clone)]
pub struct TrackReport {
    pub path: PathBuf,
    pub cue_count: usize,
    pub duration_secs: f64,
    pub overlap_count: usize,
}

impl TrackReport {
    fn from_store(path: PathBuf, store: &CueStore) -> Self {
        Self {
            path,
            cue_count: store.len(),
            duration_secs: store.duration(),
            overlap_count: store.overlap_count(),
        }
    }
}

impl std::fmt::Display for TrackReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} cue(s), {:.3}s, {} overlapping pair(s)",
            self.path.display(),
            self.cue_count,
            self.duration_secs,
            self.overlap_count
        )
    }
}

/// Outcome counts for a folder inspection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckSummary {
    pub valid: usize,
    pub invalid: usize,
}

/// Outcome counts for a playback simulation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationReport {
    pub ticks: usize,
    pub enters: usize,
    pub exits: usize,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let controller = Self {
            config,
            sessions: SessionManager::new(),
        };

        Ok(controller)
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        !self.config.source_language.is_empty() && !self.config.target_language.is_empty()
    }

    /// Access the playback session registry
    pub fn session(&self) -> &SessionManager {
        &self.sessions
    }

    /// Build the acquisition provider selected by the configuration
    fn build_provider(&self) -> Box<dyn TranscriptionProvider> {
        match self.config.acquisition.provider {
            AcquisitionProvider::Mock => Box::new(
                MockTranscriber::working()
                    .with_delay_scale(self.config.acquisition.mock_delay_scale),
            ),
            AcquisitionProvider::Fixture => {
                // validate() requires a fixture path for this provider
                let path = self.config.acquisition.fixture_path.clone().unwrap_or_default();
                Box::new(FixtureTranscriber::new(path))
            }
        }
    }

    /// Run the generation workflow for one media file
    ///
    /// Acquires a transcript via the configured provider, builds the cue
    /// store, installs a playback session and writes the rendered track
    /// next to the media file (or into `output_dir`).
    pub async fn generate(
        &self,
        input_file: PathBuf,
        output_dir: PathBuf,
        force_overwrite: bool,
    ) -> Result<PathBuf> {
        // Start timing the process
        let start_time = std::time::Instant::now();

        // Ensure the output directory exists
        FileManager::ensure_dir(&output_dir)?;

        // The output file carries the short form of the target language code
        let target_label = language_utils::normalize_to_part1_or_part2t(&self.config.target_language)?;
        let output_path = FileManager::generate_output_path(
            &input_file,
            &output_dir,
            &target_label,
            &self.config.export.extension,
        );

        // Check if the track already exists
        if output_path.exists() && !force_overwrite {
            warn!("Skipping file, track already exists (use -f to force overwrite)");
            return Ok(output_path);
        }

        let media_label = input_file
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        // An existing caption track can be imported directly without acquisition
        if input_file.exists() && FileManager::detect_file_type(&input_file)? == FileType::Track {
            info!("Detected caption track, skipping transcript acquisition");

            let content = FileManager::read_to_string(&input_file)?;
            let store = Arc::new(
                track_serializer::parse(&content)
                    .with_context(|| format!("Failed to parse track file: {:?}", input_file))?,
            );

            self.install_session(&media_label, "import", Arc::clone(&store));

            let body = track_serializer::render(&store);
            FileManager::write_atomic(&output_path, &body)?;

            info!("Success: {}", output_path.display());
            return Ok(output_path);
        }

        if !input_file.exists() {
            // Acquisition never reads the media file itself
            warn!("Media file does not exist: {:?}", input_file);
        }

        let provider = self.build_provider();
        provider
            .test_connection()
            .await
            .with_context(|| format!("Provider '{}' is not reachable", provider.name()))?;

        let source_name = language_utils::get_language_name(&self.config.source_language)
            .unwrap_or_else(|_| self.config.source_language.clone());
        let target_name = language_utils::get_language_name(&self.config.target_language)
            .unwrap_or_else(|_| self.config.target_language.clone());
        if language_utils::language_codes_match(&self.config.source_language, &self.config.target_language) {
            info!("Transcribing '{}' in {}", media_label, source_name);
        } else {
            info!("Transcribing '{}' from {} to {}", media_label, source_name, target_name);
        }

        let raw_cues = self.acquire_transcript(provider.as_ref(), &media_label).await?;
        if raw_cues.is_empty() {
            return Err(ProviderError::EmptyTranscript.into());
        }
        debug!(
            "Provider '{}' delivered {} raw cue record(s)",
            provider.name(),
            raw_cues.len()
        );

        let store = Arc::new(
            CueStore::build(raw_cues).context("Transcript rejected during cue store construction")?,
        );

        self.install_session(&media_label, provider.name(), Arc::clone(&store));

        // Serialize and persist the track
        let body = track_serializer::render(&store);
        FileManager::write_atomic(&output_path, &body)?;

        info!(
            "Success: {} ({} cue(s), {})",
            output_path.display(),
            store.len(),
            Self::format_duration(start_time.elapsed())
        );

        Ok(output_path)
    }

    /// Acquire a transcript, bounded by the configured timeout
    async fn acquire_transcript(
        &self,
        provider: &dyn TranscriptionProvider,
        media_label: &str,
    ) -> Result<Vec<RawCue>> {
        let request = TranscriptRequest::new(
            media_label,
            &self.config.source_language,
            &self.config.target_language,
        );

        tokio::select! {
            result = provider.acquire(&request) => Ok(result?),
            _ = tokio::time::sleep(self.config.acquisition.timeout()) => {
                Err(ProviderError::TimedOut(self.config.acquisition.timeout_secs).into())
            }
        }
    }

    /// Install a fresh playback session over the given store
    fn install_session(&self, media_label: &str, provider_name: &str, store: Arc<CueStore>) {
        let params = SessionCreateParams::new(
            media_label.to_string(),
            self.config.source_language.clone(),
            self.config.target_language.clone(),
            provider_name.to_string(),
        );
        let session_info = self.sessions.begin(params, store);
        debug!("Playback session ready: {}", session_info);
    }

    /// Parse and validate a single track file, reporting its shape
    pub async fn check_file(&self, input_file: PathBuf) -> Result<TrackReport> {
        if !input_file.exists() {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }
        if FileManager::detect_file_type(&input_file)? == FileType::Media {
            return Err(anyhow::anyhow!(
                "{:?} is a media container, not a caption track",
                input_file
            ));
        }

        let report = Self::inspect_track(input_file).await?;
        info!("{}", report);

        Ok(report)
    }

    /// Run the check workflow in folder mode, inspecting all track files in a directory
    pub async fn check_folder(&self, input_dir: PathBuf) -> Result<CheckSummary> {
        // Start timing the process
        let start_time = std::time::Instant::now();

        // Check if the input directory exists
        if !input_dir.exists() {
            return Err(anyhow::anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        // Find all track files in the directory (recursive)
        let track_files = FileManager::find_files(&input_dir, &self.config.export.extension)?;
        if track_files.is_empty() {
            return Err(anyhow::anyhow!("No track files found in directory: {:?}", input_dir));
        }

        // Inspect the files with bounded concurrency
        let results = stream::iter(track_files)
            .map(|path| async move {
                let outcome = Self::inspect_track(path.clone()).await;
                (path, outcome)
            })
            .buffer_unordered(CHECK_CONCURRENCY)
            .collect::<Vec<_>>()
            .await;

        // Track success and failure counts
        let mut summary = CheckSummary::default();
        for (path, outcome) in results {
            match outcome {
                Ok(report) => {
                    info!("{}", report);
                    summary.valid += 1;
                }
                Err(e) => {
                    error!("Error inspecting file {:?}: {}", path, e);
                    summary.invalid += 1;
                }
            }
        }

        // Give summary results - important for batch operations
        info!(
            "Folder check completed: {} valid, {} invalid - Duration: {}",
            summary.valid,
            summary.invalid,
            Self::format_duration(start_time.elapsed())
        );

        Ok(summary)
    }

    /// Drive the synchronizer over a parsed track with a fixed position step
    pub async fn simulate(&self, input_file: PathBuf, step_ms: u64) -> Result<SimulationReport> {
        if step_ms == 0 {
            return Err(anyhow::anyhow!("Simulation step must be at least one millisecond"));
        }

        let content = FileManager::read_to_string(&input_file)?;
        let store = Arc::new(
            track_serializer::parse(&content)
                .with_context(|| format!("Invalid track file: {:?}", input_file))?,
        );

        info!(
            "Simulating playback of {:?}: {} cue(s) over {}",
            input_file,
            store.len(),
            time_codec::encode(store.duration())?
        );

        let mut synchronizer = Synchronizer::new(Arc::clone(&store));

        // Seek table up front, one coordinate per cue
        for (index, cue) in store.iter().enumerate() {
            if let Some(start) = synchronizer.seek_to(index) {
                debug!("cue {} starts at {}", cue.id, time_codec::encode(start)?);
            }
        }

        let step = step_ms as f64 / 1000.0;
        let mut report = SimulationReport::default();
        let mut position = 0.0_f64;

        // One step past the end closes the last active cue
        let horizon = store.duration() + step;
        while position <= horizon {
            let transition = synchronizer.tick(position);
            report.ticks += 1;

            if let Some(index) = transition.exited {
                report.exits += 1;
                if let Some(cue) = store.get(index) {
                    info!("[{}] <- cue {}", time_codec::encode(position)?, cue.id);
                }
            }
            if let Some(index) = transition.entered {
                report.enters += 1;
                if let Some(cue) = store.get(index) {
                    info!("[{}] -> cue {}: {}", time_codec::encode(position)?, cue.id, cue.text);
                }
            }

            position += step;
        }

        info!(
            "Simulation completed: {} tick(s), {} enter(s), {} exit(s)",
            report.ticks, report.enters, report.exits
        );

        Ok(report)
    }

    /// Read and parse one track file into a report
    async fn inspect_track(path: PathBuf) -> Result<TrackReport> {
        let content = FileManager::read_to_string(&path)?;
        let store = track_serializer::parse(&content)
            .with_context(|| format!("Invalid track file: {:?}", path))?;

        Ok(TrackReport::from_store(path, &store))
    }

    // Format duration in a human-readable format (HH:MM:SS)
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
