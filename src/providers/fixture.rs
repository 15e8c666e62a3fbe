/*!
 * Fixture transcription provider.
 *
 * Loads raw cue records from a JSON file, standing in for a real backend
 * that delivers a finished cue list. The expected payload is a JSON array of
 * `{"start": .., "end": .., "text": ..}` objects with an optional `"id"`.
 */

use async_trait::async_trait;
use log::debug;
use std::path::{Path, PathBuf};

use crate::cue_store::RawCue;
use crate::errors::ProviderError;
use crate::providers::{TranscriptRequest, TranscriptionProvider};

/// Transcript source backed by a JSON fixture file
#[derive(Debug, Clone)]
pub struct FixtureTranscriber {
    /// Path to the JSON file holding the raw cue array
    path: PathBuf,
}

impl FixtureTranscriber {
    /// Create a fixture transcriber reading from the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path the fixture reads from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TranscriptionProvider for FixtureTranscriber {
    async fn acquire(&self, request: &TranscriptRequest) -> Result<Vec<RawCue>, ProviderError> {
        debug!(
            "Loading fixture transcript {:?} for '{}'",
            self.path, request.media_label
        );

        let payload = tokio::fs::read_to_string(&self.path).await.map_err(|err| {
            ProviderError::RequestFailed(format!(
                "cannot read fixture file {:?}: {}",
                self.path, err
            ))
        })?;

        let cues: Vec<RawCue> = serde_json::from_str(&payload)
            .map_err(|err| ProviderError::ParseError(err.to_string()))?;

        debug!("Fixture delivered {} raw cue record(s)", cues.len());
        Ok(cues)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        if self.path.is_file() {
            Ok(())
        } else {
            Err(ProviderError::RequestFailed(format!(
                "fixture file {:?} not found",
                self.path
            )))
        }
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}
