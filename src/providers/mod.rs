/*!
 * Acquisition providers for finished cue transcripts.
 *
 * This module contains the sources that deliver raw cue records to the engine:
 * - Mock: canned demo transcript with staged pipeline delays
 * - Fixture: raw cue records loaded from a JSON file
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::cue_store::RawCue;
use crate::errors::ProviderError;

/// Request describing the transcript to acquire
///
/// Providers receive the media label and the language pair; what they do with
/// them is provider-specific (the mock logs them, the fixture ignores them).
#[derive(Debug, Clone)]
pub struct TranscriptRequest {
    /// Label of the media item the transcript belongs to
    pub media_label: String,
    /// Source language code
    pub source_language: String,
    /// Target language code
    pub target_language: String,
}

impl TranscriptRequest {
    /// Create a new transcript request
    pub fn new(media_label: &str, source_language: &str, target_language: &str) -> Self {
        Self {
            media_label: media_label.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        }
    }
}

/// Common trait for all transcript sources
///
/// A provider delivers a finished list of raw cue records exactly once per
/// session; validation and ordering are the cue store's job, so providers may
/// return unsorted or even invalid records.
#[async_trait]
pub trait TranscriptionProvider: Send + Sync + Debug {
    /// Acquire the finished cue list for the given request
    ///
    /// # Arguments
    /// * `request` - Media label and language pair for the transcript
    ///
    /// # Returns
    /// * `Result<Vec<RawCue>, ProviderError>` - The raw cue records or an error
    async fn acquire(&self, request: &TranscriptRequest) -> Result<Vec<RawCue>, ProviderError>;

    /// Check that the provider is able to deliver at all
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the provider is usable, or an error
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Short provider name for configuration matching and log lines
    fn name(&self) -> &'static str;
}

pub mod fixture;
pub mod mock;
