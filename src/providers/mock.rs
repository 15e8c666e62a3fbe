/*!
 * Mock transcription provider.
 *
 * Reproduces the canned demo transcript and simulates different behaviors:
 * - `MockTranscriber::working()` - Delivers the demo transcript
 * - `MockTranscriber::failing()` - Always fails with a provider error
 * - `MockTranscriber::empty()` - Delivers a transcript with no cues
 * - `MockTranscriber::unsorted()` - Delivers cues out of start order
 * - `MockTranscriber::invalid()` - Delivers a cue with a reversed interval
 *
 * A configurable delay scale replays the staged acquisition pipeline
 * (upload, extract, transcribe, translate, finalize) with jittered sleeps;
 * the default scale of zero skips the sleeps entirely.
 */

use async_trait::async_trait;
use log::debug;
use rand::Rng;
use std::time::Duration;

use crate::cue_store::RawCue;
use crate::errors::ProviderError;
use crate::providers::{TranscriptRequest, TranscriptionProvider};

/// Acquisition pipeline stages and their baseline durations in milliseconds
const PIPELINE_STAGES: [(&str, u64); 5] = [
    ("upload", 1000),
    ("extract", 800),
    ("transcribe", 1200),
    ("translate", 1200),
    ("finalize", 500),
];

/// The canned five-cue demo transcript delivered by the working mock
pub fn demo_transcript() -> Vec<RawCue> {
    vec![
        RawCue::with_id(
            1,
            0.5,
            2.5,
            "Hello everyone, and welcome to our enterprise demo.",
        ),
        RawCue::with_id(2, 2.8, 5.0, "Today we are discussing the quarterly results."),
        RawCue::with_id(
            3,
            5.2,
            8.0,
            "As you can see from the charts, growth is steady.",
        ),
        RawCue::with_id(
            4,
            8.5,
            11.0,
            "We need to focus on our Russian market specifically.",
        ),
        RawCue::with_id(5, 11.5, 14.0, "Let's move on to the next slide, please."),
    ]
}

/// Behavior mode for the mock transcriber
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Delivers the demo transcript
    Working,
    /// Always fails with a provider error
    Failing,
    /// Delivers a transcript with no cues
    Empty,
    /// Delivers the demo cues out of start order
    Unsorted,
    /// Delivers the demo cues with one reversed interval
    Invalid,
}

/// Mock transcript source with configurable behavior and pipeline delays
#[derive(Debug, Clone)]
pub struct MockTranscriber {
    /// Behavior mode
    behavior: MockBehavior,
    /// Multiplier applied to the staged pipeline delays; zero disables them
    delay_scale: f64,
}

impl MockTranscriber {
    /// Create a new mock transcriber with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            delay_scale: 0.0,
        }
    }

    /// Create a working mock that delivers the demo transcript
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that delivers an empty transcript
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create a mock that delivers cues out of start order
    pub fn unsorted() -> Self {
        Self::new(MockBehavior::Unsorted)
    }

    /// Create a mock that delivers a cue with a reversed interval
    pub fn invalid() -> Self {
        Self::new(MockBehavior::Invalid)
    }

    /// Set the pipeline delay scale
    pub fn with_delay_scale(mut self, scale: f64) -> Self {
        self.delay_scale = scale;
        self
    }

    /// Replay the staged acquisition pipeline with jittered sleeps
    async fn run_pipeline(&self) {
        if self.delay_scale <= 0.0 {
            return;
        }

        for (stage, base_ms) in PIPELINE_STAGES {
            let jitter = rand::rng().random_range(0.9..=1.1);
            let delay =
                Duration::from_millis((base_ms as f64 * self.delay_scale * jitter) as u64);
            debug!("Mock pipeline stage '{}' running for {:?}", stage, delay);
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl TranscriptionProvider for MockTranscriber {
    async fn acquire(&self, request: &TranscriptRequest) -> Result<Vec<RawCue>, ProviderError> {
        debug!(
            "Mock acquisition for '{}' ({} -> {})",
            request.media_label, request.source_language, request.target_language
        );

        match self.behavior {
            MockBehavior::Working => {
                self.run_pipeline().await;
                Ok(demo_transcript())
            }

            MockBehavior::Failing => Err(ProviderError::RequestFailed(
                "simulated transcription backend failure".to_string(),
            )),

            MockBehavior::Empty => {
                self.run_pipeline().await;
                Ok(Vec::new())
            }

            MockBehavior::Unsorted => {
                self.run_pipeline().await;
                let mut cues = demo_transcript();
                cues.reverse();
                Ok(cues)
            }

            MockBehavior::Invalid => {
                self.run_pipeline().await;
                let mut cues = demo_transcript();
                // Reverse the third interval so store construction rejects it.
                let (start, end) = (cues[2].start, cues[2].end);
                cues[2].start = end;
                cues[2].end = start;
                Ok(cues)
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::RequestFailed(
                "simulated transcription backend failure".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
