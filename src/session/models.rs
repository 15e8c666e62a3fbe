/*!
 * Session-specific models and DTOs.
 *
 * These structures describe a caption session to callers without exposing
 * the live store or synchronizer held by the manager.
 */

use serde::{Deserialize, Serialize};

/// Parameters for starting a new caption session
#[derive(Debug, Clone)]
pub struct SessionCreateParams {
    /// Label of the media item (filename or display title)
    pub media_label: String,
    /// Source language code
    pub source_language: String,
    /// Target language code
    pub target_language: String,
    /// Name of the provider that delivered the transcript
    pub provider: String,
}

impl SessionCreateParams {
    /// Create new session parameters
    pub fn new(
        media_label: String,
        source_language: String,
        target_language: String,
        provider: String,
    ) -> Self {
        Self {
            media_label,
            source_language,
            target_language,
            provider,
        }
    }
}

/// Read-only snapshot of the current session for display and tracking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Session ID
    pub id: String,
    /// Label of the media item
    pub media_label: String,
    /// Source language
    pub source_language: String,
    /// Target language
    pub target_language: String,
    /// Provider that delivered the transcript
    pub provider: String,
    /// Number of cues in the current track
    pub cue_count: usize,
    /// Track duration in seconds (latest cue end)
    pub duration_secs: f64,
    /// Creation time
    pub created_at: String,
    /// Last track replacement time
    pub updated_at: String,
}

impl SessionInfo {
    /// Calculate the average cue density in cues per minute
    pub fn cues_per_minute(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            return 0.0;
        }
        self.cue_count as f64 / (self.duration_secs / 60.0)
    }
}

impl std::fmt::Display for SessionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} ({} -> {}, {} cue(s), {:.1}s)",
            &self.id[..8.min(self.id.len())],
            self.media_label,
            self.source_language,
            self.target_language,
            self.cue_count,
            self.duration_secs
        )
    }
}
