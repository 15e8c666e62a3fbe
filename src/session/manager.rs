/*!
 * Session manager for caption session lifecycle.
 *
 * This module handles:
 * - Installing a fully built track as the current session
 * - Atomic wholesale track replacement
 * - Session reset and read-only snapshots
 */

use chrono::Local;
use log::{debug, info};
use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

use crate::cue_store::{Cue, CueStore};
use crate::playback_sync::{SyncState, SyncTransition, Synchronizer};

use super::models::{SessionCreateParams, SessionInfo};

/// Live state for the current session
struct ActiveSession {
    /// Snapshot data handed out to observers
    info: SessionInfo,
    /// The current track
    store: Arc<CueStore>,
    /// Playback state machine over the current track
    synchronizer: Synchronizer,
}

/// Manager holding at most one live caption session
///
/// All mutation happens under one lock, so observers either see the previous
/// fully built track or the new one, never a half-installed state. Stores are
/// built completely before they reach this type.
pub struct SessionManager {
    current: RwLock<Option<ActiveSession>>,
}

impl SessionManager {
    /// Create a manager with no session installed
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    // =========================================================================
    // Session Lifecycle
    // =========================================================================

    /// Install a fully built store as the current session
    ///
    /// Any previous session is dropped wholesale. Returns the snapshot of the
    /// newly installed session.
    pub fn begin(&self, params: SessionCreateParams, store: Arc<CueStore>) -> SessionInfo {
        let session_id = Uuid::new_v4().to_string();
        let now = Local::now().to_rfc3339();

        info!(
            "Starting session {} for '{}' ({} cue(s), {} -> {})",
            &session_id[..8],
            params.media_label,
            store.len(),
            params.source_language,
            params.target_language
        );

        let info = SessionInfo {
            id: session_id,
            media_label: params.media_label,
            source_language: params.source_language,
            target_language: params.target_language,
            provider: params.provider,
            cue_count: store.len(),
            duration_secs: store.duration(),
            created_at: now.clone(),
            updated_at: now,
        };

        let mut current = self.current.write();
        if let Some(previous) = current.as_ref() {
            debug!("Dropping previous session {}", &previous.info.id[..8]);
        }
        *current = Some(ActiveSession {
            info: info.clone(),
            store: Arc::clone(&store),
            synchronizer: Synchronizer::new(store),
        });

        info
    }

    /// Swap in a replacement track for the current session
    ///
    /// The swap is atomic for observers and the synchronizer forgets its
    /// active cue without emitting an exit. Returns the refreshed snapshot,
    /// or `None` when no session is live.
    pub fn replace_track(&self, store: Arc<CueStore>) -> Option<SessionInfo> {
        let mut current = self.current.write();
        let active = current.as_mut()?;

        info!(
            "Replacing track for session {}: {} -> {} cue(s)",
            &active.info.id[..8],
            active.info.cue_count,
            store.len()
        );

        active.info.cue_count = store.len();
        active.info.duration_secs = store.duration();
        active.info.updated_at = Local::now().to_rfc3339();
        active.synchronizer.replace_store(Arc::clone(&store));
        active.store = store;

        Some(active.info.clone())
    }

    /// Clear the current session, if any
    ///
    /// Returns true when a session was actually dropped.
    pub fn reset(&self) -> bool {
        let mut current = self.current.write();
        match current.take() {
            Some(active) => {
                info!("Resetting session {}", &active.info.id[..8]);
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Whether a session is currently live
    pub fn is_active(&self) -> bool {
        self.current.read().is_some()
    }

    /// Snapshot of the current session
    pub fn snapshot(&self) -> Option<SessionInfo> {
        self.current.read().as_ref().map(|active| active.info.clone())
    }

    /// Shared handle to the current track
    pub fn store(&self) -> Option<Arc<CueStore>> {
        self.current.read().as_ref().map(|active| Arc::clone(&active.store))
    }

    // =========================================================================
    // Playback Delegation
    // =========================================================================

    /// Feed one position sample to the session synchronizer
    pub fn tick(&self, position: f64) -> Option<SyncTransition> {
        let mut current = self.current.write();
        current
            .as_mut()
            .map(|active| active.synchronizer.tick(position))
    }

    /// Seek coordinate for the cue at `index` in the current track
    pub fn seek_to(&self, index: usize) -> Option<f64> {
        self.current
            .read()
            .as_ref()
            .and_then(|active| active.synchronizer.seek_to(index))
    }

    /// Synchronizer state; `Idle` when no session is live
    pub fn sync_state(&self) -> SyncState {
        self.current
            .read()
            .as_ref()
            .map_or(SyncState::Idle, |active| active.synchronizer.state())
    }

    /// Copy of the active cue, if any
    pub fn active_cue(&self) -> Option<Cue> {
        self.current
            .read()
            .as_ref()
            .and_then(|active| active.synchronizer.active_cue())
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
