/*!
 * Tick-driven playback synchronization.
 *
 * A small state machine over a cue store: an external transport reports the
 * current playback position once per tick and the synchronizer answers with
 * the enter/exit transition that sample causes, if any. It never blocks,
 * never sleeps and never calls back into the transport.
 */

use std::sync::Arc;

use log::{debug, trace};

use crate::cue_store::{Cue, CueStore};

/// Synchronizer state between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// No cue contains the current position.
    Idle,
    /// The cue at this store index contains the current position.
    Active(usize),
}

/// Outcome of one tick: at most one exited and one entered store index.
///
/// Both are set when playback moves straight from one cue into another, and
/// both are `None` when the active cue did not change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncTransition {
    pub exited: Option<usize>,
    pub entered: Option<usize>,
}

impl SyncTransition {
    /// True when the tick changed the active cue in either direction.
    pub fn is_change(&self) -> bool {
        self.exited.is_some() || self.entered.is_some()
    }
}

/// Resolves position samples against a cue store and reports transitions.
///
/// The store reference is swapped wholesale on session reset; the
/// synchronizer never observes a store that is still being built.
pub struct Synchronizer {
    store: Arc<CueStore>,
    active: Option<usize>,
    // Store index of the first cue that can still become active: every cue
    // before it ended at or before the last observed position.
    cursor: usize,
    last_position: f64,
}

impl Synchronizer {
    /// Create a synchronizer over `store`, idle at position zero.
    pub fn new(store: Arc<CueStore>) -> Self {
        Self {
            store,
            active: None,
            cursor: 0,
            last_position: 0.0,
        }
    }

    /// Current state.
    pub fn state(&self) -> SyncState {
        match self.active {
            Some(index) => SyncState::Active(index),
            None => SyncState::Idle,
        }
    }

    /// Copy of the active cue, if any.
    pub fn active_cue(&self) -> Option<Cue> {
        self.active.and_then(|index| self.store.get(index))
    }

    /// Seek coordinate for the cue at `index`: its start time in seconds.
    ///
    /// Pure lookup on behalf of the transport. Calling it does not move
    /// playback and does not touch synchronizer state; the transport decides
    /// whether to act on the returned coordinate.
    pub fn seek_to(&self, index: usize) -> Option<f64> {
        self.store.get(index).map(|cue| cue.start)
    }

    /// Swap in a freshly built store.
    ///
    /// The previous active cue is forgotten without an exit event; the next
    /// tick reports an enter if its position lands inside a cue of the new
    /// store.
    pub fn replace_store(&mut self, store: Arc<CueStore>) {
        debug!(
            "Replacing cue store: {} -> {} cue(s)",
            self.store.len(),
            store.len()
        );
        self.store = store;
        self.active = None;
        self.cursor = 0;
    }

    /// Process one position sample and report the transition it causes.
    ///
    /// Non-finite samples are ignored. A sample earlier than the previous
    /// one is a discontinuous seek and restarts the forward cursor; ordinary
    /// forward playback advances the cursor, keeping the common case
    /// amortized O(1). Does not block.
    pub fn tick(&mut self, position: f64) -> SyncTransition {
        if !position.is_finite() {
            trace!("Ignoring non-finite position sample");
            return SyncTransition::default();
        }

        if position < self.last_position {
            trace!(
                "Backward jump {}s -> {}s, rescanning from the start",
                self.last_position, position
            );
            self.cursor = 0;
        }
        self.last_position = position;

        let cues = self.store.cues();
        while self.cursor < cues.len() && cues[self.cursor].end <= position {
            self.cursor += 1;
        }

        let winner = self.find_active(position);
        self.apply(winner)
    }

    // Lowest start wins among cues containing the position; among equal
    // starts the lowest id wins. Scanning in store order reaches the lowest
    // containing start first, so only the rest of that start group needs
    // the id comparison.
    fn find_active(&self, position: f64) -> Option<usize> {
        let cues = self.store.cues();
        let mut winner: Option<usize> = None;

        for index in self.cursor..cues.len() {
            let cue = &cues[index];
            if cue.start > position {
                break;
            }
            match winner {
                Some(best) => {
                    if cue.start > cues[best].start {
                        break;
                    }
                    if cue.contains(position) && cue.id < cues[best].id {
                        winner = Some(index);
                    }
                }
                None => {
                    if cue.contains(position) {
                        winner = Some(index);
                    }
                }
            }
        }

        winner
    }

    fn apply(&mut self, winner: Option<usize>) -> SyncTransition {
        if winner == self.active {
            return SyncTransition::default();
        }

        let transition = SyncTransition {
            exited: self.active,
            entered: winner,
        };
        match (self.active, winner) {
            (Some(from), Some(to)) => debug!("Cue transition: index {} -> index {}", from, to),
            (None, Some(to)) => debug!("Cue entered: index {}", to),
            (Some(from), None) => debug!("Cue exited: index {}", from),
            (None, None) => {}
        }
        self.active = winner;
        transition
    }
}
