use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::time_codec;

// @module: Cue data model and the validated, ordered cue store

// @struct: Raw cue record straight from an acquisition provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCue {
    // @field: Optional caller-supplied id; missing ids are assigned at build
    #[serde(default)]
    pub id: Option<u32>,

    // @field: Start offset in seconds
    pub start: f64,

    // @field: End offset in seconds
    pub end: f64,

    // @field: Caption text, possibly multi-line
    pub text: String,
}

impl RawCue {
    /// Record without an id; the store assigns one during build.
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        RawCue {
            id: None,
            start,
            end,
            text: text.into(),
        }
    }

    /// Record carrying its own id, as parsed files and some providers deliver.
    pub fn with_id(id: u32, start: f64, end: f64, text: impl Into<String>) -> Self {
        RawCue {
            id: Some(id),
            start,
            end,
            text: text.into(),
        }
    }
}

// @struct: Single validated caption cue
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    // @field: Positive id, unique within its store, not necessarily contiguous
    pub id: u32,

    // @field: Start offset in seconds, millisecond-exact
    pub start: f64,

    // @field: End offset in seconds, millisecond-exact
    pub end: f64,

    // @field: Caption text with normalized line breaks
    pub text: String,
}

impl Cue {
    /// Length of the cue interval in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Half-open containment test: the start belongs to the cue, the end does
    /// not, so a boundary instant is assigned to exactly one side.
    pub fn contains(&self, position: f64) -> bool {
        self.start <= position && position < self.end
    }
}

/// Ordered, validated collection of cues backing a single track.
///
/// Immutable once built: edits go through [`CueStore::build`] again with a
/// modified raw list, and readers receive copies of individual cues rather
/// than references into the store.
#[derive(Debug, Clone, Default)]
pub struct CueStore {
    cues: Vec<Cue>,
}

// Validated record awaiting sort and id assignment.
struct PendingCue {
    id: Option<u32>,
    start_ms: u64,
    end_ms: u64,
    text: String,
}

impl CueStore {
    // @creates: Validated store from raw provider records
    // @validates: Finite non-negative times, forward intervals, non-empty text,
    //             positive unique ids; reports the first offending record
    pub fn build(raw_cues: Vec<RawCue>) -> Result<Self, ValidationError> {
        let mut pending = Vec::with_capacity(raw_cues.len());
        let mut used_ids: HashSet<u32> = HashSet::new();

        for (index, raw) in raw_cues.into_iter().enumerate() {
            pending.push(Self::validate_record(index, raw, &mut used_ids)?);
        }

        // Stable sort keeps input order among equal starts
        pending.sort_by_key(|cue| cue.start_ms);

        let mut cues = Vec::with_capacity(pending.len());
        let mut next_id: u32 = 1;
        for entry in pending {
            let id = match entry.id {
                Some(id) => id,
                None => {
                    while used_ids.contains(&next_id) {
                        next_id += 1;
                    }
                    used_ids.insert(next_id);
                    next_id
                }
            };

            cues.push(Cue {
                id,
                start: entry.start_ms as f64 / 1000.0,
                end: entry.end_ms as f64 / 1000.0,
                text: entry.text,
            });
        }

        let store = CueStore { cues };
        let overlaps = store.overlap_count();
        if overlaps > 0 {
            debug!("Built cue store with {} overlapping cue pair(s)", overlaps);
        }

        Ok(store)
    }

    fn validate_record(
        index: usize,
        raw: RawCue,
        used_ids: &mut HashSet<u32>,
    ) -> Result<PendingCue, ValidationError> {
        if !raw.start.is_finite() || !raw.end.is_finite() || raw.start < 0.0 || raw.end < 0.0 {
            return Err(ValidationError::InvalidTime {
                index,
                start: raw.start,
                end: raw.end,
            });
        }

        // Times live on the millisecond grid the timestamp format can carry;
        // quantize before the interval check so sub-millisecond slivers are
        // rejected instead of surviving as zero-width cues.
        let start_ms = time_codec::whole_ms(raw.start).map_err(|_| ValidationError::InvalidTime {
            index,
            start: raw.start,
            end: raw.end,
        })?;
        let end_ms = time_codec::whole_ms(raw.end).map_err(|_| ValidationError::InvalidTime {
            index,
            start: raw.start,
            end: raw.end,
        })?;

        if start_ms >= end_ms {
            return Err(ValidationError::InvalidInterval {
                index,
                start: raw.start,
                end: raw.end,
            });
        }

        let text = normalize_text(&raw.text);
        if text.is_empty() {
            return Err(ValidationError::EmptyText { index });
        }
        if text.contains("-->") {
            return Err(ValidationError::ReservedSeparator { index });
        }

        if let Some(id) = raw.id {
            if id == 0 {
                return Err(ValidationError::NonPositiveId { index });
            }
            if !used_ids.insert(id) {
                return Err(ValidationError::DuplicateId { index, id });
            }
        }

        Ok(PendingCue {
            id: raw.id,
            start_ms,
            end_ms,
            text,
        })
    }

    /// Number of cues in the store.
    pub fn len(&self) -> usize {
        self.cues.len()
    }

    /// Whether the store holds no cues. An empty store is valid; playback
    /// over it simply never activates a cue.
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Copy of the cue at `index` in store order.
    pub fn get(&self, index: usize) -> Option<Cue> {
        self.cues.get(index).cloned()
    }

    /// Lazy, restartable iteration over the cues in store order. Yields owned
    /// copies so no caller holds a reference into the store.
    pub fn iter(&self) -> impl Iterator<Item = Cue> + '_ {
        self.cues.iter().cloned()
    }

    /// Borrow the cues in store order. Crate-internal so outside callers
    /// cannot hold references into the store.
    pub(crate) fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// Latest end offset across all cues, in seconds; 0.0 when empty. Under
    /// overlap the last cue by start need not end last, so scan all ends.
    pub fn duration(&self) -> f64 {
        self.cues.iter().map(|cue| cue.end).fold(0.0, f64::max)
    }

    /// Count of adjacent-in-order cue pairs whose intervals overlap.
    pub fn overlap_count(&self) -> usize {
        self.cues
            .windows(2)
            .filter(|pair| pair[1].start < pair[0].end)
            .count()
    }
}

// Trims each line and drops blank interior lines: a blank line inside cue
// text cannot be represented in a blank-line-delimited block format.
fn normalize_text(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
