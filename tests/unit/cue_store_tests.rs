/*!
 * Tests for cue store construction and access
 */

use cuesync::cue_store::{CueStore, RawCue};
use cuesync::errors::ValidationError;

/// Test that build sorts records by start time
#[test]
fn test_build_withUnsortedRecords_shouldSortByStart() {
    let raw = vec![
        RawCue::new(10.0, 12.0, "third"),
        RawCue::new(0.5, 2.0, "first"),
        RawCue::new(4.0, 6.0, "second"),
    ];

    let store = CueStore::build(raw).unwrap();

    let starts: Vec<f64> = store.iter().map(|cue| cue.start).collect();
    assert_eq!(starts, vec![0.5, 4.0, 10.0]);
    let texts: Vec<String> = store.iter().map(|cue| cue.text).collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
}

/// Test that build keeps input order among cues with equal starts
#[test]
fn test_build_withEqualStarts_shouldKeepInputOrder() {
    let raw = vec![
        RawCue::with_id(7, 1.0, 2.0, "earlier in input"),
        RawCue::with_id(3, 1.0, 3.0, "later in input"),
    ];

    let store = CueStore::build(raw).unwrap();

    // Stable sort: the record that came first stays first
    assert_eq!(store.get(0).unwrap().id, 7);
    assert_eq!(store.get(1).unwrap().id, 3);
}

/// Test that missing ids are assigned without colliding with supplied ones
#[test]
fn test_build_withMixedIds_shouldAssignFreshIdsAroundSuppliedOnes() {
    let raw = vec![
        RawCue::new(0.0, 1.0, "gets an id"),
        RawCue::with_id(1, 2.0, 3.0, "keeps id 1"),
        RawCue::new(4.0, 5.0, "gets another id"),
        RawCue::with_id(2, 6.0, 7.0, "keeps id 2"),
    ];

    let store = CueStore::build(raw).unwrap();

    let ids: Vec<u32> = store.iter().map(|cue| cue.id).collect();
    assert_eq!(ids[1], 1);
    assert_eq!(ids[3], 2);
    // Assigned ids avoid 1 and 2
    assert!(!ids.contains(&0));
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), 4, "ids must be unique, got {:?}", ids);
}

/// Test that a backward interval is rejected with the record index
#[test]
fn test_build_withBackwardInterval_shouldFailWithIndex() {
    let raw = vec![
        RawCue::new(0.0, 1.0, "fine"),
        RawCue::new(5.0, 4.0, "backward"),
    ];

    let err = CueStore::build(raw).unwrap_err();

    assert!(matches!(err, ValidationError::InvalidInterval { index: 1, .. }));
}

/// Test that a zero-length interval is rejected
#[test]
fn test_build_withZeroLengthInterval_shouldFail() {
    let raw = vec![RawCue::new(2.0, 2.0, "instantaneous")];

    let err = CueStore::build(raw).unwrap_err();

    assert!(matches!(err, ValidationError::InvalidInterval { index: 0, .. }));
}

/// Test that an interval shorter than a millisecond is rejected
#[test]
fn test_build_withSubMillisecondInterval_shouldFail() {
    // Both ends land on the same millisecond once quantized
    let raw = vec![RawCue::new(1.0001, 1.0004, "sliver")];

    let err = CueStore::build(raw).unwrap_err();

    assert!(matches!(err, ValidationError::InvalidInterval { index: 0, .. }));
}

/// Test that negative and non-finite times are rejected
#[test]
fn test_build_withInvalidTimes_shouldFail() {
    let negative = vec![RawCue::new(-1.0, 2.0, "negative start")];
    assert!(matches!(
        CueStore::build(negative).unwrap_err(),
        ValidationError::InvalidTime { index: 0, .. }
    ));

    let non_finite = vec![RawCue::new(0.0, f64::NAN, "nan end")];
    assert!(matches!(
        CueStore::build(non_finite).unwrap_err(),
        ValidationError::InvalidTime { index: 0, .. }
    ));
}

/// Test that empty and whitespace-only text is rejected
#[test]
fn test_build_withBlankText_shouldFail() {
    let raw = vec![RawCue::new(0.0, 1.0, "   \n  ")];

    let err = CueStore::build(raw).unwrap_err();

    assert!(matches!(err, ValidationError::EmptyText { index: 0 }));
}

/// Test that text carrying the timing separator is rejected
#[test]
fn test_build_withArrowInText_shouldFail() {
    let raw = vec![RawCue::new(0.0, 1.0, "see 00:00:01.000 --> 00:00:02.000")];

    let err = CueStore::build(raw).unwrap_err();

    assert!(matches!(err, ValidationError::ReservedSeparator { index: 0 }));
}

/// Test that a zero id is rejected
#[test]
fn test_build_withZeroId_shouldFail() {
    let raw = vec![RawCue::with_id(0, 0.0, 1.0, "zero id")];

    let err = CueStore::build(raw).unwrap_err();

    assert!(matches!(err, ValidationError::NonPositiveId { index: 0 }));
}

/// Test that a duplicate id is rejected at the later record
#[test]
fn test_build_withDuplicateIds_shouldFailAtLaterRecord() {
    let raw = vec![
        RawCue::with_id(5, 0.0, 1.0, "first"),
        RawCue::with_id(5, 2.0, 3.0, "second"),
    ];

    let err = CueStore::build(raw).unwrap_err();

    assert!(matches!(err, ValidationError::DuplicateId { index: 1, id: 5 }));
}

/// Test that cue text lines are trimmed and interior blanks dropped
#[test]
fn test_build_withRaggedText_shouldNormalizeLines() {
    let raw = vec![RawCue::new(0.0, 1.0, "  first line  \n\n  second line\t")];

    let store = CueStore::build(raw).unwrap();

    assert_eq!(store.get(0).unwrap().text, "first line\nsecond line");
}

/// Test that an empty record list builds an empty store
#[test]
fn test_build_withNoRecords_shouldBuildEmptyStore() {
    let store = CueStore::build(Vec::new()).unwrap();

    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert_eq!(store.duration(), 0.0);
    assert!(store.get(0).is_none());
}

/// Test that duration scans every end, not just the last cue's
#[test]
fn test_duration_withOverlappingCues_shouldUseLatestEnd() {
    let raw = vec![
        RawCue::new(0.0, 20.0, "long background cue"),
        RawCue::new(5.0, 10.0, "short cue ending earlier"),
    ];

    let store = CueStore::build(raw).unwrap();

    assert_eq!(store.duration(), 20.0);
}

/// Test that overlap_count reports adjacent overlapping pairs
#[test]
fn test_overlap_count_withOverlappingNeighbors_shouldCountPairs() {
    let disjoint = CueStore::build(vec![
        RawCue::new(0.0, 1.0, "a"),
        RawCue::new(2.0, 3.0, "b"),
    ])
    .unwrap();
    assert_eq!(disjoint.overlap_count(), 0);

    let overlapping = CueStore::build(vec![
        RawCue::new(0.0, 5.0, "a"),
        RawCue::new(3.0, 8.0, "b"),
        RawCue::new(9.0, 10.0, "c"),
    ])
    .unwrap();
    assert_eq!(overlapping.overlap_count(), 1);
}

/// Test that store times are quantized to the millisecond grid
#[test]
fn test_build_withSubMillisecondTimes_shouldQuantizeToGrid() {
    let raw = vec![RawCue::new(0.5004, 2.4999, "quantized")];

    let store = CueStore::build(raw).unwrap();
    let cue = store.get(0).unwrap();

    assert_eq!(cue.start, 0.5);
    assert_eq!(cue.end, 2.499);
}

/// Test the half-open containment rule on a single cue
#[test]
fn test_contains_atBoundaries_shouldIncludeStartExcludeEnd() {
    let store = CueStore::build(vec![RawCue::new(1.0, 2.0, "boundary")]).unwrap();
    let cue = store.get(0).unwrap();

    assert!(cue.contains(1.0));
    assert!(cue.contains(1.999));
    assert!(!cue.contains(2.0));
    assert!(!cue.contains(0.999));
}
