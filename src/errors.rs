/*!
 * Error types for the cuesync application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors raised while validating raw cue records at store construction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Start/end pair does not form a forward interval at millisecond precision
    #[error("cue record {index}: start {start}s is not earlier than end {end}s at millisecond precision")]
    InvalidInterval {
        /// Zero-based position of the record in the input sequence
        index: usize,
        /// Start offset as supplied
        start: f64,
        /// End offset as supplied
        end: f64,
    },

    /// A time offset is negative, NaN or infinite
    #[error("cue record {index}: times must be finite and non-negative (start {start}s, end {end}s)")]
    InvalidTime {
        /// Zero-based position of the record in the input sequence
        index: usize,
        /// Start offset as supplied
        start: f64,
        /// End offset as supplied
        end: f64,
    },

    /// Cue text is empty after normalization
    #[error("cue record {index}: text is empty")]
    EmptyText {
        /// Zero-based position of the record in the input sequence
        index: usize,
    },

    /// Cue text contains the timing-line arrow and would not survive serialization
    #[error("cue record {index}: text contains the reserved timing separator \"-->\"")]
    ReservedSeparator {
        /// Zero-based position of the record in the input sequence
        index: usize,
    },

    /// A supplied cue id is zero
    #[error("cue record {index}: cue id must be a positive integer")]
    NonPositiveId {
        /// Zero-based position of the record in the input sequence
        index: usize,
    },

    /// A supplied cue id collides with an earlier record
    #[error("cue record {index}: duplicate cue id {id}")]
    DuplicateId {
        /// Zero-based position of the later colliding record
        index: usize,
        /// The colliding id
        id: u32,
    },
}

/// Errors raised while encoding or decoding timestamps and track text
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Negative offsets are rejected, never clamped
    #[error("cannot encode negative time offset {0}s")]
    NegativeTime(f64),

    /// NaN and infinite offsets have no timestamp form
    #[error("cannot encode non-finite time offset")]
    NonFiniteTime,

    /// Offset exceeds what a millisecond counter can carry
    #[error("time offset {0}s is too large to encode")]
    OversizedTime(f64),

    /// Input does not match the fixed-width `HH:MM:SS.mmm` pattern
    #[error("malformed timestamp \"{input}\": {reason}")]
    MalformedTimestamp {
        /// The rejected input
        input: String,
        /// What the parser expected
        reason: String,
    },

    /// A minutes or seconds field is 60 or more
    #[error("timestamp \"{input}\": {field} field out of range")]
    FieldOutOfRange {
        /// The rejected input
        input: String,
        /// Offending field name ("minutes" or "seconds")
        field: &'static str,
    },

    /// Track text does not begin with the WEBVTT header token
    #[error("missing WEBVTT header")]
    MissingHeader,

    /// A cue block is structurally broken
    #[error("cue block {block}: {reason}")]
    MalformedBlock {
        /// One-based index of the offending cue block
        block: usize,
        /// What was wrong with it
        reason: String,
    },
}

/// Errors that can occur when acquiring a transcript from a provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when the acquisition request fails outright
    #[error("acquisition request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing a provider payload fails
    #[error("failed to parse provider payload: {0}")]
    ParseError(String),

    /// Error when acquisition does not complete within the configured window
    #[error("acquisition timed out after {0} seconds")]
    TimedOut(u64),

    /// Error when the provider delivers a transcript with no cues
    #[error("provider delivered an empty transcript")]
    EmptyTranscript,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from cue validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Error from timestamp or track formatting
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Error from a transcription provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
