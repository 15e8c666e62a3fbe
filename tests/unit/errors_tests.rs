/*!
 * Tests for error types and conversions
 */

use cuesync::errors::{AppError, FormatError, ProviderError, ValidationError};

#[test]
fn test_validationError_invalidInterval_shouldDisplayRecordAndBounds() {
    let error = ValidationError::InvalidInterval {
        index: 3,
        start: 5.0,
        end: 4.0,
    };
    let display = format!("{}", error);
    assert!(display.contains("cue record 3"));
    assert!(display.contains("start 5s is not earlier than end 4s"));
}

#[test]
fn test_validationError_invalidTime_shouldDisplayCorrectly() {
    let error = ValidationError::InvalidTime {
        index: 0,
        start: -1.0,
        end: 2.0,
    };
    let display = format!("{}", error);
    assert!(display.contains("cue record 0"));
    assert!(display.contains("finite and non-negative"));
}

#[test]
fn test_validationError_emptyText_shouldDisplayCorrectly() {
    let error = ValidationError::EmptyText { index: 2 };
    let display = format!("{}", error);
    assert!(display.contains("cue record 2"));
    assert!(display.contains("text is empty"));
}

#[test]
fn test_validationError_reservedSeparator_shouldDisplayCorrectly() {
    let error = ValidationError::ReservedSeparator { index: 1 };
    let display = format!("{}", error);
    assert!(display.contains("reserved timing separator"));
    assert!(display.contains("-->"));
}

#[test]
fn test_validationError_duplicateId_shouldDisplayId() {
    let error = ValidationError::DuplicateId { index: 4, id: 9 };
    let display = format!("{}", error);
    assert!(display.contains("cue record 4"));
    assert!(display.contains("duplicate cue id 9"));
}

#[test]
fn test_formatError_negativeTime_shouldDisplayCorrectly() {
    let error = FormatError::NegativeTime(-2.5);
    let display = format!("{}", error);
    assert!(display.contains("cannot encode negative time offset"));
    assert!(display.contains("-2.5"));
}

#[test]
fn test_formatError_malformedTimestamp_shouldDisplayInputAndReason() {
    let error = FormatError::MalformedTimestamp {
        input: "0:0:0".to_string(),
        reason: "expected HH:MM:SS.mmm".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("malformed timestamp \"0:0:0\""));
    assert!(display.contains("expected HH:MM:SS.mmm"));
}

#[test]
fn test_formatError_fieldOutOfRange_shouldNameField() {
    let error = FormatError::FieldOutOfRange {
        input: "00:61:00.000".to_string(),
        field: "minutes",
    };
    let display = format!("{}", error);
    assert!(display.contains("00:61:00.000"));
    assert!(display.contains("minutes field out of range"));
}

#[test]
fn test_formatError_missingHeader_shouldDisplayCorrectly() {
    let display = format!("{}", FormatError::MissingHeader);
    assert!(display.contains("missing WEBVTT header"));
}

#[test]
fn test_formatError_malformedBlock_shouldDisplayBlockNumber() {
    let error = FormatError::MalformedBlock {
        block: 2,
        reason: "missing timing line".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("cue block 2"));
    assert!(display.contains("missing timing line"));
}

#[test]
fn test_providerError_requestFailed_shouldDisplayCorrectly() {
    let error = ProviderError::RequestFailed("Connection timeout".to_string());
    let display = format!("{}", error);
    assert!(display.contains("acquisition request failed"));
    assert!(display.contains("Connection timeout"));
}

#[test]
fn test_providerError_parseError_shouldDisplayCorrectly() {
    let error = ProviderError::ParseError("Invalid JSON".to_string());
    let display = format!("{}", error);
    assert!(display.contains("failed to parse provider payload"));
    assert!(display.contains("Invalid JSON"));
}

#[test]
fn test_providerError_timedOut_shouldDisplaySeconds() {
    let error = ProviderError::TimedOut(30);
    let display = format!("{}", error);
    assert!(display.contains("timed out after 30 seconds"));
}

#[test]
fn test_providerError_emptyTranscript_shouldDisplayCorrectly() {
    let display = format!("{}", ProviderError::EmptyTranscript);
    assert!(display.contains("empty transcript"));
}

#[test]
fn test_appError_fromValidationError_shouldWrapCorrectly() {
    let validation_error = ValidationError::EmptyText { index: 0 };
    let app_error: AppError = validation_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Validation error"));
    assert!(display.contains("text is empty"));
}

#[test]
fn test_appError_fromFormatError_shouldWrapCorrectly() {
    let format_error = FormatError::MissingHeader;
    let app_error: AppError = format_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Format error"));
}

#[test]
fn test_appError_fromProviderError_shouldWrapCorrectly() {
    let provider_error = ProviderError::RequestFailed("Test error".to_string());
    let app_error: AppError = provider_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Provider error"));
}

#[test]
fn test_appError_fromIoError_shouldWrapAsFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
    let app_error: AppError = io_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("File error"));
    assert!(display.contains("File not found"));
}

#[test]
fn test_appError_fromAnyhowError_shouldWrapAsUnknown() {
    let anyhow_error = anyhow::anyhow!("Something went wrong");
    let app_error: AppError = anyhow_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Unknown error"));
    assert!(display.contains("Something went wrong"));
}

#[test]
fn test_validationError_equality_shouldCompareVariants() {
    let a = ValidationError::EmptyText { index: 1 };
    let b = ValidationError::EmptyText { index: 1 };
    let c = ValidationError::EmptyText { index: 2 };
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_providerError_debug_shouldBeImplemented() {
    let error = ProviderError::RequestFailed("test".to_string());
    let debug = format!("{:?}", error);
    assert!(debug.contains("RequestFailed"));
}

#[test]
fn test_appError_debug_shouldBeImplemented() {
    let error = AppError::File("test".to_string());
    let debug = format!("{:?}", error);
    assert!(debug.contains("File"));
}
