/*!
 * Common test utilities for the cuesync test suite
 */

use std::path::PathBuf;
use std::fs;
use anyhow::Result;
use tempfile::TempDir;
use cuesync::app_config::Config;
use cuesync::cue_store::RawCue;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample caption track file for testing
pub fn create_test_track(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    let content = r#"WEBVTT

1
00:00:01.000 --> 00:00:04.000
This is a test cue.

2
00:00:05.000 --> 00:00:09.000
It contains multiple entries.

3
00:00:10.000 --> 00:00:14.000
For testing purposes.
"#;
    create_test_file(dir, filename, content)
}

/// Raw cues matching the sample caption track
pub fn sample_raw_cues() -> Vec<RawCue> {
    vec![
        RawCue::with_id(1, 1.0, 4.0, "This is a test cue."),
        RawCue::with_id(2, 5.0, 9.0, "It contains multiple entries."),
        RawCue::with_id(3, 10.0, 14.0, "For testing purposes."),
    ]
}

/// Default configuration with the mock pipeline delays disabled,
/// so controller tests finish immediately
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.acquisition.mock_delay_scale = 0.0;
    config
}
