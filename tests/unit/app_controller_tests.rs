/*!
 * Tests for application controller functionality
 */

use std::fs;
use std::path::PathBuf;
use anyhow::Result;
use cuesync::app_config::{AcquisitionProvider, Config};
use cuesync::app_controller::Controller;
use crate::common;

/// Test creating a controller with the default configuration
#[test]
fn test_new_with_default_config_shouldSucceed() -> Result<()> {
    let controller = Controller::new_for_test()?;
    assert!(!controller.config.source_language.is_empty());
    assert!(!controller.config.target_language.is_empty());
    Ok(())
}

/// Test creating a controller with a specific configuration
#[test]
fn test_with_config_withValidConfig_shouldCreateController() -> Result<()> {
    let config = Config::default();
    let controller = Controller::with_config(config)?;
    assert_eq!(controller.config.source_language, "ru");
    assert_eq!(controller.config.target_language, "en");
    Ok(())
}

/// Test that a fresh controller is initialized and has no live session
#[test]
fn test_new_for_test_shouldCreateController() -> Result<()> {
    let controller = Controller::new_for_test()?;
    assert!(controller.is_initialized());
    assert!(!controller.session().is_active());
    Ok(())
}

/// Test that generation with the mock provider writes a track and starts a session
#[test]
fn test_generate_withMockProvider_shouldWriteTrackAndStartSession() -> Result<()> {
    tokio_test::block_on(async {
        let temp_dir = common::create_temp_dir()?;
        let input_file = common::create_test_file(&temp_dir.path().to_path_buf(), "briefing.mp4", "")?;
        let output_dir = temp_dir.path().join("out");

        let controller = Controller::with_config(common::test_config())?;
        let output_path = controller.generate(input_file, output_dir.clone(), false).await?;

        assert_eq!(output_path, output_dir.join("briefing.en.vtt"));
        let content = fs::read_to_string(&output_path)?;
        assert!(content.starts_with("WEBVTT"));
        assert!(content.contains("00:00:00.500 --> 00:00:02.500"));
        assert!(content.contains("Hello everyone, and welcome to our enterprise demo."));

        let session = controller.session().snapshot().unwrap();
        assert_eq!(session.provider, "mock");
        assert_eq!(session.cue_count, 5);
        assert_eq!(session.duration_secs, 14.0);
        assert_eq!(session.media_label, "briefing.mp4");

        Ok(())
    })
}

/// Test that generation proceeds when the media file itself is missing
#[test]
fn test_generate_withMissingMedia_shouldStillGenerate() -> Result<()> {
    tokio_test::block_on(async {
        let temp_dir = common::create_temp_dir()?;
        let input_file = temp_dir.path().join("missing.mp4");
        let output_dir = temp_dir.path().to_path_buf();

        let controller = Controller::with_config(common::test_config())?;
        let output_path = controller.generate(input_file, output_dir, false).await?;

        assert!(output_path.exists());

        Ok(())
    })
}

/// Test that an existing track is kept unless overwrite is forced
#[test]
fn test_generate_withExistingOutput_shouldSkipWithoutForce() -> Result<()> {
    tokio_test::block_on(async {
        let temp_dir = common::create_temp_dir()?;
        let base = temp_dir.path().to_path_buf();
        let input_file = common::create_test_file(&base, "briefing.mp4", "")?;
        let existing = common::create_test_file(&base, "briefing.en.vtt", "sentinel")?;

        let controller = Controller::with_config(common::test_config())?;
        let output_path = controller.generate(input_file, base.clone(), false).await?;

        assert_eq!(output_path, existing);
        assert_eq!(fs::read_to_string(&existing)?, "sentinel");
        assert!(!controller.session().is_active());

        Ok(())
    })
}

/// Test that forcing overwrite replaces an existing track
#[test]
fn test_generate_withForceOverwrite_shouldReplaceExisting() -> Result<()> {
    tokio_test::block_on(async {
        let temp_dir = common::create_temp_dir()?;
        let base = temp_dir.path().to_path_buf();
        let input_file = common::create_test_file(&base, "briefing.mp4", "")?;
        let existing = common::create_test_file(&base, "briefing.en.vtt", "sentinel")?;

        let controller = Controller::with_config(common::test_config())?;
        controller.generate(input_file, base.clone(), true).await?;

        let content = fs::read_to_string(&existing)?;
        assert!(content.starts_with("WEBVTT"));
        assert!(controller.session().is_active());

        Ok(())
    })
}

/// Test that a caption track input is imported without acquisition
#[test]
fn test_generate_withTrackInput_shouldImportWithoutAcquisition() -> Result<()> {
    tokio_test::block_on(async {
        let temp_dir = common::create_temp_dir()?;
        let input_file = common::create_test_track(&temp_dir.path().to_path_buf(), "test.vtt")?;
        let output_dir = temp_dir.path().join("out");

        let controller = Controller::with_config(common::test_config())?;
        let output_path = controller.generate(input_file, output_dir.clone(), false).await?;

        assert_eq!(output_path, output_dir.join("test.en.vtt"));
        let content = fs::read_to_string(&output_path)?;
        assert!(content.contains("This is a test cue."));

        let session = controller.session().snapshot().unwrap();
        assert_eq!(session.provider, "import");
        assert_eq!(session.cue_count, 3);

        Ok(())
    })
}

/// Test that the fixture provider feeds its cues through generation
#[test]
fn test_generate_withFixtureProvider_shouldUseFixtureTranscript() -> Result<()> {
    tokio_test::block_on(async {
        let temp_dir = common::create_temp_dir()?;
        let base = temp_dir.path().to_path_buf();
        let fixture = common::create_test_file(
            &base,
            "transcript.json",
            r#"[
                {"id": 1, "start": 1.0, "end": 2.0, "text": "First fixture line"},
                {"start": 2.5, "end": 4.0, "text": "Second fixture line"}
            ]"#,
        )?;
        let input_file = base.join("briefing.mp4");

        let mut config = common::test_config();
        config.acquisition.provider = AcquisitionProvider::Fixture;
        config.acquisition.fixture_path = Some(fixture);

        let controller = Controller::with_config(config)?;
        let output_path = controller.generate(input_file, base.clone(), false).await?;

        let content = fs::read_to_string(&output_path)?;
        assert!(content.contains("First fixture line"));
        assert!(content.contains("Second fixture line"));

        let session = controller.session().snapshot().unwrap();
        assert_eq!(session.provider, "fixture");
        assert_eq!(session.cue_count, 2);

        Ok(())
    })
}

/// Test that an empty transcript aborts generation
#[test]
fn test_generate_withEmptyTranscript_shouldFail() -> Result<()> {
    tokio_test::block_on(async {
        let temp_dir = common::create_temp_dir()?;
        let base = temp_dir.path().to_path_buf();
        let fixture = common::create_test_file(&base, "empty.json", "[]")?;
        let input_file = base.join("briefing.mp4");

        let mut config = common::test_config();
        config.acquisition.provider = AcquisitionProvider::Fixture;
        config.acquisition.fixture_path = Some(fixture);

        let controller = Controller::with_config(config)?;
        let result = controller.generate(input_file, base.clone(), false).await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("empty transcript"));
        assert!(!controller.session().is_active());

        Ok(())
    })
}

/// Test that checking a valid track reports its stats
#[test]
fn test_check_file_withValidTrack_shouldReport() -> Result<()> {
    tokio_test::block_on(async {
        let temp_dir = common::create_temp_dir()?;
        let track = common::create_test_track(&temp_dir.path().to_path_buf(), "test.vtt")?;

        let controller = Controller::with_config(common::test_config())?;
        let report = controller.check_file(track.clone()).await?;

        assert_eq!(report.path, track);
        assert_eq!(report.cue_count, 3);
        assert_eq!(report.duration_secs, 14.0);
        assert_eq!(report.overlap_count, 0);

        Ok(())
    })
}

/// Test that overlapping cues are surfaced by the track report
#[test]
fn test_check_file_withOverlappingCues_shouldCountOverlaps() -> Result<()> {
    tokio_test::block_on(async {
        let temp_dir = common::create_temp_dir()?;
        let track = common::create_test_file(
            &temp_dir.path().to_path_buf(),
            "overlap.vtt",
            "WEBVTT\n\n\
             00:00:01.000 --> 00:00:05.000\nFirst\n\n\
             00:00:03.000 --> 00:00:08.000\nSecond\n",
        )?;

        let controller = Controller::with_config(common::test_config())?;
        let report = controller.check_file(track).await?;

        assert_eq!(report.cue_count, 2);
        assert_eq!(report.overlap_count, 1);

        Ok(())
    })
}

/// Test that checking a media container is rejected
#[test]
fn test_check_file_withMediaFile_shouldFail() -> Result<()> {
    tokio_test::block_on(async {
        let temp_dir = common::create_temp_dir()?;
        let media = common::create_test_file(&temp_dir.path().to_path_buf(), "briefing.mp4", "")?;

        let controller = Controller::with_config(common::test_config())?;
        let result = controller.check_file(media).await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("media container"));

        Ok(())
    })
}

/// Test that checking a malformed track fails
#[test]
fn test_check_file_withMalformedTrack_shouldFail() -> Result<()> {
    tokio_test::block_on(async {
        let temp_dir = common::create_temp_dir()?;
        let track = common::create_test_file(
            &temp_dir.path().to_path_buf(),
            "broken.vtt",
            "WEBVTT\n\n00:00:05.000 --> 00:00:02.000\nBackwards\n",
        )?;

        let controller = Controller::with_config(common::test_config())?;
        assert!(controller.check_file(track).await.is_err());

        Ok(())
    })
}

/// Test that checking a missing file fails
#[test]
fn test_check_file_withMissingFile_shouldFail() -> Result<()> {
    tokio_test::block_on(async {
        let controller = Controller::with_config(common::test_config())?;
        assert!(controller.check_file(PathBuf::from("/no/such/track.vtt")).await.is_err());

        Ok(())
    })
}

/// Test that folder checking counts valid and invalid tracks
#[test]
fn test_check_folder_withMixedTracks_shouldCountValidAndInvalid() -> Result<()> {
    tokio_test::block_on(async {
        let temp_dir = common::create_temp_dir()?;
        let base = temp_dir.path().to_path_buf();
        common::create_test_track(&base, "one.vtt")?;
        common::create_test_track(&base, "two.vtt")?;
        common::create_test_file(&base, "broken.vtt", "no header at all\n")?;

        let controller = Controller::with_config(common::test_config())?;
        let summary = controller.check_folder(base).await?;

        assert_eq!(summary.valid, 2);
        assert_eq!(summary.invalid, 1);

        Ok(())
    })
}

/// Test that a folder without track files is rejected
#[test]
fn test_check_folder_withNoTracks_shouldFail() -> Result<()> {
    tokio_test::block_on(async {
        let temp_dir = common::create_temp_dir()?;

        let controller = Controller::with_config(common::test_config())?;
        let result = controller.check_folder(temp_dir.path().to_path_buf()).await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("No track files found"));

        Ok(())
    })
}

/// Test that a missing folder is rejected
#[test]
fn test_check_folder_withMissingDir_shouldFail() -> Result<()> {
    tokio_test::block_on(async {
        let controller = Controller::with_config(common::test_config())?;
        assert!(controller.check_folder(PathBuf::from("/no/such/dir")).await.is_err());

        Ok(())
    })
}

/// Test that simulation counts ticks and transitions over a track
#[test]
fn test_simulate_withValidTrack_shouldCountTransitions() -> Result<()> {
    tokio_test::block_on(async {
        let temp_dir = common::create_temp_dir()?;
        let track = common::create_test_track(&temp_dir.path().to_path_buf(), "test.vtt")?;

        let controller = Controller::with_config(common::test_config())?;
        // 500ms steps over a 14s track, one step past the end: 30 samples
        let report = controller.simulate(track, 500).await?;

        assert_eq!(report.ticks, 30);
        assert_eq!(report.enters, 3);
        assert_eq!(report.exits, 3);

        Ok(())
    })
}

/// Test that a zero simulation step is rejected
#[test]
fn test_simulate_withZeroStep_shouldFail() -> Result<()> {
    tokio_test::block_on(async {
        let temp_dir = common::create_temp_dir()?;
        let track = common::create_test_track(&temp_dir.path().to_path_buf(), "test.vtt")?;

        let controller = Controller::with_config(common::test_config())?;
        let result = controller.simulate(track, 0).await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("at least one millisecond"));

        Ok(())
    })
}
