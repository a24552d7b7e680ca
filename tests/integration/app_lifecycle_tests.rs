/*!
 * Integration tests for application lifecycle
 */

use anyhow::Result;
use subtext::app_config::{Config, LineEnding};
use subtext::app_controller::{Controller, ReflowMode};
use subtext::subtitle_processor::SubtitleCollection;
use crate::common;

/// Test the controller initialization with default config
#[test]
fn test_controllerInitialization_withDefaultConfig_shouldSucceed() -> Result<()> {
    let controller = Controller::new_for_test()?;
    assert_eq!(controller.config().line_breaking.minimum_length, 5);
    Ok(())
}

/// Test that an invalid configuration is refused
#[test]
fn test_controllerWithConfig_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.encoding.default_codepage = 437;
    assert!(Controller::with_config(config).is_err());
}

/// Test a full reflow to the default output path
#[test]
fn test_reflow_withDefaultOutput_shouldWriteNextToInput() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    let controller = Controller::new_for_test()?;

    let report = controller.reflow(&input, None, ReflowMode::Break, false)?;

    assert_eq!(report.output_path, temp_dir.path().join("movie.reflow.srt"));
    assert_eq!(report.cue_count, 3);
    assert_eq!(report.changed_count, 2);

    let written = SubtitleCollection::load(&report.output_path, controller.config())?;
    assert_eq!(written.entries[0].text, "We are going to the house\nand you are with us today.");
    assert_eq!(written.entries[2].text, "You and your friends are always\nlate, and we are tired of it.");
    Ok(())
}

/// Test that an existing output is only replaced when forced
#[test]
fn test_reflow_withExistingOutput_shouldRequireForce() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    let output = common::create_test_file(temp_dir.path(), "existing.srt", "keep me")?;
    let controller = Controller::new_for_test()?;

    let result = controller.reflow(&input, Some(output.clone()), ReflowMode::Break, false);
    assert!(result.is_err());
    assert_eq!(std::fs::read_to_string(&output)?, "keep me");

    controller.reflow(&input, Some(output.clone()), ReflowMode::Break, true)?;
    assert!(std::fs::read_to_string(&output)?.starts_with("1\n00:00:01,000 --> 00:00:04,000\n"));
    Ok(())
}

/// Test that unbreaking a broken file restores the original cues
#[test]
fn test_reflow_withUnbreakAfterBreak_shouldRestoreCues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "movie.srt")?;
    let broken = temp_dir.path().join("broken.srt");
    let restored = temp_dir.path().join("restored.srt");
    let controller = Controller::new_for_test()?;

    controller.reflow(&input, Some(broken.clone()), ReflowMode::Break, false)?;
    let report = controller.reflow(&broken, Some(restored.clone()), ReflowMode::Unbreak, false)?;
    assert_eq!(report.changed_count, 2);

    let original = SubtitleCollection::load(&input, controller.config())?;
    let round_trip = SubtitleCollection::load(&restored, controller.config())?;
    assert_eq!(round_trip.entries, original.entries);
    Ok(())
}

/// Test single-text reflow with a CRLF separator
#[test]
fn test_reflowText_withCrLfConfig_shouldUseSeparator() -> Result<()> {
    let mut config = Config::default();
    config.line_breaking.line_ending = LineEnding::CrLf;
    let controller = Controller::with_config(config)?;

    let broken = controller.reflow_text("Hello there, my friend. How are you?", ReflowMode::Break);
    assert_eq!(broken, "Hello there, my friend.\r\nHow are you?");
    assert_eq!(
        controller.reflow_text(&broken, ReflowMode::Unbreak),
        "Hello there, my friend. How are you?"
    );
    Ok(())
}

/// Test that a missing input fails without creating an output
#[test]
fn test_reflow_withMissingInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::new_for_test()?;

    let result = controller.reflow(temp_dir.path().join("missing.srt"), None, ReflowMode::Break, false);

    assert!(result.is_err());
    assert!(!temp_dir.path().join("missing.reflow.srt").exists());
    Ok(())
}
