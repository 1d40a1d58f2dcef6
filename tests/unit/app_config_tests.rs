/*!
 * Tests for configuration loading and validation
 */

use anyhow::Result;
use clipchop::app_config::{Config, LogLevel};
use crate::common;

/// Test that the default configuration is valid
#[test]
fn test_default_config_shouldValidate() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.subtitle_language, "en");
    assert_eq!(config.clip.count, 3);
    assert_eq!(config.clip.min_duration_secs, 10);
    assert_eq!(config.clip.max_duration_secs, 30);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test save/load round trip through a JSON file
#[test]
fn test_config_file_round_trip_shouldPreserveValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.clip.count = 5;
    config.provider.model = "gemini-2.5-pro".to_string();
    config.save_to_file(&path)?;

    let loaded = Config::from_file(&path)?;
    assert_eq!(loaded.clip.count, 5);
    assert_eq!(loaded.provider.model, "gemini-2.5-pro");
    Ok(())
}

/// Test that missing fields fall back to defaults
#[test]
fn test_from_file_withPartialJson_shouldApplyDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "conf.json",
        r#"{"subtitle_language": "fr"}"#,
    )?;

    let config = Config::from_file(&path)?;
    assert_eq!(config.subtitle_language, "fr");
    assert_eq!(config.clip.count, 3);
    assert_eq!(config.provider.model, "gemini-2.5-flash");
    Ok(())
}

/// Test that a zero clip count is rejected
#[test]
fn test_validate_withZeroClipCount_shouldFail() {
    let mut config = Config::default();
    config.clip.count = 0;
    assert!(config.validate().is_err());
}

/// Test that an inverted duration range is rejected
#[test]
fn test_validate_withInvertedDurations_shouldFail() {
    let mut config = Config::default();
    config.clip.min_duration_secs = 30;
    config.clip.max_duration_secs = 10;
    assert!(config.validate().is_err());
}

/// Test that an empty model name is rejected
#[test]
fn test_validate_withEmptyModel_shouldFail() {
    let mut config = Config::default();
    config.provider.model = String::new();
    assert!(config.validate().is_err());
}

/// Test the configured API key wins over the environment
#[test]
fn test_resolve_api_key_withConfiguredKey_shouldUseIt() {
    let mut config = Config::default();
    config.provider.api_key = "configured-key".to_string();
    assert_eq!(config.provider.resolve_api_key(), Some("configured-key".to_string()));
}

/// Test loading a missing file fails with context
#[test]
fn test_from_file_withMissingFile_shouldFail() {
    assert!(Config::from_file("/nonexistent/conf.json").is_err());
}
