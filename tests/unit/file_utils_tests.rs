/*!
 * Tests for file utilities and label sanitization
 */

use std::thread::sleep;
use std::time::Duration;
use anyhow::Result;
use clipchop::file_utils::FileManager;
use crate::common;

/// Test that every forbidden character is removed
#[test]
fn test_sanitize_label_withForbiddenChars_shouldRemoveThem() {
    let input = r#"My <Great> Video: "Part 1/2"? *wow* | and\more"#;
    let sanitized = FileManager::sanitize_label(input);

    for forbidden in ['\\', '/', '*', '?', ':', '"', '<', '>', '|'] {
        assert!(!sanitized.contains(forbidden), "found {:?} in {:?}", forbidden, sanitized);
    }
    assert_eq!(sanitized, "My Great Video Part 12 wow  andmore");
}

/// Test that clean text passes through unchanged
#[test]
fn test_sanitize_label_withCleanText_shouldBeIdentity() {
    assert_eq!(FileManager::sanitize_label("plain title 42"), "plain title 42");
}

/// Test that empty input yields empty output
#[test]
fn test_sanitize_label_withEmptyInput_shouldReturnEmpty() {
    assert_eq!(FileManager::sanitize_label(""), "");
}

/// Test finding the most recently modified file with an extension
#[test]
fn test_find_latest_file_withTwoFiles_shouldPickNewest() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    common::create_test_file(&dir, "older.mp4", "old")?;
    // mtime granularity guard
    sleep(Duration::from_millis(50));
    let newer = common::create_test_file(&dir, "newer.mp4", "new")?;

    let found = FileManager::find_latest_file(&dir, "mp4");
    assert_eq!(found, Some(newer));
    Ok(())
}

/// Test compound extensions such as "en.srt"
#[test]
fn test_find_latest_file_withCompoundExtension_shouldMatchSuffix() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    common::create_test_file(&dir, "video.fr.srt", "bonjour")?;
    let english = common::create_test_file(&dir, "video.en.srt", "hello")?;

    let found = FileManager::find_latest_file(&dir, "en.srt");
    assert_eq!(found, Some(english));
    Ok(())
}

/// Test that a directory without matches yields None
#[test]
fn test_find_latest_file_withNoMatches_shouldReturnNone() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(&temp_dir.path().to_path_buf(), "notes.txt", "hi")?;

    assert!(FileManager::find_latest_file(temp_dir.path(), "mp4").is_none());
    Ok(())
}

/// Test write then read round trip, including parent directory creation
#[test]
fn test_write_to_file_withNestedPath_shouldCreateParents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("a").join("b").join("file.txt");

    FileManager::write_to_file(&path, "content")?;

    assert!(FileManager::file_exists(&path));
    assert_eq!(FileManager::read_to_string(&path)?, "content");
    Ok(())
}

/// Test ensure_dir is idempotent
#[test]
fn test_ensure_dir_withExistingDir_shouldSucceed() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().join("sub");

    FileManager::ensure_dir(&dir)?;
    FileManager::ensure_dir(&dir)?;

    assert!(FileManager::dir_exists(&dir));
    Ok(())
}

/// Test recursive file listing by extension
#[test]
fn test_find_files_withNestedFiles_shouldFindAll() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    common::create_test_file(&dir, "one.srt", "1")?;
    FileManager::ensure_dir(dir.join("nested"))?;
    common::create_test_file(&dir.join("nested"), "two.srt", "2")?;
    common::create_test_file(&dir, "other.txt", "x")?;

    let found = FileManager::find_files(&dir, "srt")?;
    assert_eq!(found.len(), 2);
    Ok(())
}
