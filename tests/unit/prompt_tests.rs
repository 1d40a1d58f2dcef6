/*!
 * Tests for the highlight prompt template
 */

use clipchop::prompt::HighlightPrompt;

/// Test that the rendered prompt carries the clip policy and transcript
#[test]
fn test_render_withPolicy_shouldSubstitutePlaceholders() {
    let prompt = HighlightPrompt::new(3, 10, 30).render("TRANSCRIPT GOES HERE");

    assert!(prompt.contains("Select exactly 3 clip(s)"));
    assert!(prompt.contains("10-30 seconds"));
    assert!(prompt.contains("TRANSCRIPT GOES HERE"));
    assert!(!prompt.contains("{clip_count}"));
    assert!(!prompt.contains("{transcript}"));
}

/// Test that the prompt pins the exact output contract the parser expects
#[test]
fn test_render_shouldDescribeParseableFormat() {
    let prompt = HighlightPrompt::new(2, 10, 30).render("text");

    assert!(prompt.contains("[Start time] → [End time]"));
    assert!(prompt.contains("Reason:"));
    assert!(prompt.contains("---"));
    assert!(prompt.contains("HH:MM:SS,mmm"));
}

/// Test that a zero clip count is bumped to one
#[test]
fn test_new_withZeroClips_shouldRequestAtLeastOne() {
    let prompt = HighlightPrompt::new(0, 10, 30).render("text");
    assert!(prompt.contains("Select exactly 1 clip(s)"));
}
