/*!
 * Tests for timestamp parsing, formatting and separator conversion
 */

use clipchop::errors::SubtitleError;
use clipchop::timecode::{Separator, Timestamp, convert_separator};

/// Test timestamp parsing with comma fraction separator
#[test]
fn test_parse_withCommaFraction_shouldReturnMilliseconds() {
    let ts = Timestamp::parse("00:01:05,500").unwrap();
    assert_eq!(ts.as_millis(), 65_500);
    assert_eq!(ts.as_secs_f64(), 65.5);
}

/// Test timestamp parsing with dot fraction separator
#[test]
fn test_parse_withDotFraction_shouldReturnMilliseconds() {
    let ts = Timestamp::parse("01:23:45.678").unwrap();
    assert_eq!(ts.as_millis(), 5_025_678);
}

/// Test that short fractions scale to milliseconds
#[test]
fn test_parse_withShortFractions_shouldScaleToMilliseconds() {
    assert_eq!(Timestamp::parse("00:00:01,5").unwrap().as_millis(), 1_500);
    assert_eq!(Timestamp::parse("00:00:01,25").unwrap().as_millis(), 1_250);
    assert_eq!(Timestamp::parse("00:00:01,250").unwrap().as_millis(), 1_250);
}

/// Test that out-of-range minutes and seconds are tolerated, not rejected
#[test]
fn test_parse_withOverflowingFields_shouldStoreAsGiven() {
    let ts = Timestamp::parse("00:99:99,000").unwrap();
    assert_eq!(ts.as_millis(), (99 * 60 + 99) * 1_000);
}

/// Test that hours have no upper bound
#[test]
fn test_parse_withLargeHours_shouldRoundTrip() {
    let ts = Timestamp::parse("100:00:00,000").unwrap();
    assert_eq!(ts.format(Separator::Comma), "100:00:00,000");
}

/// Test rejection of text that does not match the pattern
#[test]
fn test_parse_withMalformedText_shouldFail() {
    for bad in ["", "abc", "1:2:3,000", "00:00:10", "00:00:10,", "00:00:10,1234", "00:00,10"] {
        let result = Timestamp::parse(bad);
        assert!(
            matches!(result, Err(SubtitleError::MalformedTimestamp(_))),
            "expected MalformedTimestamp for {:?}",
            bad
        );
    }
}

/// Test formatting with both separators
#[test]
fn test_format_withBothSeparators_shouldZeroPad() {
    let ts = Timestamp::from_millis(65_500);
    assert_eq!(ts.format(Separator::Comma), "00:01:05,500");
    assert_eq!(ts.format(Separator::Dot), "00:01:05.500");
}

/// Test that negative timestamps render as zero
#[test]
fn test_format_withNegativeTimestamp_shouldClampToZero() {
    let ts = Timestamp::from_millis(-5_000);
    assert_eq!(ts.format(Separator::Comma), "00:00:00,000");
}

/// Test the parse/format round trip at millisecond resolution
#[test]
fn test_round_trip_withWellFormedText_shouldBeLossless() {
    for text in ["00:00:00,000", "00:01:05,500", "01:23:45,678", "12:59:59,999"] {
        let ts = Timestamp::parse(text).unwrap();
        assert_eq!(ts.format(Separator::Comma), text);
    }
}

/// Test separator conversion as pure character substitution
#[test]
fn test_convert_separator_withCommaText_shouldSwapWithoutReparse() {
    assert_eq!(convert_separator("00:01:05,500", Separator::Dot), "00:01:05.500");
    assert_eq!(convert_separator("00:01:05.500", Separator::Comma), "00:01:05,500");
    // Already-canonical text passes through unchanged
    assert_eq!(convert_separator("00:01:05,500", Separator::Comma), "00:01:05,500");
}

/// Test rebasing arithmetic through the Sub impl
#[test]
fn test_subtraction_withEarlierOrigin_shouldShiftTowardZero() {
    let cue_start = Timestamp::parse("00:00:12,000").unwrap();
    let origin = Timestamp::parse("00:00:10,000").unwrap();
    assert_eq!((cue_start - origin).as_millis(), 2_000);
}

/// Test surrounding whitespace tolerance
#[test]
fn test_parse_withSurroundingWhitespace_shouldTrim() {
    let ts = Timestamp::parse(" 00:00:05,000 ").unwrap();
    assert_eq!(ts.as_millis(), 5_000);
}
