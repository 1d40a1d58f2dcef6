use std::fmt;
use std::ops::{Add, Sub};
use once_cell::sync::Lazy;
use regex::Regex;
use crate::errors::SubtitleError;

// @module: Timestamp parsing, formatting and separator conversion

// @const: Timestamp text regex, tolerant of 1-3 fraction digits and both separators
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2,}):(\d{2}):(\d{2})[,.](\d{1,3})$").unwrap()
});

/// Fraction separator used in timestamp text.
///
/// SRT uses a comma before the milliseconds, ffmpeg expects a dot. Conversion
/// between the two is a pure character substitution, never a numeric round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// Comma separator (SRT convention)
    Comma,
    /// Dot separator (ffmpeg convention)
    Dot,
}

impl Separator {
    // @returns: The separator character
    pub fn as_char(self) -> char {
        match self {
            Separator::Comma => ',',
            Separator::Dot => '.',
        }
    }
}

/// Rewrite the fraction separator of a timestamp string without re-parsing it.
///
/// Pure character substitution of `,`/`.`; everything else is passed through
/// untouched, so no precision is lost on text that a numeric round trip would
/// normalize.
pub fn convert_separator(text: &str, separator: Separator) -> String {
    text.chars()
        .map(|c| if c == ',' || c == '.' { separator.as_char() } else { c })
        .collect()
}

/// A subtitle timestamp with millisecond granularity.
///
/// Stored as signed milliseconds so that re-basing arithmetic can pass through
/// zero; rendering clamps negative values to zero (a negative timestamp is
/// never written out).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a timestamp from milliseconds
    pub fn from_millis(ms: i64) -> Self {
        Timestamp(ms)
    }

    /// Create a timestamp from whole seconds
    pub fn from_secs(secs: i64) -> Self {
        Timestamp(secs * 1_000)
    }

    /// Milliseconds since zero
    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// Seconds since zero, fractional
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1_000.0
    }

    // @parses: HH:MM:SS followed by ',' or '.' and 1-3 fraction digits
    // @tolerates: minutes/seconds >= 60 (upstream text is not guaranteed strict)
    pub fn parse(text: &str) -> Result<Self, SubtitleError> {
        let trimmed = text.trim();
        let caps = TIMESTAMP_REGEX
            .captures(trimmed)
            .ok_or_else(|| SubtitleError::MalformedTimestamp(text.to_string()))?;

        let field = |idx: usize| -> Result<i64, SubtitleError> {
            caps.get(idx)
                .map(|m| m.as_str())
                .and_then(|s| s.parse::<i64>().ok())
                .ok_or_else(|| SubtitleError::MalformedTimestamp(text.to_string()))
        };

        let hours = field(1)?;
        let minutes = field(2)?;
        let seconds = field(3)?;

        // 1-3 fraction digits scale to milliseconds: "5" is 500 ms, "50" is 500 ms
        let fraction = caps.get(4).map(|m| m.as_str()).unwrap_or("0");
        let millis = fraction
            .parse::<i64>()
            .map_err(|_| SubtitleError::MalformedTimestamp(text.to_string()))?
            * 10_i64.pow(3 - fraction.len() as u32);

        Ok(Timestamp(
            (hours * 3_600 + minutes * 60 + seconds) * 1_000 + millis,
        ))
    }

    /// Format as `HH:MM:SS` + separator + 3 zero-padded fraction digits.
    ///
    /// Negative timestamps are rendered as zero.
    pub fn format(self, separator: Separator) -> String {
        let ms = self.0.max(0);
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!(
            "{:02}:{:02}:{:02}{}{:03}",
            hours,
            minutes,
            seconds,
            separator.as_char(),
            millis
        )
    }
}

impl Add for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Timestamp) -> Timestamp {
        Timestamp(self.0 + rhs.0)
    }
}

impl Sub for Timestamp {
    type Output = Timestamp;

    fn sub(self, rhs: Timestamp) -> Timestamp {
        Timestamp(self.0 - rhs.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.format(Separator::Comma))
    }
}
