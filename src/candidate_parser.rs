use std::fmt;
use log::{warn, debug};
use crate::errors::CandidateError;
use crate::timecode::Timestamp;

// @module: Parsing of language-model highlight responses into candidate windows

/// Literal line separating candidate segments in the model response
pub const SEGMENT_SEPARATOR: &str = "---";

// Arrow between the two time tokens; the prompt asks for the glyph but
// models occasionally fall back to ASCII, so both are accepted
const ARROW_GLYPH: &str = "→";
const ARROW_ASCII: &str = "->";

/// Prefix of the justification line, matched case-sensitively
const REASON_PREFIX: &str = "Reason:";

/// One proposed highlight window as emitted by the language model.
///
/// The original time texts are kept next to the parsed timestamps so the
/// bounds can be handed to ffmpeg via pure separator conversion, without a
/// round trip through numeric form.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateWindow {
    /// Start bound exactly as emitted by the model
    pub start_text: String,

    /// End bound exactly as emitted by the model
    pub end_text: String,

    /// Parsed start bound
    pub start: Timestamp,

    /// Parsed end bound
    pub end: Timestamp,

    /// The model's justification for the pick
    pub reason: String,
}

/// One skipped response segment, reported alongside the partial result
#[derive(Debug)]
pub struct CandidateDiagnostic {
    /// Zero-based position of the segment in the response
    pub segment_index: usize,

    /// The segment-level error, carrying the raw offending text
    pub error: CandidateError,
}

impl fmt::Display for CandidateDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "segment {}: {}", self.segment_index, self.error)
    }
}

/// Parse a free-text model response into candidate windows, best-effort.
///
/// Segments are separated by a literal `---` line. Each segment must contain
/// a first non-blank line of the shape `[start] → [end]` and a justification
/// line `Reason: <text>`. Segments that are blank after trimming are
/// discarded; segments that fail to parse are skipped with a diagnostic while
/// their siblings continue — generative output is not format-guaranteed, so
/// one bad segment never aborts the batch. Output order is discovery order,
/// which defines clip numbering downstream.
pub fn parse_candidates(response: &str) -> (Vec<CandidateWindow>, Vec<CandidateDiagnostic>) {
    let mut candidates = Vec::new();
    let mut diagnostics = Vec::new();

    for (segment_index, segment) in split_segments(response).into_iter().enumerate() {
        if segment.trim().is_empty() {
            continue;
        }
        match parse_segment(&segment) {
            Ok(candidate) => candidates.push(candidate),
            Err(error) => {
                warn!("Skipping malformed candidate segment {}: {}", segment_index, error);
                diagnostics.push(CandidateDiagnostic {
                    segment_index,
                    error,
                });
            }
        }
    }

    debug!(
        "Parsed {} candidate windows ({} malformed segments skipped)",
        candidates.len(),
        diagnostics.len()
    );

    (candidates, diagnostics)
}

// Split the response on separator lines. A line counts as a separator when
// it is exactly the token after trimming, so dashes inside a reason do not
// cut a segment in half.
fn split_segments(response: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();

    for line in response.lines() {
        if line.trim() == SEGMENT_SEPARATOR {
            segments.push(std::mem::take(&mut current));
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    segments.push(current);

    segments
}

fn parse_segment(segment: &str) -> Result<CandidateWindow, CandidateError> {
    let malformed = || CandidateError::MalformedCandidate(segment.trim().to_string());

    let mut lines = segment.lines().map(str::trim).filter(|l| !l.is_empty());

    let time_line = lines.next().ok_or_else(malformed)?;
    let reason_line = lines.next().ok_or_else(malformed)?;

    let (start_text, end_text) = split_time_line(time_line).ok_or_else(malformed)?;

    let start = Timestamp::parse(&start_text).map_err(|_| malformed())?;
    let end = Timestamp::parse(&end_text).map_err(|_| malformed())?;

    // The label is part of the prompt contract but its absence is a minor
    // deviation, not grounds to drop the segment
    let reason = reason_line
        .strip_prefix(REASON_PREFIX)
        .unwrap_or(reason_line)
        .trim()
        .to_string();

    Ok(CandidateWindow {
        start_text,
        end_text,
        start,
        end,
        reason,
    })
}

// Split `[start] → [end]` into its two time tokens, accepting either arrow
// form and stripping the literal brackets.
fn split_time_line(line: &str) -> Option<(String, String)> {
    let (lhs, rhs) = line
        .split_once(ARROW_GLYPH)
        .or_else(|| line.split_once(ARROW_ASCII))?;

    let strip = |token: &str| {
        token
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']')
            .trim()
            .to_string()
    };

    let start = strip(lhs);
    let end = strip(rhs);
    if start.is_empty() || end.is_empty() {
        return None;
    }

    Some((start, end))
}
