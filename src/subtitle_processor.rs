use std::fs;
use std::fs::File;
use std::fmt;
use std::io::Write;
use std::path::Path;
use anyhow::{Result, Context};
use log::{warn, debug};
use crate::errors::SubtitleError;
use crate::timecode::{Separator, Timestamp};

// @module: Subtitle track model: parsing, serialization and window extraction

// @const: Timing line token, exact literal surrounded by single spaces on output
const TIMING_ARROW: &str = "-->";

// @struct: Single subtitle cue
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    // @field: Sequence number, meaningful only within its track;
    // reassigned on every serialization
    pub seq_num: usize,

    // @field: Start time
    pub start: Timestamp,

    // @field: End time, >= start
    pub end: Timestamp,

    // @field: Cue text, internal line breaks preserved as '\n'
    pub text: String,
}

impl Cue {
    /// Creates a new cue
    pub fn new(seq_num: usize, start: Timestamp, end: Timestamp, text: String) -> Self {
        Cue {
            seq_num,
            start,
            end,
            text,
        }
    }

    // @creates: A copy shifted so `origin` becomes time zero; text carried unchanged
    pub fn rebased(&self, origin: Timestamp) -> Self {
        Cue {
            seq_num: self.seq_num,
            start: self.start - origin,
            end: self.end - origin,
            text: self.text.clone(),
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(
            f,
            "{} {} {}",
            self.start.format(Separator::Comma),
            TIMING_ARROW,
            self.end.format(Separator::Comma)
        )?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// One skipped block from a best-effort parse, reported to the caller
/// alongside the partial result.
#[derive(Debug, Clone)]
pub struct ParseDiagnostic {
    /// Zero-based position of the block in the document
    pub block_index: usize,

    /// Why the block was skipped
    pub message: String,

    /// The raw block text, for inspection
    pub raw: String,
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "block {}: {}", self.block_index, self.message)
    }
}

/// Ordered collection of cues representing one subtitle file's contents.
///
/// Insertion order is document order; overlapping or non-contiguous cues are
/// accepted as-is since auto-generated tracks frequently contain them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubtitleTrack {
    /// Cues in document order
    pub cues: Vec<Cue>,
}

impl SubtitleTrack {
    /// Create an empty track
    pub fn new() -> Self {
        SubtitleTrack { cues: Vec::new() }
    }

    /// Number of cues in the track
    pub fn len(&self) -> usize {
        self.cues.len()
    }

    /// Whether the track has no cues
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Parse an SRT document from a file
    pub fn from_srt_file<P: AsRef<Path>>(path: P) -> Result<(Self, Vec<ParseDiagnostic>)> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read subtitle file: {}", path.display()))?;
        Ok(Self::parse_srt_string(&content))
    }

    /// Parse SRT document text into a track, best-effort.
    ///
    /// Blocks are separated by blank lines; each block is an integer index
    /// line, a `start --> end` timing line, then zero or more text lines.
    /// A block that does not match this shape is skipped and reported as a
    /// diagnostic — one bad block never aborts the parse. Document order is
    /// preserved and stored indices are kept as found (they are overwritten
    /// on re-serialization anyway).
    pub fn parse_srt_string(content: &str) -> (Self, Vec<ParseDiagnostic>) {
        let mut cues = Vec::new();
        let mut diagnostics = Vec::new();

        // Strip a BOM if present so the first index line parses
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        for (block_index, block) in split_blocks(content).into_iter().enumerate() {
            match parse_block(&block) {
                Ok(cue) => cues.push(cue),
                Err(message) => {
                    warn!("Skipping malformed subtitle block {}: {}", block_index, message);
                    diagnostics.push(ParseDiagnostic {
                        block_index,
                        message,
                        raw: block.join("\n"),
                    });
                }
            }
        }

        if cues.is_empty() {
            warn!("No valid subtitle cues found in content");
        } else {
            debug!(
                "Parsed {} cues ({} malformed blocks skipped)",
                cues.len(),
                diagnostics.len()
            );
        }

        (SubtitleTrack { cues }, diagnostics)
    }

    /// Render the track as SRT document text.
    ///
    /// Each cue receives a fresh 1-based sequential index from its position in
    /// the track, independent of its stored index. The output is valid input
    /// to [`SubtitleTrack::parse_srt_string`].
    pub fn to_srt_string(&self) -> String {
        let mut out = String::new();
        for (position, cue) in self.cues.iter().enumerate() {
            out.push_str(&(position + 1).to_string());
            out.push('\n');
            out.push_str(&cue.start.format(Separator::Comma));
            out.push(' ');
            out.push_str(TIMING_ARROW);
            out.push(' ');
            out.push_str(&cue.end.format(Separator::Comma));
            out.push('\n');
            out.push_str(&cue.text);
            out.push('\n');
            out.push('\n');
        }
        out
    }

    /// Write the track to an SRT file
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;
        file.write_all(self.to_srt_string().as_bytes())
            .with_context(|| format!("Failed to write subtitle file: {}", path.display()))?;

        Ok(())
    }

    /// Extract the cues fully contained in `[start, end)` and re-base them so
    /// the window start becomes time zero.
    ///
    /// A cue straddling either boundary is dropped entirely rather than
    /// truncated — a partial cue would carry garbled caption text. An empty
    /// result is valid, not an error. Fails only if the window itself is
    /// inverted.
    pub fn slice(&self, start: Timestamp, end: Timestamp) -> Result<Self, SubtitleError> {
        if end < start {
            return Err(SubtitleError::InvalidWindow {
                start: start.format(Separator::Comma),
                end: end.format(Separator::Comma),
            });
        }

        let cues: Vec<Cue> = self
            .cues
            .iter()
            .filter(|cue| cue.start >= start && cue.end <= end)
            .map(|cue| cue.rebased(start))
            .collect();

        debug!(
            "Window {} -> {}: kept {} of {} cues",
            start,
            end,
            cues.len(),
            self.cues.len()
        );

        Ok(SubtitleTrack { cues })
    }
}

impl fmt::Display for SubtitleTrack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Track")?;
        writeln!(f, "Cues: {}", self.cues.len())?;
        Ok(())
    }
}

// Split document text into blocks on blank-line boundaries. Lines are
// trimmed of trailing carriage returns so CRLF documents parse the same
// as LF ones.
fn split_blocks(content: &str) -> Vec<Vec<String>> {
    let mut blocks = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for line in content.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line.to_string());
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

// Parse one block: index line, timing line, text lines. Returns a
// description of what went wrong for the diagnostics list.
fn parse_block(lines: &[String]) -> Result<Cue, String> {
    if lines.len() < 2 {
        return Err(format!("expected at least 2 lines, found {}", lines.len()));
    }

    let seq_num: usize = lines[0]
        .trim()
        .parse()
        .map_err(|_| format!("non-numeric index line: {:?}", lines[0]))?;

    let timing = lines[1].trim();
    let (start_text, end_text) = timing
        .split_once(TIMING_ARROW)
        .ok_or_else(|| format!("missing timing arrow in line: {:?}", timing))?;

    let start = Timestamp::parse(start_text.trim()).map_err(|e| e.to_string())?;
    let end = Timestamp::parse(end_text.trim()).map_err(|e| e.to_string())?;

    if end < start {
        return Err(format!(
            "end time {} precedes start time {}",
            end, start
        ));
    }

    let text = lines[2..].join("\n");

    Ok(Cue::new(seq_num, start, end, text))
}
