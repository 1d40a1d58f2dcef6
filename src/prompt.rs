/*!
 * Prompt template for highlight discovery.
 *
 * The template pins the model to the exact segment format the candidate
 * parser expects: one `[start] → [end]` line and one `Reason:` line per
 * clip, segments separated by `---` lines.
 */

/// Template for the highlight-finding prompt
#[derive(Debug, Clone)]
pub struct HighlightPrompt {
    /// Number of clips to request
    clip_count: usize,
    /// Minimum clip length in seconds
    min_duration_secs: u64,
    /// Maximum clip length in seconds
    max_duration_secs: u64,
}

impl HighlightPrompt {
    const TEMPLATE: &'static str = r#"You are an expert short-form video editor.
Your job is to find the most engaging moments inside a long-form transcript with timestamps.
Each chosen clip must be {min_duration}-{max_duration} seconds long.

Criteria for engaging moments:
- Emotional reactions (laughter, surprise, anger, excitement)
- Surprising facts or insights
- Strong or controversial opinions
- Clear questions with punchy answers
- Quotable lines that stand on their own

Instructions:
1. Read the following transcript carefully.
2. Select exactly {clip_count} clip(s), the most engaging first.
3. Each clip length must be between {min_duration}-{max_duration} seconds.
4. Use timestamps in HH:MM:SS,mmm form, copied from the transcript.
5. Output format must be ONLY the following, with clips separated by a line containing exactly ---:
[Start time] → [End time]
Reason: [Why this moment is engaging, max 2 sentences]

Transcript:
{transcript}
"#;

    /// Create a prompt builder with the given clip policy
    pub fn new(clip_count: usize, min_duration_secs: u64, max_duration_secs: u64) -> Self {
        Self {
            clip_count: clip_count.max(1),
            min_duration_secs,
            max_duration_secs,
        }
    }

    /// Render the prompt for a transcript
    pub fn render(&self, transcript: &str) -> String {
        Self::TEMPLATE
            .replace("{clip_count}", &self.clip_count.to_string())
            .replace("{min_duration}", &self.min_duration_secs.to_string())
            .replace("{max_duration}", &self.max_duration_secs.to_string())
            .replace("{transcript}", transcript)
    }
}
