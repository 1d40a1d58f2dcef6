use anyhow::{anyhow, Result, Context};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::app_config::Config;
use crate::candidate_parser::{self, CandidateWindow};
use crate::file_utils::FileManager;
use crate::media_tools::MediaTools;
use crate::prompt::HighlightPrompt;
use crate::providers::Provider;
use crate::providers::gemini::{Gemini, GeminiRequest};
use crate::subtitle_processor::SubtitleTrack;

// @module: Application controller for the highlight clipping pipeline

/// Outcome of a single candidate extraction
#[derive(Debug)]
pub struct ClipResult {
    /// 1-based clip number, derived from candidate discovery order
    pub clip_number: usize,
    /// Path of the cut video
    pub video_path: PathBuf,
    /// Path of the per-clip subtitle file
    pub subtitle_path: PathBuf,
    /// The model's justification for the pick
    pub reason: String,
}

/// Main application controller for highlight clipping
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Run the full pipeline for a video URL: download, analyze, cut.
    pub async fn run(&self, url: &str, work_dir: PathBuf, force_overwrite: bool) -> Result<Vec<ClipResult>> {
        let start_time = std::time::Instant::now();

        FileManager::ensure_dir(&work_dir)?;

        // Step 1: download the video
        let spinner = self.spinner("Downloading video");
        let video_path = MediaTools::download_video(url, &work_dir)
            .await
            .context("Failed to download video")?;
        spinner.finish_and_clear();
        info!("Downloaded video: {:?}", video_path);

        // Step 2: download the auto-generated subtitles
        let spinner = self.spinner("Downloading subtitles");
        let subtitle_path =
            MediaTools::download_auto_subtitles(url, &work_dir, &self.config.subtitle_language)
                .await
                .context("Failed to download subtitles")?;
        spinner.finish_and_clear();
        info!("Downloaded subtitles: {:?}", subtitle_path);

        // Step 3: ask the model for highlight candidates
        let transcript = FileManager::read_to_string(&subtitle_path)?;
        let response_text = self.request_highlights(&transcript).await?;

        // Keep the raw response next to the outputs for inspection
        let response_log = work_dir.join("highlights.txt");
        FileManager::write_to_file(&response_log, &response_text)?;
        debug!("Saved raw model response to {:?}", response_log);

        // Step 4: cut one clip per candidate
        let results = self
            .extract_clips(&transcript, &response_text, &video_path, &work_dir, force_overwrite)
            .await?;

        info!(
            "Produced {} clip(s) in {}",
            results.len(),
            Self::format_duration(start_time.elapsed())
        );

        Ok(results)
    }

    /// Build the prompt and run it through the configured provider
    async fn request_highlights(&self, transcript: &str) -> Result<String> {
        let api_key = self
            .config
            .provider
            .resolve_api_key()
            .ok_or_else(|| anyhow!(
                "No API key configured; set provider.api_key or the GEMINI_API_KEY environment variable"
            ))?;

        let prompt = HighlightPrompt::new(
            self.config.clip.count,
            self.config.clip.min_duration_secs,
            self.config.clip.max_duration_secs,
        )
        .render(transcript);

        let client = Gemini::new(
            api_key,
            self.config.provider.endpoint.clone(),
            self.config.provider.model.clone(),
        );
        let request = GeminiRequest::new(prompt)
            .temperature(self.config.provider.temperature)
            .max_output_tokens(self.config.provider.max_output_tokens);

        let spinner = self.spinner("Asking the model for highlight moments");
        let response = client.complete(request).await;
        spinner.finish_and_clear();

        let response = response.context("Highlight request failed")?;
        let text = Gemini::extract_text(&response);
        if text.trim().is_empty() {
            return Err(anyhow!("Model returned an empty highlight response"));
        }

        Ok(text)
    }

    /// Slice the subtitle track and cut the video for every parsed candidate.
    ///
    /// Candidate failures are unit-local: an invalid window or a failed cut is
    /// logged and skipped, siblings continue. Zero surviving clips is a valid
    /// (if unfortunate) terminal state, not an error.
    async fn extract_clips(
        &self,
        transcript: &str,
        response_text: &str,
        video_path: &Path,
        work_dir: &Path,
        force_overwrite: bool,
    ) -> Result<Vec<ClipResult>> {
        let (track, track_diagnostics) = SubtitleTrack::parse_srt_string(transcript);
        for diagnostic in &track_diagnostics {
            warn!("Subtitle track: {}", diagnostic);
        }
        if track.is_empty() {
            return Err(anyhow!("No usable cues in the downloaded subtitle track"));
        }

        let (candidates, candidate_diagnostics) = candidate_parser::parse_candidates(response_text);
        for diagnostic in &candidate_diagnostics {
            warn!("Model response: {}", diagnostic);
        }
        if candidates.is_empty() {
            warn!("Model response contained no usable candidate windows");
            return Ok(Vec::new());
        }

        let label = self.clip_label(video_path);
        let mut results = Vec::new();

        // Clip numbering follows candidate discovery order
        for (position, candidate) in candidates.iter().enumerate() {
            let clip_number = position + 1;
            match self
                .extract_one_clip(&track, candidate, clip_number, &label, video_path, work_dir, force_overwrite)
                .await
            {
                Ok(result) => {
                    info!(
                        "Clip {:02}: {} -> {} ({})",
                        clip_number, candidate.start_text, candidate.end_text, result.reason
                    );
                    results.push(result);
                }
                Err(e) => {
                    error!("Skipping clip {:02}: {}", clip_number, e);
                }
            }
        }

        Ok(results)
    }

    async fn extract_one_clip(
        &self,
        track: &SubtitleTrack,
        candidate: &CandidateWindow,
        clip_number: usize,
        label: &str,
        video_path: &Path,
        work_dir: &Path,
        force_overwrite: bool,
    ) -> Result<ClipResult> {
        let clip_video = work_dir.join(format!("{}_clip{:02}.mp4", label, clip_number));
        let clip_subtitle = work_dir.join(format!("{}_clip{:02}.srt", label, clip_number));

        if clip_video.exists() && !force_overwrite {
            return Err(anyhow!(
                "Output already exists: {:?} (use -f to force overwrite)",
                clip_video
            ));
        }

        // Re-based captions for the cut; an empty slice still yields a valid
        // (captionless) clip
        let sliced = track.slice(candidate.start, candidate.end)?;
        if sliced.is_empty() {
            warn!(
                "Clip {:02}: no cue is fully contained in {} -> {}",
                clip_number, candidate.start_text, candidate.end_text
            );
        }
        sliced.write_to_srt(&clip_subtitle)?;

        MediaTools::cut_clip(
            video_path,
            &candidate.start_text,
            &candidate.end_text,
            &clip_video,
        )
        .await?;

        Ok(ClipResult {
            clip_number,
            video_path: clip_video,
            subtitle_path: clip_subtitle,
            reason: candidate.reason.clone(),
        })
    }

    // Safe path label derived from the video title
    fn clip_label(&self, video_path: &Path) -> String {
        let stem = video_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let label = FileManager::sanitize_label(&stem);
        if label.is_empty() {
            "clip".to_string()
        } else {
            label
        }
    }

    fn spinner(&self, message: &'static str) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner
    }

    // Format a duration in a human readable way
    fn format_duration(duration: std::time::Duration) -> String {
        let total_secs = duration.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
