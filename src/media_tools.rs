use std::path::{Path, PathBuf};
use std::time::Duration;
use log::{error, debug};
use tokio::process::Command;

use crate::errors::MediaToolError;
use crate::file_utils::FileManager;
use crate::timecode::{Separator, convert_separator};

// @module: External media tool invocation (yt-dlp, ffmpeg)

// Generous budget: full-length video downloads can take a while
const DOWNLOAD_TIMEOUT_SECS: u64 = 1800;
const FFMPEG_TIMEOUT_SECS: u64 = 120;

// @struct: Wrapper around the external download and cutting tools
pub struct MediaTools;

impl MediaTools {
    /// Download a video with yt-dlp into `dir` and return the path of the
    /// downloaded file.
    ///
    /// yt-dlp names the file after the video title, so the result is located
    /// as the freshest `.mp4` (or `.webm` fallback) in the directory.
    pub async fn download_video<P: AsRef<Path>>(url: &str, dir: P) -> Result<PathBuf, MediaToolError> {
        let dir = dir.as_ref();
        Self::run_tool(
            "yt-dlp",
            &["-o", "%(title)s.%(ext)s", url],
            dir,
            DOWNLOAD_TIMEOUT_SECS,
        )
        .await?;

        FileManager::find_latest_file(dir, "mp4")
            .or_else(|| FileManager::find_latest_file(dir, "webm"))
            .ok_or_else(|| MediaToolError::ToolFailed {
                tool: "yt-dlp".to_string(),
                stderr: "no downloaded video file (.mp4 or .webm) found".to_string(),
            })
    }

    /// Download auto-generated subtitles with yt-dlp, converted to SRT, and
    /// return the path of the subtitle file.
    pub async fn download_auto_subtitles<P: AsRef<Path>>(
        url: &str,
        dir: P,
        language: &str,
    ) -> Result<PathBuf, MediaToolError> {
        let dir = dir.as_ref();
        Self::run_tool(
            "yt-dlp",
            &[
                "--write-auto-subs",
                "--sub-lang", language,
                "--skip-download",
                "--convert-subs", "srt",
                "-o", "%(title)s.%(ext)s",
                url,
            ],
            dir,
            DOWNLOAD_TIMEOUT_SECS,
        )
        .await?;

        FileManager::find_latest_file(dir, &format!("{}.srt", language))
            .or_else(|| FileManager::find_latest_file(dir, "srt"))
            .ok_or_else(|| MediaToolError::ToolFailed {
                tool: "yt-dlp".to_string(),
                stderr: format!("no downloaded subtitle file (.{}.srt) found", language),
            })
    }

    /// Cut `[start, end)` out of a video with ffmpeg stream copy.
    ///
    /// The bounds arrive in subtitle text convention (comma fractions) and are
    /// handed to ffmpeg in dot convention via pure separator substitution, so
    /// no precision is lost to a numeric round trip.
    pub async fn cut_clip<P1: AsRef<Path>, P2: AsRef<Path>>(
        input: P1,
        start_text: &str,
        end_text: &str,
        output: P2,
    ) -> Result<(), MediaToolError> {
        let input = input.as_ref();
        let output = output.as_ref();

        let start = convert_separator(start_text, Separator::Dot);
        let end = convert_separator(end_text, Separator::Dot);

        debug!(
            "Cutting {} -> {} from {:?} into {:?}",
            start, end, input, output
        );

        let workdir = input.parent().unwrap_or(Path::new(".")).to_path_buf();
        let input_arg = input.to_string_lossy().to_string();
        let output_arg = output.to_string_lossy().to_string();

        Self::run_tool(
            "ffmpeg",
            &[
                "-y",
                "-ss", &start,
                "-to", &end,
                "-i", &input_arg,
                "-c", "copy",
                &output_arg,
            ],
            &workdir,
            FFMPEG_TIMEOUT_SECS,
        )
        .await?;

        Ok(())
    }

    /// Run an external tool with a timeout; non-zero exit or timeout is an
    /// error. The child is killed if the timeout wins, so a stalled download
    /// cannot keep writing into the work directory after the error returns.
    pub async fn run_tool(
        tool: &str,
        args: &[&str],
        workdir: &Path,
        timeout_secs: u64,
    ) -> Result<String, MediaToolError> {
        debug!("Executing: {} {}", tool, args.join(" "));

        let command_future = Command::new(tool)
            .args(args)
            .current_dir(workdir)
            .kill_on_drop(true)
            .output();

        let timeout_duration = Duration::from_secs(timeout_secs);
        let output = tokio::select! {
            result = command_future => {
                result.map_err(|e| MediaToolError::ExecutionFailed {
                    tool: tool.to_string(),
                    message: e.to_string(),
                })?
            },
            _ = tokio::time::sleep(timeout_duration) => {
                return Err(MediaToolError::Timeout {
                    tool: tool.to_string(),
                    secs: timeout_secs,
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let filtered = Self::filter_tool_stderr(&stderr);
            error!("{} failed: {}", tool, filtered);
            return Err(MediaToolError::ToolFailed {
                tool: tool.to_string(),
                stderr: filtered,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Filter tool stderr to only show meaningful error lines, stripping the
    /// ffmpeg version banner, build configuration, and stream metadata noise.
    fn filter_tool_stderr(stderr: &str) -> String {
        let dominated_prefixes = [
            "ffmpeg version",
            "  built with",
            "  configuration:",
            "  lib",
            "Input #",
            "  Metadata:",
            "  Duration:",
            "  Stream #",
            "Output #",
            "Stream mapping:",
            "Press [q]",
            "[download]",
            "[info]",
        ];

        let meaningful: Vec<&str> = stderr
            .lines()
            .filter(|line| {
                let trimmed = line.trim_end();
                if trimmed.trim().is_empty() {
                    return false;
                }
                !dominated_prefixes.iter().any(|p| trimmed.starts_with(p))
            })
            .collect();

        if meaningful.is_empty() {
            "unknown tool error (stderr was empty after filtering)".to_string()
        } else {
            meaningful.join("\n")
        }
    }
}
