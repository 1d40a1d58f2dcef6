use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

// @module: File and directory utilities

// @const: Characters never allowed in a filename label
const FORBIDDEN_LABEL_CHARS: [char; 9] = ['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Strip every character that is illegal in common filesystem path
    /// components from a free-form label.
    ///
    /// Deterministic and total: empty input yields empty output, and the
    /// caller supplies a fallback label when that matters.
    pub fn sanitize_label(text: &str) -> String {
        text.chars()
            .filter(|c| !FORBIDDEN_LABEL_CHARS.contains(c))
            .collect()
    }

    /// Find the most recently modified file with the given extension in a
    /// directory (non-recursive).
    ///
    /// yt-dlp names its output after the video title, so the freshest file of
    /// the right type is the one just downloaded.
    pub fn find_latest_file<P: AsRef<Path>>(dir: P, extension: &str) -> Option<PathBuf> {
        let normalized_ext = extension.trim_start_matches('.');

        let mut latest: Option<(SystemTime, PathBuf)> = None;
        for entry in WalkDir::new(dir.as_ref())
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let matches_ext = path
                .to_string_lossy()
                .to_lowercase()
                .ends_with(&format!(".{}", normalized_ext.to_lowercase()));
            if !matches_ext {
                continue;
            }

            let modified = entry
                .metadata()
                .ok()
                .and_then(|m| m.modified().ok())
                .unwrap_or(SystemTime::UNIX_EPOCH);

            let newer = latest
                .as_ref()
                .map(|(best, _)| modified > *best)
                .unwrap_or(true);
            if newer {
                latest = Some((modified, path.to_path_buf()));
            }
        }

        latest.map(|(_, path)| path)
    }

    /// Find all files with a specific extension in a directory
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let normalized_ext = extension.trim_start_matches('.').to_lowercase();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(&normalized_ext) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        Ok(result)
    }
}
