use anyhow::{anyhow, Result, Context};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Subtitle language code requested from yt-dlp (ISO)
    #[serde(default = "default_subtitle_language")]
    pub subtitle_language: String,

    /// Clip selection policy
    #[serde(default)]
    pub clip: ClipConfig,

    /// Provider config
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Clip selection policy handed to the prompt and the extraction loop
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClipConfig {
    // @field: Number of highlight clips to request
    #[serde(default = "default_clip_count")]
    pub count: usize,

    // @field: Minimum clip length in seconds
    #[serde(default = "default_min_duration_secs")]
    pub min_duration_secs: u64,

    // @field: Maximum clip length in seconds
    #[serde(default = "default_max_duration_secs")]
    pub max_duration_secs: u64,
}

/// Provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Model name
    #[serde(default = "default_model")]
    pub model: String,

    // @field: API key; falls back to the GEMINI_API_KEY environment variable
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL, empty for the public API
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Max tokens the model may generate
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    // @field: Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

/// Log level configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational output
    #[default]
    Info,
    /// Debug output
    Debug,
    /// Trace output
    Trace,
}

fn default_subtitle_language() -> String {
    "en".to_string()
}

fn default_clip_count() -> usize {
    3
}

fn default_min_duration_secs() -> u64 {
    10
}

fn default_max_duration_secs() -> u64 {
    30
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_max_output_tokens() -> u32 {
    2048
}

fn default_temperature() -> f32 {
    0.7
}

impl Default for ClipConfig {
    fn default() -> Self {
        ClipConfig {
            count: default_clip_count(),
            min_duration_secs: default_min_duration_secs(),
            max_duration_secs: default_max_duration_secs(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            model: default_model(),
            api_key: String::new(),
            endpoint: String::new(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            subtitle_language: default_subtitle_language(),
            clip: ClipConfig::default(),
            provider: ProviderConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl ProviderConfig {
    /// Resolve the API key: config value first, then the GEMINI_API_KEY
    /// environment variable
    pub fn resolve_api_key(&self) -> Option<String> {
        if !self.api_key.is_empty() {
            return Some(self.api_key.clone());
        }
        std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty())
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.subtitle_language.is_empty() {
            return Err(anyhow!("Subtitle language must not be empty"));
        }
        if self.clip.count == 0 {
            return Err(anyhow!("Clip count must be at least 1"));
        }
        if self.clip.min_duration_secs == 0 {
            return Err(anyhow!("Minimum clip duration must be positive"));
        }
        if self.clip.max_duration_secs < self.clip.min_duration_secs {
            return Err(anyhow!(
                "Maximum clip duration {}s is shorter than minimum {}s",
                self.clip.max_duration_secs,
                self.clip.min_duration_secs
            ));
        }
        if self.provider.model.is_empty() {
            return Err(anyhow!("Provider model must not be empty"));
        }
        Ok(())
    }
}
