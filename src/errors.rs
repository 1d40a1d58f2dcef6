/*!
 * Error types for the clipchop application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 *
 * Failure policy: parsing-stage errors (subtitle blocks, candidate segments) are
 * local — the offending unit is skipped and reported as a diagnostic alongside
 * the partial result. Construction-stage errors (a single timestamp, a single
 * window) are fatal to that one unit of work only, never to sibling units.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when working with subtitle timestamps and windows
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// Error when a timestamp string does not match `HH:MM:SS{,|.}mmm`
    #[error("Malformed timestamp: {0}")]
    MalformedTimestamp(String),

    /// Error when an extraction window ends before it starts
    #[error("Invalid window: end {end} is before start {start}")]
    InvalidWindow {
        /// Window start, formatted
        start: String,
        /// Window end, formatted
        end: String,
    },
}

/// Errors that can occur when parsing a language-model highlight response
#[derive(Error, Debug)]
pub enum CandidateError {
    /// Error when a response segment cannot be parsed; carries the raw
    /// offending text for diagnostics
    #[error("Malformed candidate segment: {0}")]
    MalformedCandidate(String),
}

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur when invoking external media tools
#[derive(Error, Debug)]
pub enum MediaToolError {
    /// Error when spawning or waiting on an external tool
    #[error("Failed to execute {tool}: {message}")]
    ExecutionFailed {
        /// Tool binary name
        tool: String,
        /// Underlying failure description
        message: String,
    },

    /// Error when the tool exits with a non-zero status
    #[error("{tool} failed: {stderr}")]
    ToolFailed {
        /// Tool binary name
        tool: String,
        /// Filtered stderr output
        stderr: String,
    },

    /// Error when the tool runs past its time budget
    #[error("{tool} timed out after {secs}s")]
    Timeout {
        /// Tool binary name
        tool: String,
        /// Timeout in seconds
        secs: u64,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from candidate parsing
    #[error("Candidate error: {0}")]
    Candidate(#[from] CandidateError),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from an external media tool
    #[error("Media tool error: {0}")]
    MediaTool(#[from] MediaToolError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
