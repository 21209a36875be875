//! Error kinds for every pipeline stage.
//!
//! [`StageError`] values are recoverable: a source or an item degrades, the
//! failure is logged and recorded in the run report, and the pipeline keeps
//! going. [`PipelineError`] is the only kind that aborts a run.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// A recoverable failure of one source or one item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageError {
    /// Network failure or unexpected status while fetching a page.
    ///
    /// `status` is set when the server answered; `None` means the request
    /// never got a response (refused, timed out, body unreadable).
    #[error("source unavailable: {reason}")]
    SourceUnavailable { status: Option<u16>, reason: String },

    /// The page was fetched but the expected markup is absent.
    #[error("expected markup absent: {0}")]
    ParseMismatch(String),

    /// No content could be obtained for the item.
    #[error("content unavailable: {0}")]
    ContentUnavailable(String),

    /// The article body was found but is shorter than the minimum length.
    #[error("content too short ({chars} chars)")]
    ContentTooShort { chars: usize },

    /// The LSA summarizer could not rank the text.
    #[error("summarization failed: {0}")]
    SummarizationFailure(String),
}

impl StageError {
    /// Stable kind tag used in the JSON run report.
    pub fn kind(&self) -> StageErrorKind {
        match self {
            StageError::SourceUnavailable { .. } => StageErrorKind::SourceUnavailable,
            StageError::ParseMismatch(_) => StageErrorKind::ParseMismatch,
            StageError::ContentUnavailable(_) => StageErrorKind::ContentUnavailable,
            StageError::ContentTooShort { .. } => StageErrorKind::ContentTooShort,
            StageError::SummarizationFailure(_) => StageErrorKind::SummarizationFailure,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageErrorKind {
    SourceUnavailable,
    ParseMismatch,
    ContentUnavailable,
    ContentTooShort,
    SummarizationFailure,
}

/// A fatal pipeline failure, surfaced to the caller.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("failed to write {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors while loading the YAML configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
