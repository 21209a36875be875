//! Data models shared by the pipeline stages.
//!
//! - [`SourceKind`]: the fixed set of news sites
//! - [`NewsItem`]: one discovered article, filled in stage by stage
//! - [`RunReport`]: per-source and per-item outcome of one run, serialized to JSON

use crate::error::{StageError, StageErrorKind};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use url::Url;

/// The news sites the pipeline knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    MundoGremial,
    Ambito,
    Cronista,
}

impl SourceKind {
    /// Human-readable label printed in the document.
    pub fn label(self) -> &'static str {
        match self {
            SourceKind::MundoGremial => "Mundo Gremial",
            SourceKind::Ambito => "Ámbito",
            SourceKind::Cronista => "El Cronista",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A news item discovered on a source's landing page.
///
/// Adapters create stubs with only `title`, `source` and `link`; `content` and
/// `summary` are filled once each by the extract and summarize stages.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsItem {
    pub title: String,
    pub source: SourceKind,
    /// Always absolute; relative hrefs are resolved before a stub is built.
    pub link: Url,
    pub content: Option<String>,
    pub summary: Option<String>,
}

impl NewsItem {
    /// Build a listing stub. Returns `None` when the title is blank.
    ///
    /// Only leading and trailing whitespace is trimmed; the title is otherwise
    /// kept as extracted so deduplication compares what the source published.
    pub fn stub(title: &str, source: SourceKind, link: Url) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        Some(Self {
            title: title.to_string(),
            source,
            link,
            content: None,
            summary: None,
        })
    }
}

/// Outcome of a single stage for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "kind")]
pub enum StageStatus {
    Ok,
    Degraded(StageErrorKind),
}

impl<T> From<&Result<T, StageError>> for StageStatus {
    fn from(result: &Result<T, StageError>) -> Self {
        match result {
            Ok(_) => StageStatus::Ok,
            Err(e) => StageStatus::Degraded(e.kind()),
        }
    }
}

/// How one source fared at the listing stage.
#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    pub source: SourceKind,
    pub listed: usize,
    pub error: Option<String>,
}

/// How one item fared at the extract and summarize stages.
#[derive(Debug, Clone, Serialize)]
pub struct ItemReport {
    pub title: String,
    pub source: SourceKind,
    pub link: String,
    pub content: StageStatus,
    pub summary: StageStatus,
}

/// Everything a caller needs to know about one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Path of the written document; this is the artifact handle.
    pub artifact: PathBuf,
    /// Local generation time, `YYYY-MM-DD_HH-MM`.
    pub generated_at: String,
    pub sources: Vec<SourceReport>,
    pub duplicates_removed: usize,
    pub items: Vec<ItemReport>,
}

impl RunReport {
    /// Number of items that went through both stages without degrading.
    pub fn fully_processed(&self) -> usize {
        self.items
            .iter()
            .filter(|i| i.content == StageStatus::Ok && i.summary == StageStatus::Ok)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link() -> Url {
        Url::parse("https://example.com/nota").unwrap()
    }

    #[test]
    fn test_stub_trims_title_ends_only() {
        let item = NewsItem::stub("  Paro  general\n del lunes ", SourceKind::Ambito, link()).unwrap();
        assert_eq!(item.title, "Paro  general\n del lunes");
        assert_eq!(item.content, None);
        assert_eq!(item.summary, None);
    }

    #[test]
    fn test_stub_rejects_blank_title() {
        assert!(NewsItem::stub("   \n\t", SourceKind::Cronista, link()).is_none());
    }

    #[test]
    fn test_source_labels() {
        assert_eq!(SourceKind::MundoGremial.to_string(), "Mundo Gremial");
        assert_eq!(SourceKind::Ambito.label(), "Ámbito");
        assert_eq!(SourceKind::Cronista.label(), "El Cronista");
    }

    #[test]
    fn test_stage_status_serialization() {
        let ok = serde_json::to_string(&StageStatus::Ok).unwrap();
        assert_eq!(ok, r#"{"status":"ok"}"#);

        let degraded =
            serde_json::to_string(&StageStatus::Degraded(StageErrorKind::ContentTooShort)).unwrap();
        assert_eq!(degraded, r#"{"status":"degraded","kind":"content_too_short"}"#);
    }

    #[test]
    fn test_stage_status_from_result() {
        let ok: Result<String, StageError> = Ok("texto".into());
        let err: Result<String, StageError> = Err(StageError::ParseMismatch("main".into()));
        assert_eq!(StageStatus::from(&ok), StageStatus::Ok);
        assert_eq!(
            StageStatus::from(&err),
            StageStatus::Degraded(StageErrorKind::ParseMismatch)
        );
    }

    #[test]
    fn test_fully_processed_counts_clean_items() {
        let item = |content, summary| ItemReport {
            title: "t".into(),
            source: SourceKind::Ambito,
            link: "https://example.com".into(),
            content,
            summary,
        };
        let report = RunReport {
            artifact: PathBuf::from("x.md"),
            generated_at: "2025-05-06_10-00".into(),
            sources: vec![],
            duplicates_removed: 0,
            items: vec![
                item(StageStatus::Ok, StageStatus::Ok),
                item(
                    StageStatus::Degraded(StageErrorKind::ContentTooShort),
                    StageStatus::Ok,
                ),
            ],
        };
        assert_eq!(report.fully_processed(), 1);
    }
}
