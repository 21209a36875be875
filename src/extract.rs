//! Article body extraction.
//!
//! The extractor picks the source owning a link, fetches the page, finds
//! that source's body container and joins the text of its non-empty `<p>`
//! descendants. Every failure maps to a fixed sentinel string through
//! [`ContentExtractor::extract`], so one broken article never stops a run.

use crate::error::StageError;
use crate::http::Fetcher;
use crate::scrapers::NewsSource;
use crate::utils::collapse_whitespace;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use url::Url;

/// Returned when the article page answered with a non-success status.
pub const NO_ACCESS: &str = "No se pudo acceder al contenido.";
/// Returned when the body container is missing or the page could not be fetched.
pub const NOT_EXTRACTED: &str = "No se pudo extraer el contenido.";
/// Returned when the body is shorter than the minimum length.
pub const NOT_RELEVANT: &str = "No se encontró contenido relevante.";

static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

pub struct ContentExtractor {
    fetcher: Fetcher,
    sources: Vec<Arc<dyn NewsSource>>,
    min_chars: usize,
}

impl ContentExtractor {
    pub fn new(fetcher: Fetcher, sources: Vec<Arc<dyn NewsSource>>, min_chars: usize) -> Self {
        Self {
            fetcher,
            sources,
            min_chars,
        }
    }

    /// Body text of the article at `link`, or the sentinel for whatever went wrong.
    pub async fn extract(&self, link: &Url) -> String {
        match self.try_extract(link).await {
            Ok(text) => text,
            Err(e) => sentinel(&e).to_string(),
        }
    }

    /// Body text of the article at `link`.
    #[instrument(level = "info", skip_all, fields(url = %link))]
    pub async fn try_extract(&self, link: &Url) -> Result<String, StageError> {
        let source = self
            .sources
            .iter()
            .find(|s| s.owns(link))
            .ok_or_else(|| StageError::ContentUnavailable(format!("no source owns {link}")))?;

        let html = self.fetcher.get_text(link.as_str()).await.map_err(|e| {
            warn!(error = %e, "Article fetch failed");
            e
        })?;

        let text = body_text(&html, source.content_selector())?;
        let chars = text.chars().count();
        if chars < self.min_chars {
            debug!(chars, "Article body too short");
            return Err(StageError::ContentTooShort { chars });
        }
        debug!(chars, source = %source.kind(), "Extracted article body");
        Ok(text)
    }
}

/// Join the non-empty paragraphs inside the first element matching `container`.
pub fn body_text(html: &str, container: &Selector) -> Result<String, StageError> {
    let document = Html::parse_document(html);
    let root = document
        .select(container)
        .next()
        .ok_or_else(|| StageError::ParseMismatch("article container absent".into()))?;

    let paragraphs: Vec<String> = root
        .select(&PARAGRAPH)
        .map(|p| collapse_whitespace(&p.text().collect::<String>()))
        .filter(|t| !t.is_empty())
        .collect();
    Ok(paragraphs.join(" "))
}

/// Sentinel text standing in for the content of a failed extraction.
pub fn sentinel(error: &StageError) -> &'static str {
    match error {
        StageError::SourceUnavailable { status: Some(_), .. } => NO_ACCESS,
        StageError::ContentTooShort { .. } => NOT_RELEVANT,
        _ => NOT_EXTRACTED,
    }
}
