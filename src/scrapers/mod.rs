//! News source adapters.
//!
//! Each source implements [`NewsSource`]: it knows its origin, where its
//! landing page lives, how to turn that page into [`NewsItem`] stubs, and
//! which container holds an article's body. Fetching is shared by
//! [`fetch_listing`] and [`crate::extract::ContentExtractor`].
//!
//! # Supported Sources
//!
//! | Source | Module | Landing page | Listing rule |
//! |--------|--------|--------------|--------------|
//! | Mundo Gremial | [`mundo_gremial`] | `/` | `h2.mvp-stand-title` inside an `<a>` |
//! | Ámbito | [`ambito`] | `/` | first 15 `h2`, each with an `a[href]` |
//! | El Cronista | [`cronista`] | `/economia-politica/` | section links with long anchor text |
//!
//! Adding a source means adding a module and one entry in [`registry`].

use crate::config::SourceOrigins;
use crate::error::StageError;
use crate::http::Fetcher;
use crate::models::{NewsItem, SourceKind};
use itertools::Itertools;
use scraper::{ElementRef, Selector};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use url::Url;

pub mod ambito;
pub mod cronista;
pub mod mundo_gremial;

/// One news site.
pub trait NewsSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    /// Scheme, host and port used to resolve relative links.
    fn origin(&self) -> &Url;

    /// Page listing the latest items.
    fn landing_url(&self) -> Url {
        self.origin().clone()
    }

    /// Turn a landing page into listing stubs.
    ///
    /// Returns [`StageError::ParseMismatch`] when the markup the source is
    /// expected to have is absent altogether.
    fn parse_listing(&self, html: &str) -> Result<Vec<NewsItem>, StageError>;

    /// CSS selector of the element holding an article's body paragraphs.
    fn content_selector(&self) -> &Selector;

    /// Whether `link` points into this source.
    ///
    /// Hosts are compared without a leading `www.`; ports must match.
    fn owns(&self, link: &Url) -> bool {
        let origin = self.origin();
        let (Some(a), Some(b)) = (link.host_str(), origin.host_str()) else {
            return false;
        };
        bare_host(a) == bare_host(b) && link.port_or_known_default() == origin.port_or_known_default()
    }
}

fn bare_host(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

/// The sources in the order their items appear in the document.
pub fn registry(origins: &SourceOrigins) -> Vec<Arc<dyn NewsSource>> {
    vec![
        Arc::new(mundo_gremial::MundoGremial::new(origins.mundo_gremial.clone())),
        Arc::new(ambito::Ambito::new(origins.ambito.clone())),
        Arc::new(cronista::Cronista::new(origins.cronista.clone())),
    ]
}

/// Fetch a source's landing page and parse its listing.
///
/// One request, no retries. The caller decides how to degrade on error.
#[instrument(level = "info", skip_all, fields(source = %source.kind()))]
pub async fn fetch_listing(
    source: &dyn NewsSource,
    fetcher: &Fetcher,
) -> Result<Vec<NewsItem>, StageError> {
    let url = source.landing_url();
    let html = fetcher.get_text(url.as_str()).await?;
    let items = source.parse_listing(&html)?;

    info!(count = items.len(), url = %url, "Indexed listing");
    debug!(titles = ?items.iter().map(|i| &i.title).collect::<Vec<_>>(), "Listing titles");
    Ok(items)
}

/// Resolve an `href` found on a page of `origin` to an absolute http(s) URL.
///
/// Absolute links pass through unchanged; relative ones are joined onto the
/// origin. Anything else (`mailto:`, `javascript:`, garbage) is dropped.
pub fn resolve_link(origin: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    let resolved = match Url::parse(href) {
        Ok(absolute) => absolute,
        Err(url::ParseError::RelativeUrlWithoutBase) => origin.join(href).ok()?,
        Err(e) => {
            warn!(href, error = %e, "Unparseable link");
            return None;
        }
    };
    matches!(resolved.scheme(), "http" | "https").then_some(resolved)
}

/// Visible text of an element.
///
/// Each text node is trimmed and empty nodes are skipped; the rest are joined
/// by a single space. Whitespace inside a text node is kept as published.
pub(crate) fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .join(" ")
}

/// Build a stub from raw title text and href, dropping it when either is unusable.
pub(crate) fn make_stub(
    source: &dyn NewsSource,
    title: &str,
    href: Option<&str>,
) -> Option<NewsItem> {
    let link = resolve_link(source.origin(), href?)?;
    NewsItem::stub(title, source.kind(), link)
}


#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Url {
        Url::parse("https://example.com").unwrap()
    }

    #[test]
    fn test_resolve_relative_link() {
        let url = resolve_link(&origin(), "/foo").unwrap();
        assert_eq!(url.as_str(), "https://example.com/foo");
    }

    #[test]
    fn test_resolve_absolute_link_unchanged() {
        let url = resolve_link(&origin(), "https://other.org/a/b?c=1").unwrap();
        assert_eq!(url.as_str(), "https://other.org/a/b?c=1");
    }

    #[test]
    fn test_resolve_rejects_non_http() {
        assert!(resolve_link(&origin(), "mailto:redaccion@example.com").is_none());
        assert!(resolve_link(&origin(), "javascript:void(0)").is_none());
        assert!(resolve_link(&origin(), "   ").is_none());
    }

    #[test]
    fn test_element_text_trims_nodes_but_keeps_inner_whitespace() {
        let html = scraper::Html::parse_fragment(
            "<h2>  Paro  general <b>del</b>\n lunes </h2>",
        );
        let h2 = Selector::parse("h2").unwrap();
        let heading = html.select(&h2).next().unwrap();
        assert_eq!(element_text(&heading), "Paro  general del lunes");
    }

    #[test]
    fn test_registry_order() {
        let sources = registry(&SourceOrigins::default());
        let kinds: Vec<_> = sources.iter().map(|s| s.kind()).collect();
        assert_eq!(
            kinds,
            vec![SourceKind::MundoGremial, SourceKind::Ambito, SourceKind::Cronista]
        );
    }

    #[test]
    fn test_owns_ignores_www_prefix() {
        let sources = registry(&SourceOrigins::default());
        let ambito = &sources[1];
        assert!(ambito.owns(&Url::parse("https://ambito.com/economia/nota").unwrap()));
        assert!(ambito.owns(&Url::parse("https://www.ambito.com/politica/nota").unwrap()));
        assert!(!ambito.owns(&Url::parse("https://www.cronista.com/nota").unwrap()));
    }

    #[test]
    fn test_owns_requires_same_port() {
        let origins = fixtures::origins(
            "http://127.0.0.1:4001/",
            "http://127.0.0.1:4002/",
            "http://127.0.0.1:4003/",
        );
        let sources = registry(&origins);
        let link = Url::parse("http://127.0.0.1:4002/nota").unwrap();
        let owners: Vec<_> = sources.iter().filter(|s| s.owns(&link)).map(|s| s.kind()).collect();
        assert_eq!(owners, vec![SourceKind::Ambito]);
    }

    #[tokio::test]
    async fn test_fetch_listing_non_success_is_source_unavailable() {
        let mut server = mockito::Server::new_async().await;
        let _m = server.mock("GET", "/").with_status(500).create_async().await;

        let source = mundo_gremial::MundoGremial::new(Url::parse(&server.url()).unwrap());
        let fetcher = Fetcher::new("Mozilla/5.0", std::time::Duration::from_secs(5)).unwrap();
        let err = fetch_listing(&source, &fetcher).await.unwrap_err();
        assert!(matches!(err, StageError::SourceUnavailable { status: Some(500), .. }));
    }
}
