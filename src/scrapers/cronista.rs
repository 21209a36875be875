//! El Cronista scraper.
//!
//! The economy and politics section page is scanned for links into the
//! section whose anchor text is long enough to be a headline (navigation
//! and tag links are short).

use super::{NewsSource, element_text, make_stub};
use crate::error::StageError;
use crate::models::{NewsItem, SourceKind};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

pub const SECTION_PATH: &str = "/economia-politica/";

/// Anchor texts up to this many characters are not headlines.
const MIN_TITLE_CHARS: usize = 20;

static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static CONTENT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.content.vsmcontent.news").unwrap());

pub struct Cronista {
    origin: Url,
}

impl Cronista {
    pub fn new(origin: Url) -> Self {
        Self { origin }
    }
}

impl NewsSource for Cronista {
    fn kind(&self) -> SourceKind {
        SourceKind::Cronista
    }

    fn origin(&self) -> &Url {
        &self.origin
    }

    fn landing_url(&self) -> Url {
        self.origin
            .join(SECTION_PATH)
            .unwrap_or_else(|_| self.origin.clone())
    }

    fn parse_listing(&self, html: &str) -> Result<Vec<NewsItem>, StageError> {
        let document = Html::parse_document(html);
        let anchors: Vec<_> = document.select(&LINK).collect();
        if anchors.is_empty() {
            return Err(StageError::ParseMismatch("no a[href] links".into()));
        }
        debug!(anchors = anchors.len(), "Scanning Cronista links");

        let items = anchors
            .iter()
            .filter_map(|anchor| {
                let href = anchor.value().attr("href")?;
                if !href.contains(SECTION_PATH) {
                    return None;
                }
                let title = element_text(anchor);
                if title.chars().count() <= MIN_TITLE_CHARS {
                    return None;
                }
                make_stub(self, &title, Some(href))
            })
            .collect();
        Ok(items)
    }

    fn content_selector(&self) -> &Selector {
        &CONTENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> Cronista {
        Cronista::new(Url::parse("https://www.cronista.com/").unwrap())
    }

    #[test]
    fn test_landing_url() {
        assert_eq!(
            source().landing_url().as_str(),
            "https://www.cronista.com/economia-politica/"
        );
    }

    #[test]
    fn test_parse_listing_filters_section_and_length() {
        let html = r#"
            <nav><a href="/economia-politica/">Economía</a></nav>
            <a href="/economia-politica/el-fmi-aprobo-la-revision-del-acuerdo/">El FMI aprobó la revisión del acuerdo</a>
            <a href="/deportes/boca-gano-el-superclasico-de-visitante/">Boca ganó el superclásico de visitante</a>
            <a href="https://www.cronista.com/economia-politica/suben-las-tarifas/">Suben las tarifas de luz y gas en mayo</a>
            <a href="/economia-politica/corto/">Nota corta</a>
        "#;
        let items = source().parse_listing(html).unwrap();
        let got: Vec<_> = items.iter().map(|i| (i.title.as_str(), i.link.as_str())).collect();
        assert_eq!(
            got,
            vec![
                (
                    "El FMI aprobó la revisión del acuerdo",
                    "https://www.cronista.com/economia-politica/el-fmi-aprobo-la-revision-del-acuerdo/"
                ),
                (
                    "Suben las tarifas de luz y gas en mayo",
                    "https://www.cronista.com/economia-politica/suben-las-tarifas/"
                ),
            ]
        );
    }

    #[test]
    fn test_title_length_counts_chars_not_bytes() {
        // 20 chars but more than 20 bytes: still too short.
        let html = r#"<a href="/economia-politica/x/">áéíóúáéíóúáéíóúáéíóú</a>"#;
        let items = source().parse_listing(html).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_parse_listing_without_links() {
        let err = source().parse_listing("<p>mantenimiento</p>").unwrap_err();
        assert!(matches!(err, StageError::ParseMismatch(_)));
    }
}
