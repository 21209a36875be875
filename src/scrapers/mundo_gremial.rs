//! Mundo Gremial scraper.
//!
//! The home page renders each story as an `h2.mvp-stand-title` wrapped in
//! the story's `<a>`. Article bodies live in `div#mvp-content-main`.

use super::{NewsSource, element_text, make_stub};
use crate::error::StageError;
use crate::models::{NewsItem, SourceKind};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

static STAND_TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h2.mvp-stand-title").unwrap());
static CONTENT: Lazy<Selector> = Lazy::new(|| Selector::parse("div#mvp-content-main").unwrap());

pub struct MundoGremial {
    origin: Url,
}

impl MundoGremial {
    pub fn new(origin: Url) -> Self {
        Self { origin }
    }
}

impl NewsSource for MundoGremial {
    fn kind(&self) -> SourceKind {
        SourceKind::MundoGremial
    }

    fn origin(&self) -> &Url {
        &self.origin
    }

    fn parse_listing(&self, html: &str) -> Result<Vec<NewsItem>, StageError> {
        let document = Html::parse_document(html);
        let headings: Vec<ElementRef<'_>> = document.select(&STAND_TITLE).collect();
        if headings.is_empty() {
            return Err(StageError::ParseMismatch("no h2.mvp-stand-title".into()));
        }

        let items = headings
            .iter()
            .filter_map(|heading| {
                let href = heading
                    .ancestors()
                    .filter_map(ElementRef::wrap)
                    .find(|e| e.value().name() == "a")
                    .and_then(|a| a.value().attr("href"));
                make_stub(self, &element_text(heading), href)
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

    const LISTING: &str = r#"
        <html><body>
          <a href="https://mundogremial.com/paro-de-la-cgt/">
            <div><h2 class="mvp-stand-title">La CGT anunció un paro</h2></div>
          </a>
          <a href="/paritarias-bancarias/">
            <h2 class="mvp-stand-title">  Paritarias bancarias </h2>
          </a>
          <h2 class="mvp-stand-title">Sin enlace</h2>
          <a href="/vacio/"><h2 class="mvp-stand-title">   </h2></a>
        </body></html>
    "#;

    fn source() -> MundoGremial {
        MundoGremial::new(Url::parse("https://mundogremial.com/").unwrap())
    }

    #[test]
    fn test_parse_listing() {
        let items = source().parse_listing(LISTING).unwrap();
        let got: Vec<_> = items.iter().map(|i| (i.title.as_str(), i.link.as_str())).collect();
        assert_eq!(
            got,
            vec![
                ("La CGT anunció un paro", "https://mundogremial.com/paro-de-la-cgt/"),
                ("Paritarias bancarias", "https://mundogremial.com/paritarias-bancarias/"),
            ]
        );
        assert!(items.iter().all(|i| i.source == SourceKind::MundoGremial));
    }

    #[test]
    fn test_parse_listing_without_expected_markup() {
        let err = source()
            .parse_listing("<html><body><h2>Otra cosa</h2></body></html>")
            .unwrap_err();
        assert!(matches!(err, StageError::ParseMismatch(_)));
    }
}
