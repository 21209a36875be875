//! Ámbito scraper.
//!
//! Only the first [`MAX_HEADINGS`] `h2` elements of the home page are
//! considered; each must contain an `a[href]`. The article body is the
//! page's `<main>`.

use super::{NewsSource, element_text, make_stub};
use crate::error::StageError;
use crate::models::{NewsItem, SourceKind};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

/// Headings past this point are mostly sidebar and footer blocks.
pub const MAX_HEADINGS: usize = 15;

static HEADING: Lazy<Selector> = Lazy::new(|| Selector::parse("h2").unwrap());
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static CONTENT: Lazy<Selector> = Lazy::new(|| Selector::parse("main").unwrap());

pub struct Ambito {
    origin: Url,
}

impl Ambito {
    pub fn new(origin: Url) -> Self {
        Self { origin }
    }
}

impl NewsSource for Ambito {
    fn kind(&self) -> SourceKind {
        SourceKind::Ambito
    }

    fn origin(&self) -> &Url {
        &self.origin
    }

    fn parse_listing(&self, html: &str) -> Result<Vec<NewsItem>, StageError> {
        let document = Html::parse_document(html);
        let mut headings = document.select(&HEADING).take(MAX_HEADINGS).peekable();
        if headings.peek().is_none() {
            return Err(StageError::ParseMismatch("no h2 headings".into()));
        }

        let items = headings
            .filter_map(|heading| {
                let anchor = heading.select(&LINK).next()?;
                make_stub(self, &element_text(&heading), anchor.value().attr("href"))
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

    fn source() -> Ambito {
        Ambito::new(Url::parse("https://www.ambito.com/").unwrap())
    }

    #[test]
    fn test_parse_listing_resolves_relative_links() {
        let html = r#"
            <h2><a href="/economia/dolar-hoy-n123">Dólar hoy: a cuánto cotiza</a></h2>
            <h2>Sin enlace</h2>
            <h2><a href="https://www.ambito.com/politica/senado-n456">El Senado <b>aprobó</b> la ley</a></h2>
        "#;
        let items = source().parse_listing(html).unwrap();
        let got: Vec<_> = items.iter().map(|i| (i.title.as_str(), i.link.as_str())).collect();
        assert_eq!(
            got,
            vec![
                ("Dólar hoy: a cuánto cotiza", "https://www.ambito.com/economia/dolar-hoy-n123"),
                ("El Senado aprobó la ley", "https://www.ambito.com/politica/senado-n456"),
            ]
        );
    }

    #[test]
    fn test_parse_listing_caps_headings() {
        let html: String = (0..20)
            .map(|i| format!(r#"<h2><a href="/nota-{i}">Nota número {i}</a></h2>"#))
            .collect();
        let items = source().parse_listing(&html).unwrap();
        assert_eq!(items.len(), MAX_HEADINGS);
        assert_eq!(items[14].title, "Nota número 14");
    }

    #[test]
    fn test_parse_listing_without_headings() {
        let err = source().parse_listing("<div>nada</div>").unwrap_err();
        assert!(matches!(err, StageError::ParseMismatch(_)));
    }
}
