//! Title-based deduplication.
//!
//! Titles are compared as exact strings, with no normalization of case,
//! whitespace or punctuation. Near-identical headlines from different
//! sources are kept as separate items.

use crate::models::NewsItem;
use itertools::Itertools;
use tracing::{debug, instrument};

/// Drop items whose title was already seen, keeping first occurrences in order.
///
/// Returns the surviving items and how many were removed.
#[instrument(level = "info", skip_all, fields(count = items.len()))]
pub fn dedupe(items: Vec<NewsItem>) -> (Vec<NewsItem>, usize) {
    let before = items.len();
    let unique: Vec<NewsItem> = items
        .into_iter()
        .unique_by(|item| item.title.clone())
        .collect();
    let removed = before - unique.len();
    debug!(kept = unique.len(), removed, "Deduplicated by title");
    (unique, removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceKind;
    use url::Url;

    fn item(title: &str, source: SourceKind, path: &str) -> NewsItem {
        let link = Url::parse("https://example.com").unwrap().join(path).unwrap();
        NewsItem::stub(title, source, link).unwrap()
    }

    fn titles(items: &[NewsItem]) -> Vec<&str> {
        items.iter().map(|i| i.title.as_str()).collect()
    }

    #[test]
    fn test_first_occurrence_wins_and_order_is_kept() {
        let items = vec![
            item("A", SourceKind::MundoGremial, "/a1"),
            item("B", SourceKind::MundoGremial, "/b"),
            item("A", SourceKind::Ambito, "/a2"),
            item("C", SourceKind::Cronista, "/c"),
        ];
        let (unique, removed) = dedupe(items);
        assert_eq!(titles(&unique), vec!["A", "B", "C"]);
        assert_eq!(unique[0].link.path(), "/a1");
        assert_eq!(removed, 1);
    }

    #[test]
    fn test_comparison_is_exact() {
        let items = vec![
            item("Paro general", SourceKind::Ambito, "/1"),
            item("paro general", SourceKind::Ambito, "/2"),
            item("Paro general.", SourceKind::Cronista, "/3"),
        ];
        let (unique, removed) = dedupe(items);
        assert_eq!(unique.len(), 3);
        assert_eq!(removed, 0);
    }

    #[test]
    fn test_inner_whitespace_is_significant() {
        let items = vec![
            item("Paro  general", SourceKind::MundoGremial, "/1"),
            item("Paro general", SourceKind::Ambito, "/2"),
            item(" Paro general ", SourceKind::Cronista, "/3"),
        ];
        let (unique, removed) = dedupe(items);
        assert_eq!(titles(&unique), vec!["Paro  general", "Paro general"]);
        assert_eq!(unique[1].link.path(), "/2");
        assert_eq!(removed, 1);
    }

    #[test]
    fn test_empty_input() {
        let (unique, removed) = dedupe(Vec::new());
        assert!(unique.is_empty());
        assert_eq!(removed, 0);
    }
}
