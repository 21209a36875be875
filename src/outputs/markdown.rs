//! Markdown rendering of the digest.
//!
//! One `#` heading for the whole document, then one `##` section per item:
//!
//! ```text
//! ## <title>
//!
//! 📌 Fuente: <source>
//!
//! 🔗 Enlace: <link>
//!
//! 📝 Resumen: <summary>
//!
//! 📰────────────────────────────
//! ```
//!
//! Every field is passed through [`sanitize`]; the title, source and link
//! are also folded onto one line so a field can never open a new section.

use crate::models::NewsItem;
use crate::summary::UNAVAILABLE;
use crate::utils::{collapse_whitespace, sanitize};

pub const DOCUMENT_TITLE: &str = "Resumen de Noticias Gremiales y Económicas";
pub const SEPARATOR: &str = "📰────────────────────────────";

/// Render `items` into a Markdown document, one section per item, in order.
pub fn assemble(items: &[NewsItem]) -> String {
    let mut md = format!("# {DOCUMENT_TITLE}\n\n");

    for item in items {
        let summary = item.summary.as_deref().unwrap_or(UNAVAILABLE);
        md.push_str(&format!(
            "## {}\n\n📌 Fuente: {}\n\n🔗 Enlace: {}\n\n📝 Resumen: {}\n\n{SEPARATOR}\n\n",
            single_line(&item.title),
            single_line(item.source.label()),
            single_line(item.link.as_str()),
            sanitize(summary),
        ));
    }
    md
}

fn single_line(text: &str) -> String {
    collapse_whitespace(&sanitize(text))
}
