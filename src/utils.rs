//! Utility functions for text cleanup, artifact naming, and file system checks.
//!
//! - Control-character stripping for document fields
//! - Whitespace collapsing and char-safe truncation
//! - Timestamped artifact file names
//! - Output directory validation

use chrono::{DateTime, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::Display;
use std::fs as stdfs;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Prefix of every generated document.
pub const ARTIFACT_PREFIX: &str = "Resumen_Noticias_";

static CONTROL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F]").expect("static regex"));

/// Strip control characters that would corrupt the output document, then trim.
///
/// Tabs, line feeds and carriage returns are kept; ordinary printable text
/// passes through unchanged apart from surrounding whitespace.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(sanitize("a\x07b "), "ab");
/// ```
pub fn sanitize(text: &str) -> String {
    CONTROL_CHARS.replace_all(text, "").trim().to_string()
}

/// Collapse every run of whitespace (including line breaks) to one space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep the first `max` characters (not bytes) of `text`.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at `max` characters with an ellipsis and a count of
/// the dropped bytes appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    let head = truncate_chars(s, max);
    if head.len() == s.len() {
        s.to_string()
    } else {
        format!("{}…(+{} bytes)", head, s.len() - head.len())
    }
}

/// Format a generation timestamp as `YYYY-MM-DD_HH-MM`.
pub fn run_stamp<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    now.format("%Y-%m-%d_%H-%M").to_string()
}

/// Build `<dir>/Resumen_Noticias_<stamp>.<ext>`.
pub fn artifact_path(dir: &Path, stamp: &str, ext: &str) -> PathBuf {
    dir.join(format!("{ARTIFACT_PREFIX}{stamp}.{ext}"))
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then writes and removes a probe file.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let probe_path = path.join("..__probe_write__");
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
