//! Output generation.
//!
//! # Submodules
//!
//! - [`markdown`]: renders the digest document
//! - [`json`]: writes the optional per-run status report
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── Resumen_Noticias_2025-05-06_09-30.md    # digest (the artifact)
//! └── Resumen_Noticias_2025-05-06_09-30.json  # run report, with --report
//! ```

pub mod json;
pub mod markdown;

use crate::error::PipelineError;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Extension of the digest document.
pub const DOCUMENT_EXT: &str = "md";

/// Write the rendered document, creating the parent directory if needed.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_document(path: &Path, document: &str) -> Result<(), PipelineError> {
    let persist = |source| PipelineError::Persist {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(persist)?;
    }
    fs::write(path, document).await.map_err(persist)?;
    info!(bytes = document.len(), "Wrote document");
    Ok(())
}
