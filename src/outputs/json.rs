//! JSON run report.
//!
//! Written next to the digest with the same stem, e.g.
//! `Resumen_Noticias_2025-05-06_09-30.json`, when reporting is enabled.

use crate::models::RunReport;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Path of the report belonging to `artifact`.
pub fn report_path(artifact: &Path) -> PathBuf {
    artifact.with_extension("json")
}

/// Serialize `report` and write it next to its artifact.
#[instrument(level = "info", skip_all, fields(artifact = %report.artifact.display()))]
pub async fn write_report(report: &RunReport) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(report)?;
    let path = report_path(&report.artifact);
    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote run report");
    Ok(path)
}
