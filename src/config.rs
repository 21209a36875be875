//! Runtime configuration.
//!
//! Settings come from built-in defaults, an optional YAML file, and finally
//! the command line, in that order of precedence.
//!
//! ```yaml
//! output_dir: ./out
//! workers: 4
//! request_timeout_secs: 20
//! summary:
//!   sentence_count: 3
//! sources:
//!   ambito: https://www.ambito.com/
//! ```

use crate::cli::Cli;
use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

/// Top-level configuration for one run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub output_dir: PathBuf,
    /// Size of the extract+summarize worker pool.
    pub workers: usize,
    pub request_timeout_secs: u64,
    /// Browser-identifying `User-Agent` sent with every request.
    pub user_agent: String,
    /// Article bodies shorter than this many characters are discarded.
    pub min_content_chars: usize,
    /// Write the JSON run report next to the document.
    pub report: bool,
    pub summary: SummaryConfig,
    pub sources: SourceOrigins,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            workers: 4,
            request_timeout_secs: 20,
            user_agent: "Mozilla/5.0".to_string(),
            min_content_chars: 50,
            report: false,
            summary: SummaryConfig::default(),
            sources: SourceOrigins::default(),
        }
    }
}

/// Summarizer settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Disable LSA ranking and always use the truncation fallback.
    pub enabled: bool,
    pub sentence_count: usize,
    /// Length of the truncation fallback, in characters.
    pub fallback_chars: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sentence_count: 3,
            fallback_chars: 800,
        }
    }
}

/// Landing origins of the three sources.
///
/// Overridable so the pipeline can be pointed at mirrors or local fixtures.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceOrigins {
    pub mundo_gremial: Url,
    pub ambito: Url,
    pub cronista: Url,
}

impl Default for SourceOrigins {
    fn default() -> Self {
        Self {
            mundo_gremial: Url::parse("https://mundogremial.com/").expect("static url"),
            ambito: Url::parse("https://www.ambito.com/").expect("static url"),
            cronista: Url::parse("https://www.cronista.com/").expect("static url"),
        }
    }
}

impl AppConfig {
    /// Load the YAML file at `path`, or the defaults when no path is given.
    #[instrument(level = "info")]
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        let config = Self::from_yaml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })?;
        info!(path, "Loaded configuration");
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not to a defaulted map.
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    /// Apply command-line overrides and validate the result.
    pub fn merge_cli(mut self, cli: &Cli) -> Result<Self, ConfigError> {
        if let Some(dir) = &cli.output_dir {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(workers) = cli.workers {
            self.workers = workers;
        }
        if let Some(secs) = cli.timeout_secs {
            self.request_timeout_secs = secs;
        }
        if let Some(n) = cli.sentences {
            self.summary.sentence_count = n;
        }
        self.report |= cli.report;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::Invalid {
                field: "workers",
                reason: "must be at least 1".into(),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "request_timeout_secs",
                reason: "must be at least 1".into(),
            });
        }
        if self.summary.sentence_count == 0 {
            return Err(ConfigError::Invalid {
                field: "summary.sentence_count",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
