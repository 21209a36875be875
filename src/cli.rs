//! Command-line interface definitions.
//!
//! Every option can also be supplied through a `RESUMEN_*` environment
//! variable. Values given here override the YAML config file.

use clap::Parser;

/// Generate a Markdown digest of the latest labour and economy news.
///
/// # Examples
///
/// ```sh
/// # Write the digest into ./out
/// resumen_noticias -o ./out
///
/// # Eight workers, ten second timeout, JSON run report next to the digest
/// resumen_noticias -o ./out --workers 8 --timeout-secs 10 --report
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory the digest is written to
    #[arg(short, long, env = "RESUMEN_OUTPUT_DIR")]
    pub output_dir: Option<String>,

    /// Optional path to a config.yaml file
    #[arg(short, long, env = "RESUMEN_CONFIG")]
    pub config: Option<String>,

    /// Number of articles extracted and summarized concurrently
    #[arg(long, env = "RESUMEN_WORKERS")]
    pub workers: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long, env = "RESUMEN_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Number of sentences kept in each summary
    #[arg(long, env = "RESUMEN_SENTENCES")]
    pub sentences: Option<usize>,

    /// Also write a JSON report with per-source and per-item status
    #[arg(long, env = "RESUMEN_REPORT")]
    pub report: bool,
}
