//! # Resumen Noticias
//!
//! Builds a single Markdown digest of the latest labour and economy news
//! published by Mundo Gremial, Ámbito and El Cronista.
//!
//! ## Usage
//!
//! ```sh
//! resumen_noticias -o ./out
//! ```
//!
//! The path of the generated document is printed on stdout; logs go to
//! stderr (`RUST_LOG` controls verbosity).

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use resumen_noticias::cli::Cli;
use resumen_noticias::config::AppConfig;
use resumen_noticias::pipeline::Pipeline;
use resumen_noticias::summary;
use resumen_noticias::utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "resumen_noticias starting up");

    // Parse CLI and configuration
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");
    let config = AppConfig::load(args.config.as_deref())?.merge_cli(&args)?;
    info!(
        output_dir = %config.output_dir.display(),
        workers = config.workers,
        timeout_secs = config.request_timeout_secs,
        "Configuration ready"
    );

    // Early check: ensure the output dir is writable
    if let Err(e) = ensure_writable_dir(&config.output_dir).await {
        error!(
            path = %config.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    summary::init();
    let pipeline = Pipeline::from_config(&config)?;
    let report = match pipeline.run().await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Failed to generate the digest");
            return Err(e.into());
        }
    };

    if !report.artifact.exists() {
        error!(path = %report.artifact.display(), "Digest missing after generation");
        return Err("digest was not generated".into());
    }

    for source in report.sources.iter().filter(|s| s.error.is_some()) {
        info!(source = %source.source, error = ?source.error, "Source degraded");
    }
    println!("{}", report.artifact.display());
    Ok(())
}
