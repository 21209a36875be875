//! End-to-end digest generation.
//!
//! 1. **Listing**: every source's landing page is fetched concurrently;
//!    results keep registry order. A failing source contributes nothing.
//! 2. **Dedup**: exact-title deduplication across all listings.
//! 3. **Processing**: each item is extracted and summarized on a bounded
//!    worker pool; results are put back in listing order afterwards.
//! 4. **Output**: the Markdown document is rendered by a single writer and
//!    saved as `Resumen_Noticias_<YYYY-MM-DD_HH-MM>.md`.
//!
//! Only a failure to write the document is fatal.

use crate::config::AppConfig;
use crate::dedupe::dedupe;
use crate::error::{PipelineError, StageError};
use crate::extract::{self, ContentExtractor};
use crate::http::Fetcher;
use crate::models::{ItemReport, NewsItem, RunReport, SourceReport, StageStatus};
use crate::outputs::{self, DOCUMENT_EXT, json, markdown};
use crate::scrapers::{self, NewsSource};
use crate::summary::{self, Summarizer};
use crate::utils::{artifact_path, run_stamp, truncate_for_log};
use chrono::{DateTime, Local};
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

pub struct Pipeline {
    sources: Vec<Arc<dyn NewsSource>>,
    fetcher: Fetcher,
    extractor: ContentExtractor,
    summarizer: Summarizer,
    workers: usize,
    output_dir: PathBuf,
    report: bool,
}

impl Pipeline {
    /// Build a pipeline over the standard source registry.
    pub fn from_config(config: &AppConfig) -> Result<Self, PipelineError> {
        Self::with_sources(scrapers::registry(&config.sources), config)
    }

    /// Build a pipeline over an explicit, ordered set of sources.
    pub fn with_sources(
        sources: Vec<Arc<dyn NewsSource>>,
        config: &AppConfig,
    ) -> Result<Self, PipelineError> {
        let fetcher = Fetcher::new(&config.user_agent, config.request_timeout())?;
        let extractor =
            ContentExtractor::new(fetcher.clone(), sources.clone(), config.min_content_chars);
        Ok(Self {
            sources,
            fetcher,
            extractor,
            summarizer: Summarizer::new(config.summary.clone()),
            workers: config.workers.max(1),
            output_dir: config.output_dir.clone(),
            report: config.report,
        })
    }

    /// Generate the digest stamped with the current local time.
    pub async fn run(&self) -> Result<RunReport, PipelineError> {
        self.run_at(Local::now()).await
    }

    /// Generate the digest stamped with `now`.
    #[instrument(level = "info", skip_all, fields(workers = self.workers))]
    pub async fn run_at(&self, now: DateTime<Local>) -> Result<RunReport, PipelineError> {
        let start_time = std::time::Instant::now();
        summary::init();

        // ---- Listings ----
        let (items, sources) = self.collect_listings().await;
        let (items, duplicates_removed) = dedupe(items);
        info!(
            unique = items.len(),
            duplicates_removed, "Listings ready for processing"
        );

        // ---- Extract + summarize, bounded ----
        let mut processed: Vec<(usize, NewsItem, ItemReport)> =
            stream::iter(items.into_iter().enumerate())
                .map(|(index, item)| self.process(index, item))
                .buffer_unordered(self.workers)
                .collect()
                .await;
        processed.sort_by_key(|(index, ..)| *index);
        let (items, item_reports): (Vec<NewsItem>, Vec<ItemReport>) = processed
            .into_iter()
            .map(|(_, item, report)| (item, report))
            .unzip();

        // ---- Output ----
        let document = markdown::assemble(&items);
        let stamp = run_stamp(&now);
        let artifact = artifact_path(&self.output_dir, &stamp, DOCUMENT_EXT);
        outputs::write_document(&artifact, &document).await?;

        let report = RunReport {
            artifact,
            generated_at: stamp,
            sources,
            duplicates_removed,
            items: item_reports,
        };

        if self.report {
            if let Err(e) = json::write_report(&report).await {
                warn!(error = %e, "Failed to write run report");
            }
        }

        let elapsed = start_time.elapsed();
        info!(
            artifact = %report.artifact.display(),
            sections = report.items.len(),
            fully_processed = report.fully_processed(),
            secs = elapsed.as_secs(),
            millis = elapsed.subsec_millis(),
            "Digest complete"
        );
        Ok(report)
    }

    /// Fetch every listing concurrently, keeping registry order.
    async fn collect_listings(&self) -> (Vec<NewsItem>, Vec<SourceReport>) {
        let results = join_all(self.sources.iter().map(|source| async move {
            let result = scrapers::fetch_listing(source.as_ref(), &self.fetcher).await;
            (source.kind(), result)
        }))
        .await;

        let mut items = Vec::new();
        let mut reports = Vec::with_capacity(results.len());
        for (kind, result) in results {
            match result {
                Ok(found) => {
                    reports.push(SourceReport {
                        source: kind,
                        listed: found.len(),
                        error: None,
                    });
                    items.extend(found);
                }
                Err(e) => {
                    warn!(source = %kind, error = %e, "Source contributed no items");
                    reports.push(SourceReport {
                        source: kind,
                        listed: 0,
                        error: Some(e.to_string()),
                    });
                }
            }
        }
        (items, reports)
    }

    /// Extract and summarize one item. Never fails; degradations are reported.
    #[instrument(level = "info", skip_all, fields(index = index, source = %item.source))]
    async fn process(&self, index: usize, mut item: NewsItem) -> (usize, NewsItem, ItemReport) {
        let extracted = self.extractor.try_extract(&item.link).await;
        let content_status = StageStatus::from(&extracted);
        let content = extracted.unwrap_or_else(|e| {
            debug!(error = %e, "Using content sentinel");
            extract::sentinel(&e).to_string()
        });

        // LSA is CPU-bound; keep it off the async workers.
        let summarizer = self.summarizer.clone();
        let text = content.clone();
        let attempt = tokio::task::spawn_blocking(move || summarizer.try_summarize(&text))
            .await
            .unwrap_or_else(|e| {
                Err(StageError::SummarizationFailure(format!(
                    "summarizer task failed: {e}"
                )))
            });
        let summary_status = StageStatus::from(&attempt);
        let summary = attempt.unwrap_or_else(|_| self.summarizer.fallback(&content));
        debug!(summary = %truncate_for_log(&summary, 120), "Summarized item");

        item.content = Some(content);
        item.summary = Some(summary);
        let report = ItemReport {
            title: item.title.clone(),
            source: item.source,
            link: item.link.to_string(),
            content: content_status,
            summary: summary_status,
        };
        (index, item, report)
    }
}
