//! Extractive summarization.
//!
//! [`Summarizer::summarize`] always returns non-empty text: the top-ranked
//! sentences when LSA ranking succeeds, otherwise the first
//! `fallback_chars` characters followed by `...`, or [`UNAVAILABLE`] for
//! empty input.
//!
//! Tokenizer resources are process-wide and built by [`init`], which the
//! pipeline calls once before the first summary. Calling it again is a no-op.

use crate::config::SummaryConfig;
use crate::error::StageError;
use crate::utils::truncate_chars;
use itertools::Itertools;
use once_cell::sync::OnceCell;
use tracing::{debug, info, warn};

pub mod lsa;
pub mod tokenizer;

pub use tokenizer::SpanishTokenizer;

/// Returned for empty input.
pub const UNAVAILABLE: &str = "⚠️ No se pudo generar el resumen.";
/// Appended to the truncation fallback.
pub const ELLIPSIS: &str = "...";

static TOKENIZER: OnceCell<SpanishTokenizer> = OnceCell::new();

/// Build the Spanish tokenizer resources. Idempotent.
pub fn init() -> &'static SpanishTokenizer {
    TOKENIZER.get_or_init(|| {
        info!("Initializing Spanish tokenizer resources");
        SpanishTokenizer::build()
    })
}

#[derive(Debug, Clone)]
pub struct Summarizer {
    tokenizer: &'static SpanishTokenizer,
    config: SummaryConfig,
}

impl Summarizer {
    pub fn new(config: SummaryConfig) -> Self {
        Self {
            tokenizer: init(),
            config,
        }
    }

    /// Summarize `text` down to the configured number of sentences.
    pub fn summarize(&self, text: &str) -> String {
        self.summarize_sentences(text, self.config.sentence_count)
    }

    /// Summarize `text` down to `sentence_count` sentences, falling back on failure.
    pub fn summarize_sentences(&self, text: &str, sentence_count: usize) -> String {
        match self.try_summarize_sentences(text, sentence_count) {
            Ok(summary) => summary,
            Err(e) => {
                debug!(error = %e, "Using truncation fallback");
                self.fallback(text)
            }
        }
    }

    /// LSA summary of `text` at the configured length, without the fallback.
    pub fn try_summarize(&self, text: &str) -> Result<String, StageError> {
        self.try_summarize_sentences(text, self.config.sentence_count)
    }

    /// LSA summary of `text`, without the fallback.
    pub fn try_summarize_sentences(
        &self,
        text: &str,
        sentence_count: usize,
    ) -> Result<String, StageError> {
        if !self.config.enabled {
            return Err(StageError::SummarizationFailure("summarization disabled".into()));
        }
        let sentences = self.tokenizer.sentences(text);
        if sentences.is_empty() {
            return Err(StageError::SummarizationFailure("no sentences".into()));
        }
        if sentences.len() <= sentence_count {
            return Ok(sentences.join(" "));
        }

        let words: Vec<Vec<String>> = sentences.iter().map(|s| self.tokenizer.words(s)).collect();
        let ranks = lsa::rank_sentences(&words).map_err(|e| {
            warn!(error = %e, sentences = sentences.len(), "LSA ranking failed");
            e
        })?;

        let summary = (0..sentences.len())
            .sorted_by(|&a, &b| ranks[b].total_cmp(&ranks[a]).then(a.cmp(&b)))
            .take(sentence_count)
            .sorted()
            .map(|i| sentences[i].as_str())
            .join(" ");

        if summary.trim().is_empty() {
            return Err(StageError::SummarizationFailure("empty summary".into()));
        }
        Ok(summary)
    }

    /// Truncation fallback; never empty.
    pub fn fallback(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return UNAVAILABLE.to_string();
        }
        format!("{}{}", truncate_chars(text, self.config.fallback_chars), ELLIPSIS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = "El gobierno anunció un aumento de las tarifas de luz y gas. \
        Los gremios rechazaron el aumento de tarifas y anunciaron un paro. \
        El partido de fútbol terminó empatado. \
        La CGT evaluará el paro contra el aumento de tarifas la semana próxima. \
        Llovió en la ciudad.";

    fn summarizer() -> Summarizer {
        Summarizer::new(SummaryConfig::default())
    }

    fn disabled() -> Summarizer {
        Summarizer::new(SummaryConfig {
            enabled: false,
            ..SummaryConfig::default()
        })
    }

    #[test]
    fn test_init_is_idempotent() {
        let a = init() as *const SpanishTokenizer;
        let b = init() as *const SpanishTokenizer;
        assert_eq!(a, b);
    }

    #[test]
    fn test_short_input_returned_unchanged() {
        let text = "  Primera oración.\n\n  Segunda   oración.  ";
        assert_eq!(summarizer().summarize(text), "Primera oración. Segunda oración.");
    }

    #[test]
    fn test_empty_input_is_unavailable() {
        assert_eq!(summarizer().summarize(""), UNAVAILABLE);
        assert_eq!(summarizer().summarize("   \n"), UNAVAILABLE);
        assert_eq!(disabled().summarize(""), UNAVAILABLE);
    }

    #[test]
    fn test_disabled_truncates_to_fallback_length() {
        let text = "á".repeat(1000);
        let summary = disabled().summarize(&text);
        assert_eq!(summary, format!("{}...", "á".repeat(800)));
    }

    #[test]
    fn test_disabled_short_text_gets_ellipsis() {
        assert_eq!(disabled().summarize("Hola."), "Hola....");
    }

    #[test]
    fn test_no_rankable_terms_falls_back() {
        // Four sentences made only of stop words and numbers.
        let text = "Y no. Y sí. Es que 10. Lo es.";
        let s = summarizer();
        assert!(matches!(
            s.try_summarize(text),
            Err(StageError::SummarizationFailure(_))
        ));
        assert_eq!(s.summarize(text), format!("{text}..."));
    }

    #[test]
    fn test_summary_keeps_original_order_and_count() {
        let s = summarizer();
        let summary = s.summarize(ARTICLE);
        let picked = s.tokenizer.sentences(&summary);
        assert_eq!(picked.len(), 3);

        let all = s.tokenizer.sentences(ARTICLE);
        let positions: Vec<usize> = picked
            .iter()
            .map(|p| all.iter().position(|a| a == p).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_summary_sentence_count_override() {
        let summary = summarizer().summarize_sentences(ARTICLE, 1);
        assert_eq!(summarizer().tokenizer.sentences(&summary).len(), 1);
    }

    #[test]
    fn test_sentinel_content_passes_through() {
        assert_eq!(
            summarizer().summarize("No se encontró contenido relevante."),
            "No se encontró contenido relevante."
        );
    }
}
