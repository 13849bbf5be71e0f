//! End-to-end enrich pipeline: read list → fetch/extract/merge per token → write outputs.
//!
//! Tokens are processed strictly one at a time. Per-token failures become
//! fallback colors and never abort the batch; only a top-level read/parse
//! failure does, in which case nothing is written.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::{info, instrument, warn};

use tokentint_fetcher::LogoFetcher;
use tokentint_shared::{
    ColorTriple, FetchConfig, FieldNames, Result, TokenOutcome, TokenTintError,
    record_from_object, record_into_value,
};

use crate::merge::merge_colors;

/// Configuration for one enrichment run.
#[derive(Debug, Clone)]
pub struct EnrichConfig {
    /// Token-list JSON file; rewritten in place.
    pub input: PathBuf,
    /// Where the HTML preview is written.
    pub preview: PathBuf,
    /// Input document field names.
    pub fields: FieldNames,
    /// Logo fetch settings.
    pub fetch: FetchConfig,
}

/// Summary of a completed enrichment run.
#[derive(Debug)]
pub struct EnrichResult {
    /// Number of tokens in the collection.
    pub total: usize,
    /// Tokens whose logo was fetched and analyzed.
    pub enriched: usize,
    /// Tokens that received fallback colors.
    pub fallback: usize,
    /// Tokens without a logo reference, left untouched.
    pub skipped: usize,
    /// Path the updated collection was written to.
    pub input_path: PathBuf,
    /// Path the preview was written to.
    pub preview_path: PathBuf,
    /// Total elapsed time.
    pub elapsed: Duration,
}

// ---------------------------------------------------------------------------
// Progress reporting
// ---------------------------------------------------------------------------

/// Progress callback for reporting batch status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called before a token is processed (1-based index).
    fn token_started(&self, symbol: &str, current: usize, total: usize);
    /// Called after a token is processed, with its outcome.
    fn token_finished(&self, symbol: &str, outcome: &TokenOutcome);
    /// Called when the run completes.
    fn done(&self, result: &EnrichResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn token_started(&self, _symbol: &str, _current: usize, _total: usize) {}
    fn token_finished(&self, _symbol: &str, _outcome: &TokenOutcome) {}
    fn done(&self, _result: &EnrichResult) {}
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run the full enrichment batch.
///
/// 1. Read and parse the token list (failure here is fatal, nothing written)
/// 2. Per token, in order: fetch logo → extract colors → merge record
/// 3. Write the updated list and the HTML preview
#[instrument(skip_all, fields(input = %config.input.display()))]
pub async fn enrich_list(
    config: &EnrichConfig,
    progress: &dyn ProgressReporter,
) -> Result<EnrichResult> {
    let start = Instant::now();

    progress.phase("Reading token list");
    let content = std::fs::read_to_string(&config.input)
        .map_err(|e| TokenTintError::io(&config.input, e))?;
    let mut document: Value = serde_json::from_str(&content).map_err(|e| {
        TokenTintError::validation(format!("failed to parse {}: {e}", config.input.display()))
    })?;

    let tokens = document
        .get_mut(&config.fields.tokens_key)
        .and_then(Value::as_array_mut)
        .ok_or_else(|| {
            TokenTintError::validation(format!("no '{}' array in document", config.fields.tokens_key))
        })?;
    let total = tokens.len();

    info!(total, "starting enrichment batch");

    let fetcher = LogoFetcher::new(&config.fetch)?;
    let mut enriched = 0usize;
    let mut fallback = 0usize;
    let mut skipped = 0usize;

    progress.phase("Enriching tokens");
    for index in 0..total {
        let record = match tokens[index].as_object() {
            Some(obj) => record_from_object(obj),
            None => {
                return Err(TokenTintError::validation(format!(
                    "token #{} is not an object",
                    index + 1
                )));
            }
        };

        let symbol = record
            .get(&config.fields.symbol_key)
            .and_then(Value::as_str)
            .unwrap_or("?")
            .to_string();
        progress.token_started(&symbol, index + 1, total);

        let logo_uri = record
            .get(&config.fields.logo_key)
            .and_then(Value::as_str)
            .map(str::to_string);

        let outcome = match logo_uri {
            None => TokenOutcome::Skipped,
            Some(uri) => {
                // The extractor defines the absent-bytes fallback, so
                // extraction runs even when the fetch failed.
                let (colors, outcome) = match fetcher.fetch(&uri).await {
                    None => (
                        tokentint_palette::extract_colors(None),
                        TokenOutcome::Fallback {
                            reason: "logo fetch failed".into(),
                        },
                    ),
                    Some(bytes) => match tokentint_palette::analyze(&bytes) {
                        Ok(colors) => (colors, TokenOutcome::Enriched),
                        Err(e) => {
                            warn!(symbol = %symbol, error = %e, "logo decode failed, using fallback colors");
                            (
                                ColorTriple::FALLBACK,
                                TokenOutcome::Fallback {
                                    reason: e.to_string(),
                                },
                            )
                        }
                    },
                };

                let merged = merge_colors(&record, &config.fields.logo_key, &colors);
                tokens[index] = record_into_value(merged);
                outcome
            }
        };

        match &outcome {
            TokenOutcome::Skipped => skipped += 1,
            TokenOutcome::Enriched => enriched += 1,
            TokenOutcome::Fallback { .. } => fallback += 1,
        }
        progress.token_finished(&symbol, &outcome);
    }

    // Outputs are written only after the whole batch has run.
    progress.phase("Writing outputs");
    tokentint_artifacts::write_token_list(&config.input, &document)?;

    let title = tokentint_artifacts::list_title(&document);
    let cards = tokentint_artifacts::cards_from_document(&document, &config.fields)?;
    let html = tokentint_artifacts::render_preview(&title, &cards);
    tokentint_artifacts::write_preview(&config.preview, &html)?;

    let result = EnrichResult {
        total,
        enriched,
        fallback,
        skipped,
        input_path: config.input.clone(),
        preview_path: config.preview.clone(),
        elapsed: start.elapsed(),
    };
    progress.done(&result);

    info!(
        total = result.total,
        enriched = result.enriched,
        fallback = result.fallback,
        skipped = result.skipped,
        elapsed_ms = result.elapsed.as_millis(),
        "enrichment complete"
    );

    Ok(result)
}
