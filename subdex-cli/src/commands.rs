//! Subcommand handlers.

use crate::input::load_corpus;
use crate::output::{render_hits, render_report};
use anyhow::{Context, Result};
use std::path::Path;
use subdex_core::{BackendRegistry, EvalConfig, EvaluationBatch};
use tracing::{debug, info};

/// Evaluate a corpus file and render its report.
pub fn eval(config: &EvalConfig, corpus: &Path) -> Result<String> {
    let documents = load_corpus(corpus)?;
    let filter = config.filter();

    let mut batch = EvaluationBatch::new();
    for (index, doc) in documents.into_iter().enumerate() {
        let hits = filter.apply(doc.hits);
        debug!(
            index,
            document = doc.id.as_deref().unwrap_or("-"),
            hits = hits.len(),
            "Evaluating document"
        );
        batch.evaluate(hits, doc.gold);
    }
    info!(
        documents = batch.len(),
        limit = ?config.limit,
        threshold = config.threshold,
        "Evaluating corpus"
    );

    let report = batch
        .results()
        .with_context(|| format!("Cannot evaluate {}", corpus.display()))?;
    render_report(&report, config.output)
}

/// Run the configured backend on `text` and render its hits.
pub fn suggest(config: &EvalConfig, registry: &BackendRegistry, text: &str) -> Result<String> {
    let backend = registry.get(&config.backend)?;
    let hits = config.filter().apply(backend.suggest(text));
    info!(backend = backend.name(), hits = hits.len(), "Suggested subjects");
    render_hits(&hits, config.output)
}

/// List registered backends with their availability.
pub fn backends(registry: &BackendRegistry) -> String {
    registry
        .ids()
        .into_iter()
        .map(|id| {
            let status = if registry.is_available(id) {
                "available"
            } else {
                "unavailable"
            };
            format!("{id}\t{status}\n")
        })
        .collect()
}
