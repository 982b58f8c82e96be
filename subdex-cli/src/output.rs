//! Report and hit rendering.

use anyhow::Result;
use subdex_core::{Hit, MetricsReport, OutputFormat};

pub fn render_report(report: &MetricsReport, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Table => report.to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(report)? + "\n",
    })
}

pub fn render_hits(hits: &[Hit], format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Table => hits
            .iter()
            .map(|hit| {
                format!(
                    "<{}>\t{}\t{:.4}\n",
                    hit.uri.as_deref().unwrap_or("-"),
                    hit.label.as_deref().unwrap_or("-"),
                    hit.score
                )
            })
            .collect(),
        OutputFormat::Json => serde_json::to_string_pretty(hits)? + "\n",
    })
}
