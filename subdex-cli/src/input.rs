//! Corpus loading: one JSON document per line.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use subdex_core::{GoldSubjectSet, Hit};

/// One evaluated document: ranked hits plus its gold subjects.
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusDocument {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub hits: Vec<Hit>,
    #[serde(default)]
    pub gold: GoldSubjectSet,
}

pub fn load_corpus(path: &Path) -> Result<Vec<CorpusDocument>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open corpus {}", path.display()))?;
    parse_corpus(BufReader::new(file))
        .with_context(|| format!("Failed to read corpus {}", path.display()))
}

/// Parse JSON Lines, skipping blank lines.
pub fn parse_corpus<R: BufRead>(reader: R) -> Result<Vec<CorpusDocument>> {
    let mut documents = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let doc: CorpusDocument = serde_json::from_str(&line)
            .with_context(|| format!("Malformed document on line {}", index + 1))?;
        documents.push(doc);
    }
    tracing::debug!(documents = documents.len(), "Loaded corpus");
    Ok(documents)
}
