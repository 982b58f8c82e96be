//! Evaluation batch accumulator.
//!
//! Collect one `(hits, gold)` sample per document with [`EvaluationBatch::evaluate`],
//! then read the aggregated report with [`EvaluationBatch::results`]. Parallel
//! workers should each fill their own batch and [`merge`](EvaluationBatch::merge)
//! them afterwards.

use crate::error::EvalError;
use crate::report::{Metric, MetricsReport};
use crate::subject::{GoldSubjectSet, Hit, SubjectKey};
use tracing::{debug, info};

/// One document's predictions and gold standard.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub hits: Vec<Hit>,
    pub gold: GoldSubjectSet,
}

impl Sample {
    pub fn new(hits: Vec<Hit>, gold: GoldSubjectSet) -> Self {
        Self { hits, gold }
    }

    /// Project into `(selected, relevant)` keys, both in the key space the gold
    /// set selects. A hit lacking that half of its identity keeps its rank as
    /// [`SubjectKey::Missing`], which never matches a gold key.
    pub fn transform(&self) -> (Vec<SubjectKey>, Vec<SubjectKey>) {
        let space = self.gold.key_space();
        let selected: Vec<SubjectKey> = self.hits.iter().map(|h| h.ranked_key(space)).collect();
        let missing = selected
            .iter()
            .filter(|k| **k == SubjectKey::Missing)
            .count();
        if missing > 0 {
            debug!(?space, missing, "Hits without a key in the document's key space");
        }
        (selected, self.gold.keys())
    }
}

/// Accumulates samples for one evaluation run.
#[derive(Debug, Clone, Default)]
pub struct EvaluationBatch {
    samples: Vec<Sample>,
}

impl EvaluationBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one document's ranked hits against its gold subjects.
    pub fn evaluate(&mut self, hits: Vec<Hit>, gold: GoldSubjectSet) {
        debug!(
            sample = self.samples.len(),
            hits = hits.len(),
            gold = gold.len(),
            "Adding evaluation sample"
        );
        self.samples.push(Sample::new(hits, gold));
    }

    /// Append another batch's samples after this one's.
    pub fn merge(&mut self, other: EvaluationBatch) {
        self.samples.extend(other.samples);
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Score every sample with every metric, in canonical order.
    pub fn results(&self) -> Result<MetricsReport, EvalError> {
        if self.samples.is_empty() {
            return Err(EvalError::EmptyBatch);
        }

        let (selected, relevant): (Vec<_>, Vec<_>) =
            self.samples.iter().map(Sample::transform).unzip();

        let mut report = MetricsReport::new();
        for metric in Metric::ALL {
            let value = metric.compute(&selected, &relevant);
            debug!(metric = metric.name(), value, "Computed metric");
            report.insert(metric, value);
        }
        info!(samples = self.samples.len(), "Evaluation report ready");
        Ok(report)
    }
}

impl Extend<Sample> for EvaluationBatch {
    fn extend<T: IntoIterator<Item = Sample>>(&mut self, iter: T) {
        self.samples.extend(iter);
    }
}

impl FromIterator<Sample> for EvaluationBatch {
    fn from_iter<T: IntoIterator<Item = Sample>>(iter: T) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::Subject;

    #[test]
    fn test_empty_batch_errors() {
        let batch = EvaluationBatch::new();
        assert!(matches!(batch.results(), Err(EvalError::EmptyBatch)));
    }

    #[test]
    fn test_transform_by_uri() {
        let sample = Sample::new(
            vec![Hit::new("u:2", "two", 0.9), Hit::new("u:1", "one", 0.5)],
            GoldSubjectSet::new(vec![Subject::new("u:1", "one")]),
        );
        let (selected, relevant) = sample.transform();
        assert_eq!(
            selected,
            vec![
                SubjectKey::Identifier("u:2".into()),
                SubjectKey::Identifier("u:1".into())
            ]
        );
        assert_eq!(relevant, vec![SubjectKey::Identifier("u:1".into())]);
    }

    #[test]
    fn test_transform_falls_back_to_labels() {
        let sample = Sample::new(
            vec![Hit::new("u:1", "one", 0.9), Hit::with_uri("u:3", 0.2)],
            GoldSubjectSet::from_labels(["one", "two"]),
        );
        let (selected, relevant) = sample.transform();
        assert_eq!(
            selected,
            vec![SubjectKey::Label("one".into()), SubjectKey::Missing]
        );
        assert_eq!(relevant.len(), 2);
    }

    #[test]
    fn test_keyless_hit_keeps_its_rank() {
        let mut batch = EvaluationBatch::new();
        batch.evaluate(
            vec![Hit::with_label("unlinked", 0.9), Hit::with_uri("a", 0.5)],
            GoldSubjectSet::from_uris(["a"]),
        );
        let report = batch.results().unwrap();
        assert_eq!(report.get("Precision@1"), Some(0.0));
        assert_eq!(report.get("Precision"), Some(0.5));
        assert_eq!(report.get("False positives"), Some(1.0));
        let ndcg = report.get("NDCG@5").unwrap();
        assert!((ndcg - 1.0 / 3f64.log2()).abs() < 1e-9, "got {ndcg}");
    }

    #[test]
    fn test_results_has_every_metric() {
        let mut batch = EvaluationBatch::new();
        batch.evaluate(
            vec![Hit::with_uri("a", 1.0)],
            GoldSubjectSet::from_uris(["a"]),
        );
        let report = batch.results().unwrap();
        assert_eq!(report.len(), Metric::ALL.len());
        assert_eq!(report.get("Precision"), Some(1.0));
        assert_eq!(report.get("True positives"), Some(1.0));
        // results can be read repeatedly
        assert_eq!(batch.results().unwrap(), report);
    }

    #[test]
    fn test_merge_concatenates() {
        let mut left = EvaluationBatch::new();
        left.evaluate(vec![Hit::with_uri("a", 1.0)], GoldSubjectSet::from_uris(["a"]));
        let mut right = EvaluationBatch::new();
        right.evaluate(vec![Hit::with_uri("b", 1.0)], GoldSubjectSet::from_uris(["c"]));
        left.merge(right);
        assert_eq!(left.len(), 2);
        assert_eq!(left.samples()[1].gold, GoldSubjectSet::from_uris(["c"]));
    }
}
