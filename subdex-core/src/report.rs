//! Metric listing and the ordered report it produces.

use crate::metrics;
use crate::subject::SubjectKey;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Every metric in the report, in canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Precision,
    Recall,
    FMeasure,
    Ndcg5,
    Ndcg10,
    PrecisionAt1,
    PrecisionAt3,
    PrecisionAt5,
    TruePositives,
    FalsePositives,
    FalseNegatives,
}

impl Metric {
    pub const ALL: [Metric; 11] = [
        Metric::Precision,
        Metric::Recall,
        Metric::FMeasure,
        Metric::Ndcg5,
        Metric::Ndcg10,
        Metric::PrecisionAt1,
        Metric::PrecisionAt3,
        Metric::PrecisionAt5,
        Metric::TruePositives,
        Metric::FalsePositives,
        Metric::FalseNegatives,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Precision => "Precision",
            Self::Recall => "Recall",
            Self::FMeasure => "F-measure",
            Self::Ndcg5 => "NDCG@5",
            Self::Ndcg10 => "NDCG@10",
            Self::PrecisionAt1 => "Precision@1",
            Self::PrecisionAt3 => "Precision@3",
            Self::PrecisionAt5 => "Precision@5",
            Self::TruePositives => "True positives",
            Self::FalsePositives => "False positives",
            Self::FalseNegatives => "False negatives",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }

    /// Corpus-level counts rather than averaged scores.
    pub fn is_count(&self) -> bool {
        matches!(
            self,
            Self::TruePositives | Self::FalsePositives | Self::FalseNegatives
        )
    }

    /// Score a whole batch.
    pub fn compute(&self, selected: &[Vec<SubjectKey>], relevant: &[Vec<SubjectKey>]) -> f64 {
        match self {
            Self::Precision => metrics::precision(selected, relevant, None),
            Self::Recall => metrics::recall(selected, relevant),
            Self::FMeasure => metrics::f_measure(selected, relevant),
            Self::Ndcg5 => metrics::normalized_dcg(selected, relevant, 5),
            Self::Ndcg10 => metrics::normalized_dcg(selected, relevant, 10),
            Self::PrecisionAt1 => metrics::precision(selected, relevant, Some(1)),
            Self::PrecisionAt3 => metrics::precision(selected, relevant, Some(3)),
            Self::PrecisionAt5 => metrics::precision(selected, relevant, Some(5)),
            Self::TruePositives => metrics::true_positives(selected, relevant) as f64,
            Self::FalsePositives => metrics::false_positives(selected, relevant) as f64,
            Self::FalseNegatives => metrics::false_negatives(selected, relevant) as f64,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Metric name → value, in the order the metrics were computed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsReport {
    entries: Vec<(Metric, f64)>,
}

impl MetricsReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, metric: Metric, value: f64) {
        match self.entries.iter_mut().find(|(m, _)| *m == metric) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((metric, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        Metric::from_name(name).and_then(|m| self.metric(m))
    }

    pub fn metric(&self, metric: Metric) -> Option<f64> {
        self.entries
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.entries.iter().map(|(m, v)| (m.name(), *v))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(m, _)| m.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for MetricsReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (metric, value) in &self.entries {
            if metric.is_count() {
                map.serialize_entry(metric.name(), &(*value as u64))?;
            } else {
                map.serialize_entry(metric.name(), value)?;
            }
        }
        map.end()
    }
}

impl fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (metric, value) in &self.entries {
            if metric.is_count() {
                writeln!(f, "{}:\t{}", metric.name(), *value as u64)?;
            } else {
                writeln!(f, "{}:\t{:.4}", metric.name(), value)?;
            }
        }
        Ok(())
    }
}
