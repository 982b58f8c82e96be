//! Subjects as predicted by backends and as recorded in gold standards.
//!
//! A subject can be known by its canonical identifier (URI), its display label,
//! or both. Each document is compared in exactly one key space, picked from what
//! its gold standard provides.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which half of a subject's dual identity a document is compared by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeySpace {
    Identifier,
    Label,
}

/// A subject projected into one key space.
///
/// Identifiers and labels never compare equal, even when spelled identically.
/// `Missing` stands in for a hit that lacks the document's half of the identity;
/// gold keys are never `Missing`, so it keeps its rank and never matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SubjectKey {
    Identifier(String),
    Label(String),
    Missing,
}

/// One predicted subject for a document. Rank is given by position in the
/// document's hit list, not stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub score: f64,
}

impl Hit {
    pub fn new(uri: impl Into<String>, label: impl Into<String>, score: f64) -> Self {
        Self {
            uri: Some(uri.into()),
            label: Some(label.into()),
            score,
        }
    }

    pub fn with_uri(uri: impl Into<String>, score: f64) -> Self {
        Self {
            uri: Some(uri.into()),
            label: None,
            score,
        }
    }

    pub fn with_label(label: impl Into<String>, score: f64) -> Self {
        Self {
            uri: None,
            label: Some(label.into()),
            score,
        }
    }

    /// Project this hit into `space`, or `None` if it lacks that half of its identity.
    pub fn key(&self, space: KeySpace) -> Option<SubjectKey> {
        match space {
            KeySpace::Identifier => self.uri.clone().map(SubjectKey::Identifier),
            KeySpace::Label => self.label.clone().map(SubjectKey::Label),
        }
    }

    /// Like [`Hit::key`], but a hit without that half projects to [`SubjectKey::Missing`].
    pub fn ranked_key(&self, space: KeySpace) -> SubjectKey {
        self.key(space).unwrap_or(SubjectKey::Missing)
    }
}

/// A gold-standard subject entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Subject {
    pub fn new(uri: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            uri: Some(uri.into()),
            label: Some(label.into()),
        }
    }

    pub fn uri(uri: impl Into<String>) -> Self {
        Self {
            uri: Some(uri.into()),
            label: None,
        }
    }

    pub fn label(label: impl Into<String>) -> Self {
        Self {
            uri: None,
            label: Some(label.into()),
        }
    }
}

/// Ground truth for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Subject>", into = "Vec<Subject>")]
pub struct GoldSubjectSet {
    subjects: Vec<Subject>,
    uris: BTreeSet<String>,
    labels: BTreeSet<String>,
}

impl GoldSubjectSet {
    pub fn new(subjects: Vec<Subject>) -> Self {
        let uris = subjects.iter().filter_map(|s| s.uri.clone()).collect();
        let labels = subjects.iter().filter_map(|s| s.label.clone()).collect();
        Self {
            subjects,
            uris,
            labels,
        }
    }

    pub fn from_uris<I, S>(uris: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(uris.into_iter().map(Subject::uri).collect())
    }

    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(labels.into_iter().map(Subject::label).collect())
    }

    /// True when every gold subject carries an identifier (vacuously true when empty).
    ///
    /// This is stricter than comparing the number of distinct identifiers with the
    /// number of distinct labels: a set holding one URI-only and one label-only
    /// subject has as many identifiers as labels, yet is compared by label here.
    pub fn has_uris(&self) -> bool {
        self.subjects.iter().all(|s| s.uri.is_some())
    }

    pub fn subject_uris(&self) -> &BTreeSet<String> {
        &self.uris
    }

    pub fn subject_labels(&self) -> &BTreeSet<String> {
        &self.labels
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn key_space(&self) -> KeySpace {
        if self.has_uris() {
            KeySpace::Identifier
        } else {
            KeySpace::Label
        }
    }

    /// The gold set in this document's key space, in sorted order.
    pub fn keys(&self) -> Vec<SubjectKey> {
        match self.key_space() {
            KeySpace::Identifier => self.uris.iter().cloned().map(SubjectKey::Identifier).collect(),
            KeySpace::Label => self.labels.iter().cloned().map(SubjectKey::Label).collect(),
        }
    }
}

impl From<Vec<Subject>> for GoldSubjectSet {
    fn from(subjects: Vec<Subject>) -> Self {
        Self::new(subjects)
    }
}

impl From<GoldSubjectSet> for Vec<Subject> {
    fn from(set: GoldSubjectSet) -> Self {
        set.subjects
    }
}

/// Trims a document's hit list before it is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SuggestionFilter {
    /// Keep at most this many hits per document.
    pub limit: Option<usize>,
    /// Drop hits scoring below this value.
    pub threshold: f64,
}

impl SuggestionFilter {
    pub fn new(limit: Option<usize>, threshold: f64) -> Self {
        Self { limit, threshold }
    }

    /// Keep hits at or above the threshold, in rank order, up to the limit.
    pub fn apply(&self, hits: Vec<Hit>) -> Vec<Hit> {
        let limit = self.limit.unwrap_or(usize::MAX);
        hits.into_iter()
            .filter(|hit| hit.score >= self.threshold)
            .take(limit)
            .collect()
    }
}
