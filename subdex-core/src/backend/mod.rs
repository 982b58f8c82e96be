//! Backend registry.
//!
//! Maps backend identifiers to factories. Known backends that cannot be built
//! here stay registered as [`BackendEntry::Unavailable`], so asking for them is
//! distinguishable from asking for an unknown identifier.

pub mod dummy;

use crate::error::EvalError;
use crate::subject::Hit;
use std::collections::HashMap;
use tracing::{debug, warn};

pub use dummy::DummyBackend;

/// A subject-indexing backend: turns document text into ranked hits.
pub trait SubjectBackend: Send + Sync {
    fn name(&self) -> &str;

    /// Suggest subjects for `text`, most relevant first.
    fn suggest(&self, text: &str) -> Vec<Hit>;
}

pub type BackendFactory = fn() -> Box<dyn SubjectBackend>;

/// A registry slot.
#[derive(Debug, Clone)]
pub enum BackendEntry {
    Available(BackendFactory),
    Unavailable { reason: String },
}

/// Optional backends that need a native library this build does not link.
const OPTIONAL_BACKENDS: &[(&str, &str)] = &[
    ("ehribert", "EhriBert"),
    ("fasttext", "fastText"),
    ("mdeberta", "MDeBERTa"),
    ("minilmv2", "MiniLMv2"),
    ("mistral", "Mistral"),
    ("nn_ensemble", "Keras and TensorFlow"),
    ("omikuji", "Omikuji"),
    ("stwfsa", "STWFSA"),
    ("xlmroberta", "XlmRoberta"),
    ("yake", "YAKE"),
];

/// Backends without a native dependency whose algorithms live outside this crate.
const EXTERNAL_BACKENDS: &[&str] = &["ensemble", "http", "mllm", "pav", "svc", "tfidf"];

/// Lookup table from backend identifier to entry.
#[derive(Debug, Clone, Default)]
pub struct BackendRegistry {
    entries: HashMap<String, BackendEntry>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in backends.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("dummy", || Box::new(DummyBackend));
        for (id, library) in OPTIONAL_BACKENDS {
            registry.mark_unavailable(id, format!("{library} not available, cannot use {id} backend"));
        }
        for id in EXTERNAL_BACKENDS {
            registry.mark_unavailable(id, format!("{id} backend is not built into subdex"));
        }
        registry
    }

    /// Register (or replace) an available backend.
    pub fn register(&mut self, id: &str, factory: BackendFactory) {
        debug!(backend = %id, "Registering backend");
        self.entries
            .insert(id.to_string(), BackendEntry::Available(factory));
    }

    /// Register (or replace) a backend that cannot be instantiated in this build.
    pub fn mark_unavailable(&mut self, id: &str, reason: impl Into<String>) {
        self.entries.insert(
            id.to_string(),
            BackendEntry::Unavailable {
                reason: reason.into(),
            },
        );
    }

    /// Instantiate the backend registered under `id`.
    pub fn get(&self, id: &str) -> Result<Box<dyn SubjectBackend>, EvalError> {
        match self.entries.get(id) {
            Some(BackendEntry::Available(factory)) => Ok(factory()),
            Some(BackendEntry::Unavailable { reason }) => {
                warn!(backend = %id, %reason, "Requested backend is unavailable");
                Err(EvalError::unavailable(id, reason.clone()))
            }
            None => Err(EvalError::UnknownBackend(id.to_string())),
        }
    }

    pub fn is_available(&self, id: &str) -> bool {
        matches!(self.entries.get(id), Some(BackendEntry::Available(_)))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Registered identifiers, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
