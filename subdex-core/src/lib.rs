//! # subdex-core — evaluation engine for subject-indexing predictions
//!
//! Scores ranked subject predictions against gold-standard subject sets and
//! aggregates them into one corpus-level report for comparing backends.
//!
//! ```
//! use subdex_core::{EvaluationBatch, GoldSubjectSet, Hit};
//!
//! let mut batch = EvaluationBatch::new();
//! batch.evaluate(
//!     vec![Hit::with_uri("x", 0.9), Hit::with_uri("y", 0.4)],
//!     GoldSubjectSet::from_uris(["x", "z"]),
//! );
//! batch.evaluate(vec![Hit::with_uri("z", 0.8)], GoldSubjectSet::from_uris(["z"]));
//!
//! let report = batch.results().unwrap();
//! assert_eq!(report.get("Recall"), Some(0.75));
//! assert_eq!(report.get("True positives"), Some(2.0));
//! ```

pub mod backend;
pub mod batch;
pub mod config;
pub mod encoding;
pub mod error;
pub mod metrics;
pub mod report;
pub mod subject;

// Re-exports
pub use backend::{BackendRegistry, SubjectBackend};
pub use batch::{EvaluationBatch, Sample};
pub use config::{ConfigOverrides, EvalConfig, OutputFormat, load_config};
pub use error::EvalError;
pub use report::{Metric, MetricsReport};
pub use subject::{GoldSubjectSet, Hit, KeySpace, Subject, SubjectKey, SuggestionFilter};
