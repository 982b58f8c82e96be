//! Error types for the subdex-core crate.

use thiserror::Error;

/// Top-level error type for evaluation operations.
#[derive(Debug, Error)]
pub enum EvalError {
    /// `results()` was requested before any sample was submitted.
    #[error("Evaluation batch is empty: no samples were submitted")]
    EmptyBatch,

    #[error("Backend unavailable: {reason}")]
    BackendUnavailable { backend: String, reason: String },

    #[error("No such backend type {0}")]
    UnknownBackend(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl EvalError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn unavailable(backend: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::BackendUnavailable {
            backend: backend.into(),
            reason: reason.into(),
        }
    }

    /// Whether the caller can recover by changing its input rather than its setup.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::EmptyBatch | Self::InvalidInput(_))
    }
}
