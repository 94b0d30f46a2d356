//! Collaborator failures.
//!
//! Detectors and extractors have no error type at all: they are total
//! functions over arbitrary text. Configuration errors live with the config
//! crate, so this is the only failure the request path ever sees.

use thiserror::Error;

/// Failure of an external collaborator (summarizer or retriever).
///
/// Always recoverable: call sites match on it and substitute a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    #[error("{collaborator} failed: {reason}")]
    Failed {
        collaborator: String,
        reason: String,
    },

    #[error("{collaborator} timed out after {after_ms}ms")]
    TimedOut { collaborator: String, after_ms: u64 },

    #[error("{collaborator} returned an empty result")]
    EmptyResult { collaborator: String },
}

impl CollaboratorError {
    /// Shorthand for a `Failed` error.
    pub fn failed(collaborator: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Failed {
            collaborator: collaborator.into(),
            reason: reason.into(),
        }
    }

    /// Name of the collaborator that failed.
    pub fn collaborator(&self) -> &str {
        match self {
            Self::Failed { collaborator, .. }
            | Self::TimedOut { collaborator, .. }
            | Self::EmptyResult { collaborator } => collaborator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_displays_collaborator_and_budget() {
        let err = CollaboratorError::TimedOut {
            collaborator: "summarizer".into(),
            after_ms: 8000,
        };
        assert_eq!(err.collaborator(), "summarizer");
        assert_eq!(err.to_string(), "summarizer timed out after 8000ms");
    }

    #[test]
    fn failed_shorthand_keeps_reason() {
        let err = CollaboratorError::failed("retriever", "HTTP 503");
        assert_eq!(err.collaborator(), "retriever");
        assert!(err.to_string().contains("HTTP 503"));
    }
}
