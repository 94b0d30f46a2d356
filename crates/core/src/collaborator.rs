//! External collaborators: summarizer and retriever.
//!
//! Both are black boxes that may fail or stall. The pipeline only ever calls
//! them through [`bounded`], so a slow backend turns into a
//! [`CollaboratorError::TimedOut`] instead of a hung request.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CollaboratorError;
use crate::passage::{Campus, Passage};

/// Condenses older conversation text into a short summary.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// A human-readable name for logs.
    fn name(&self) -> &str;

    /// Summarize the given prompt (instruction + conversation text).
    async fn summarize(&self, prompt: &str) -> Result<String, CollaboratorError>;
}

/// A query against the reference corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalRequest {
    /// Query text.
    pub query: String,

    /// Number of passages to ask for.
    pub top_k: usize,

    /// The only campus the query can be about, when that is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campus_hint: Option<Campus>,
}

/// Fetches ranked passages from the reference corpus.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// A human-readable name for logs.
    fn name(&self) -> &str;

    /// Return passages in rank order (best first).
    async fn retrieve(&self, request: &RetrievalRequest) -> Result<Vec<Passage>, CollaboratorError>;
}

/// Run a collaborator future with a deadline.
pub async fn bounded<T, F>(collaborator: &str, timeout: Duration, fut: F) -> Result<T, CollaboratorError>
where
    F: Future<Output = Result<T, CollaboratorError>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => Err(CollaboratorError::TimedOut {
            collaborator: collaborator.to_string(),
            after_ms: timeout.as_millis() as u64,
        }),
    }
}

/// A summarizer that is never available. Forces the local fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSummarizer;

#[async_trait]
impl Summarizer for NoopSummarizer {
    fn name(&self) -> &str {
        "noop"
    }

    async fn summarize(&self, _prompt: &str) -> Result<String, CollaboratorError> {
        Err(CollaboratorError::failed("noop", "no summarizer configured"))
    }
}

/// A retriever that serves a fixed passage list, truncated to `top_k`.
#[derive(Debug, Default, Clone)]
pub struct StaticRetriever {
    passages: Vec<Passage>,
}

impl StaticRetriever {
    pub fn new(passages: Vec<Passage>) -> Self {
        Self { passages }
    }
}

#[async_trait]
impl Retriever for StaticRetriever {
    fn name(&self) -> &str {
        "static"
    }

    async fn retrieve(&self, request: &RetrievalRequest) -> Result<Vec<Passage>, CollaboratorError> {
        Ok(self.passages.iter().take(request.top_k).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stalled;

    #[async_trait]
    impl Summarizer for Stalled {
        fn name(&self) -> &str {
            "stalled"
        }

        async fn summarize(&self, _prompt: &str) -> Result<String, CollaboratorError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("too late".into())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_times_out() {
        let s = Stalled;
        let result = bounded("stalled", Duration::from_millis(50), s.summarize("x")).await;
        assert_eq!(
            result,
            Err(CollaboratorError::TimedOut {
                collaborator: "stalled".into(),
                after_ms: 50
            })
        );
    }

    #[tokio::test]
    async fn bounded_passes_through_success() {
        let result = bounded("ok", Duration::from_secs(1), async { Ok::<_, CollaboratorError>(7) }).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test]
    async fn noop_summarizer_always_fails() {
        assert!(NoopSummarizer.summarize("anything").await.is_err());
    }

    #[tokio::test]
    async fn static_retriever_respects_top_k() {
        let retriever = StaticRetriever::new(vec![
            Passage::new("a", "one"),
            Passage::new("b", "two"),
            Passage::new("c", "three"),
        ]);
        let request = RetrievalRequest {
            query: "q".into(),
            top_k: 2,
            campus_hint: None,
        };
        let passages = retriever.retrieve(&request).await.unwrap();
        assert_eq!(passages.len(), 2);
        assert_eq!(passages[1].source_label, "two");
    }
}
