//! Single bounded call to the retrieval backend.

use std::time::Duration;

use enrollwise_core::{Passage, RetrievalRequest, Retriever, bounded};
use tracing::{debug, warn};

/// Ask `retriever` once. Failure or timeout yields no passages.
pub async fn fetch_passages(
    retriever: &dyn Retriever,
    request: &RetrievalRequest,
    timeout: Duration,
) -> Vec<Passage> {
    match bounded(retriever.name(), timeout, retriever.retrieve(request)).await {
        Ok(passages) => {
            debug!(retriever = retriever.name(), count = passages.len(), "Passages retrieved");
            passages
        }
        Err(e) => {
            warn!(retriever = retriever.name(), error = %e, "Retrieval failed, continuing without context");
            Vec::new()
        }
    }
}
