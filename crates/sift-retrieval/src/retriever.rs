use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use sift_core::{Document, Result, SiftError};

/// The opaque retriever collaborator.
///
/// May be hybrid (dense+sparse) or dense-only — the core does not care.
/// Implementations may raise; the orchestration layer treats a failed or
/// timed-out search as empty results.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Return up to `k` documents ranked best-first.
    async fn search(&self, query: &str, k: usize) -> Result<Vec<Document>>;
}

/// Wraps a retriever with a per-call timeout so a stalled collaborator
/// cannot suspend a run indefinitely.
pub struct BoundedRetriever {
    inner: Arc<dyn Retriever>,
    timeout: Duration,
}

impl BoundedRetriever {
    pub fn new(inner: Arc<dyn Retriever>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl Retriever for BoundedRetriever {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<Document>> {
        match tokio::time::timeout(self.timeout, self.inner.search(query, k)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs(), "retrieval timed out");
                Err(SiftError::Retrieval(format!(
                    "search timed out after {}s",
                    self.timeout.as_secs()
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SlowRetriever;

    #[async_trait]
    impl Retriever for SlowRetriever {
        async fn search(&self, _query: &str, _k: usize) -> Result<Vec<Document>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(vec![])
        }
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_retriever_times_out() {
        let bounded = BoundedRetriever::new(Arc::new(SlowRetriever), Duration::from_millis(50));
        let result = bounded.search("anything", 5).await;
        assert!(matches!(result, Err(SiftError::Retrieval(_))));
    }
}
