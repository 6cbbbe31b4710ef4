//! Mock retriever for deterministic testing.
//!
//! Replays queued result lists in order. An exhausted queue returns
//! empty results, which matches how the orchestrator treats a dried-up
//! collaborator.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::retriever::Retriever;
use sift_core::{Document, Result, SiftError};

enum MockHit {
    Docs(Vec<Document>),
    Error(String),
}

pub struct MockRetriever {
    queue: Arc<Mutex<Vec<MockHit>>>,
    /// Queries received, for assertions in tests.
    queries: Arc<Mutex<Vec<String>>>,
}

impl Default for MockRetriever {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRetriever {
    pub fn new() -> Self {
        Self {
            queue: Arc::new(Mutex::new(vec![])),
            queries: Arc::new(Mutex::new(vec![])),
        }
    }

    /// Queue one result list.
    pub fn with_results(self, docs: Vec<Document>) -> Self {
        self.queue.lock().push(MockHit::Docs(docs));
        self
    }

    /// Queue a failing search.
    pub fn with_error(self, msg: &str) -> Self {
        self.queue.lock().push(MockHit::Error(msg.to_string()));
        self
    }

    /// Queries received so far.
    pub fn recorded_queries(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.queries)
    }
}

#[async_trait]
impl Retriever for MockRetriever {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<Document>> {
        self.queries.lock().push(query.to_string());

        let mut queue = self.queue.lock();
        if queue.is_empty() {
            return Ok(vec![]);
        }
        match queue.remove(0) {
            MockHit::Docs(mut docs) => {
                docs.truncate(k);
                Ok(docs)
            }
            MockHit::Error(e) => Err(SiftError::Retrieval(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_queued_lists_in_order() {
        let retriever = MockRetriever::new()
            .with_results(vec![Document::new("first", 0.9)])
            .with_results(vec![Document::new("second", 0.8)]);

        let a = retriever.search("q1", 5).await.unwrap();
        let b = retriever.search("q2", 5).await.unwrap();
        assert_eq!(a[0].text, "first");
        assert_eq!(b[0].text, "second");
    }

    #[tokio::test]
    async fn exhausted_queue_is_empty() {
        let retriever = MockRetriever::new();
        let docs = retriever.search("anything", 5).await.unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn records_queries() {
        let retriever = MockRetriever::new().with_results(vec![]);
        let _ = retriever.search("hello world", 5).await;
        assert_eq!(retriever.recorded_queries().lock()[0], "hello world");
    }

    #[tokio::test]
    async fn truncates_to_k() {
        let retriever = MockRetriever::new().with_results(vec![
            Document::new("a", 0.9),
            Document::new("b", 0.8),
            Document::new("c", 0.7),
        ]);
        let docs = retriever.search("q", 2).await.unwrap();
        assert_eq!(docs.len(), 2);
    }
}
