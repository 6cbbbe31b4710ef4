//! Mock LLM client for deterministic testing.
//!
//! Returns pre-configured replies in queue order without making any
//! HTTP calls. An exhausted queue returns `LlmUnavailable`, so
//! `MockLlm::new()` with nothing queued models a dead collaborator.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::client::LlmClient;
use sift_core::{ChatMessage, Result, SiftError};

enum MockReply {
    Text(String),
    Error(String),
}

/// A mock LLM that replays a queue of replies.
///
/// # Example
/// ```
/// use sift_llm::MockLlm;
/// let llm = MockLlm::new()
///     .with_reply("factual")
///     .with_error("HTTP 500: boom");
/// ```
pub struct MockLlm {
    replies: Arc<Mutex<Vec<MockReply>>>,
    /// Every message list received, for assertions in tests.
    requests: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
}

impl Default for MockLlm {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLlm {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(vec![])),
            requests: Arc::new(Mutex::new(vec![])),
        }
    }

    /// Queue a text reply.
    pub fn with_reply(self, text: &str) -> Self {
        self.replies.lock().push(MockReply::Text(text.to_string()));
        self
    }

    /// Queue several text replies at once.
    pub fn with_replies<'a>(self, texts: impl IntoIterator<Item = &'a str>) -> Self {
        {
            let mut replies = self.replies.lock();
            for t in texts {
                replies.push(MockReply::Text(t.to_string()));
            }
        }
        self
    }

    /// Queue an error reply.
    pub fn with_error(self, msg: &str) -> Self {
        self.replies.lock().push(MockReply::Error(msg.to_string()));
        self
    }

    /// All message lists this mock has received so far.
    pub fn recorded_requests(&self) -> Arc<Mutex<Vec<Vec<ChatMessage>>>> {
        Arc::clone(&self.requests)
    }

    /// Number of chat calls received.
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    fn name(&self) -> &str {
        "mock"
    }

    async fn chat(&self, messages: &[ChatMessage]) -> Result<String> {
        self.requests.lock().push(messages.to_vec());

        let mut replies = self.replies.lock();
        if replies.is_empty() {
            return Err(SiftError::LlmUnavailable("mock reply queue empty".into()));
        }
        match replies.remove(0) {
            MockReply::Text(t) => Ok(t),
            MockReply::Error(e) => Err(SiftError::LlmUnavailable(e)),
        }
    }
}
