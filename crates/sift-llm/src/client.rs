use async_trait::async_trait;
use sift_core::{ChatMessage, Result};

/// The opaque LLM collaborator: a message list in, a completion out.
///
/// Implementations may fail or time out; callers recover per-callsite
/// (routing falls back to heuristics, the critic to a default verdict,
/// strategies to empty results). The core never looks a client up from
/// a global — it is injected into every function that needs one.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Human-readable name, e.g. "openai", "mock".
    fn name(&self) -> &str;

    /// Send a conversation and get a text completion.
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String>;
}
