use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::warn;

use sift_core::{ChatMessage, Result, SiftError};
use sift_llm::LlmClient;

/// Wraps the injected LLM client with a per-call timeout and
/// success/failure counters.
///
/// One `TrackedLlm` lives for exactly one run, so the orchestrator can
/// tell "every LLM call in this run failed" apart from partial
/// degradation without any process-wide state.
pub struct TrackedLlm {
    inner: Arc<dyn LlmClient>,
    timeout: Duration,
    ok: AtomicU64,
    failed: AtomicU64,
}

impl TrackedLlm {
    pub fn new(inner: Arc<dyn LlmClient>, timeout: Duration) -> Self {
        Self {
            inner,
            timeout,
            ok: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    pub fn successes(&self) -> u64 {
        self.ok.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    /// True when at least one call was attempted and none succeeded.
    pub fn total_outage(&self) -> bool {
        self.successes() == 0 && self.failures() > 0
    }
}

#[async_trait]
impl LlmClient for TrackedLlm {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn chat(&self, messages: &[ChatMessage]) -> Result<String> {
        let result = match tokio::time::timeout(self.timeout, self.inner.chat(messages)).await {
            Ok(result) => result,
            Err(_) => Err(SiftError::LlmUnavailable(format!(
                "chat timed out after {}s",
                self.timeout.as_secs()
            ))),
        };
        match &result {
            Ok(_) => {
                self.ok.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                warn!(provider = self.inner.name(), error = %e, "llm call failed");
                self.failed.fetch_add(1, Ordering::Relaxed);
            }
        }
        result
    }
}
