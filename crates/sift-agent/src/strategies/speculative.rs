//! Speculative RAG: draft first, retrieve for verification.
//!
//! A quick unverified draft is written before any retrieval, then its
//! keywords drive the search so the evidence lands on what the draft
//! actually claims. The draft travels to the critic and the final
//! answer prompt for verification. Selected for multistep intent.

use tracing::debug;

use super::{StrategyOutput, plain_search};
use crate::prompts;
use sift_config::RetrievalConfig;
use sift_llm::LlmClient;
use sift_retrieval::Retriever;

pub async fn run(
    query: &str,
    llm: &dyn LlmClient,
    retriever: &dyn Retriever,
    config: &RetrievalConfig,
) -> StrategyOutput {
    let draft = match llm.chat(&prompts::speculative_draft(query)).await {
        Ok(text) => text,
        Err(e) => {
            debug!(error = %e, "draft generation failed, verifying an empty draft");
            String::new()
        }
    };

    let probe = keywords(llm, query, &draft).await;
    let docs = plain_search(retriever, &probe, config.k).await;
    debug!(draft_chars = draft.len(), docs = docs.len(), "speculative retrieval complete");

    StrategyOutput { draft: Some(draft), docs }
}

/// Extract search keywords from the draft. Failure or an empty reply
/// falls back to the original query.
async fn keywords(llm: &dyn LlmClient, query: &str, draft: &str) -> String {
    match llm.chat(&prompts::keywords(query, draft)).await {
        Ok(reply) => {
            let terms = reply.trim().to_string();
            if terms.is_empty() { query.to_string() } else { terms }
        }
        Err(e) => {
            debug!(error = %e, "keyword extraction failed, searching with original query");
            query.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_core::Document;
    use sift_llm::MockLlm;
    use sift_retrieval::MockRetriever;

    #[tokio::test]
    async fn retrieves_with_draft_keywords() {
        let llm = MockLlm::new()
            .with_reply("Apply to TIPS first, then the follow-on R&D program.")
            .with_reply("TIPS application R&D follow-on");
        let retriever = MockRetriever::new().with_results(vec![Document::new("evidence", 0.9)]);
        let queries = retriever.recorded_queries();

        let out = run("how do I plan my applications?", &llm, &retriever, &RetrievalConfig::default()).await;

        assert_eq!(out.draft.as_deref(), Some("Apply to TIPS first, then the follow-on R&D program."));
        assert_eq!(queries.lock()[0], "TIPS application R&D follow-on");
        assert_eq!(out.docs.len(), 1);
    }

    #[tokio::test]
    async fn draft_failure_still_yields_a_draft_and_docs() {
        // Both chat calls fail: draft is empty, probe is the original query.
        let llm = MockLlm::new();
        let retriever = MockRetriever::new().with_results(vec![Document::new("evidence", 0.9)]);
        let queries = retriever.recorded_queries();

        let out = run("plan?", &llm, &retriever, &RetrievalConfig::default()).await;

        assert_eq!(out.draft.as_deref(), Some(""));
        assert_eq!(queries.lock()[0], "plan?");
        assert_eq!(out.docs.len(), 1);
    }

    #[tokio::test]
    async fn empty_keyword_reply_falls_back_to_query() {
        let llm = MockLlm::new().with_reply("a draft").with_reply("  \n");
        let retriever = MockRetriever::new();
        let queries = retriever.recorded_queries();

        let _ = run("original", &llm, &retriever, &RetrievalConfig::default()).await;
        assert_eq!(queries.lock()[0], "original");
    }
}
