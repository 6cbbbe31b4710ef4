//! The retrieval strategy pack.
//!
//! Every strategy shares one shape: `(query, llm, retriever) →
//! (optional draft, ranked docs)`. Collaborator failures never escape a
//! strategy — a dead LLM degrades to plain retrieval and a dead
//! retriever to empty results, which the orchestrator handles.

pub mod hyde;
pub mod multi_query;
pub mod recursive;
pub mod speculative;

use tracing::{debug, warn};

use crate::prompts;
use sift_config::RetrievalConfig;
use sift_core::{Document, Intent};
use sift_llm::LlmClient;
use sift_retrieval::Retriever;

/// What a strategy hands back to the orchestrator. The draft, when
/// present, is owned by the strategy that produced it and transferred
/// here; the docs are the fused/ranked retrieval output.
#[derive(Debug, Default)]
pub struct StrategyOutput {
    pub draft: Option<String>,
    pub docs: Vec<Document>,
}

/// The four retrieval strategies. Selection is deterministic given the
/// intent and the retry count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Hypothetical-document retrieval (factual).
    Hyde,
    /// Paraphrase fan-out fused with RRF (search, the default).
    MultiQuery,
    /// Draft-first retrieval keyed on the draft's keywords (multistep).
    Speculative,
    /// Critic-gated requery loop over multi-query (realtime).
    Recursive,
}

impl Strategy {
    pub fn for_intent(intent: Intent) -> Strategy {
        match intent {
            Intent::Factual => Strategy::Hyde,
            Intent::Search => Strategy::MultiQuery,
            Intent::Multistep => Strategy::Speculative,
            Intent::Realtime => Strategy::Recursive,
        }
    }

    /// The intent label reported in `RunResult::strategy_used`.
    pub fn intent_label(&self) -> &'static str {
        match self {
            Strategy::Hyde => "factual",
            Strategy::MultiQuery => "search",
            Strategy::Speculative => "multistep",
            Strategy::Recursive => "realtime",
        }
    }

    /// Next strategy when the critic asks for `retry_different`.
    /// Fixed documented preference: factual → search → multistep →
    /// realtime, advancing cyclically from the current one.
    pub fn next_preferred(&self) -> Strategy {
        match self {
            Strategy::Hyde => Strategy::MultiQuery,
            Strategy::MultiQuery => Strategy::Speculative,
            Strategy::Speculative => Strategy::Recursive,
            Strategy::Recursive => Strategy::Hyde,
        }
    }
}

/// Run one strategy to completion. Never fails.
pub async fn execute(
    strategy: Strategy,
    query: &str,
    llm: &dyn LlmClient,
    retriever: &dyn Retriever,
    config: &RetrievalConfig,
) -> StrategyOutput {
    debug!(strategy = strategy.intent_label(), query = %query, "executing strategy");
    match strategy {
        Strategy::Hyde => hyde::run(query, llm, retriever, config).await,
        Strategy::MultiQuery => multi_query::run(query, llm, retriever, config).await,
        Strategy::Speculative => speculative::run(query, llm, retriever, config).await,
        Strategy::Recursive => recursive::run(query, llm, retriever, config).await,
    }
}

/// The plain search path: one retriever call, failures folded into
/// empty results.
pub async fn plain_search(retriever: &dyn Retriever, query: &str, k: usize) -> Vec<Document> {
    match retriever.search(query, k).await {
        Ok(docs) => docs,
        Err(e) => {
            warn!(error = %e, query = %query, "retrieval failed, treating as empty");
            vec![]
        }
    }
}

/// Ask the LLM to rewrite a query, optionally steering with the gaps the
/// critic named. `None` when the LLM fails or replies with nothing — the
/// caller keeps the current query.
pub async fn reformulate_query(
    llm: &dyn LlmClient,
    query: &str,
    gaps: Option<&str>,
) -> Option<String> {
    match llm.chat(&prompts::reformulate(query, gaps)).await {
        Ok(reply) => {
            let rewritten = reply.trim().trim_matches('"').to_string();
            (!rewritten.is_empty()).then_some(rewritten)
        }
        Err(e) => {
            debug!(error = %e, "reformulation llm failed, keeping current query");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_maps_to_documented_strategy() {
        assert_eq!(Strategy::for_intent(Intent::Factual), Strategy::Hyde);
        assert_eq!(Strategy::for_intent(Intent::Search), Strategy::MultiQuery);
        assert_eq!(Strategy::for_intent(Intent::Multistep), Strategy::Speculative);
        assert_eq!(Strategy::for_intent(Intent::Realtime), Strategy::Recursive);
    }

    #[test]
    fn preference_order_cycles_through_all_strategies() {
        let mut seen = vec![Strategy::Hyde];
        let mut current = Strategy::Hyde;
        for _ in 0..3 {
            current = current.next_preferred();
            assert!(!seen.contains(&current), "preference order revisited {current:?}");
            seen.push(current);
        }
        assert_eq!(current.next_preferred(), Strategy::Hyde);
    }

    #[tokio::test]
    async fn plain_search_folds_errors_into_empty() {
        let retriever = sift_retrieval::MockRetriever::new().with_error("index down");
        let docs = plain_search(&retriever, "q", 5).await;
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn reformulate_keeps_nothing_on_llm_failure() {
        let llm = sift_llm::MockLlm::new();
        assert!(reformulate_query(&llm, "q", None).await.is_none());
    }

    #[tokio::test]
    async fn reformulate_strips_wrapping_quotes() {
        let llm = sift_llm::MockLlm::new().with_reply("\"better query\"\n");
        assert_eq!(
            reformulate_query(&llm, "q", Some("no deadlines")).await.as_deref(),
            Some("better query")
        );
    }
}
