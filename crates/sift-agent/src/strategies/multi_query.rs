//! Multi-Query Fusion: paraphrase fan-out merged with Reciprocal Rank
//! Fusion. Selected for search intent and the default path.

use tracing::debug;

use super::{StrategyOutput, plain_search};
use crate::prompts;
use sift_config::RetrievalConfig;
use sift_llm::LlmClient;
use sift_retrieval::{Retriever, reciprocal_rank_fusion};

pub async fn run(
    query: &str,
    llm: &dyn LlmClient,
    retriever: &dyn Retriever,
    config: &RetrievalConfig,
) -> StrategyOutput {
    // Original first, then paraphrases; ordering determines the RRF
    // first-occurrence tie-break.
    let mut queries = vec![query.to_string()];
    queries.extend(variants(llm, query, config.query_variants).await);

    let mut lists = Vec::with_capacity(queries.len());
    for q in &queries {
        lists.push(plain_search(retriever, q, config.k).await);
    }

    let docs = reciprocal_rank_fusion(&lists, config.rrf_k, config.k);
    debug!(
        variants = queries.len() - 1,
        fused = docs.len(),
        "multi-query fusion complete"
    );

    StrategyOutput { draft: None, docs }
}

/// Ask for paraphrases, one per line. An LLM failure or an empty reply
/// yields no variants, degrading the strategy to plain search.
async fn variants(llm: &dyn LlmClient, query: &str, n: usize) -> Vec<String> {
    if n == 0 {
        return vec![];
    }
    match llm.chat(&prompts::variants(query, n)).await {
        Ok(reply) => reply
            .lines()
            .map(|l| l.trim().trim_matches('"').trim())
            .filter(|l| !l.is_empty())
            .take(n)
            .map(str::to_string)
            .collect(),
        Err(e) => {
            debug!(error = %e, "variant generation failed, using original query only");
            vec![]
        }
    }
}
