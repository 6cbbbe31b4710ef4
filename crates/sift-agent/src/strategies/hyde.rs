//! HyDE: Hypothetical Document Embeddings.
//!
//! A fabricated answer paragraph sits closer to real evidence in
//! embedding space than a short question does, so the hypothetical —
//! not the query — becomes the retrieval probe. Selected for factual
//! intent.

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
    let probe = match llm.chat(&prompts::hyde(query)).await {
        Ok(text) if !text.trim().is_empty() => {
            debug!(chars = text.len(), "retrieving with hypothetical document");
            text
        }
        Ok(_) | Err(_) => {
            debug!("no hypothetical available, retrieving with original query");
            query.to_string()
        }
    };

    StrategyOutput {
        draft: None,
        docs: plain_search(retriever, &probe, config.k).await,
    }
}
