//! The run loop. Classifies the query, executes the selected strategy,
//! lets the critic gate the result, and folds every failure mode into
//! the returned [`RunResult`] — `run` never propagates an error.

use std::sync::Arc;
use std::time::Duration;

use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::critic;
use crate::prompts::{self, APOLOGY, FALLBACK_PREAMBLE, REALTIME_NOTICE};
use crate::router;
use crate::strategies::{self, Strategy, StrategyOutput};
use crate::tracked::TrackedLlm;
use sift_config::SiftConfig;
use sift_core::{CriticAction, Document, RunResult, Verdict};
use sift_llm::LlmClient;
use sift_retrieval::{BoundedRetriever, Retriever};
use sift_tools::{FounderProfile, ProgramCatalog, REALTIME_UNAVAILABLE, RealtimeFetcher, check_eligibility};

/// How many fallback-answer documents to quote verbatim.
const FALLBACK_DOCS: usize = 3;
/// Longest live-status snippet appended to the context, in chars.
const LIVE_SNIPPET_CHARS: usize = 500;

pub struct Orchestrator {
    llm: Arc<dyn LlmClient>,
    retriever: Arc<dyn Retriever>,
    config: SiftConfig,
    catalog: Option<ProgramCatalog>,
    fetcher: RealtimeFetcher,
}

impl Orchestrator {
    pub fn new(llm: Arc<dyn LlmClient>, retriever: Arc<dyn Retriever>, config: SiftConfig) -> Self {
        let fetcher = RealtimeFetcher::new(
            config.tools.allowed_domains.clone(),
            Duration::from_secs(config.tools.fetch_timeout_secs),
        );
        Self { llm, retriever, config, catalog: None, fetcher }
    }

    /// Attach a program catalog for profile-aware factual runs.
    pub fn with_catalog(mut self, catalog: ProgramCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Answer one query. Never fails: LLM outages, empty retrieval, dead
    /// endpoints, and unparsable critic output all degrade into fields
    /// of the result.
    pub async fn run(&self, query: &str, profile: Option<&FounderProfile>) -> RunResult {
        let run_id = Uuid::new_v4();
        let span = info_span!("run", %run_id);
        self.run_inner(query, profile).instrument(span).await
    }

    async fn run_inner(&self, query: &str, profile: Option<&FounderProfile>) -> RunResult {
        if query.trim().is_empty() {
            return RunResult {
                answer: APOLOGY.to_string(),
                strategy_used: "search".to_string(),
                sources: vec![],
                confidence: 0.0,
                iterations: 0,
            };
        }

        let llm = TrackedLlm::new(
            Arc::clone(&self.llm),
            Duration::from_secs(self.config.llm.timeout_secs),
        );
        let retriever = BoundedRetriever::new(
            Arc::clone(&self.retriever),
            Duration::from_secs(self.config.retrieval.timeout_secs),
        );

        let intent = router::classify(&llm, query).await;
        let mut strategy = Strategy::for_intent(intent);
        let mut current_query = query.to_string();
        let mut iterations: u32 = 0;
        info!(intent = %intent, strategy = strategy.intent_label(), "query classified");

        let (out, verdict, context, live_down) = loop {
            let out = strategies::execute(strategy, &current_query, &llm, &retriever, &self.config.retrieval).await;
            if out.docs.is_empty() {
                info!(strategy = strategy.intent_label(), iterations, "no documents retrieved");
                let mut strategy_used = strategy.intent_label().to_string();
                // A fully dead LLM is reported even when there is no
                // evidence to quote; the empty-retrieval fields win.
                if llm.total_outage() {
                    strategy_used.push_str("+fallback");
                }
                return RunResult {
                    answer: APOLOGY.to_string(),
                    strategy_used,
                    sources: vec![],
                    confidence: 0.0,
                    iterations,
                };
            }

            let mut context = compose_context(&out.docs, self.config.retrieval.context_docs);
            if strategy == Strategy::Hyde {
                if let Some(extra) = self.catalog_context(&current_query, profile) {
                    context.push_str("\n---\n");
                    context.push_str(&extra);
                }
            }
            let mut live_down = false;
            if strategy == Strategy::Recursive {
                let (lines, down) = self.live_status().await;
                live_down = down;
                for line in lines {
                    context.push_str("\n---\n");
                    context.push_str(&line);
                }
            }

            let verdict = critic::critique(&llm, &current_query, &context, out.draft.as_deref().unwrap_or("")).await;
            match verdict.action {
                CriticAction::Refine if iterations < self.config.agent.max_retries => {
                    iterations += 1;
                    info!(iterations, gaps = ?verdict.gaps, "critic asked to refine");
                    if let Some(rewritten) =
                        strategies::reformulate_query(&llm, &current_query, verdict.gaps.as_deref()).await
                    {
                        current_query = rewritten;
                    }
                }
                CriticAction::RetryDifferent if iterations < self.config.agent.max_retries => {
                    iterations += 1;
                    strategy = strategy.next_preferred();
                    info!(iterations, strategy = strategy.intent_label(), "critic asked for a different strategy");
                }
                _ => break (out, verdict, context, live_down),
            }
        };

        self.finalize(query, strategy, out, verdict, context, live_down, &llm, iterations)
            .await
    }

    #[allow(clippy::too_many_arguments)]
    async fn finalize(
        &self,
        query: &str,
        strategy: Strategy,
        out: StrategyOutput,
        verdict: Verdict,
        context: String,
        live_down: bool,
        llm: &TrackedLlm,
        iterations: u32,
    ) -> RunResult {
        let mut answer = match llm
            .chat(&prompts::final_answer(query, &context, out.draft.as_deref()))
            .await
        {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => fallback_answer(&out.docs),
            Err(e) => {
                warn!(error = %e, "answer generation failed, quoting evidence");
                fallback_answer(&out.docs)
            }
        };

        let mut confidence = verdict.weighted_confidence(self.config.critic.weights());
        let mut strategy_used = strategy.intent_label().to_string();

        if live_down {
            answer.push_str("\n\n");
            answer.push_str(REALTIME_NOTICE);
            confidence = confidence.min(0.5);
        }

        // An LLM that failed every call this run cannot have grounded the
        // verdict either; report the evidence with flat low confidence.
        if llm.total_outage() {
            answer = fallback_answer(&out.docs);
            confidence = self.config.agent.fallback_confidence;
            strategy_used.push_str("+fallback");
        }

        info!(
            strategy = %strategy_used,
            confidence,
            sources = out.docs.len(),
            iterations,
            "run complete"
        );
        RunResult {
            answer,
            strategy_used,
            sources: out.docs,
            confidence: confidence.clamp(0.0, 1.0),
            iterations,
        }
    }

    /// Catalog matches plus eligibility reasons for the attached profile.
    fn catalog_context(&self, query: &str, profile: Option<&FounderProfile>) -> Option<String> {
        let catalog = self.catalog.as_ref()?;
        let matches = catalog.search(query);
        if matches.is_empty() {
            return None;
        }
        let mut lines = Vec::with_capacity(matches.len());
        for program in matches.iter().take(3) {
            let mut line = format!("Program: {} — {}", program.name, program.description);
            if let Some(profile) = profile {
                let check = check_eligibility(profile, program);
                let status = if check.eligible { "eligible" } else { "not eligible" };
                line.push_str(&format!(" [{status}: {}]", check.reasons.join("; ")));
            }
            lines.push(line);
        }
        Some(lines.join("\n"))
    }

    /// Poll the configured live endpoints. Returns the usable snippets
    /// and whether every endpoint was unreachable.
    async fn live_status(&self) -> (Vec<String>, bool) {
        let endpoints = &self.config.tools.realtime_endpoints;
        if endpoints.is_empty() {
            return (vec![], false);
        }
        let mut lines = Vec::new();
        let mut reachable = false;
        for url in endpoints {
            match self.fetcher.fetch(url).await {
                Ok(body) if body == REALTIME_UNAVAILABLE => {
                    warn!(url = %url, "live endpoint unreachable");
                }
                Ok(body) => {
                    reachable = true;
                    let snippet: String = body.trim().chars().take(LIVE_SNIPPET_CHARS).collect();
                    lines.push(format!("Live status ({url}): {snippet}"));
                }
                Err(e) => {
                    // Allow-list miss is a configuration error; skip it.
                    warn!(url = %url, error = %e, "live endpoint rejected");
                }
            }
        }
        (lines, !reachable)
    }
}

fn compose_context(docs: &[Document], limit: usize) -> String {
    docs.iter()
        .take(limit)
        .map(|d| d.text.as_str())
        .collect::<Vec<_>>()
        .join("\n---\n")
}

fn fallback_answer(docs: &[Document]) -> String {
    if docs.is_empty() {
        return APOLOGY.to_string();
    }
    let evidence = docs
        .iter()
        .take(FALLBACK_DOCS)
        .map(|d| d.text.as_str())
        .collect::<Vec<_>>()
        .join("\n---\n");
    format!("{FALLBACK_PREAMBLE}\n\n{evidence}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_quotes_at_most_three_documents() {
        let docs: Vec<Document> = (0..5).map(|i| Document::new(format!("doc {i}"), 0.5)).collect();
        let answer = fallback_answer(&docs);
        assert!(answer.starts_with(FALLBACK_PREAMBLE));
        assert!(answer.contains("doc 2"));
        assert!(!answer.contains("doc 3"));
    }

    #[test]
    fn fallback_without_evidence_is_the_apology() {
        assert_eq!(fallback_answer(&[]), APOLOGY);
    }

    #[test]
    fn context_respects_the_document_limit() {
        let docs: Vec<Document> = (0..4).map(|i| Document::new(format!("d{i}"), 0.5)).collect();
        let context = compose_context(&docs, 2);
        assert_eq!(context, "d0\n---\nd1");
    }
}
