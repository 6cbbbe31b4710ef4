//! Query router: one LLM classification with an ordered heuristic
//! fallback. Never fails — a dead LLM or a gibberish reply still
//! yields a valid [`Intent`].

use tracing::debug;

use crate::prompts;
use sift_core::Intent;
use sift_llm::LlmClient;

/// Eligibility/qualification terms → factual. Checked first.
const ELIGIBILITY_TERMS: &[&str] = &[
    "requirement",
    "eligible",
    "eligibility",
    "qualify",
    "criteria",
    "자격",
    "요건",
    "조건",
];

/// Currency/recency terms → realtime.
const RECENCY_TERMS: &[&str] = &[
    "now",
    "currently",
    "open",
    "accepting",
    "deadline",
    "지금",
    "현재",
    "모집",
];

/// Staged-plan terms → multistep.
const PLAN_TERMS: &[&str] = &[
    "strategy",
    "step by step",
    "phases",
    "plan",
    "roadmap",
    "전략",
    "단계",
    "계획",
];

/// Classify a query into one of the four intents.
///
/// Asks the LLM for a single-token label; anything that is not exactly
/// one of the four labels — including an LLM failure or empty reply —
/// falls through to [`heuristic`].
pub async fn classify(llm: &dyn LlmClient, query: &str) -> Intent {
    match llm.chat(&prompts::classify(query)).await {
        Ok(reply) => match Intent::parse(&reply) {
            Some(intent) => intent,
            None => {
                debug!(reply = %reply.trim(), "classifier reply not a known label, using heuristic");
                heuristic(query)
            }
        },
        Err(e) => {
            debug!(error = %e, "classifier llm failed, using heuristic");
            heuristic(query)
        }
    }
}

/// Ordered keyword rules; first match wins, default is `search`.
pub fn heuristic(query: &str) -> Intent {
    let q = query.to_lowercase();
    if ELIGIBILITY_TERMS.iter().any(|t| contains_term(&q, t)) {
        Intent::Factual
    } else if RECENCY_TERMS.iter().any(|t| contains_term(&q, t)) {
        Intent::Realtime
    } else if PLAN_TERMS.iter().any(|t| contains_term(&q, t)) {
        Intent::Multistep
    } else {
        Intent::Search
    }
}

/// English terms must start at a word boundary so that short ones do
/// not fire inside unrelated words ("now" in "know"); trailing letters
/// are allowed because the lists carry stems ("requirement" should
/// cover "requirements"). Korean terms agglutinate particles directly
/// onto the stem, so they stay plain substring matches.
fn contains_term(haystack: &str, term: &str) -> bool {
    if !term.is_ascii() {
        return haystack.contains(term);
    }
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(term) {
        let begin = from + pos;
        let preceded_by_letter = haystack[..begin]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphanumeric());
        if !preceded_by_letter {
            return true;
        }
        from = begin + term.len();
    }
    false
}
