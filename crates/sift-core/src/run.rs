use serde::{Deserialize, Serialize};

use crate::document::Document;

/// The outcome of one `run(query)` invocation. This is the only value
/// the agent-facing API returns; all degradation (LLM outage, empty
/// retrieval, dead endpoints) is folded into its fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// The final answer text. Never empty — degraded runs return an
    /// apology or concatenated evidence instead.
    pub answer: String,
    /// Intent label of the strategy that produced the answer, optionally
    /// suffixed `+fallback` when every LLM call in the run failed.
    pub strategy_used: String,
    /// The documents the answer was grounded on. Empty when retrieval
    /// produced nothing.
    pub sources: Vec<Document>,
    /// Weighted critic confidence in [0,1]. Always 0.0 when `sources`
    /// is empty.
    pub confidence: f32,
    /// Number of refine/retry loops taken (bounded by `max_retries`).
    pub iterations: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_result_round_trips_through_json() {
        let result = RunResult {
            answer: "Eligibility: ≤ 7 years and VC-backed.".into(),
            strategy_used: "factual".into(),
            sources: vec![Document::new("TIPS: startups within 7 years.", 0.9)],
            confidence: 0.88,
            iterations: 0,
        };
        let json = serde_json::to_string(&result).unwrap();
        let back: RunResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.strategy_used, "factual");
        assert_eq!(back.sources.len(), 1);
        assert_eq!(back.iterations, 0);
    }
}
