use serde::{Deserialize, Serialize};

/// Root configuration — maps to `sift.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiftConfig {
    pub llm: LlmConfig,
    pub retrieval: RetrievalConfig,
    pub agent: AgentConfig,
    pub critic: CriticConfig,
    pub tools: ToolsConfig,
    pub logging: LoggingConfig,
}

// ── LLM ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model identifier sent to the OpenAI-compatible endpoint.
    pub model: String,
    /// Base URL of the chat-completions endpoint.
    pub base_url: String,
    /// API key. Usually left unset here and supplied via OPENAI_API_KEY.
    pub api_key: Option<String>,
    /// Sampling temperature (0.0 - 2.0).
    pub temperature: f32,
    /// Maximum tokens per completion.
    pub max_tokens: u32,
    /// Per-call timeout in seconds. Calls past this bound count as failed.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".into(),
            base_url: "https://api.openai.com/v1".into(),
            api_key: None,
            temperature: 0.2,
            max_tokens: 1024,
            timeout_secs: 30,
        }
    }
}

// ── Retrieval ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Documents requested per retriever call.
    pub k: usize,
    /// Documents joined into the context string for critique and the
    /// final answer prompt.
    pub context_docs: usize,
    /// Reciprocal Rank Fusion constant. 60 is the conventional value
    /// from Cormack, Clarke & Buettcher (SIGIR 2009).
    pub rrf_k: f32,
    /// Query paraphrases requested by multi-query fusion.
    pub query_variants: usize,
    /// Maximum refine iterations inside the recursive strategy.
    pub max_refine_iters: u32,
    /// Per-call retrieval timeout in seconds. A timed-out search is
    /// treated as empty results.
    pub timeout_secs: u64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            k: 8,
            context_docs: 5,
            rrf_k: 60.0,
            query_variants: 3,
            max_refine_iters: 2,
            timeout_secs: 10,
        }
    }
}

// ── Agent ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Maximum refine/retry_different loops per run.
    pub max_retries: u32,
    /// Confidence reported when every LLM call in a run failed and the
    /// answer degraded to concatenated evidence.
    pub fallback_confidence: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            fallback_confidence: 0.3,
        }
    }
}

// ── Critic ─────────────────────────────────────────────────────

/// Weights for folding a critic verdict into the reported confidence.
/// Kept as configuration: the scoring semantics live in the critic
/// prompt and may drift as that prompt evolves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CriticConfig {
    pub relevant_weight: f32,
    pub sufficient_weight: f32,
    pub confident_weight: f32,
}

impl Default for CriticConfig {
    fn default() -> Self {
        Self {
            relevant_weight: 0.4,
            sufficient_weight: 0.4,
            confident_weight: 0.2,
        }
    }
}

impl CriticConfig {
    pub fn weights(&self) -> (f32, f32, f32) {
        (
            self.relevant_weight,
            self.sufficient_weight,
            self.confident_weight,
        )
    }
}

// ── Tools ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Domains the realtime fetch tool may contact. Suffix-matched
    /// against the request host; anything else is a validation error.
    pub allowed_domains: Vec<String>,
    /// Endpoint URLs consulted for realtime-intent queries.
    pub realtime_endpoints: Vec<String>,
    /// Per-call timeout for realtime fetches, in seconds.
    pub fetch_timeout_secs: u64,
    /// Path to the program catalog JSON. None disables catalog tools.
    pub catalog_path: Option<std::path::PathBuf>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            allowed_domains: vec![],
            realtime_endpoints: vec![],
            fetch_timeout_secs: 5,
            catalog_path: None,
        }
    }
}

// ── Logging ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Output format: "pretty", "json", "compact".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

// ── Validation ─────────────────────────────────────────────────

impl SiftConfig {
    /// Validate the configuration. Returns human-readable warnings for
    /// suspicious-but-usable settings, or an error string for settings
    /// the core cannot run with.
    pub fn validate(&self) -> Result<Vec<String>, String> {
        if self.retrieval.k == 0 {
            return Err("retrieval.k must be at least 1".into());
        }
        if self.retrieval.context_docs == 0 {
            return Err("retrieval.context_docs must be at least 1".into());
        }
        if self.retrieval.rrf_k <= 0.0 {
            return Err("retrieval.rrf_k must be positive".into());
        }

        let mut warnings = Vec::new();
        let weight_sum = self.critic.relevant_weight
            + self.critic.sufficient_weight
            + self.critic.confident_weight;
        if (weight_sum - 1.0).abs() > 0.05 {
            warnings.push(format!(
                "critic weights sum to {weight_sum:.2}; confidence will not span [0,1] evenly"
            ));
        }
        if !self.tools.realtime_endpoints.is_empty() && self.tools.allowed_domains.is_empty() {
            warnings.push(
                "tools.realtime_endpoints configured but tools.allowed_domains is empty; \
                 every realtime fetch will be rejected"
                    .into(),
            );
        }
        if self.retrieval.query_variants == 0 {
            warnings.push("retrieval.query_variants is 0; multi-query fusion degrades to plain search".into());
        }
        Ok(warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate_cleanly() {
        let config = SiftConfig::default();
        let warnings = config.validate().unwrap();
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    #[test]
    fn zero_k_is_a_hard_error() {
        let mut config = SiftConfig::default();
        config.retrieval.k = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn skewed_critic_weights_warn() {
        let mut config = SiftConfig::default();
        config.critic.relevant_weight = 0.9;
        let warnings = config.validate().unwrap();
        assert!(!warnings.is_empty());
    }

    #[test]
    fn endpoints_without_allowlist_warn() {
        let mut config = SiftConfig::default();
        config.tools.realtime_endpoints = vec!["https://tips.example.org/status".into()];
        let warnings = config.validate().unwrap();
        assert!(warnings.iter().any(|w| w.contains("allowed_domains")));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let raw = r#"
            [retrieval]
            k = 12

            [tools]
            allowed_domains = ["tips.example.org"]
        "#;
        let config: SiftConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.retrieval.k, 12);
        assert_eq!(config.retrieval.rrf_k, 60.0);
        assert_eq!(config.agent.max_retries, 2);
        assert_eq!(config.tools.allowed_domains, vec!["tips.example.org"]);
    }
}
