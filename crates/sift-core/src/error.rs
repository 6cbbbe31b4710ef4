use thiserror::Error;

/// Unified error type for the Sift core.
#[derive(Error, Debug)]
pub enum SiftError {
    // ── LLM collaborator ───────────────────────────────────────
    #[error("llm unavailable: {0}")]
    LlmUnavailable(String),

    #[error("llm returned an empty reply")]
    LlmEmptyReply,

    // ── Retriever collaborator ─────────────────────────────────
    #[error("retrieval failed: {0}")]
    Retrieval(String),

    #[error("retriever returned no documents")]
    RetrievalEmpty,

    // ── Critic ─────────────────────────────────────────────────
    #[error("critic verdict unparsable: {0}")]
    CriticUnparsable(String),

    // ── Tools ──────────────────────────────────────────────────
    #[error("tool validation failed: host not allow-listed: {0}")]
    ToolValidation(String),

    #[error("tool unavailable: {0}")]
    ToolUnavailable(String),

    // ── Config ─────────────────────────────────────────────────
    #[error("config error: {0}")]
    Config(String),

    #[error("config validation failed: {field}: {reason}")]
    ConfigValidation { field: String, reason: String },

    // ── Generic wrappers ───────────────────────────────────────
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SiftError>;
