use serde::{Deserialize, Serialize};

/// The four query intents the router can assign. Exactly one is derived
/// per run; it selects the retrieval strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Eligibility / definition questions — answered via HyDE.
    Factual,
    /// General lookup — answered via multi-query fusion. The default.
    Search,
    /// Time-sensitive status questions — answered via the recursive
    /// strategy plus live endpoint checks.
    Realtime,
    /// Staged-plan questions — answered via the speculative strategy.
    Multistep,
}

impl Intent {
    pub const ALL: [Intent; 4] = [
        Intent::Factual,
        Intent::Search,
        Intent::Realtime,
        Intent::Multistep,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Factual => "factual",
            Intent::Search => "search",
            Intent::Realtime => "realtime",
            Intent::Multistep => "multistep",
        }
    }

    /// Parse a single-token LLM reply. Returns `None` for anything that is
    /// not exactly one of the four labels (after trim + lowercase), which
    /// sends the caller to the heuristic fallback.
    pub fn parse(reply: &str) -> Option<Intent> {
        match reply.trim().to_lowercase().as_str() {
            "factual" => Some(Intent::Factual),
            "search" => Some(Intent::Search),
            "realtime" => Some(Intent::Realtime),
            "multistep" => Some(Intent::Multistep),
            _ => None,
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_exact_labels_case_insensitively() {
        assert_eq!(Intent::parse("factual"), Some(Intent::Factual));
        assert_eq!(Intent::parse("  Realtime\n"), Some(Intent::Realtime));
        assert_eq!(Intent::parse("MULTISTEP"), Some(Intent::Multistep));
    }

    #[test]
    fn parse_rejects_anything_else() {
        assert_eq!(Intent::parse("???"), None);
        assert_eq!(Intent::parse("factual."), None);
        assert_eq!(Intent::parse(""), None);
        assert_eq!(Intent::parse("search please"), None);
    }
}
