use serde::{Deserialize, Serialize};

/// Number of leading characters used as the dedup fingerprint.
pub const FINGERPRINT_CHARS: usize = 100;

/// A retrieved document. Produced by the retriever collaborator and
/// never mutated by the core (scores are replaced only when fusion
/// builds a new ranked list).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub text: String,
    /// Opaque retriever-supplied metadata (source, url, chunk id, ...).
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
    /// Relevance score in [0, ∞). Scale depends on the retriever.
    pub score: f32,
}

impl Document {
    pub fn new(text: impl Into<String>, score: f32) -> Self {
        Self {
            text: text.into(),
            metadata: Default::default(),
            score,
        }
    }

    pub fn with_metadata(mut self, key: &str, value: serde_json::Value) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }

    /// Dedup key for this document: the leading 100 characters of its text.
    pub fn fingerprint(&self) -> String {
        fingerprint(&self.text)
    }
}

/// Leading-characters fingerprint used to deduplicate documents across
/// ranked lists. Character-based, so multi-byte text is handled safely.
pub fn fingerprint(text: &str) -> String {
    text.chars().take(FINGERPRINT_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_truncates_at_100_chars() {
        let long = "x".repeat(250);
        assert_eq!(fingerprint(&long).chars().count(), 100);
    }

    #[test]
    fn fingerprint_keeps_short_text_whole() {
        assert_eq!(fingerprint("short"), "short");
    }

    #[test]
    fn fingerprint_is_char_safe_for_multibyte_text() {
        let korean = "창업".repeat(120);
        let fp = fingerprint(&korean);
        assert_eq!(fp.chars().count(), 100);
    }

    #[test]
    fn same_prefix_same_fingerprint() {
        let a = format!("{}{}", "p".repeat(100), "tail one");
        let b = format!("{}{}", "p".repeat(100), "a different tail");
        assert_eq!(fingerprint(&a), fingerprint(&b));
    }
}
