use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Deserialize;
use tracing::debug;

use crate::retriever::Retriever;
use sift_core::{Document, Result};

/// In-memory keyword-overlap retriever.
///
/// Scores documents by how many query words appear in their text.
/// This is the host adapter used by the CLI demo and a convenient
/// non-mock retriever for tests; production hosts adapt their own
/// vector/hybrid index behind the [`Retriever`] trait instead.
pub struct InMemoryRetriever {
    docs: RwLock<Vec<Document>>,
}

/// Wire shape of a corpus file: `[{"text": ..., "metadata": {...}}, ...]`.
#[derive(Deserialize)]
struct CorpusEntry {
    text: String,
    #[serde(default)]
    metadata: serde_json::Map<String, serde_json::Value>,
}

impl Default for InMemoryRetriever {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRetriever {
    pub fn new() -> Self {
        Self {
            docs: RwLock::new(Vec::new()),
        }
    }

    /// Load a corpus from its JSON wire shape.
    pub fn from_json(raw: &str) -> Result<Self> {
        let entries: Vec<CorpusEntry> = serde_json::from_str(raw)?;
        let retriever = Self::new();
        {
            let mut docs = retriever.docs.write();
            for e in entries {
                docs.push(Document {
                    text: e.text,
                    metadata: e.metadata,
                    score: 0.0,
                });
            }
        }
        Ok(retriever)
    }

    pub fn add(&self, doc: Document) {
        self.docs.write().push(doc);
    }

    pub fn len(&self) -> usize {
        self.docs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.read().is_empty()
    }
}

#[async_trait]
impl Retriever for InMemoryRetriever {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<Document>> {
        let query_lower = query.to_lowercase();
        // Meaningful query words only (skip very short words)
        let query_words: Vec<&str> = query_lower
            .split_whitespace()
            .filter(|w| w.len() >= 2)
            .collect();

        if query_words.is_empty() {
            return Ok(vec![]);
        }

        let docs = self.docs.read();
        let mut scored: Vec<Document> = docs
            .iter()
            .filter_map(|d| {
                let text_lower = d.text.to_lowercase();
                let hits = query_words
                    .iter()
                    .filter(|w| text_lower.contains(*w))
                    .count();
                if hits == 0 {
                    return None;
                }
                let mut doc = d.clone();
                doc.score = hits as f32 / query_words.len() as f32;
                Some(doc)
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        debug!(query = %query, hits = scored.len(), "in-memory search");
        Ok(scored)
    }
}
