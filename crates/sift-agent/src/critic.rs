//! Self-critique of retrieved context (the CRAG gate).
//!
//! The LLM is asked for a JSON verdict; the reply is parsed leniently —
//! the first balanced `{...}` span is extracted, scores are clamped to
//! [0,1], unknown actions map to `use` — and any failure at all yields
//! the neutral default verdict. A broken critic can slow a run down but
//! never abort it.

use tracing::warn;

use crate::prompts;
use sift_core::{CriticAction, Verdict};
use sift_llm::LlmClient;

/// Evaluate (query, context, draft). Never fails.
pub async fn critique(llm: &dyn LlmClient, query: &str, context: &str, draft: &str) -> Verdict {
    match llm.chat(&prompts::critic(query, context, draft)).await {
        Ok(reply) => match parse_verdict(&reply) {
            Some(verdict) => verdict,
            None => {
                warn!(reply_len = reply.len(), "critic reply unparsable, using default verdict");
                Verdict::default()
            }
        },
        Err(e) => {
            warn!(error = %e, "critic llm failed, using default verdict");
            Verdict::default()
        }
    }
}

/// Lenient verdict parse: first balanced `{...}` span, missing scores
/// default to 0.5, everything clamped.
pub fn parse_verdict(reply: &str) -> Option<Verdict> {
    let span = extract_json_object(reply)?;
    let value: serde_json::Value = serde_json::from_str(span).ok()?;

    let score = |key: &str| value.get(key).and_then(|v| v.as_f64()).unwrap_or(0.5) as f32;

    let action = match value.get("action").and_then(|v| v.as_str()) {
        Some("refine") => CriticAction::Refine,
        Some("retry_different") => CriticAction::RetryDifferent,
        // "use", unknown labels, and a missing field all mean accept
        _ => CriticAction::Use,
    };

    let gaps = value
        .get("gaps")
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string);

    Some(
        Verdict {
            relevant: score("relevant"),
            sufficient: score("sufficient"),
            confident: score("confident"),
            action,
            gaps,
        }
        .clamped(),
    )
}

/// Find the first balanced top-level `{...}` span in free-form text.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + i + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}
