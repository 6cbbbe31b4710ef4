use serde::{Deserialize, Serialize};

/// What the critic wants the orchestrator to do with the current draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CriticAction {
    /// Accept the current context/draft and finalize.
    #[default]
    Use,
    /// Reformulate the query and run the same strategy again.
    Refine,
    /// Switch to the next strategy in the preference order.
    RetryDifferent,
}

/// One critic evaluation of (query, context, draft).
///
/// Scores are clamped to [0,1] at the parse boundary. Unknown actions map
/// to `Use`, and any parse or LLM failure yields [`Verdict::default`], so
/// a broken critic can never stall a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub relevant: f32,
    pub sufficient: f32,
    pub confident: f32,
    #[serde(default)]
    pub action: CriticAction,
    /// Free-form description of what is missing; fed back into query
    /// reformulation when the action is `refine`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gaps: Option<String>,
}

impl Default for Verdict {
    fn default() -> Self {
        Self {
            relevant: 0.5,
            sufficient: 0.5,
            confident: 0.5,
            action: CriticAction::Use,
            gaps: None,
        }
    }
}

impl Verdict {
    /// Clamp all scores into [0,1].
    pub fn clamped(mut self) -> Self {
        self.relevant = self.relevant.clamp(0.0, 1.0);
        self.sufficient = self.sufficient.clamp(0.0, 1.0);
        self.confident = self.confident.clamp(0.0, 1.0);
        self
    }

    /// Weighted confidence for the final `RunResult`, clamped to [0,1].
    pub fn weighted_confidence(&self, weights: (f32, f32, f32)) -> f32 {
        let (wr, ws, wc) = weights;
        (self.relevant * wr + self.sufficient * ws + self.confident * wc).clamp(0.0, 1.0)
    }
}
