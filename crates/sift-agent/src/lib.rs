//! # sift-agent
//!
//! The agentic retrieval/generation loop — the core that coordinates
//! query classification, retrieval strategies, self-critique, and
//! bounded iteration.
//!
//! ## Architecture
//!
//! ```text
//!          query ──► ┌──────────┐
//!                    │  Router   │  LLM classify, heuristic fallback
//!                    └────┬─────┘
//!                         │ Intent
//!                         ▼
//!                    ┌──────────┐   factual   → HyDE
//!                    │ Strategy  │   search    → Multi-Query Fusion (RRF)
//!                    │   pack    │   multistep → Speculative
//!                    └────┬─────┘   realtime  → Recursive (+ live fetch)
//!                         │ (draft, ranked docs)
//!                         ▼
//!                    ┌──────────┐  use / refine / retry_different
//!                    │  Critic   │──────► loop (bounded by max_retries)
//!                    └────┬─────┘
//!                         ▼
//!                     RunResult  (answer, sources, confidence)
//! ```
//!
//! The public entry point is [`Orchestrator::run`]; it never propagates
//! errors — every failure mode folds into the returned [`RunResult`].

pub mod critic;
pub mod orchestrator;
pub mod prompts;
pub mod router;
pub mod strategies;
pub mod tracked;

pub use orchestrator::Orchestrator;
pub use strategies::{Strategy, StrategyOutput};
pub use tracked::TrackedLlm;
