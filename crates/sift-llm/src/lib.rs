//! # sift-llm
//!
//! The LLM collaborator seam. The core only ever sees
//! `chat(messages) → text`; everything else (hosting, models, transport)
//! is opaque. Ships an OpenAI-compatible HTTP adapter for hosts and a
//! queued-response mock for deterministic tests.

pub mod client;
pub mod mock;
pub mod openai;

pub use client::LlmClient;
pub use mock::MockLlm;
pub use openai::OpenAiClient;
