//! # sift-core
//!
//! Core types for the Sift agentic RAG core. This crate defines the shared
//! vocabulary used by every other crate in the workspace: documents and their
//! dedup fingerprints, chat messages, query intents, critic verdicts, run
//! results, and the unified error type.

pub mod chat;
pub mod document;
pub mod error;
pub mod intent;
pub mod run;
pub mod verdict;

pub use chat::{ChatMessage, ChatRole};
pub use document::{Document, fingerprint};
pub use error::{Result, SiftError};
pub use intent::Intent;
pub use run::RunResult;
pub use verdict::{CriticAction, Verdict};
