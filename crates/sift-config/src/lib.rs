//! # sift-config
//!
//! Configuration system for the Sift core. Reads from `sift.toml` and
//! environment variables — in that precedence order. Configuration is
//! loaded once at host startup; changing it requires a restart, so there
//! is no hot-reload path.

pub mod loader;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{
    AgentConfig, CriticConfig, LlmConfig, LoggingConfig, RetrievalConfig, SiftConfig, ToolsConfig,
};
