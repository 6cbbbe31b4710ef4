//! # sift-retrieval
//!
//! The retriever collaborator seam. Index construction is out of scope:
//! the core treats any retriever as an opaque `search(query, k) → ranked
//! docs` capability and adapts external implementations at the host
//! boundary. This crate also owns Reciprocal Rank Fusion (the rank
//! aggregation used by multi-query retrieval), a timeout-bounding
//! wrapper, a keyword-overlap in-memory retriever for hosts and demos,
//! and a queued mock for tests.

pub mod fusion;
pub mod memory;
pub mod mock;
pub mod retriever;

pub use fusion::{RRF_K, reciprocal_rank_fusion};
pub use memory::InMemoryRetriever;
pub use mock::MockRetriever;
pub use retriever::{BoundedRetriever, Retriever};
