//! # sift-tools
//!
//! Tools the orchestrator can call while answering: a pre-loaded program
//! catalog with keyword search and eligibility checks, and an
//! allow-listed realtime HTTP fetch. Catalog lookups never fail; the
//! realtime fetch degrades to a sentinel string on network trouble and
//! only raises when called outside its domain allow-list (a programming
//! error, not a user-input error).

pub mod programs;
pub mod realtime;

pub use programs::{Eligibility, FounderProfile, Program, ProgramCatalog, check_eligibility};
pub use realtime::{REALTIME_UNAVAILABLE, RealtimeFetcher};
