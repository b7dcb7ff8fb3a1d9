//! Repository Quality Engine: deterministic, rule-based scoring.
//!
//! Turns closed per-repository commit logs into analysis records (contribution
//! equality, cadence, message hygiene, participation, duration), concatenates
//! them across repositories and reduces each to a weighted Overall Quality
//! Score.
//!
//! No network, no DB; pure computation with file I/O only in `store`.

pub mod aggregate;
pub mod analysis;
pub mod cadence;
pub mod config;
pub mod corpus;
pub mod duration;
pub mod error;
pub mod inequality;
pub mod message;
pub mod normalize;
pub mod participation;
pub mod score;
pub mod store;
pub mod types;

#[cfg(test)]
mod testutil;

pub use aggregate::CrossRepositoryTable;
pub use analysis::analyze;
pub use config::Config;
pub use error::EngineError;
pub use score::{score_table, WeightTable};
pub use types::{AnalysisRecord, InboundCommit, QualityScore, RepoOutcome, SkipReason};
