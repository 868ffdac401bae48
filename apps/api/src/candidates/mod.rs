// Candidate referrals: validation, filtering, storage, resume uploads and the
// HTTP handlers that tie them together.

pub mod filter;
pub mod handlers;
#[cfg(test)]
pub mod memory;
pub mod metrics;
pub mod schema;
pub mod store;
pub mod upload;

pub use filter::CandidateFilter;
pub use metrics::{CandidateMetrics, StatusCounts};
pub use store::{CandidateStore, PgCandidateStore};
