pub mod candidate;

pub use candidate::{Candidate, CandidateRow, CandidateStatus, InvalidStatus};
