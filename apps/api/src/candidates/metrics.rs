use serde::{Deserialize, Serialize};

use crate::models::CandidateStatus;

/// Per-status candidate counts. All four keys are always serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    #[serde(rename = "Pending")]
    pub pending: u64,
    #[serde(rename = "Reviewed")]
    pub reviewed: u64,
    #[serde(rename = "Hired")]
    pub hired: u64,
    #[serde(rename = "Rejected")]
    pub rejected: u64,
}

impl StatusCounts {
    pub fn get(&self, status: CandidateStatus) -> u64 {
        match status {
            CandidateStatus::Pending => self.pending,
            CandidateStatus::Reviewed => self.reviewed,
            CandidateStatus::Hired => self.hired,
            CandidateStatus::Rejected => self.rejected,
        }
    }

    pub fn add(&mut self, status: CandidateStatus, n: u64) {
        let slot = match status {
            CandidateStatus::Pending => &mut self.pending,
            CandidateStatus::Reviewed => &mut self.reviewed,
            CandidateStatus::Hired => &mut self.hired,
            CandidateStatus::Rejected => &mut self.rejected,
        };
        *slot += n;
    }

    pub fn sum(&self) -> u64 {
        CandidateStatus::ALL.iter().map(|s| self.get(*s)).sum()
    }
}

impl FromIterator<CandidateStatus> for StatusCounts {
    fn from_iter<I: IntoIterator<Item = CandidateStatus>>(iter: I) -> Self {
        let mut counts = StatusCounts::default();
        for status in iter {
            counts.add(status, 1);
        }
        counts
    }
}

/// Response of `GET /api/candidates/metrics`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateMetrics {
    pub total: u64,
    pub by_status: StatusCounts,
}

impl From<StatusCounts> for CandidateMetrics {
    /// `total` is derived from the same counts, so it always equals their sum.
    fn from(by_status: StatusCounts) -> Self {
        CandidateMetrics {
            total: by_status.sum(),
            by_status,
        }
    }
}
