use serde::{Deserialize, Serialize};

use crate::models::Candidate;

/// Search and status filters accepted by the list endpoint.
///
/// Both terms are optional; an empty string counts as absent. When both are
/// present they are ANDed. The same predicate drives the dashboard's local
/// view so server-side and client-side filtering agree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl CandidateFilter {
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    pub fn status_term(&self) -> Option<&str> {
        self.status.as_deref().filter(|s| !s.is_empty())
    }

    /// Case-insensitive substring match on name or job title, exact match on status.
    pub fn matches(&self, candidate: &Candidate) -> bool {
        let search_ok = match self.search_term() {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                candidate.name.to_lowercase().contains(&term)
                    || candidate.job_title.to_lowercase().contains(&term)
            }
        };
        let status_ok = match self.status_term() {
            None => true,
            Some(status) => candidate.status.as_str() == status,
        };
        search_ok && status_ok
    }

    pub fn apply<'a>(&self, candidates: &'a [Candidate]) -> Vec<&'a Candidate> {
        candidates.iter().filter(|c| self.matches(c)).collect()
    }

    /// `ILIKE` pattern for the search term with wildcards in user input escaped.
    pub fn search_pattern(&self) -> Option<String> {
        self.search_term()
            .map(|term| format!("%{}%", escape_like(term)))
    }
}

/// Escapes `\`, `%` and `_` so user text is matched literally by `LIKE`/`ILIKE`.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
