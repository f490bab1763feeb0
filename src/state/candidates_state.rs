//! Candidate stock state.

use crate::api::{CandidatesResponse, StockCandidate};
use crate::poll::CacheEntry;

/// Cached candidate ranking plus table selection.
#[derive(Debug, Default)]
pub struct CandidatesState {
    pub entry: CacheEntry<CandidatesResponse>,
    /// Currently selected candidate index.
    pub selected: Option<usize>,
}

impl CandidatesState {
    /// Get the currently selected candidate.
    pub fn selected_candidate(&self) -> Option<&StockCandidate> {
        let response = self.entry.value()?;
        self.selected.and_then(|i| response.top_candidates.get(i))
    }

    /// Number of listed candidates.
    pub fn candidate_count(&self) -> usize {
        self.entry
            .value()
            .map(|c| c.top_candidates.len())
            .unwrap_or(0)
    }

    /// The selection agent answered but has nothing analyzed yet.
    /// This renders as the empty state, not as an error.
    pub fn is_empty_state(&self) -> bool {
        self.entry.value().is_some_and(CandidatesResponse::is_empty)
    }
}
