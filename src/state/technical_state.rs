//! Technical analysis state.

use crate::api::{TechnicalAnalysis, Ticker};
use crate::poll::CacheEntry;

/// Cached technical analysis for the active ticker search.
///
/// Changing the ticker replaces the cache entry wholesale, so a result for
/// a previous search can never bleed into the new one.
#[derive(Debug, Default)]
pub struct TechnicalState {
    /// The ticker the analysis view is currently bound to.
    pub ticker: Option<Ticker>,
    pub entry: CacheEntry<TechnicalAnalysis>,
}

impl TechnicalState {
    /// Bind the view to a new ticker, discarding the previous analysis.
    pub fn set_ticker(&mut self, ticker: Ticker) {
        self.ticker = Some(ticker);
        self.entry = CacheEntry::new();
    }

    /// Whether a payload belongs to the active search.
    pub fn matches(&self, ticker: &str) -> bool {
        self.ticker
            .as_ref()
            .is_some_and(|active| active.as_str() == ticker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changing_ticker_discards_previous_entry() {
        let mut state = TechnicalState::default();
        state.set_ticker(Ticker::new("005930").unwrap());
        state.entry.reject("technical agent unreachable");

        state.set_ticker(Ticker::new("000660").unwrap());

        assert!(state.matches("000660"));
        assert!(!state.matches("005930"));
        assert!(state.entry.error().is_none());
        assert!(state.entry.value().is_none());
    }
}
