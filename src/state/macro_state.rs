//! Macro-economic report state.

use crate::api::{MacroAnalysis, MarketBias};
use crate::poll::CacheEntry;

/// Cached macro report.
#[derive(Debug, Default)]
pub struct MacroState {
    pub entry: CacheEntry<MacroAnalysis>,
}

impl MacroState {
    /// Upstream-computed market bias, when a report is cached.
    pub fn bias(&self) -> Option<MarketBias> {
        self.entry.value().map(|r| r.market_bias_hint)
    }
}
