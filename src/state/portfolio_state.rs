//! Portfolio state.

use crate::api::{Portfolio, Position};
use crate::poll::CacheEntry;

/// Cached portfolio snapshot plus table selection.
#[derive(Debug, Default)]
pub struct PortfolioState {
    pub entry: CacheEntry<Portfolio>,
    /// Currently selected position index.
    pub selected: Option<usize>,
}

impl PortfolioState {
    /// Get the currently selected position.
    pub fn selected_position(&self) -> Option<&Position> {
        let portfolio = self.entry.value()?;
        self.selected.and_then(|i| portfolio.positions.get(i))
    }

    /// Number of held positions.
    pub fn position_count(&self) -> usize {
        self.entry
            .value()
            .map(|p| p.positions.len())
            .unwrap_or(0)
    }
}
