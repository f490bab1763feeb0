//! Auth token state.

use crate::api::TokenStatus;
use crate::poll::CacheEntry;

/// Cached auth token status.
#[derive(Debug, Default)]
pub struct TokenState {
    pub entry: CacheEntry<TokenStatus>,
}

impl TokenState {
    /// Whether the trading token is currently valid.
    pub fn is_valid(&self) -> bool {
        self.entry.value().is_some_and(|t| t.is_valid)
    }

    /// Seconds until expiry, when known and positive.
    pub fn remaining_seconds(&self) -> Option<i64> {
        self.entry
            .value()
            .map(|t| t.remaining_seconds)
            .filter(|s| *s > 0)
    }
}
