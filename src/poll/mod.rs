//! The polling shell.
//!
//! Owns the data-freshness contract between the dashboard and its backend
//! collaborators: a fixed set of named resources, one cooperative polling
//! task per subscribed resource, at most one in-flight fetch per resource
//! key, and stale-while-error caching of the last successful payload.

mod cache;
mod poller;

pub use cache::CacheEntry;
pub use poller::{PollMessage, PollSchedule, Poller};

use crate::api::Ticker;

/// Stable identifier of a remote resource.
///
/// The technical-analysis resource is parameterized by ticker; everything
/// else is a singleton.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKey {
    AgentsHealth,
    Portfolio,
    Candidates,
    TokenStatus,
    MacroReport,
    Technical(Ticker),
}

impl ResourceKey {
    /// Key for the technical analysis of one ticker.
    pub fn technical(ticker: &Ticker) -> Self {
        Self::Technical(ticker.clone())
    }
}

impl std::fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AgentsHealth => write!(f, "agents-health"),
            Self::Portfolio => write!(f, "portfolio"),
            Self::Candidates => write!(f, "candidates"),
            Self::TokenStatus => write!(f, "token-status"),
            Self::MacroReport => write!(f, "macro-report"),
            Self::Technical(ticker) => write!(f, "technical-analysis:{ticker}"),
        }
    }
}
