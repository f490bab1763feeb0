//! Agent health state.

use crate::api::AgentHealth;
use crate::poll::CacheEntry;

/// Cached health of the six backend agents.
#[derive(Debug, Default)]
pub struct AgentsState {
    pub entry: CacheEntry<Vec<AgentHealth>>,
}

impl AgentsState {
    /// Agents passing both liveness and readiness probes.
    pub fn healthy_count(&self) -> usize {
        self.entry
            .value()
            .map(|agents| agents.iter().filter(|a| a.is_healthy()).count())
            .unwrap_or(0)
    }

    /// Number of agents in the last health report.
    pub fn total_count(&self) -> usize {
        self.entry.value().map(Vec::len).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn agent(service: &str, live: bool, ready: bool) -> AgentHealth {
        AgentHealth {
            name: service.to_string(),
            port: 8001,
            service_name: service.to_string(),
            live,
            ready,
            last_check: "2025-11-02T08:15:00Z".to_string(),
        }
    }

    #[test]
    fn healthy_requires_both_probes() {
        let mut state = AgentsState::default();
        state.entry.resolve(vec![
            agent("macro-agent", true, true),
            agent("auth-agent", true, false),
            agent("trading-agent", false, false),
        ]);

        assert_eq!(state.healthy_count(), 1);
        assert_eq!(state.total_count(), 3);
    }
}
