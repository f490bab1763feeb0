//! Configuration settings for the Quartz TUI.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API configuration.
    pub api: ApiConfig,
    /// Polling intervals.
    pub poll: PollConfig,
    /// UI configuration.
    pub ui: UiConfig,
    /// Key bindings.
    pub keybindings: KeyBindings,
}

impl Config {
    /// Load configuration from file, returning default if file doesn't exist or fails.
    pub fn load_or_default() -> crate::Result<Self> {
        Self::load(None)
    }

    /// Load configuration from file.
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        let config_path = path.unwrap_or_else(|| {
            super::config_dir()
                .map(|p| p.join("config.toml"))
                .unwrap_or_else(|_| PathBuf::from("config.toml"))
        });

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> crate::Result<()> {
        let config_path = path.unwrap_or_else(|| {
            super::config_dir()
                .map(|p| p.join("config.toml"))
                .unwrap_or_else(|_| PathBuf::from("config.toml"))
        });

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

/// API proxy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Quartz API proxy base URL, including the path root.
    pub base_url: String,
    /// Default request timeout in seconds.
    pub timeout_secs: u64,
    /// Timeout for the technical-analysis endpoint in seconds.
    pub technical_timeout_secs: u64,
    /// Timeout for the manual decision endpoint in seconds.
    pub decision_timeout_secs: u64,
    /// How many candidate stocks to request.
    pub candidates_top_n: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_secs: 30,
            technical_timeout_secs: 60,
            decision_timeout_secs: 120,
            candidates_top_n: 5,
        }
    }
}

/// Refresh intervals for the polled resources, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Agent health checks.
    pub agents_health_secs: u64,
    /// Portfolio snapshot.
    pub portfolio_secs: u64,
    /// Candidate stock ranking.
    pub candidates_secs: u64,
    /// Auth token status.
    pub token_status_secs: u64,
    /// Macro-economic report.
    pub macro_report_secs: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            agents_health_secs: 10,
            portfolio_secs: 30,
            candidates_secs: 60,
            token_status_secs: 60,
            macro_report_secs: 300,
        }
    }
}

impl PollConfig {
    pub fn agents_health(&self) -> Duration {
        Duration::from_secs(self.agents_health_secs)
    }

    pub fn portfolio(&self) -> Duration {
        Duration::from_secs(self.portfolio_secs)
    }

    pub fn candidates(&self) -> Duration {
        Duration::from_secs(self.candidates_secs)
    }

    pub fn token_status(&self) -> Duration {
        Duration::from_secs(self.token_status_secs)
    }

    pub fn macro_report(&self) -> Duration {
        Duration::from_secs(self.macro_report_secs)
    }
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Enable mouse support (scroll wheel selection).
    pub mouse_support: bool,
    /// Number of candidates to display on the overview card.
    pub overview_candidates: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            mouse_support: true,
            overview_candidates: 5,
        }
    }
}

/// Key bindings configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Quit the application.
    pub quit: String,
    /// Show help.
    pub help: String,
    /// Navigate up.
    pub up: String,
    /// Navigate down.
    pub down: String,
    /// Refresh the current view's resources.
    pub refresh: String,
    /// Refresh everything.
    pub refresh_all: String,
    /// Switch to the overview.
    pub overview: String,
    /// Switch to the portfolio view.
    pub portfolio: String,
    /// Switch to the candidates view.
    pub candidates: String,
    /// Switch to the technical-analysis view.
    pub technical: String,
    /// Switch to the macro view.
    pub macro_report: String,
    /// Start ticker input.
    pub search: String,
    /// Trigger a manual trade decision.
    pub decision: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            help: "?".to_string(),
            up: "k".to_string(),
            down: "j".to_string(),
            refresh: "r".to_string(),
            refresh_all: "Shift+r".to_string(),
            overview: "1".to_string(),
            portfolio: "2".to_string(),
            candidates: "3".to_string(),
            technical: "4".to_string(),
            macro_report: "5".to_string(),
            search: "/".to_string(),
            decision: "d".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_intervals_match_backend_contract() {
        let poll = PollConfig::default();
        assert_eq!(poll.agents_health(), Duration::from_secs(10));
        assert_eq!(poll.portfolio(), Duration::from_secs(30));
        assert_eq!(poll.candidates(), Duration::from_secs(60));
        assert_eq!(poll.token_status(), Duration::from_secs(60));
        assert_eq!(poll.macro_report(), Duration::from_secs(300));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [api]
            base_url = "http://quartz.internal:8080/api"

            [poll]
            portfolio_secs = 15
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "http://quartz.internal:8080/api");
        assert_eq!(config.api.candidates_top_n, 5);
        assert_eq!(config.poll.portfolio_secs, 15);
        assert_eq!(config.poll.agents_health_secs, 10);
    }
}
