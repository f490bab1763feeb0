//! HTTP client for the Quartz API proxy.

use crate::config::ApiConfig;
use crate::error::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::models::{
    AgentHealth, CandidatesResponse, DecisionOutcome, MacroAnalysis, Portfolio, TechnicalAnalysis,
    Ticker, TokenStatus,
};

/// Builder for creating an API client.
pub struct ApiClientBuilder {
    config: ApiConfig,
}

impl ApiClientBuilder {
    /// Create a new builder with default config.
    pub fn new() -> Self {
        Self {
            config: ApiConfig::default(),
        }
    }

    /// Set the API configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the API client.
    pub fn build(self) -> Result<ApiClient> {
        ApiClient::new(self.config)
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct CandidatesRequest {
    top_n: u32,
}

#[derive(Serialize)]
struct TechnicalRequest<'a> {
    ticker: &'a str,
}

/// Typed client for the Quartz API proxy.
///
/// Every failure mode (transport, non-2xx, malformed payload) surfaces as
/// [`crate::Error::Http`]; callers treat them uniformly as "unavailable".
pub struct ApiClient {
    config: ApiConfig,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a new API client.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("quartz-tui/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { config, http })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        timeout: Duration,
    ) -> Result<T> {
        let response = self
            .http
            .post(self.url(path))
            .timeout(timeout)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    /// Health of all backend agents.
    pub async fn agent_health(&self) -> Result<Vec<AgentHealth>> {
        self.get("/health/agents").await
    }

    /// Current portfolio snapshot.
    pub async fn portfolio(&self) -> Result<Portfolio> {
        self.get("/portfolio").await
    }

    /// Top candidate stocks ranked by the selection agent.
    pub async fn candidates(&self, top_n: u32) -> Result<CandidatesResponse> {
        self.post(
            "/candidates",
            &CandidatesRequest { top_n },
            Duration::from_secs(self.config.timeout_secs),
        )
        .await
    }

    /// Technical analysis for one ticker.
    ///
    /// The technical agent is the slowest collaborator and the only resource
    /// with a retry: a failed request is retried exactly once before the
    /// error is reported.
    pub async fn technical_analysis(&self, ticker: &Ticker) -> Result<TechnicalAnalysis> {
        let timeout = Duration::from_secs(self.config.technical_timeout_secs);
        let request = TechnicalRequest {
            ticker: ticker.as_str(),
        };

        match self.post("/technical-analysis", &request, timeout).await {
            Ok(analysis) => Ok(analysis),
            Err(err) => {
                tracing::warn!(ticker = %ticker, error = %err, "technical analysis failed, retrying once");
                self.post("/technical-analysis", &request, timeout).await
            }
        }
    }

    /// Auth token status.
    pub async fn token_status(&self) -> Result<TokenStatus> {
        self.get("/token-status").await
    }

    /// Full macro-economic report (dashboard surface).
    pub async fn macro_report(&self) -> Result<MacroAnalysis> {
        self.get("/macro-full").await
    }

    /// Condensed macro summary. Served for the portfolio agent's consumption;
    /// the dashboard polling loop does not use it.
    pub async fn macro_summary(&self) -> Result<MacroAnalysis> {
        self.get("/macro-summary").await
    }

    /// Trigger a manual trade decision on the portfolio manager.
    pub async fn trigger_decision(&self) -> Result<DecisionOutcome> {
        let response = self
            .http
            .post(self.url("/decision"))
            .timeout(Duration::from_secs(self.config.decision_timeout_secs))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn url_joins_without_double_slash() {
        let client = ApiClient::new(ApiConfig {
            base_url: "http://localhost:8080/api/".to_string(),
            ..ApiConfig::default()
        })
        .unwrap();

        assert_eq!(
            client.url("/health/agents"),
            "http://localhost:8080/api/health/agents"
        );
    }
}
