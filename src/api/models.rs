//! Wire models for the Quartz API proxy.
//!
//! Field names, units and enum literals are fixed by the backend agents and
//! treated as an external contract: monetary values are plain KRW numbers,
//! rates are signed fractions (0.0234 = +2.34%), timestamps arrive as strings
//! in whatever format the producing agent used.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A 6-character stock ticker code (e.g. "005930").
///
/// Construction is the client-side gate: a string of any other length never
/// reaches the network layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ticker(String);

impl Ticker {
    /// Validate and normalize a ticker code.
    pub fn new(raw: impl AsRef<str>) -> crate::Result<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.chars().count() != 6 {
            return Err(crate::Error::invalid_input(format!(
                "ticker must be exactly 6 characters, got {:?}",
                trimmed
            )));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Ticker {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::new(s)
    }
}

impl std::fmt::Display for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Health of a single backend agent, as reported by the proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentHealth {
    /// Backend-provided display name (Korean).
    pub name: String,
    pub port: u16,
    #[serde(rename = "serviceName")]
    pub service_name: String,
    pub live: bool,
    pub ready: bool,
    #[serde(rename = "lastCheck")]
    pub last_check: String,
}

impl AgentHealth {
    /// An agent counts as healthy only when both probes pass.
    pub fn is_healthy(&self) -> bool {
        self.live && self.ready
    }
}

/// A held position in the portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub ticker: String,
    pub name: String,
    pub shares: i64,
    pub avg_price: Decimal,
    pub current_price: Decimal,
    pub eval_amount: Decimal,
    pub profit_loss_rate: Decimal,
    pub weight_in_portfolio: Decimal,
}

impl Position {
    /// Unrealized profit of this position in KRW.
    pub fn profit(&self) -> Decimal {
        (self.current_price - self.avg_price) * Decimal::from(self.shares)
    }
}

/// Portfolio snapshot from the portfolio-manager agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub cash_krw: Decimal,
    pub total_value: Decimal,
    pub positions: Vec<Position>,
    pub last_updated: String,
}

impl Portfolio {
    /// Total unrealized profit across positions.
    pub fn total_profit(&self) -> Decimal {
        self.positions.iter().map(Position::profit).sum()
    }

    /// Profit rate as a signed fraction of the invested principal.
    pub fn profit_rate(&self) -> Decimal {
        let profit = self.total_profit();
        let principal = self.total_value - profit;
        if principal.is_zero() || self.total_value <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        profit / principal
    }
}

/// Candidate priority assigned by the stock-selection agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Mid,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "HIGH"),
            Self::Mid => write!(f, "MID"),
            Self::Low => write!(f, "LOW"),
        }
    }
}

/// Market capitalization tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarketCapTier {
    Large,
    Mid,
    Small,
}

impl std::fmt::Display for MarketCapTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Large => write!(f, "LARGE"),
            Self::Mid => write!(f, "MID"),
            Self::Small => write!(f, "SMALL"),
        }
    }
}

/// A ticker flagged by upstream sentiment analysis as a trade candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockCandidate {
    pub ticker: String,
    pub name: String,
    pub sector: String,
    pub avg_sentiment: Decimal,
    pub news_count: u32,
    pub positive_count: u32,
    pub negative_count: u32,
    pub neutral_count: u32,
    pub positive_ratio: Decimal,
    pub negative_ratio: Decimal,
    pub neutral_ratio: Decimal,
    pub priority: Priority,
    pub market_cap_tier: MarketCapTier,
    pub reasoning: String,
    #[serde(default)]
    pub top_headlines: Vec<String>,
    pub final_score: Decimal,
}

/// Priority breakdown over all analyzed stocks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateStatistics {
    pub high_priority: u32,
    pub mid_priority: u32,
    pub low_priority: u32,
}

/// Candidate ranking from the stock-selection agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidatesResponse {
    pub timestamp: String,
    pub total_stocks: u32,
    pub statistics: CandidateStatistics,
    pub top_candidates: Vec<StockCandidate>,
}

impl CandidatesResponse {
    /// True when the selection agent has not analyzed anything yet.
    /// Rendered as the empty state, not as an error.
    pub fn is_empty(&self) -> bool {
        self.total_stocks == 0 && self.top_candidates.is_empty()
    }
}

/// Moving averages for one period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaData {
    pub ma5: Decimal,
    pub ma10: Decimal,
    pub ma20: Decimal,
}

/// MACD crossover signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MacdSignal {
    Bullish,
    Bearish,
    Neutral,
}

impl std::fmt::Display for MacdSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => write!(f, "bullish"),
            Self::Bearish => write!(f, "bearish"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacdData {
    pub macd_line: Decimal,
    pub signal_line: Decimal,
    pub histogram: Decimal,
    pub signal: MacdSignal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BollingerBand {
    pub top: Decimal,
    pub middle: Decimal,
    pub bottom: Decimal,
}

/// Fibonacci retracement trend direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FibTrend {
    Up,
    Down,
    Sideway,
}

impl std::fmt::Display for FibTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
            Self::Sideway => write!(f, "sideway"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FibonacciData {
    pub trend: FibTrend,
    /// Retracement levels keyed by the backend's level labels
    /// (e.g. "level_382"). BTreeMap keeps display order stable.
    pub levels: BTreeMap<String, Decimal>,
}

/// Indicator set for one analysis period (day/week/month).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodAnalysis {
    pub rsi: Decimal,
    pub ma: MaData,
    pub macd: MacdData,
    pub bollinger_band: BollingerBand,
    pub fibonacci_retracement: FibonacciData,
}

/// Full technical-analysis result for one ticker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalAnalysis {
    pub ticker: String,
    pub current_price: Decimal,
    pub analysis_time: String,
    pub day: PeriodAnalysis,
    pub week: PeriodAnalysis,
    pub month: PeriodAnalysis,
}

/// Auth token status from the auth agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenStatus {
    pub is_valid: bool,
    pub expires_at: Option<String>,
    pub remaining_seconds: i64,
}

/// Upstream-computed macroeconomic sentiment classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketBias {
    Bullish,
    Bearish,
    Neutral,
    Uncertain,
}

impl std::fmt::Display for MarketBias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => write!(f, "bullish"),
            Self::Bearish => write!(f, "bearish"),
            Self::Neutral => write!(f, "neutral"),
            Self::Uncertain => write!(f, "uncertain"),
        }
    }
}

/// Macro-economic analysis report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroAnalysis {
    pub positive_summary: String,
    pub negative_summary: String,
    pub market_bias_hint: MarketBias,
    #[serde(default)]
    pub last_update: Option<String>,
}

/// Result of a manually triggered trade decision.
///
/// The decision payload is produced by the portfolio manager and has no
/// schema the UI depends on; it is kept opaque and summarized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionOutcome {
    pub decision: serde_json::Value,
    #[serde(default)]
    pub execution_results: Vec<serde_json::Value>,
}

impl DecisionOutcome {
    pub fn executed_count(&self) -> usize {
        self.execution_results.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn ticker_validation() {
        assert!(Ticker::new("005930").is_ok());
        assert!(Ticker::new(" 005930 ").is_ok());
        assert!(Ticker::new("5930").is_err());
        assert!(Ticker::new("0059300").is_err());
        assert!(Ticker::new("").is_err());
        assert_eq!(Ticker::new("a05930").unwrap().as_str(), "A05930");
    }

    #[test]
    fn agent_health_payload() {
        let json = r#"[{
            "name": "인증관리",
            "port": 8006,
            "serviceName": "auth-agent",
            "live": true,
            "ready": false,
            "lastCheck": "2025-11-02T08:15:00Z"
        }]"#;
        let agents: Vec<AgentHealth> = serde_json::from_str(json).unwrap();
        assert_eq!(agents[0].service_name, "auth-agent");
        assert!(!agents[0].is_healthy());
    }

    #[test]
    fn portfolio_profit_scenario() {
        // total 10,000,000 / cash 2,000,000 / one position bought at 50,000
        // now at 55,000 with 100 shares -> profit 500,000, rate ~5.26%
        let portfolio = Portfolio {
            cash_krw: dec!(2_000_000),
            total_value: dec!(10_000_000),
            positions: vec![Position {
                ticker: "005930".into(),
                name: "삼성전자".into(),
                shares: 100,
                avg_price: dec!(50_000),
                current_price: dec!(55_000),
                eval_amount: dec!(5_500_000),
                profit_loss_rate: dec!(0.10),
                weight_in_portfolio: dec!(0.55),
            }],
            last_updated: "2025-11-02T08:15:00".into(),
        };

        assert_eq!(portfolio.total_profit(), dec!(500_000));
        let rate = portfolio.profit_rate();
        assert!(rate > dec!(0.0526) && rate < dec!(0.0527), "rate = {rate}");
    }

    #[test]
    fn empty_candidates_is_empty_state() {
        let json = r#"{
            "timestamp": "2025-11-02T08:15:00",
            "total_stocks": 0,
            "statistics": {"high_priority": 0, "mid_priority": 0, "low_priority": 0},
            "top_candidates": []
        }"#;
        let response: CandidatesResponse = serde_json::from_str(json).unwrap();
        assert!(response.is_empty());
    }

    #[test]
    fn candidate_enum_casing() {
        let json = r#"{
            "ticker": "000660",
            "name": "SK하이닉스",
            "sector": "반도체",
            "avg_sentiment": 0.42,
            "news_count": 18,
            "positive_count": 11,
            "negative_count": 3,
            "neutral_count": 4,
            "positive_ratio": 0.61,
            "negative_ratio": 0.17,
            "neutral_ratio": 0.22,
            "priority": "HIGH",
            "market_cap_tier": "LARGE",
            "reasoning": "HBM demand coverage",
            "top_headlines": ["headline"],
            "final_score": 0.87
        }"#;
        let candidate: StockCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.priority, Priority::High);
        assert_eq!(candidate.market_cap_tier, MarketCapTier::Large);
    }

    #[test]
    fn technical_analysis_payload() {
        let period = r#"{
            "rsi": 62.5,
            "ma": {"ma5": 71000, "ma10": 70500, "ma20": 69000},
            "macd": {"macd_line": 120.5, "signal_line": 98.2, "histogram": 22.3, "signal": "bullish"},
            "bollinger_band": {"top": 74000, "middle": 70000, "bottom": 66000},
            "fibonacci_retracement": {"trend": "up", "levels": {"level_382": 69500, "level_618": 68000}}
        }"#;
        let json = format!(
            r#"{{"ticker": "005930", "current_price": 71500, "analysis_time": "2025-11-02T08:15:00",
                "day": {period}, "week": {period}, "month": {period}}}"#
        );
        let analysis: TechnicalAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(analysis.day.macd.signal, MacdSignal::Bullish);
        assert_eq!(analysis.week.fibonacci_retracement.trend, FibTrend::Up);
        assert_eq!(
            analysis.month.fibonacci_retracement.levels["level_618"],
            dec!(68000)
        );
    }

    #[test]
    fn macro_bias_casing() {
        let json = r#"{
            "positive_summary": "수출 회복",
            "negative_summary": "금리 부담",
            "market_bias_hint": "uncertain"
        }"#;
        let report: MacroAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(report.market_bias_hint, MarketBias::Uncertain);
        assert_eq!(report.last_update, None);
    }
}
