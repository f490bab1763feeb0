//! Quartz API proxy integration.
//!
//! This module provides a typed client for the platform's HTTP API proxy
//! and the serde models of its fixed wire contract.

mod client;
mod models;

pub use client::{ApiClient, ApiClientBuilder};
pub use models::{
    AgentHealth, BollingerBand, CandidateStatistics, CandidatesResponse, DecisionOutcome, FibTrend,
    FibonacciData, MaData, MacdData, MacdSignal, MacroAnalysis, MarketBias, MarketCapTier,
    PeriodAnalysis, Portfolio, Position, Priority, StockCandidate, TechnicalAnalysis, Ticker,
    TokenStatus,
};
