//! State management for the Quartz TUI.
//!
//! This module provides centralized state management with a unidirectional
//! data flow pattern inspired by Redux/Elm architecture. Fetch outcomes from
//! the polling shell arrive as actions and are folded into per-resource
//! cache entries.

mod agents_state;
mod app_state;
mod candidates_state;
mod macro_state;
mod portfolio_state;
mod technical_state;
mod token_state;

pub use agents_state::AgentsState;
pub use app_state::{AppState, InputMode, TICKER_INPUT_LIMIT, View};
pub use candidates_state::CandidatesState;
pub use macro_state::MacroState;
pub use portfolio_state::PortfolioState;
pub use technical_state::TechnicalState;
pub use token_state::TokenState;

use crate::api::{
    AgentHealth, CandidatesResponse, DecisionOutcome, MacroAnalysis, Portfolio, TechnicalAnalysis,
    Ticker, TokenStatus,
};
use crate::error::Result;
use crate::poll::{PollMessage, ResourceKey};
use tokio::sync::mpsc;

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    SetView(View),
    ToggleHelp,
    ScrollUp,
    ScrollDown,
    GoToTop,
    GoToBottom,

    // Polling lifecycle (emitted by the shell)
    FetchStarted(ResourceKey),
    FetchFailed(ResourceKey, String),

    // Fetch payloads
    AgentsLoaded(Vec<AgentHealth>),
    PortfolioLoaded(Portfolio),
    CandidatesLoaded(CandidatesResponse),
    TechnicalLoaded(TechnicalAnalysis),
    TokenStatusLoaded(TokenStatus),
    MacroLoaded(MacroAnalysis),

    // Manual refresh
    Refresh,
    RefreshAll,

    // Ticker search
    StartTickerInput,
    InputChar(char),
    InputBackspace,
    CancelInput,
    SubmitTicker,
    TickerAccepted(Ticker),

    // Manual trade decision
    TriggerDecision,
    DecisionCompleted(DecisionOutcome),
    DecisionFailed(String),

    // Notifications
    ShowNotification(Notification),
    DismissNotification,

    // Quit
    Quit,
}

impl PollMessage for Action {
    fn fetch_started(key: &ResourceKey) -> Self {
        Self::FetchStarted(key.clone())
    }

    fn fetch_failed(key: &ResourceKey, reason: String) -> Self {
        Self::FetchFailed(key.clone(), reason)
    }
}

/// A notification to display to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub duration_secs: u64,
}

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Info,
            duration_secs: 3,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Success,
            duration_secs: 3,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Warning,
            duration_secs: 5,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NotificationLevel::Error,
            duration_secs: 10,
        }
    }
}

/// The global state store.
#[derive(Debug)]
pub struct Store {
    /// Application state.
    pub app: AppState,
    /// Agent health state.
    pub agents: AgentsState,
    /// Portfolio state.
    pub portfolio: PortfolioState,
    /// Candidate stock state.
    pub candidates: CandidatesState,
    /// Technical analysis state.
    pub technical: TechnicalState,
    /// Auth token state.
    pub token: TokenState,
    /// Macro report state.
    pub macro_report: MacroState,
    /// Action sender for dispatching actions.
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Store {
    /// Create a new store with the given action sender.
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            app: AppState::default(),
            agents: AgentsState::default(),
            portfolio: PortfolioState::default(),
            candidates: CandidatesState::default(),
            technical: TechnicalState::default(),
            token: TokenState::default(),
            macro_report: MacroState::default(),
            action_tx,
        }
    }

    /// Dispatch an action to the store.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        self.action_tx
            .send(action)
            .map_err(|e| crate::Error::channel(e.to_string()))
    }

    /// Whether any resource currently has a fetch outstanding.
    pub fn any_in_flight(&self) -> bool {
        self.agents.entry.is_in_flight()
            || self.portfolio.entry.is_in_flight()
            || self.candidates.entry.is_in_flight()
            || self.technical.entry.is_in_flight()
            || self.token.entry.is_in_flight()
            || self.macro_report.entry.is_in_flight()
    }

    /// Apply an action to update state.
    pub fn reduce(&mut self, action: Action) {
        match action {
            // Navigation
            Action::SetView(view) => {
                self.app.current_view = view;
                self.app.input_mode = InputMode::Normal;
            }
            Action::ToggleHelp => self.app.show_help = !self.app.show_help,
            Action::ScrollUp => self.scroll(-1),
            Action::ScrollDown => self.scroll(1),
            Action::GoToTop => self.go_to_top(),
            Action::GoToBottom => self.go_to_bottom(),

            // Polling lifecycle
            Action::FetchStarted(key) => self.mark_fetching(&key),
            Action::FetchFailed(key, reason) => self.mark_failed(&key, reason),

            // Fetch payloads
            Action::AgentsLoaded(agents) => {
                self.agents.entry.resolve(agents);
                self.app.connected = true;
            }
            Action::PortfolioLoaded(portfolio) => {
                self.portfolio.entry.resolve(portfolio);
                self.clamp_portfolio_selection();
            }
            Action::CandidatesLoaded(candidates) => {
                self.candidates.entry.resolve(candidates);
                self.clamp_candidates_selection();
            }
            Action::TechnicalLoaded(analysis) => {
                // A result for a ticker the view has moved away from is a
                // late arrival for a released subscription; drop it.
                if self.technical.matches(&analysis.ticker) {
                    self.technical.entry.resolve(analysis);
                } else {
                    tracing::debug!(
                        ticker = %analysis.ticker,
                        "discarding technical analysis for inactive ticker"
                    );
                }
            }
            Action::TokenStatusLoaded(status) => self.token.entry.resolve(status),
            Action::MacroLoaded(report) => self.macro_report.entry.resolve(report),

            // Ticker search
            Action::StartTickerInput => {
                self.app.current_view = View::Technical;
                self.app.input_mode = InputMode::Ticker;
                self.app.clear_input();
            }
            Action::InputChar(c) => self.app.push_char(c),
            Action::InputBackspace => self.app.pop_char(),
            Action::CancelInput => {
                self.app.input_mode = InputMode::Normal;
                self.app.clear_input();
            }
            Action::TickerAccepted(ticker) => {
                self.technical.set_ticker(ticker);
                self.app.input_mode = InputMode::Normal;
                self.app.clear_input();
            }

            // Manual trade decision
            Action::TriggerDecision => self.app.decision_pending = true,
            Action::DecisionCompleted(outcome) => {
                self.app.decision_pending = false;
                self.app.notification = Some(Notification::success(format!(
                    "Trade decision completed: {} execution(s)",
                    outcome.executed_count()
                )));
            }
            Action::DecisionFailed(reason) => {
                self.app.decision_pending = false;
                tracing::warn!(error = %reason, "manual trade decision failed");
                self.app.notification =
                    Some(Notification::error("Trade decision unavailable"));
            }

            // Notifications
            Action::ShowNotification(notification) => {
                self.app.notification = Some(notification);
            }
            Action::DismissNotification => {
                self.app.notification = None;
            }

            // Quit
            Action::Quit => {
                self.app.should_quit = true;
            }

            // Handled by the app layer, not the reducer.
            Action::Refresh | Action::RefreshAll | Action::SubmitTicker => {}
        }
    }

    fn mark_fetching(&mut self, key: &ResourceKey) {
        match key {
            ResourceKey::AgentsHealth => self.agents.entry.mark_fetching(),
            ResourceKey::Portfolio => self.portfolio.entry.mark_fetching(),
            ResourceKey::Candidates => self.candidates.entry.mark_fetching(),
            ResourceKey::TokenStatus => self.token.entry.mark_fetching(),
            ResourceKey::MacroReport => self.macro_report.entry.mark_fetching(),
            ResourceKey::Technical(ticker) => {
                if self.technical.matches(ticker.as_str()) {
                    self.technical.entry.mark_fetching();
                }
            }
        }
    }

    fn mark_failed(&mut self, key: &ResourceKey, reason: String) {
        match key {
            ResourceKey::AgentsHealth => {
                self.agents.entry.reject(reason);
                self.app.connected = false;
            }
            ResourceKey::Portfolio => self.portfolio.entry.reject(reason),
            ResourceKey::Candidates => self.candidates.entry.reject(reason),
            ResourceKey::TokenStatus => self.token.entry.reject(reason),
            ResourceKey::MacroReport => self.macro_report.entry.reject(reason),
            ResourceKey::Technical(ticker) => {
                if self.technical.matches(ticker.as_str()) {
                    self.technical.entry.reject(reason);
                }
            }
        }
    }

    fn scroll(&mut self, delta: i32) {
        match self.app.current_view {
            View::Portfolio => {
                let len = self.portfolio.position_count();
                self.portfolio.selected = shift_selection(self.portfolio.selected, delta, len);
            }
            View::Candidates => {
                let len = self.candidates.candidate_count();
                self.candidates.selected = shift_selection(self.candidates.selected, delta, len);
            }
            _ => {}
        }
    }

    fn go_to_top(&mut self) {
        match self.app.current_view {
            View::Portfolio if self.portfolio.position_count() > 0 => {
                self.portfolio.selected = Some(0);
            }
            View::Candidates if self.candidates.candidate_count() > 0 => {
                self.candidates.selected = Some(0);
            }
            _ => {}
        }
    }

    fn go_to_bottom(&mut self) {
        match self.app.current_view {
            View::Portfolio => {
                let len = self.portfolio.position_count();
                self.portfolio.selected = len.checked_sub(1);
            }
            View::Candidates => {
                let len = self.candidates.candidate_count();
                self.candidates.selected = len.checked_sub(1);
            }
            _ => {}
        }
    }

    fn clamp_portfolio_selection(&mut self) {
        let len = self.portfolio.position_count();
        self.portfolio.selected = clamp_selection(self.portfolio.selected, len);
    }

    fn clamp_candidates_selection(&mut self) {
        let len = self.candidates.candidate_count();
        self.candidates.selected = clamp_selection(self.candidates.selected, len);
    }
}

fn shift_selection(current: Option<usize>, delta: i32, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let current = current.unwrap_or(0) as i32;
    let next = (current + delta).max(0) as usize;
    Some(next.min(len - 1))
}

fn clamp_selection(current: Option<usize>, len: usize) -> Option<usize> {
    match current {
        Some(i) if len > 0 => Some(i.min(len - 1)),
        _ if len > 0 => current,
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn store() -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        Store::new(tx)
    }

    fn portfolio() -> Portfolio {
        Portfolio {
            cash_krw: dec!(2_000_000),
            total_value: dec!(10_000_000),
            positions: vec![],
            last_updated: "2025-11-02T08:15:00".to_string(),
        }
    }

    fn analysis_for(ticker: &str) -> TechnicalAnalysis {
        let period = serde_json::json!({
            "rsi": 55.0,
            "ma": {"ma5": 1000, "ma10": 990, "ma20": 980},
            "macd": {"macd_line": 1.0, "signal_line": 0.5, "histogram": 0.5, "signal": "neutral"},
            "bollinger_band": {"top": 1100, "middle": 1000, "bottom": 900},
            "fibonacci_retracement": {"trend": "sideway", "levels": {}}
        });
        serde_json::from_value(serde_json::json!({
            "ticker": ticker,
            "current_price": 1000,
            "analysis_time": "2025-11-02T08:15:00",
            "day": period.clone(), "week": period.clone(), "month": period,
        }))
        .unwrap()
    }

    #[test]
    fn failed_fetch_keeps_cached_value_and_sets_error() {
        let mut store = store();
        store.reduce(Action::FetchStarted(ResourceKey::Portfolio));
        store.reduce(Action::PortfolioLoaded(portfolio()));
        assert!(store.portfolio.entry.value().is_some());

        store.reduce(Action::FetchStarted(ResourceKey::Portfolio));
        store.reduce(Action::FetchFailed(
            ResourceKey::Portfolio,
            "502 Bad Gateway".to_string(),
        ));

        let entry = &store.portfolio.entry;
        assert_eq!(entry.value().unwrap().total_value, dec!(10_000_000));
        assert!(entry.is_unavailable());
        assert!(!entry.is_in_flight());
    }

    #[test]
    fn successful_fetch_clears_prior_error() {
        let mut store = store();
        store.reduce(Action::FetchStarted(ResourceKey::Portfolio));
        store.reduce(Action::FetchFailed(
            ResourceKey::Portfolio,
            "connection refused".to_string(),
        ));
        assert!(store.portfolio.entry.is_unavailable());

        store.reduce(Action::FetchStarted(ResourceKey::Portfolio));
        store.reduce(Action::PortfolioLoaded(portfolio()));

        assert!(!store.portfolio.entry.is_unavailable());
        assert!(store.portfolio.entry.fetched_at().is_some());
    }

    #[test]
    fn agents_failure_marks_disconnected() {
        let mut store = store();
        store.reduce(Action::AgentsLoaded(vec![]));
        assert!(store.app.connected);

        store.reduce(Action::FetchFailed(
            ResourceKey::AgentsHealth,
            "timeout".to_string(),
        ));
        assert!(!store.app.connected);
    }

    #[test]
    fn technical_result_for_inactive_ticker_is_discarded() {
        let mut store = store();
        store.reduce(Action::TickerAccepted(Ticker::new("005930").unwrap()));
        store.reduce(Action::TickerAccepted(Ticker::new("000660").unwrap()));

        // Late result from the first search arrives after the switch.
        store.reduce(Action::TechnicalLoaded(analysis_for("005930")));
        assert!(store.technical.entry.value().is_none());

        store.reduce(Action::TechnicalLoaded(analysis_for("000660")));
        assert_eq!(
            store.technical.entry.value().unwrap().ticker,
            "000660"
        );
    }

    #[test]
    fn ticker_input_flow() {
        let mut store = store();
        store.reduce(Action::StartTickerInput);
        assert_eq!(store.app.current_view, View::Technical);
        assert!(store.app.is_editing());

        for c in "005930".chars() {
            store.reduce(Action::InputChar(c));
        }
        assert_eq!(store.app.input_buffer, "005930");

        store.reduce(Action::TickerAccepted(Ticker::new("005930").unwrap()));
        assert!(!store.app.is_editing());
        assert!(store.app.input_buffer.is_empty());
        assert!(store.technical.matches("005930"));
    }

    #[test]
    fn scroll_is_bounded_by_candidate_list() {
        let mut store = store();
        store.reduce(Action::SetView(View::Candidates));
        let response: CandidatesResponse = serde_json::from_value(serde_json::json!({
            "timestamp": "2025-11-02T08:15:00",
            "total_stocks": 2,
            "statistics": {"high_priority": 1, "mid_priority": 1, "low_priority": 0},
            "top_candidates": [
                {
                    "ticker": "005930", "name": "삼성전자", "sector": "반도체",
                    "avg_sentiment": 0.4, "news_count": 10, "positive_count": 6,
                    "negative_count": 2, "neutral_count": 2, "positive_ratio": 0.6,
                    "negative_ratio": 0.2, "neutral_ratio": 0.2, "priority": "HIGH",
                    "market_cap_tier": "LARGE", "reasoning": "", "top_headlines": [],
                    "final_score": 0.8
                },
                {
                    "ticker": "000660", "name": "SK하이닉스", "sector": "반도체",
                    "avg_sentiment": 0.3, "news_count": 8, "positive_count": 4,
                    "negative_count": 2, "neutral_count": 2, "positive_ratio": 0.5,
                    "negative_ratio": 0.25, "neutral_ratio": 0.25, "priority": "MID",
                    "market_cap_tier": "LARGE", "reasoning": "", "top_headlines": [],
                    "final_score": 0.6
                }
            ]
        }))
        .unwrap();
        store.reduce(Action::CandidatesLoaded(response));

        store.reduce(Action::ScrollDown);
        store.reduce(Action::ScrollDown);
        store.reduce(Action::ScrollDown);
        assert_eq!(store.candidates.selected, Some(1));

        store.reduce(Action::ScrollUp);
        store.reduce(Action::ScrollUp);
        assert_eq!(store.candidates.selected, Some(0));
    }

    #[test]
    fn decision_lifecycle_toggles_pending_flag() {
        let mut store = store();
        store.reduce(Action::TriggerDecision);
        assert!(store.app.decision_pending);

        store.reduce(Action::DecisionFailed("503".to_string()));
        assert!(!store.app.decision_pending);
        assert!(store.app.notification.is_some());
    }
}
