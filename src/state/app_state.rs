//! Application-level state.

use super::Notification;
use crate::config::UiConfig;

/// The current view/screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Overview,
    Portfolio,
    Candidates,
    Technical,
    Macro,
}

impl View {
    /// Tab label.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Portfolio => "Portfolio",
            Self::Candidates => "Candidates",
            Self::Technical => "Technical",
            Self::Macro => "Macro",
        }
    }
}

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a ticker code in the technical view.
    Ticker,
}

/// Maximum ticker input length; the backend contract fixes tickers at 6.
pub const TICKER_INPUT_LIMIT: usize = 6;

/// Global application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Current view.
    pub current_view: View,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Whether to show help overlay.
    pub show_help: bool,
    /// Current notification.
    pub notification: Option<Notification>,
    /// Whether the API proxy answered the last agents-health poll.
    pub connected: bool,
    /// Whether a manual trade decision is outstanding.
    pub decision_pending: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Ticker input buffer.
    pub input_buffer: String,
    /// UI preferences, copied from the config at startup.
    pub ui: UiConfig,
}

impl AppState {
    /// Check if in ticker input mode.
    pub fn is_editing(&self) -> bool {
        self.input_mode == InputMode::Ticker
    }

    /// Clear the input buffer.
    pub fn clear_input(&mut self) {
        self.input_buffer.clear();
    }

    /// Add a character to the input buffer. Only alphanumerics are
    /// meaningful in a ticker code, and input stops at the contract length.
    pub fn push_char(&mut self, c: char) {
        if c.is_ascii_alphanumeric() && self.input_buffer.chars().count() < TICKER_INPUT_LIMIT {
            self.input_buffer.push(c.to_ascii_uppercase());
        }
    }

    /// Remove the last character from the input buffer.
    pub fn pop_char(&mut self) {
        self.input_buffer.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn input_buffer_caps_at_ticker_length() {
        let mut state = AppState::default();
        for c in "0059301234".chars() {
            state.push_char(c);
        }
        assert_eq!(state.input_buffer, "005930");
    }

    #[test]
    fn input_buffer_rejects_non_alphanumeric() {
        let mut state = AppState::default();
        state.push_char('0');
        state.push_char('-');
        state.push_char(' ');
        state.push_char('a');
        assert_eq!(state.input_buffer, "0A");
    }
}
