//! Event handler for processing input events.

use crate::config::KeyBindings;
use crate::error::Result;
use crate::state::{Action, InputMode, Store, View};
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind,
};
use std::time::Duration;

use super::input::binding_matches;

/// Handles input events and produces actions.
pub struct EventHandler {
    /// Key bindings.
    keybindings: KeyBindings,
    /// Store reference for state-aware handling.
    store_snapshot: Option<StoreSnapshot>,
}

/// Snapshot of relevant store state for event handling.
#[derive(Clone, Copy)]
struct StoreSnapshot {
    input_mode: InputMode,
    has_notification: bool,
}

impl EventHandler {
    /// Create a new event handler with the given key bindings.
    pub fn new(keybindings: KeyBindings) -> Self {
        Self {
            keybindings,
            store_snapshot: None,
        }
    }

    /// Update the store snapshot for state-aware event handling.
    pub fn update_store_snapshot(&mut self, store: &Store) {
        self.store_snapshot = Some(StoreSnapshot {
            input_mode: store.app.input_mode,
            has_notification: store.app.notification.is_some(),
        });
    }

    /// Get the next action from user input.
    pub async fn next(&mut self) -> Result<Option<Action>> {
        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;
            match event {
                CrosstermEvent::Key(key) => {
                    if let Some(action) = self.handle_key(key) {
                        return Ok(Some(action));
                    }
                }
                CrosstermEvent::Mouse(mouse) => {
                    if let Some(action) = self.handle_mouse(mouse) {
                        return Ok(Some(action));
                    }
                }
                CrosstermEvent::Resize(_, _) => {
                    // Terminal will automatically redraw
                }
                _ => {}
            }
        }
        Ok(None)
    }

    /// Handle a key event and return an optional action.
    fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        // Only process key press events
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let snapshot = self.store_snapshot.as_ref()?;

        match snapshot.input_mode {
            InputMode::Normal => self.handle_normal_mode(key, snapshot),
            InputMode::Ticker => self.handle_ticker_mode(key),
        }
    }

    /// Handle a mouse event and return an optional action.
    fn handle_mouse(&self, mouse: MouseEvent) -> Option<Action> {
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            _ => None,
        }
    }

    fn handle_normal_mode(&self, key: KeyEvent, snapshot: &StoreSnapshot) -> Option<Action> {
        let bindings = &self.keybindings;

        // Global shortcuts
        if binding_matches(&bindings.quit, &key) {
            return Some(Action::Quit);
        }
        if binding_matches(&bindings.help, &key) {
            return Some(Action::ToggleHelp);
        }
        if binding_matches(&bindings.refresh, &key) {
            return Some(Action::Refresh);
        }
        if binding_matches(&bindings.refresh_all, &key) {
            return Some(Action::RefreshAll);
        }
        if binding_matches(&bindings.decision, &key) {
            return Some(Action::TriggerDecision);
        }

        // Dismiss a visible notification with Esc
        if key.code == KeyCode::Esc && snapshot.has_notification {
            return Some(Action::DismissNotification);
        }

        // View switching
        if binding_matches(&bindings.overview, &key) {
            return Some(Action::SetView(View::Overview));
        }
        if binding_matches(&bindings.portfolio, &key) {
            return Some(Action::SetView(View::Portfolio));
        }
        if binding_matches(&bindings.candidates, &key) {
            return Some(Action::SetView(View::Candidates));
        }
        if binding_matches(&bindings.technical, &key) {
            return Some(Action::SetView(View::Technical));
        }
        if binding_matches(&bindings.macro_report, &key) {
            return Some(Action::SetView(View::Macro));
        }

        // Ticker search (jumps to the technical view)
        if binding_matches(&bindings.search, &key) {
            return Some(Action::StartTickerInput);
        }

        // Navigation
        if binding_matches(&bindings.up, &key) || key.code == KeyCode::Up {
            return Some(Action::ScrollUp);
        }
        if binding_matches(&bindings.down, &key) || key.code == KeyCode::Down {
            return Some(Action::ScrollDown);
        }
        if key.code == KeyCode::Home || key.code == KeyCode::Char('g') {
            return Some(Action::GoToTop);
        }
        if key.code == KeyCode::End || key.code == KeyCode::Char('G') {
            return Some(Action::GoToBottom);
        }

        None
    }

    fn handle_ticker_mode(&self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => Some(Action::CancelInput),
            KeyCode::Enter => Some(Action::SubmitTicker),
            KeyCode::Backspace => Some(Action::InputBackspace),
            KeyCode::Char(c) => Some(Action::InputChar(c)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use tokio::sync::mpsc;

    fn handler_with_store(store: &Store) -> EventHandler {
        let mut handler = EventHandler::new(KeyBindings::default());
        handler.update_store_snapshot(store);
        handler
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn normal_mode_maps_views_and_quit() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let store = Store::new(tx);
        let handler = handler_with_store(&store);

        assert!(matches!(
            handler.handle_key(press(KeyCode::Char('q'))),
            Some(Action::Quit)
        ));
        assert!(matches!(
            handler.handle_key(press(KeyCode::Char('3'))),
            Some(Action::SetView(View::Candidates))
        ));
        assert!(matches!(
            handler.handle_key(press(KeyCode::Char('/'))),
            Some(Action::StartTickerInput)
        ));
    }

    #[test]
    fn ticker_mode_collects_characters() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut store = Store::new(tx);
        store.reduce(Action::StartTickerInput);
        let handler = handler_with_store(&store);

        assert!(matches!(
            handler.handle_key(press(KeyCode::Char('0'))),
            Some(Action::InputChar('0'))
        ));
        assert!(matches!(
            handler.handle_key(press(KeyCode::Enter)),
            Some(Action::SubmitTicker)
        ));
        assert!(matches!(
            handler.handle_key(press(KeyCode::Esc)),
            Some(Action::CancelInput)
        ));
        // 'q' is input, not quit, while editing
        assert!(matches!(
            handler.handle_key(press(KeyCode::Char('q'))),
            Some(Action::InputChar('q'))
        ));
    }
}
