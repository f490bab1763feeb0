//! UI rendering using ratatui.
//!
//! This module contains all TUI components and rendering logic.

pub mod format;
mod layout;
mod widgets;

pub use layout::Layout;
pub use widgets::{
    AgentHealthCard, CandidatesView, HelpPanel, MacroView, OverviewView, PortfolioView, StatusBar,
    TabBar, TechnicalView, TokenCard,
};

use crate::state::{Store, View};
use ratatui::Frame;

/// Main UI renderer.
pub struct Ui;

impl Ui {
    /// Render the entire UI.
    pub fn render(frame: &mut Frame, store: &Store) {
        let layout = Layout::new(frame.area());

        // Render status bar
        StatusBar::render(frame, layout.status_area, store);

        // Render tab bar
        TabBar::render(frame, layout.tab_area, store);

        // Render main content based on current view
        match store.app.current_view {
            View::Overview => OverviewView::render(frame, layout.main_area, store),
            View::Portfolio => PortfolioView::render(frame, layout.main_area, store),
            View::Candidates => CandidatesView::render(frame, layout.main_area, store),
            View::Technical => TechnicalView::render(frame, layout.main_area, store),
            View::Macro => MacroView::render(frame, layout.main_area, store),
        }

        // Render help panel if visible
        if store.app.show_help {
            HelpPanel::render(frame, frame.area());
        }

        // Render notification if present
        if let Some(notification) = &store.app.notification {
            widgets::render_notification(frame, layout.notification_area, notification);
        }
    }
}
