//! TUI widgets.

mod agents;
mod candidates;
mod help;
mod macro_report;
mod notifications;
mod overview;
mod portfolio;
mod status_bar;
mod tab_bar;
mod technical;
mod token;

pub use agents::AgentHealthCard;
pub use candidates::CandidatesView;
pub use help::HelpPanel;
pub use macro_report::MacroView;
pub use notifications::render_notification;
pub use overview::OverviewView;
pub use portfolio::PortfolioView;
pub use status_bar::StatusBar;
pub use tab_bar::TabBar;
pub use technical::TechnicalView;
pub use token::TokenCard;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render a small loading indicator at the bottom right of a block area.
pub(crate) fn render_loading(frame: &mut Frame, area: Rect) {
    let loading = Line::from(vec![Span::styled(
        "Loading...",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC),
    )]);

    let loading_area = Rect {
        x: (area.x + area.width).saturating_sub(12),
        y: (area.y + area.height).saturating_sub(2),
        width: 11.min(area.width),
        height: 1,
    };

    frame.render_widget(Paragraph::new(loading), loading_area);
}

/// Render the per-resource unavailable indicator at the bottom left of a
/// block area. Raw error detail stays in the log file.
pub(crate) fn render_unavailable(frame: &mut Frame, area: Rect) {
    let banner = Line::from(vec![Span::styled(
        " unavailable · r to retry ",
        Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC),
    )]);

    let banner_area = Rect {
        x: area.x + 2,
        y: (area.y + area.height).saturating_sub(1),
        width: 26.min(area.width.saturating_sub(2)),
        height: 1,
    };

    frame.render_widget(Paragraph::new(banner), banner_area);
}
