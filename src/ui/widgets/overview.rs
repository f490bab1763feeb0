//! Overview page: stat tiles plus the dashboard cards.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::state::Store;
use crate::ui::format::format_krw;

use super::{AgentHealthCard, CandidatesView, PortfolioView, TokenCard};

/// Overview page widget.
pub struct OverviewView;

impl OverviewView {
    /// Render the overview.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Stat tiles
                Constraint::Min(10),    // Cards
                Constraint::Length(6),  // Token status
            ])
            .split(area);

        Self::render_stat_tiles(frame, rows[0], store);

        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(33),
                Constraint::Percentage(34),
                Constraint::Percentage(33),
            ])
            .split(rows[1]);

        AgentHealthCard::render(frame, cards[0], store);
        PortfolioView::render_summary_card(frame, cards[1], store);
        CandidatesView::render_preview_card(frame, cards[2], store, store.app.ui.overview_candidates);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(33), Constraint::Percentage(67)])
            .split(rows[2]);

        TokenCard::render(frame, bottom[0], store);
    }

    fn render_stat_tiles(frame: &mut Frame, area: Rect, store: &Store) {
        let tiles = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ])
            .split(area);

        let portfolio = store.portfolio.entry.value();

        stat_tile(
            frame,
            tiles[0],
            "Total value",
            portfolio
                .map(|p| format_krw(p.total_value))
                .unwrap_or_else(|| "-".to_string()),
            Color::Cyan,
        );
        stat_tile(
            frame,
            tiles[1],
            "Cash",
            portfolio
                .map(|p| format_krw(p.cash_krw))
                .unwrap_or_else(|| "-".to_string()),
            Color::Green,
        );
        stat_tile(
            frame,
            tiles[2],
            "Holdings",
            portfolio
                .map(|p| format!("{}", p.positions.len()))
                .unwrap_or_else(|| "-".to_string()),
            Color::Magenta,
        );
        stat_tile(
            frame,
            tiles[3],
            "Agents up",
            if store.agents.entry.value().is_some() {
                format!(
                    "{}/{}",
                    store.agents.healthy_count(),
                    store.agents.total_count()
                )
            } else {
                "-".to_string()
            },
            Color::Yellow,
        );
    }
}

fn stat_tile(frame: &mut Frame, area: Rect, label: &str, value: String, color: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = Line::from(vec![
        Span::styled(format!(" {label}  "), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}
