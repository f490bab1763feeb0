//! Agent health card.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::state::Store;

/// Health card listing all backend agents.
pub struct AgentHealthCard;

impl AgentHealthCard {
    /// Render the agent health card.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let state = &store.agents;

        let block = Block::default()
            .title(format!(
                " Agents ({}/{}) ",
                state.healthy_count(),
                state.total_count()
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = Vec::new();
        match state.entry.value() {
            Some(agents) => {
                for agent in agents {
                    let (icon, icon_style, badge, badge_style) = if agent.is_healthy() {
                        (
                            "✓",
                            Style::default().fg(Color::Green),
                            "OK",
                            Style::default().fg(Color::Green),
                        )
                    } else {
                        (
                            "✗",
                            Style::default().fg(Color::Red),
                            "DOWN",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        )
                    };

                    lines.push(Line::from(vec![
                        Span::styled(format!(" {icon} "), icon_style),
                        Span::raw(format!("{:<18}", agent.service_name)),
                        Span::styled(format!(":{} ", agent.port), Style::default().fg(Color::DarkGray)),
                        Span::styled(badge, badge_style),
                    ]));
                }
            }
            None if state.entry.is_loading() => {
                lines.push(Line::from(Span::styled(
                    " Checking agents…",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::ITALIC),
                )));
            }
            None => {
                lines.push(Line::from(Span::styled(
                    " No health report yet",
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }

        frame.render_widget(Paragraph::new(lines), inner);

        if state.entry.is_unavailable() {
            super::render_unavailable(frame, area);
        }
        if state.entry.is_in_flight() && state.entry.value().is_some() {
            super::render_loading(frame, area);
        }
    }
}
