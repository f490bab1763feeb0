//! Auth token status card.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::state::Store;
use crate::ui::format::format_remaining;

/// Card showing the trading token's validity and remaining lifetime.
pub struct TokenCard;

impl TokenCard {
    /// Render the token status card.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let state = &store.token;

        let block = Block::default()
            .title(" Auth Token ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = Vec::new();
        match state.entry.value() {
            Some(status) => {
                let badge = if status.is_valid {
                    Span::styled(
                        "VALID",
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(
                        "EXPIRED",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                };
                lines.push(Line::from(vec![Span::raw(" Status      "), badge]));

                if let Some(seconds) = store.token.remaining_seconds() {
                    lines.push(Line::from(vec![
                        Span::raw(" Expires in  "),
                        Span::styled(
                            format_remaining(seconds),
                            Style::default().fg(Color::White),
                        ),
                    ]));
                }
                if let Some(expires_at) = &status.expires_at {
                    lines.push(Line::from(vec![
                        Span::raw(" Expires at  "),
                        Span::styled(
                            expires_at.clone(),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]));
                }
            }
            None if state.entry.is_loading() => {
                lines.push(Line::from(Span::styled(
                    " Checking token…",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::ITALIC),
                )));
            }
            None => {
                lines.push(Line::from(Span::styled(
                    " Token status unknown",
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }

        frame.render_widget(Paragraph::new(lines), inner);

        if state.entry.is_unavailable() {
            super::render_unavailable(frame, area);
        }
    }
}
