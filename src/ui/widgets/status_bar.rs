//! Status bar widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::api::MarketBias;
use crate::state::Store;

/// Status bar widget.
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let connection_status = if store.app.connected {
            Span::styled("● Connected", Style::default().fg(Color::Green))
        } else {
            Span::styled("○ Disconnected", Style::default().fg(Color::Red))
        };

        let bias = match store.macro_report.bias() {
            Some(MarketBias::Bullish) => Span::styled("bias: bullish", Style::default().fg(Color::Green)),
            Some(MarketBias::Bearish) => Span::styled("bias: bearish", Style::default().fg(Color::Red)),
            Some(MarketBias::Neutral) => Span::styled("bias: neutral", Style::default().fg(Color::Gray)),
            Some(MarketBias::Uncertain) => {
                Span::styled("bias: uncertain", Style::default().fg(Color::Yellow))
            }
            None => Span::styled("bias: -", Style::default().fg(Color::DarkGray)),
        };

        let activity = if store.app.decision_pending {
            Span::styled(
                " Deciding… ",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::ITALIC),
            )
        } else if store.any_in_flight() {
            Span::styled(
                " Refreshing… ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Span::raw("")
        };

        let help_hint = Span::styled(" Press ? for help ", Style::default().fg(Color::DarkGray));

        let left_content = vec![
            Span::styled(
                " Quartz ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            connection_status,
            Span::raw(" | "),
            bias,
            activity,
        ];

        let status_line = Line::from(left_content);

        // Calculate padding for right-aligned help hint
        let left_len: usize = status_line
            .spans
            .iter()
            .map(|s| s.content.chars().count())
            .sum();
        let right_len = help_hint.content.chars().count();
        let padding = area
            .width
            .saturating_sub(left_len as u16 + right_len as u16);

        let mut full_line = status_line.spans;
        full_line.push(Span::raw(" ".repeat(padding as usize)));
        full_line.push(help_hint);

        let paragraph =
            Paragraph::new(Line::from(full_line)).style(Style::default().bg(Color::DarkGray));

        frame.render_widget(paragraph, area);
    }
}
