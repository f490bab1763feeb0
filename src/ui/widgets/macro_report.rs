//! Macro-economic report view.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::api::MarketBias;
use crate::state::Store;

fn bias_badge(bias: MarketBias) -> Span<'static> {
    let (label, color) = match bias {
        MarketBias::Bullish => ("BULLISH", Color::Green),
        MarketBias::Bearish => ("BEARISH", Color::Red),
        MarketBias::Neutral => ("NEUTRAL", Color::Gray),
        MarketBias::Uncertain => ("UNCERTAIN", Color::Yellow),
    };
    Span::styled(
        format!(" {label} "),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

/// Macro report view.
pub struct MacroView;

impl MacroView {
    /// Render the macro report view.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let state = &store.macro_report;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        // Header: bias + report age
        let block = Block::default()
            .title(" Macro Analysis ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);

        let header = match state.entry.value() {
            Some(report) => {
                let mut spans = vec![Span::raw(" Market bias "), bias_badge(report.market_bias_hint)];
                if let Some(last_update) = &report.last_update {
                    spans.push(Span::styled(
                        format!("   report generated {last_update}"),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                Line::from(spans)
            }
            None if state.entry.is_loading() => Line::from(Span::styled(
                " Loading macro report…",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )),
            None => Line::from(Span::styled(
                " No macro report",
                Style::default().fg(Color::DarkGray),
            )),
        };
        frame.render_widget(Paragraph::new(header), inner);

        if state.entry.is_unavailable() {
            super::render_unavailable(frame, chunks[0]);
        }

        // Body: bullish / bearish summaries side by side
        let Some(report) = state.entry.value() else {
            return;
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        let positive = Paragraph::new(report.positive_summary.clone())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(" Bullish view ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Green)),
            );
        frame.render_widget(positive, columns[0]);

        let negative = Paragraph::new(report.negative_summary.clone())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(" Bearish view ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            );
        frame.render_widget(negative, columns[1]);
    }
}
