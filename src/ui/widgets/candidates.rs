//! Candidate stock view and preview card.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use rust_decimal::Decimal;

use crate::api::Priority;
use crate::state::Store;
use crate::ui::format::truncate;

fn priority_style(priority: Priority) -> Style {
    match priority {
        Priority::High => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        Priority::Mid => Style::default().fg(Color::Yellow),
        Priority::Low => Style::default().fg(Color::Blue),
    }
}

fn sentiment_label(sentiment: Decimal) -> String {
    format!("{:.0}%", sentiment * Decimal::ONE_HUNDRED)
}

/// Candidate stocks view.
pub struct CandidatesView;

impl CandidatesView {
    /// Render the full candidates view.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        Self::render_statistics(frame, chunks[0], store);
        Self::render_table(frame, chunks[1], store);
    }

    fn render_statistics(frame: &mut Frame, area: Rect, store: &Store) {
        let state = &store.candidates;

        let block = Block::default()
            .title(" Selection ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let line = match state.entry.value() {
            Some(response) => Line::from(vec![
                Span::raw(format!(" {} stocks analyzed", response.total_stocks)),
                Span::raw("   "),
                Span::styled(
                    format!("high {}", response.statistics.high_priority),
                    Style::default().fg(Color::Green),
                ),
                Span::raw(" · "),
                Span::styled(
                    format!("mid {}", response.statistics.mid_priority),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw(" · "),
                Span::styled(
                    format!("low {}", response.statistics.low_priority),
                    Style::default().fg(Color::Blue),
                ),
                Span::styled(
                    format!("   as of {}", response.timestamp),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            None => Line::from(Span::styled(
                " No selection data",
                Style::default().fg(Color::DarkGray),
            )),
        };

        frame.render_widget(Paragraph::new(line), inner);
    }

    fn render_table(frame: &mut Frame, area: Rect, store: &Store) {
        let state = &store.candidates;

        // The selection agent answering with zero analyzed stocks is a
        // normal state, not a failure.
        if state.is_empty_state() {
            let block = Block::default()
                .title(" Candidates ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan));
            let inner = block.inner(area);
            frame.render_widget(block, area);

            let empty = Paragraph::new(Line::from(Span::styled(
                "No analyzed candidates yet — the selection agent has not completed a run.",
                Style::default().fg(Color::DarkGray),
            )))
            .alignment(ratatui::layout::Alignment::Center);

            let message_area = Rect {
                x: inner.x,
                y: inner.y + inner.height / 2,
                width: inner.width,
                height: 1,
            };
            frame.render_widget(empty, message_area);
            return;
        }

        let candidates = state
            .entry
            .value()
            .map(|c| c.top_candidates.as_slice())
            .unwrap_or(&[]);

        let header_cells = [
            "#", "Ticker", "Name", "Sector", "Priority", "Tier", "Sent", "News", "Score",
        ]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });
        let header = Row::new(header_cells).height(1).bottom_margin(1);

        let rows = candidates.iter().enumerate().map(|(i, candidate)| {
            let cells = vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(candidate.ticker.clone()),
                Cell::from(truncate(&candidate.name, 14)),
                Cell::from(truncate(&candidate.sector, 10)),
                Cell::from(candidate.priority.to_string())
                    .style(priority_style(candidate.priority)),
                Cell::from(candidate.market_cap_tier.to_string()),
                Cell::from(sentiment_label(candidate.avg_sentiment)),
                Cell::from(format!(
                    "{} (+{}/-{})",
                    candidate.news_count, candidate.positive_count, candidate.negative_count
                )),
                Cell::from(format!("{:.2}", candidate.final_score)),
            ];

            Row::new(cells).height(1)
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(3),
                Constraint::Length(8),
                Constraint::Min(14),
                Constraint::Length(12),
                Constraint::Length(9),
                Constraint::Length(7),
                Constraint::Length(6),
                Constraint::Length(13),
                Constraint::Length(6),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(format!(" Candidates ({}) ", candidates.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");

        let mut table_state = TableState::default();
        table_state.select(state.selected);

        frame.render_stateful_widget(table, area, &mut table_state);

        if state.entry.is_unavailable() {
            super::render_unavailable(frame, area);
        }
        if state.entry.is_loading() {
            super::render_loading(frame, area);
        }
    }

    /// Compact preview card for the overview page.
    pub fn render_preview_card(frame: &mut Frame, area: Rect, store: &Store, limit: usize) {
        let state = &store.candidates;

        let block = Block::default()
            .title(" Candidates ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = Vec::new();
        match state.entry.value() {
            Some(response) if response.is_empty() => {
                lines.push(Line::from(Span::styled(
                    " No analyzed candidates yet",
                    Style::default().fg(Color::DarkGray),
                )));
            }
            Some(response) => {
                for (i, candidate) in response.top_candidates.iter().take(limit).enumerate() {
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!(" {}. ", i + 1),
                            Style::default().fg(Color::DarkGray),
                        ),
                        Span::raw(format!("{:<12}", truncate(&candidate.name, 11))),
                        Span::styled(
                            format!("{} ", candidate.ticker),
                            Style::default().fg(Color::DarkGray),
                        ),
                        Span::styled(
                            candidate.priority.to_string(),
                            priority_style(candidate.priority),
                        ),
                        Span::raw(format!("  {}", sentiment_label(candidate.avg_sentiment))),
                    ]));
                }
                lines.push(Line::from(Span::styled(
                    format!(
                        " top {} of {} analyzed",
                        response.top_candidates.len().min(limit),
                        response.total_stocks
                    ),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            None if state.entry.is_loading() => {
                lines.push(Line::from(Span::styled(
                    " Loading candidates…",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::ITALIC),
                )));
            }
            None => {
                lines.push(Line::from(Span::styled(
                    " No selection data",
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
