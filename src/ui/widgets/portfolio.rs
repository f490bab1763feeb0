//! Portfolio view and summary card.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use rust_decimal::Decimal;

use crate::state::Store;
use crate::ui::format::{format_krw, format_percent, truncate};

/// Portfolio view: summary header plus positions table.
pub struct PortfolioView;

impl PortfolioView {
    /// Render the full portfolio view.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(7), Constraint::Min(0)])
            .split(area);

        Self::render_summary_card(frame, chunks[0], store);
        Self::render_positions_table(frame, chunks[1], store);
    }

    /// Render the summary card (also used on the overview).
    pub fn render_summary_card(frame: &mut Frame, area: Rect, store: &Store) {
        let state = &store.portfolio;

        let block = Block::default()
            .title(" Portfolio ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = Vec::new();
        match state.entry.value() {
            Some(portfolio) => {
                let profit = portfolio.total_profit();
                let profit_style = if profit >= Decimal::ZERO {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::Red)
                };

                lines.push(Line::from(vec![
                    Span::raw(" Total value  "),
                    Span::styled(
                        format_krw(portfolio.total_value),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]));
                lines.push(Line::from(vec![
                    Span::raw(" Cash         "),
                    Span::raw(format_krw(portfolio.cash_krw)),
                ]));
                lines.push(Line::from(vec![
                    Span::raw(" Total P/L    "),
                    Span::styled(
                        format!(
                            "{} ({})",
                            format_krw(profit),
                            format_percent(portfolio.profit_rate())
                        ),
                        profit_style,
                    ),
                ]));
                lines.push(Line::from(vec![
                    Span::raw(" Holdings     "),
                    Span::raw(format!("{}", portfolio.positions.len())),
                    Span::styled(
                        format!("   updated {}", portfolio.last_updated),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]));
            }
            None if state.entry.is_loading() => {
                lines.push(Line::from(Span::styled(
                    " Loading portfolio…",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::ITALIC),
                )));
            }
            None => {
                lines.push(Line::from(Span::styled(
                    " No portfolio data",
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

    fn render_positions_table(frame: &mut Frame, area: Rect, store: &Store) {
        let state = &store.portfolio;
        let positions = state
            .entry
            .value()
            .map(|p| p.positions.as_slice())
            .unwrap_or(&[]);

        let header_cells = [
            "Ticker", "Name", "Shares", "Avg", "Current", "Eval", "P/L %", "Weight",
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

        let rows = positions.iter().map(|position| {
            let pl_style = if position.profit_loss_rate >= Decimal::ZERO {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Red)
            };

            let cells = vec![
                Cell::from(position.ticker.clone()),
                Cell::from(truncate(&position.name, 14)),
                Cell::from(format!("{}", position.shares)),
                Cell::from(format_krw(position.avg_price)),
                Cell::from(format_krw(position.current_price)),
                Cell::from(format_krw(position.eval_amount)),
                Cell::from(format_percent(position.profit_loss_rate)).style(pl_style),
                Cell::from(format_percent(position.weight_in_portfolio)),
            ];

            Row::new(cells).height(1)
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(8),
                Constraint::Min(14),
                Constraint::Length(8),
                Constraint::Length(12),
                Constraint::Length(12),
                Constraint::Length(14),
                Constraint::Length(9),
                Constraint::Length(9),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(format!(" Positions ({}) ", positions.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");

        let mut table_state = TableState::default();
        table_state.select(state.selected);

        frame.render_stateful_widget(table, area, &mut table_state);
    }
}
