//! Technical analysis view.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::api::{FibTrend, MacdSignal, PeriodAnalysis};
use crate::state::Store;
use crate::ui::format::format_krw;

const RSI_OVERBOUGHT: Decimal = dec!(70);
const RSI_OVERSOLD: Decimal = dec!(30);

/// Technical analysis view: ticker search plus per-period indicator panels.
pub struct TechnicalView;

impl TechnicalView {
    /// Render the technical view.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        Self::render_search(frame, chunks[0], store);
        Self::render_analysis(frame, chunks[1], store);
    }

    fn render_search(frame: &mut Frame, area: Rect, store: &Store) {
        let block = Block::default()
            .title(" Ticker ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let line = if store.app.is_editing() {
            Line::from(vec![
                Span::raw(" > "),
                Span::styled(
                    store.app.input_buffer.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled("█", Style::default().fg(Color::Cyan)),
                Span::styled(
                    "   6-character code · Enter to analyze · Esc to cancel",
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        } else {
            match &store.technical.ticker {
                Some(ticker) => Line::from(vec![
                    Span::raw(" "),
                    Span::styled(
                        ticker.to_string(),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        "   / to search another ticker",
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
                None => Line::from(Span::styled(
                    " Press / and enter a 6-character ticker code (e.g. 005930)",
                    Style::default().fg(Color::DarkGray),
                )),
            }
        };

        frame.render_widget(Paragraph::new(line), inner);
    }

    fn render_analysis(frame: &mut Frame, area: Rect, store: &Store) {
        let state = &store.technical;

        let Some(ticker) = &state.ticker else {
            return;
        };

        match state.entry.value() {
            Some(analysis) => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(1), Constraint::Min(0)])
                    .split(area);

                let header = Line::from(vec![
                    Span::styled(
                        format!(" {} ", analysis.ticker),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format_krw(analysis.current_price)),
                    Span::styled(
                        format!("   analyzed {}", analysis.analysis_time),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]);
                frame.render_widget(Paragraph::new(header), chunks[0]);

                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([
                        Constraint::Percentage(33),
                        Constraint::Percentage(34),
                        Constraint::Percentage(33),
                    ])
                    .split(chunks[1]);

                render_period_panel(frame, columns[0], "Day", &analysis.day);
                render_period_panel(frame, columns[1], "Week", &analysis.week);
                render_period_panel(frame, columns[2], "Month", &analysis.month);

                if state.entry.is_unavailable() {
                    super::render_unavailable(frame, area);
                }
                if state.entry.is_in_flight() {
                    super::render_loading(frame, area);
                }
            }
            None if state.entry.is_loading() => {
                let loading = Paragraph::new(Line::from(Span::styled(
                    format!("Analyzing {ticker}…"),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::ITALIC),
                )))
                .alignment(ratatui::layout::Alignment::Center);
                frame.render_widget(loading, centered_line(area));
            }
            None => {
                let unavailable = Paragraph::new(Line::from(Span::styled(
                    format!("Analysis for {ticker} unavailable · r to retry"),
                    Style::default().fg(Color::Red),
                )))
                .alignment(ratatui::layout::Alignment::Center);
                frame.render_widget(unavailable, centered_line(area));
            }
        }
    }
}

fn centered_line(area: Rect) -> Rect {
    Rect {
        x: area.x,
        y: area.y + area.height / 2,
        width: area.width,
        height: 1,
    }
}

fn rsi_style(rsi: Decimal) -> (Style, &'static str) {
    if rsi >= RSI_OVERBOUGHT {
        (Style::default().fg(Color::Red), "overbought")
    } else if rsi <= RSI_OVERSOLD {
        (Style::default().fg(Color::Green), "oversold")
    } else {
        (Style::default().fg(Color::White), "neutral")
    }
}

fn macd_style(signal: MacdSignal) -> Style {
    match signal {
        MacdSignal::Bullish => Style::default().fg(Color::Green),
        MacdSignal::Bearish => Style::default().fg(Color::Red),
        MacdSignal::Neutral => Style::default().fg(Color::Gray),
    }
}

fn trend_style(trend: FibTrend) -> Style {
    match trend {
        FibTrend::Up => Style::default().fg(Color::Green),
        FibTrend::Down => Style::default().fg(Color::Red),
        FibTrend::Sideway => Style::default().fg(Color::Gray),
    }
}

fn render_period_panel(frame: &mut Frame, area: Rect, title: &str, period: &PeriodAnalysis) {
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (rsi_color, rsi_label) = rsi_style(period.rsi);
    let mut lines = vec![
        Line::from(vec![
            Span::raw(" RSI   "),
            Span::styled(format!("{:.1}", period.rsi), rsi_color),
            Span::styled(format!(" ({rsi_label})"), rsi_color),
        ]),
        Line::from(vec![
            Span::raw(" MACD  "),
            Span::styled(
                period.macd.signal.to_string(),
                macd_style(period.macd.signal).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" h {:.1}", period.macd.histogram),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(vec![
            Span::raw(" MA    "),
            Span::raw(format!(
                "5:{:.0} 10:{:.0} 20:{:.0}",
                period.ma.ma5, period.ma.ma10, period.ma.ma20
            )),
        ]),
        Line::from(vec![
            Span::raw(" BB    "),
            Span::raw(format!(
                "{:.0} / {:.0} / {:.0}",
                period.bollinger_band.bottom,
                period.bollinger_band.middle,
                period.bollinger_band.top
            )),
        ]),
        Line::from(vec![
            Span::raw(" Fib   "),
            Span::styled(
                period.fibonacci_retracement.trend.to_string(),
                trend_style(period.fibonacci_retracement.trend),
            ),
        ]),
    ];

    for (level, value) in period.fibonacci_retracement.levels.iter().take(4) {
        lines.push(Line::from(vec![
            Span::styled(
                format!("   {:<10}", level.replace("level_", "")),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw(format!("{value:.0}")),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
