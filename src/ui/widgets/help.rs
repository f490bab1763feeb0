//! Help panel widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::super::layout::centered_rect;

/// Help panel showing keybindings.
pub struct HelpPanel;

impl HelpPanel {
    /// Render the help panel.
    pub fn render(frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 80, area);

        // Clear the area behind the popup
        frame.render_widget(Clear, popup_area);

        let help_text = vec![
            Line::from(vec![Span::styled(
                "Views",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("  1    ", Style::default().fg(Color::Cyan)),
                Span::raw("Overview"),
            ]),
            Line::from(vec![
                Span::styled("  2    ", Style::default().fg(Color::Cyan)),
                Span::raw("Portfolio"),
            ]),
            Line::from(vec![
                Span::styled("  3    ", Style::default().fg(Color::Cyan)),
                Span::raw("Candidate stocks"),
            ]),
            Line::from(vec![
                Span::styled("  4    ", Style::default().fg(Color::Cyan)),
                Span::raw("Technical analysis"),
            ]),
            Line::from(vec![
                Span::styled("  5    ", Style::default().fg(Color::Cyan)),
                Span::raw("Macro report"),
            ]),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Navigation",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("  j/↓  ", Style::default().fg(Color::Cyan)),
                Span::raw("Move down"),
            ]),
            Line::from(vec![
                Span::styled("  k/↑  ", Style::default().fg(Color::Cyan)),
                Span::raw("Move up"),
            ]),
            Line::from(vec![
                Span::styled("  g/G  ", Style::default().fg(Color::Cyan)),
                Span::raw("Go to top/bottom"),
            ]),
            Line::from(""),
            Line::from(vec![Span::styled(
                "Actions",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("  r    ", Style::default().fg(Color::Cyan)),
                Span::raw("Refresh current view"),
            ]),
            Line::from(vec![
                Span::styled("  R    ", Style::default().fg(Color::Cyan)),
                Span::raw("Refresh everything"),
            ]),
            Line::from(vec![
                Span::styled("  /    ", Style::default().fg(Color::Cyan)),
                Span::raw("Search a ticker (6-character code)"),
            ]),
            Line::from(vec![
                Span::styled("  d    ", Style::default().fg(Color::Cyan)),
                Span::raw("Trigger a manual trade decision"),
            ]),
            Line::from(vec![
                Span::styled("  Esc  ", Style::default().fg(Color::Cyan)),
                Span::raw("Dismiss notification / cancel input"),
            ]),
            Line::from(vec![
                Span::styled("  ?    ", Style::default().fg(Color::Cyan)),
                Span::raw("Toggle help"),
            ]),
            Line::from(vec![
                Span::styled("  q    ", Style::default().fg(Color::Cyan)),
                Span::raw("Quit"),
            ]),
        ];

        let help = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        frame.render_widget(help, popup_area);
    }
}
