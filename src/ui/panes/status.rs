//! Status bar rendering with keybindings and run outcome

use crate::ui::theme::PALETTE;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the status bar at the bottom
pub fn render_status_bar(frame: &mut Frame, area: Rect, label: &str, message: &str, is_error: bool) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let (badge, badge_bg) = if is_error {
        (" FAULT ", PALETTE.fault)
    } else {
        (" OK ", PALETTE.ok)
    };

    let left_spans = vec![
        Span::styled(
            badge,
            Style::default()
                .bg(badge_bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} ", label),
            Style::default()
                .bg(PALETTE.band)
                .fg(PALETTE.keyword),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(PALETTE.band)
                .fg(PALETTE.muted),
        ),
        Span::styled(
            format!(" {} ", message),
            Style::default()
                .bg(PALETTE.band)
                .fg(if is_error { PALETTE.fault } else { PALETTE.text }),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(PALETTE.band))
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    let key_style = Style::default().bg(PALETTE.muted).fg(Color::Black);
    let desc_style = Style::default()
        .bg(PALETTE.band)
        .fg(PALETTE.text);
    let sep_style = Style::default()
        .bg(PALETTE.band)
        .fg(PALETTE.muted);

    let right_spans = vec![
        Span::styled(" ⇥ ", key_style),
        Span::styled(" focus ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ↑/↓ ", key_style),
        Span::styled(" scroll ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled("q", key_style),
        Span::styled(" quit ", desc_style),
    ];

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(PALETTE.band))
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}
