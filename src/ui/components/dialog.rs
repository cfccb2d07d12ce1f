use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use crate::app::ErrorDialog;
use crate::ui::centered_rect;
use crate::ui::theme::Theme;

pub fn render_error(frame: &mut Frame, area: Rect, error: &ErrorDialog, pending: usize, theme: &Theme) {
    let modal_area = centered_rect(60, 30, area);
    frame.render_widget(Clear, modal_area);

    let title = if pending > 1 {
        format!(" {} (1/{}) ", error.title, pending)
    } else {
        format!(" {} ", error.title)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().bg(theme.highlight))
        .border_style(Style::default().fg(theme.error).add_modifier(Modifier::BOLD));

    let lines = vec![
        Line::from(Span::styled(error.message.as_str(), Style::default().fg(theme.text))),
        Line::from(""),
        Line::from(Span::styled("Press Enter to dismiss", Style::default().fg(theme.text_dim))),
    ];

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }).block(block), modal_area);
}

pub fn render_prompt(frame: &mut Frame, area: Rect, input: &str, theme: &Theme) {
    let modal_area = centered_rect(70, 20, area);
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(" Go to folder (Enter: open, Esc: cancel) ")
        .borders(Borders::ALL)
        .style(Style::default().bg(theme.highlight))
        .border_style(Style::default().fg(theme.frame));

    let line = Line::from(vec![
        Span::styled(input, Style::default().fg(theme.text)),
        Span::styled("▏", Style::default().fg(theme.cursor)),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), modal_area);
}
