use std::path::Path;

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, directory: Option<&Path>, watching: bool, theme: &Theme) {
    let (indicator, color) = match (directory, watching) {
        (None, _) => ("○", theme.text_dim),
        (Some(_), true) => ("●", theme.watch_live),
        // Listed, but the watch failed to arm or was lost.
        (Some(_), false) => ("●", theme.watch_lost),
    };

    let path = directory
        .map(|d| d.display().to_string())
        .unwrap_or_default();

    let line = Line::from(vec![
        Span::styled(format!("{} ", indicator), Style::default().fg(color)),
        Span::styled(path, Style::default().fg(theme.text)),
    ]);

    let block = Block::default()
        .title(" Reactive File Manager ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.frame))
        .style(Style::default().bg(theme.background));

    frame.render_widget(Paragraph::new(line).block(block), area);
}
