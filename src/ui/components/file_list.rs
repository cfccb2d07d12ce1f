use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use crate::app::BrowserView;
use crate::types::EntryKind;
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, view: &mut BrowserView, theme: &Theme) {
    let block = Block::default()
        .title(" Files ")
        .borders(Borders::ALL)
        .style(Style::default().fg(theme.text).bg(theme.background))
        .border_style(Style::default().fg(theme.frame_dim));

    if view.directory.is_none() {
        let hint = Paragraph::new("No folder selected. Press o to choose one.")
            .style(Style::default().fg(theme.text_dim))
            .block(block);
        frame.render_widget(hint, area);
        return;
    }

    if view.entries.is_empty() {
        let hint = Paragraph::new("(empty)")
            .style(Style::default().fg(theme.text_dim))
            .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let items: Vec<ListItem> = view.entries.iter().map(|entry| {
        match entry.kind() {
            EntryKind::Directory => ListItem::new(format!("{}/", entry.name()))
                .style(Style::default().fg(theme.directory).add_modifier(Modifier::BOLD)),
            EntryKind::File => ListItem::new(entry.name().to_string())
                .style(Style::default().fg(theme.text)),
        }
    }).collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(theme.highlight)
                .add_modifier(Modifier::BOLD)
        )
        .highlight_symbol("▎");

    frame.render_stateful_widget(list, area, &mut view.list_state);
}
