pub mod components;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
};

use crate::app::{BrowserView, InputMode};
use theme::Theme;

pub fn render(frame: &mut Frame, view: &mut BrowserView, mode: &InputMode, theme: &Theme, watching: bool) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme.background)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    components::path_bar::render(frame, chunks[0], view.directory.as_deref(), watching, theme);
    components::file_list::render(frame, chunks[1], view, theme);
    components::status_bar::render(frame, chunks[2], view, theme);

    if let InputMode::Prompt(input) = mode {
        components::dialog::render_prompt(frame, area, input, theme);
    }

    if let Some(error) = view.errors.front() {
        components::dialog::render_error(frame, area, error, view.errors.len(), theme);
    }
}

// Helper for centering modal
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
