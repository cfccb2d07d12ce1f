use ratatui::{
    layout::Rect,
    style::Style,
    widgets::Paragraph,
    Frame,
};
use crate::app::BrowserView;
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, view: &BrowserView, theme: &Theme) {
    let dirs = view.entries.iter().filter(|e| e.is_dir()).count();
    let files = view.entries.len() - dirs;
    let updated = view
        .last_update
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());

    let status_text = format!(
        "  {} dirs  {} files  |  Updated: {} (#{})  |  Theme: {} (t)  |  Enter: open  Bksp: up  o: go to  r: refresh  q: quit",
        dirs, files, updated, view.updates, theme.variant.name()
    );

    let p = Paragraph::new(status_text)
        .style(Style::default().fg(theme.text).bg(theme.frame_dim));

    frame.render_widget(p, area);
}
