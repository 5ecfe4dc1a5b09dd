//! Narration pane: scrolling log of step descriptions

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the step narration log.
///
/// A `scroll` of `usize::MAX` means "stick to the bottom"; any other value
/// is clamped to the scrollable range.
pub fn render_log_pane(frame: &mut Frame, area: Rect, log: &[String], scroll: &mut usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Steps ")
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let visible = area.height.saturating_sub(2) as usize;
    let max_scroll = log.len().saturating_sub(visible);
    if *scroll > max_scroll {
        *scroll = max_scroll;
    }

    let lines: Vec<Line> = log
        .iter()
        .skip(*scroll)
        .take(visible)
        .map(|entry| Line::styled(entry.clone(), Style::default().fg(DEFAULT_THEME.fg)))
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
