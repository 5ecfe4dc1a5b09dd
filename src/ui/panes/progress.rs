//! Progress pane: gauge fed by the current step's completion estimate

use crate::step::Step;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Gauge},
    Frame,
};

pub fn render_progress_pane(frame: &mut Frame, area: Rect, step: Option<&Step>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Progress ")
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let (ratio, label) = match step {
        Some(step) => (
            // Backtracking estimates can regress; the gauge just clamps
            step.progress.clamp(0.0, 1.0),
            format!("{:.0}%  {:?}", step.progress * 100.0, step.kind),
        ),
        None => (0.0, "waiting".to_string()),
    };

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(DEFAULT_THEME.primary))
        .ratio(ratio)
        .label(label);

    frame.render_widget(gauge, area);
}
