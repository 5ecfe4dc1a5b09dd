//! Array pane: bar rendering for sorting and searching snapshots

use crate::step::{Snapshot, Step};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render any array-family snapshot (sorting, merge buffers, search
/// brackets and scans) as one bar per element.
pub fn render_array_pane(frame: &mut Frame, area: Rect, step: &Step) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Array ")
        .border_style(Style::default().fg(DEFAULT_THEME.border_focused));

    let bar_width = (area.width.saturating_sub(14) as usize).clamp(4, 32);

    let lines = match &step.snapshot {
        Snapshot::Array {
            values,
            focus,
            region,
            sorted_region,
            depth,
        } => {
            let mut lines = bar_lines(values, bar_width, |i| {
                if focus.contains(&i) {
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD)
                } else if in_range(*sorted_region, i) {
                    Style::default().fg(DEFAULT_THEME.success)
                } else if in_range(*region, i) {
                    Style::default().fg(DEFAULT_THEME.primary)
                } else {
                    Style::default().fg(DEFAULT_THEME.fg)
                }
            });
            if let Some((lo, hi)) = region {
                lines.push(Line::from(Span::styled(
                    format!("range a[{}..={}]  depth {}", lo, hi, depth),
                    Style::default().fg(DEFAULT_THEME.comment),
                )));
            }
            lines
        }

        Snapshot::ArrayMerge {
            values,
            left,
            right,
            buffer,
            depth,
        } => {
            let mut lines = bar_lines(values, bar_width, |i| {
                if i >= left.0 && i <= left.1 {
                    Style::default().fg(DEFAULT_THEME.primary)
                } else if i >= right.0 && i <= right.1 {
                    Style::default().fg(DEFAULT_THEME.secondary)
                } else {
                    Style::default().fg(DEFAULT_THEME.comment)
                }
            });
            lines.push(Line::from(vec![
                Span::styled("buffer ", Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(
                    format!("{:?}", buffer),
                    Style::default().fg(DEFAULT_THEME.success),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                format!(
                    "merging a[{}..={}] with a[{}..={}]  depth {}",
                    left.0, left.1, right.0, right.1, depth
                ),
                Style::default().fg(DEFAULT_THEME.comment),
            )));
            lines
        }

        Snapshot::SearchBracket {
            values,
            low,
            high,
            mid,
            ..
        } => {
            let mut lines = bar_lines(values, bar_width, |i| {
                if i == *mid {
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD)
                } else if i >= *low && i <= *high {
                    Style::default().fg(DEFAULT_THEME.fg)
                } else {
                    Style::default().fg(DEFAULT_THEME.comment)
                }
            });
            lines.push(Line::from(Span::styled(
                format!("low {}  mid {}  high {}", low, mid, high),
                Style::default().fg(DEFAULT_THEME.comment),
            )));
            lines
        }

        Snapshot::SearchScan {
            values, current, ..
        } => bar_lines(values, bar_width, |i| {
            if i == *current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else if i < *current {
                Style::default().fg(DEFAULT_THEME.comment)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            }
        }),

        // Not an array-family snapshot; the app picked the wrong pane
        _ => vec![Line::from("")],
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn bar_lines<F>(values: &[i64], bar_width: usize, style_of: F) -> Vec<Line<'static>>
where
    F: Fn(usize) -> Style,
{
    let max_abs = values.iter().map(|v| v.unsigned_abs()).max().unwrap_or(1).max(1);

    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let len = ((v.unsigned_abs() * bar_width as u64 / max_abs) as usize).max(1);
            let style = style_of(i);
            Line::from(vec![
                Span::styled(
                    format!("a[{:>2}] ", i),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled("█".repeat(len), style),
                Span::styled(format!(" {}", v), style),
            ])
        })
        .collect()
}

fn in_range(range: Option<(usize, usize)>, i: usize) -> bool {
    range.is_some_and(|(lo, hi)| i >= lo && i <= hi)
}
