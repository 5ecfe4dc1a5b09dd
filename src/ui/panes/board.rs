//! Board pane: N-Queens and Sudoku grids

use crate::step::{Snapshot, Step};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_board_pane(frame: &mut Frame, area: Rect, step: &Step) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Board ")
        .border_style(Style::default().fg(DEFAULT_THEME.border_focused));

    let lines = match &step.snapshot {
        Snapshot::Board {
            size,
            queens,
            attempt,
        } => queens_lines(*size, queens, *attempt),
        Snapshot::Grid { cells, attempt } => grid_lines(cells, *attempt),
        _ => vec![Line::from("")],
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn queens_lines(
    size: usize,
    queens: &[usize],
    attempt: Option<(usize, usize)>,
) -> Vec<Line<'static>> {
    (0..size)
        .map(|row| {
            let spans: Vec<Span> = (0..size)
                .map(|col| {
                    if queens.get(row) == Some(&col) {
                        Span::styled(
                            "♛ ",
                            Style::default()
                                .fg(DEFAULT_THEME.success)
                                .add_modifier(Modifier::BOLD),
                        )
                    } else if attempt == Some((row, col)) {
                        Span::styled(
                            "? ",
                            Style::default()
                                .fg(DEFAULT_THEME.secondary)
                                .add_modifier(Modifier::BOLD),
                        )
                    } else {
                        Span::styled("· ", Style::default().fg(DEFAULT_THEME.comment))
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn grid_lines(cells: &[u8], attempt: Option<(usize, usize)>) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for row in 0..9 {
        if row > 0 && row % 3 == 0 {
            lines.push(Line::from(Span::styled(
                "──────┼───────┼──────",
                Style::default().fg(DEFAULT_THEME.comment),
            )));
        }

        let mut spans: Vec<Span> = Vec::new();
        for col in 0..9 {
            if col > 0 && col % 3 == 0 {
                spans.push(Span::styled(
                    "│ ",
                    Style::default().fg(DEFAULT_THEME.comment),
                ));
            }

            let value = cells[row * 9 + col];
            let text = if value == 0 {
                "· ".to_string()
            } else {
                format!("{} ", value)
            };

            let style = if attempt == Some((row, col)) {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else if value == 0 {
                Style::default().fg(DEFAULT_THEME.comment)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            spans.push(Span::styled(text, style));
        }
        lines.push(Line::from(spans));
    }

    lines
}
