//! Graph pane: node table, edge under consideration, and tree edges

use crate::step::{Snapshot, Step, StepKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_graph_pane(frame: &mut Frame, area: Rect, step: &Step) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Graph ")
        .border_style(Style::default().fg(DEFAULT_THEME.border_focused));

    let Snapshot::Graph {
        visited,
        frontier,
        current_edge,
        dist,
        tree_edges,
    } = &step.snapshot
    else {
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();

    for node in 0..dist.len() {
        let (marker, style) = if visited.contains(&node) {
            ("●", Style::default().fg(DEFAULT_THEME.success))
        } else if frontier.contains(&node) {
            ("◐", Style::default().fg(DEFAULT_THEME.secondary))
        } else {
            ("○", Style::default().fg(DEFAULT_THEME.comment))
        };

        let dist_text = match dist[node] {
            Some(d) => format!("dist {}", d),
            None => "unreached".to_string(),
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{} ", marker), style),
            Span::styled(format!("node {:<3}", node), style),
            Span::styled(dist_text, Style::default().fg(DEFAULT_THEME.comment)),
        ]));
    }

    lines.push(Line::from(""));

    if let Some(edge) = current_edge {
        let (verdict, style) = match step.kind {
            StepKind::EdgeAccept => ("accepted", Style::default().fg(DEFAULT_THEME.success)),
            StepKind::EdgeReject => ("rejected", Style::default().fg(DEFAULT_THEME.error)),
            _ => ("considering", Style::default().fg(DEFAULT_THEME.secondary)),
        };
        lines.push(Line::from(vec![
            Span::styled("edge ", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(
                format!("{}-{} (w {}) ", edge.from, edge.to, edge.weight),
                Style::default().fg(DEFAULT_THEME.fg),
            ),
            Span::styled(verdict, style.add_modifier(Modifier::BOLD)),
        ]));
    }

    if !tree_edges.is_empty() {
        let edges = tree_edges
            .iter()
            .map(|e| format!("{}-{}", e.from, e.to))
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(Line::from(vec![
            Span::styled("tree ", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(edges, Style::default().fg(DEFAULT_THEME.success)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
