//! Forest pane: Huffman construction state

use crate::step::{ForestNode, Snapshot, Step};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_forest_pane(frame: &mut Frame, area: Rect, step: &Step) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Forest ")
        .border_style(Style::default().fg(DEFAULT_THEME.border_focused));

    let Snapshot::Forest {
        nodes,
        roots,
        merging,
    } = &step.snapshot
    else {
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    };

    let mut lines: Vec<Line> = roots
        .iter()
        .map(|&root| {
            let selected = merging.is_some_and(|(a, b)| root == a || root == b);
            let style = if selected {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };

            Line::from(vec![
                Span::styled(
                    format!("w={:<4} ", nodes[root].weight),
                    Style::default().fg(DEFAULT_THEME.primary),
                ),
                Span::styled(leaf_symbols(nodes, root), style),
            ])
        })
        .collect();

    if let Some((a, b)) = merging {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "merging w={} and w={}",
                nodes[*a].weight, nodes[*b].weight
            ),
            Style::default().fg(DEFAULT_THEME.secondary),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Leaf symbols contained in the subtree rooted at `root`, left to right.
fn leaf_symbols(nodes: &[ForestNode], root: usize) -> String {
    let mut symbols = Vec::new();
    let mut stack = vec![root];

    while let Some(id) = stack.pop() {
        let node = &nodes[id];
        if let Some(symbol) = &node.symbol {
            symbols.push(symbol.clone());
        }
        // Right pushed first so left pops first
        if let Some(right) = node.right {
            stack.push(right);
        }
        if let Some(left) = node.left {
            stack.push(left);
        }
    }

    symbols.join(" ")
}
