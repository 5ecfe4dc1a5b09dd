//! Graph specification parsing
//!
//! Format: a node-count header, then one edge per line as `u v` or `u v w`
//! (weight defaults to 1).  Blank lines and `#` comment lines are skipped.
//!
//! ```text
//! 5
//! 0 1 4
//! 0 2 1
//! 2 1 2
//! 1 3 1
//! 3 4 3
//! ```

use super::InputError;
use crate::step::Edge;
use rustc_hash::FxHashSet;

/// A validated graph: a node count and an edge list.
///
/// Interpretation (directed vs. undirected) is up to the consuming producer;
/// the parser only validates structure and bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphInput {
    pub node_count: usize,
    pub edges: Vec<Edge>,
}

/// Parse a graph specification.
pub fn parse_graph(text: &str) -> Result<GraphInput, InputError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'));

    let (header_line, header) = lines.next().ok_or(InputError::Empty)?;

    let node_count = header
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| InputError::BadEdgeLine {
            line: header_line,
            message: format!("expected a positive node count, got '{}'", header),
        })?;

    let mut edges = Vec::new();
    let mut seen: FxHashSet<(usize, usize)> = FxHashSet::default();

    for (line, content) in lines {
        let fields: Vec<&str> = content.split_whitespace().collect();
        if fields.len() < 2 || fields.len() > 3 {
            return Err(InputError::BadEdgeLine {
                line,
                message: format!("expected 'u v' or 'u v w', got '{}'", content),
            });
        }

        let from = parse_node(fields[0], line, node_count)?;
        let to = parse_node(fields[1], line, node_count)?;

        if from == to {
            return Err(InputError::BadEdgeLine {
                line,
                message: format!("self-loop on node {}", from),
            });
        }

        if !seen.insert((from.min(to), from.max(to))) {
            return Err(InputError::BadEdgeLine {
                line,
                message: format!("duplicate edge {} {}", from, to),
            });
        }

        let weight = match fields.get(2) {
            Some(w) => w.parse::<u64>().map_err(|_| InputError::BadEdgeLine {
                line,
                message: format!("'{}' is not a valid weight", w),
            })?,
            None => 1,
        };

        edges.push(Edge { from, to, weight });
    }

    if edges.is_empty() {
        return Err(InputError::Empty);
    }

    Ok(GraphInput { node_count, edges })
}

fn parse_node(text: &str, line: usize, count: usize) -> Result<usize, InputError> {
    let node = text.parse::<usize>().map_err(|_| InputError::BadEdgeLine {
        line,
        message: format!("'{}' is not a valid node index", text),
    })?;

    if node >= count {
        return Err(InputError::NodeOutOfBounds { line, node, count });
    }

    Ok(node)
}

impl GraphInput {
    /// Adjacency lists with neighbors sorted by node index, treating every
    /// edge as undirected.  The fixed ordering is what makes traversal
    /// traces deterministic.
    pub fn adjacency(&self) -> Vec<Vec<(usize, u64)>> {
        let mut adj: Vec<Vec<(usize, u64)>> = vec![Vec::new(); self.node_count];
        for e in &self.edges {
            adj[e.from].push((e.to, e.weight));
            adj[e.to].push((e.from, e.weight));
        }
        for neighbors in &mut adj {
            neighbors.sort_unstable();
        }
        adj
    }
}
