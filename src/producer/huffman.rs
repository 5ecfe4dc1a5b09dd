//! Huffman tree construction producer
//!
//! Greedy bottom-up merge: repeatedly combine the two lightest roots until
//! one tree remains.  Every snapshot carries the whole forest arena, so a
//! renderer can show the partially built tree without re-deriving it.
//! Ties break on the lower arena id, which makes the trace deterministic.

use super::{push_step, ProduceError, DEFAULT_STEP_LIMIT};
use crate::input::InputError;
use crate::step::{DelayTable, ForestNode, Snapshot, StepKind, StepRecorder, Trace};
use rustc_hash::FxHashMap;

fn huffman_delays() -> DelayTable {
    DelayTable::uniform(600)
        .with(StepKind::Compare, 500)
        .with(StepKind::Merge, 800)
        .with(StepKind::Final, 1200)
}

/// Build a Huffman tree from symbol weights.
pub fn huffman(weights: &[(String, u64)]) -> Result<Trace, ProduceError> {
    if weights.is_empty() {
        return Err(ProduceError::Input(InputError::Empty));
    }
    if weights.len() < 2 {
        return Err(ProduceError::BadParameter {
            message: "Huffman construction needs at least two symbols".to_string(),
        });
    }

    let mut rec = StepRecorder::new(DEFAULT_STEP_LIMIT);

    let mut nodes: Vec<ForestNode> = weights
        .iter()
        .map(|(symbol, weight)| ForestNode {
            weight: *weight,
            symbol: Some(symbol.clone()),
            left: None,
            right: None,
        })
        .collect();
    let mut roots: Vec<usize> = (0..nodes.len()).collect();

    let total_merges = weights.len() - 1;
    let mut merges = 0usize;

    while roots.len() > 1 {
        // Two lightest roots, ties broken by lower arena id
        let (a, b) = lightest_pair(&nodes, &roots);

        push_step(
            &mut rec,
            StepKind::Compare,
            format!(
                "Select lightest trees: {} (weight {}) and {} (weight {})",
                node_name(&nodes, a),
                nodes[a].weight,
                node_name(&nodes, b),
                nodes[b].weight
            ),
            Snapshot::Forest {
                nodes: nodes.clone(),
                roots: roots.clone(),
                merging: Some((a, b)),
            },
            merges as f64 / total_merges as f64,
        )?;

        let merged = ForestNode {
            weight: nodes[a].weight + nodes[b].weight,
            symbol: None,
            left: Some(a),
            right: Some(b),
        };
        let merged_id = nodes.len();
        nodes.push(merged);
        roots.retain(|&r| r != a && r != b);
        roots.push(merged_id);
        merges += 1;

        push_step(
            &mut rec,
            StepKind::Merge,
            format!(
                "Merge into internal node of weight {}",
                nodes[merged_id].weight
            ),
            Snapshot::Forest {
                nodes: nodes.clone(),
                roots: roots.clone(),
                merging: None,
            },
            merges as f64 / total_merges as f64,
        )?;
    }

    let root = roots[0];
    let codes = assign_codes(&nodes, root);
    let mut code_list: Vec<(String, String)> = codes.into_iter().collect();
    code_list.sort();
    let summary = code_list
        .iter()
        .map(|(symbol, code)| format!("{}={}", symbol, code))
        .collect::<Vec<_>>()
        .join(", ");

    push_step(
        &mut rec,
        StepKind::Final,
        format!("Huffman tree complete: {}", summary),
        Snapshot::Forest {
            nodes: nodes.clone(),
            roots: roots.clone(),
            merging: None,
        },
        1.0,
    )?;
    Ok(rec.into_trace(huffman_delays()))
}

fn lightest_pair(nodes: &[ForestNode], roots: &[usize]) -> (usize, usize) {
    let mut sorted: Vec<usize> = roots.to_vec();
    sorted.sort_unstable_by_key(|&r| (nodes[r].weight, r));
    (sorted[0], sorted[1])
}

fn node_name(nodes: &[ForestNode], id: usize) -> String {
    match &nodes[id].symbol {
        Some(symbol) => format!("'{}'", symbol),
        None => format!("node #{}", id),
    }
}

/// Walk the finished tree assigning 0 to left edges and 1 to right edges.
fn assign_codes(nodes: &[ForestNode], root: usize) -> FxHashMap<String, String> {
    let mut codes = FxHashMap::default();
    let mut stack: Vec<(usize, String)> = vec![(root, String::new())];

    while let Some((id, prefix)) = stack.pop() {
        let node = &nodes[id];
        match (&node.symbol, node.left, node.right) {
            (Some(symbol), _, _) => {
                codes.insert(symbol.clone(), prefix);
            }
            (None, Some(left), Some(right)) => {
                stack.push((left, format!("{}0", prefix)));
                stack.push((right, format!("{}1", prefix)));
            }
            _ => {}
        }
    }

    codes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights(pairs: &[(&str, u64)]) -> Vec<(String, u64)> {
        pairs.iter().map(|(s, w)| (s.to_string(), *w)).collect()
    }

    #[test]
    fn test_huffman_merges_lightest_first() {
        let trace = huffman(&weights(&[("a", 5), ("b", 9), ("c", 12), ("d", 13)])).unwrap();

        // First selection must pick a (5) and b (9)
        assert!(trace.steps[0].description.contains("'a'"));
        assert!(trace.steps[0].description.contains("'b'"));
        assert_eq!(trace.steps[1].kind, StepKind::Merge);
    }

    #[test]
    fn test_huffman_root_weight_is_total() {
        let input = weights(&[("a", 5), ("b", 9), ("c", 12), ("d", 13), ("e", 16), ("f", 45)]);
        let trace = huffman(&input).unwrap();

        match &trace.steps.last().unwrap().snapshot {
            Snapshot::Forest { nodes, roots, .. } => {
                assert_eq!(roots.len(), 1);
                assert_eq!(nodes[roots[0]].weight, 100);
            }
            other => panic!("Expected forest snapshot, got {:?}", other),
        }
    }

    #[test]
    fn test_huffman_final_lists_codes() {
        let trace = huffman(&weights(&[("a", 1), ("b", 2)])).unwrap();
        let last = trace.steps.last().unwrap();
        assert_eq!(last.kind, StepKind::Final);
        assert!(last.description.contains("a="));
        assert!(last.description.contains("b="));
    }

    #[test]
    fn test_huffman_is_deterministic() {
        let input = weights(&[("x", 7), ("y", 7), ("z", 7)]);
        assert_eq!(huffman(&input).unwrap(), huffman(&input).unwrap());
    }

    #[test]
    fn test_huffman_rejects_single_symbol() {
        assert!(matches!(
            huffman(&weights(&[("a", 1)])),
            Err(ProduceError::BadParameter { .. })
        ));
    }
}
