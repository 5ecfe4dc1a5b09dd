//! Graph producers: BFS, DFS, Dijkstra, Prim, Kruskal
//!
//! Every frontier expansion is a `Visit` step and every edge examination is
//! an explicit `EdgeAccept` or `EdgeReject` step — the accept/reject
//! distinction is what drives edge color-coding in the view.  Graphs are
//! treated as undirected; neighbor order is fixed (lowest index first) so
//! traces are deterministic.

use super::{push_step, ProduceError, DEFAULT_STEP_LIMIT};
use crate::input::GraphInput;
use crate::step::{DelayTable, Edge, Snapshot, StepKind, StepRecorder, Trace};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

fn graph_delays() -> DelayTable {
    DelayTable::uniform(600)
        .with(StepKind::Visit, 700)
        .with(StepKind::EdgeAccept, 550)
        .with(StepKind::EdgeReject, 550)
        .with(StepKind::Final, 1200)
}

fn check_start(graph: &GraphInput, start: usize) -> Result<(), ProduceError> {
    if start >= graph.node_count {
        return Err(ProduceError::BadParameter {
            message: format!(
                "start node {} is out of bounds for {} nodes",
                start, graph.node_count
            ),
        });
    }
    Ok(())
}

/// Shorthand for the graph snapshot all five producers share.
struct GraphState {
    visited: Vec<usize>,
    frontier: Vec<usize>,
    dist: Vec<Option<u64>>,
    tree_edges: Vec<Edge>,
}

impl GraphState {
    fn new(node_count: usize) -> Self {
        GraphState {
            visited: Vec::new(),
            frontier: Vec::new(),
            dist: vec![None; node_count],
            tree_edges: Vec::new(),
        }
    }

    fn snapshot(&self, current_edge: Option<Edge>) -> Snapshot {
        Snapshot::Graph {
            visited: self.visited.clone(),
            frontier: self.frontier.clone(),
            current_edge,
            dist: self.dist.clone(),
            tree_edges: self.tree_edges.clone(),
        }
    }
}

/// Breadth-first search from `start`, recording hop counts as distances.
pub fn bfs(graph: &GraphInput, start: usize) -> Result<Trace, ProduceError> {
    check_start(graph, start)?;

    let n = graph.node_count;
    let adj = graph.adjacency();
    let mut rec = StepRecorder::new(DEFAULT_STEP_LIMIT);
    let mut state = GraphState::new(n);
    let mut seen = vec![false; n];
    let mut queue: VecDeque<usize> = VecDeque::new();

    seen[start] = true;
    state.dist[start] = Some(0);
    queue.push_back(start);
    state.frontier = vec![start];

    while let Some(u) = queue.pop_front() {
        state.visited.push(u);
        state.frontier = queue.iter().copied().collect();
        push_step(
            &mut rec,
            StepKind::Visit,
            format!("Visit node {} (hop {})", u, state.dist[u].unwrap_or(0)),
            state.snapshot(None),
            state.visited.len() as f64 / n as f64,
        )?;

        for &(v, w) in &adj[u] {
            let edge = Edge { from: u, to: v, weight: w };
            if seen[v] {
                push_step(
                    &mut rec,
                    StepKind::EdgeReject,
                    format!("Edge {}-{}: node {} already discovered", u, v, v),
                    state.snapshot(Some(edge)),
                    state.visited.len() as f64 / n as f64,
                )?;
            } else {
                seen[v] = true;
                state.dist[v] = state.dist[u].map(|d| d + 1);
                state.tree_edges.push(edge);
                queue.push_back(v);
                state.frontier = queue.iter().copied().collect();
                push_step(
                    &mut rec,
                    StepKind::EdgeAccept,
                    format!("Edge {}-{}: discover node {}", u, v, v),
                    state.snapshot(Some(edge)),
                    state.visited.len() as f64 / n as f64,
                )?;
            }
        }
    }

    push_step(
        &mut rec,
        StepKind::Final,
        format!(
            "BFS complete: {} of {} nodes reached from {}",
            state.visited.len(),
            n,
            start
        ),
        state.snapshot(None),
        1.0,
    )?;
    Ok(rec.into_trace(graph_delays()))
}

/// Depth-first search from `start`; the frontier snapshot is the current
/// recursion path.
pub fn dfs(graph: &GraphInput, start: usize) -> Result<Trace, ProduceError> {
    check_start(graph, start)?;

    let n = graph.node_count;
    let adj = graph.adjacency();
    let mut rec = StepRecorder::new(DEFAULT_STEP_LIMIT);
    let mut state = GraphState::new(n);
    let mut seen = vec![false; n];

    seen[start] = true;
    state.dist[start] = Some(0);
    dfs_rec(start, 0, &adj, &mut seen, &mut state, n, &mut rec)?;

    push_step(
        &mut rec,
        StepKind::Final,
        format!(
            "DFS complete: {} of {} nodes reached from {}",
            state.visited.len(),
            n,
            start
        ),
        state.snapshot(None),
        1.0,
    )?;
    Ok(rec.into_trace(graph_delays()))
}

fn dfs_rec(
    u: usize,
    depth: u64,
    adj: &[Vec<(usize, u64)>],
    seen: &mut [bool],
    state: &mut GraphState,
    n: usize,
    rec: &mut StepRecorder,
) -> Result<(), ProduceError> {
    state.visited.push(u);
    state.frontier.push(u);
    push_step(
        rec,
        StepKind::Visit,
        format!("Visit node {} (depth {})", u, depth),
        state.snapshot(None),
        state.visited.len() as f64 / n as f64,
    )?;

    for &(v, w) in &adj[u] {
        let edge = Edge { from: u, to: v, weight: w };
        if seen[v] {
            push_step(
                rec,
                StepKind::EdgeReject,
                format!("Edge {}-{}: node {} already visited", u, v, v),
                state.snapshot(Some(edge)),
                state.visited.len() as f64 / n as f64,
            )?;
        } else {
            seen[v] = true;
            state.dist[v] = Some(depth + 1);
            state.tree_edges.push(edge);
            push_step(
                rec,
                StepKind::EdgeAccept,
                format!("Edge {}-{}: descend into node {}", u, v, v),
                state.snapshot(Some(edge)),
                state.visited.len() as f64 / n as f64,
            )?;
            dfs_rec(v, depth + 1, adj, seen, state, n, rec)?;
        }
    }

    state.frontier.pop();
    Ok(())
}

/// Dijkstra's shortest paths from `start`.
///
/// Each edge examination records the relaxation decision: accepted when the
/// tentative distance improves, rejected otherwise.
pub fn dijkstra(graph: &GraphInput, start: usize) -> Result<Trace, ProduceError> {
    check_start(graph, start)?;

    let n = graph.node_count;
    let adj = graph.adjacency();
    let mut rec = StepRecorder::new(DEFAULT_STEP_LIMIT);
    let mut state = GraphState::new(n);
    let mut settled = vec![false; n];
    let mut parent_edge: Vec<Option<Edge>> = vec![None; n];
    let mut heap: BinaryHeap<Reverse<(u64, usize)>> = BinaryHeap::new();

    state.dist[start] = Some(0);
    heap.push(Reverse((0, start)));

    while let Some(Reverse((d, u))) = heap.pop() {
        if settled[u] {
            // Stale heap entry from an earlier relaxation
            continue;
        }
        settled[u] = true;
        state.visited.push(u);
        state.frontier = pending_nodes(&heap, &settled);
        push_step(
            &mut rec,
            StepKind::Visit,
            format!("Settle node {} at distance {}", u, d),
            state.snapshot(None),
            state.visited.len() as f64 / n as f64,
        )?;

        for &(v, w) in &adj[u] {
            let edge = Edge { from: u, to: v, weight: w };
            if settled[v] {
                push_step(
                    &mut rec,
                    StepKind::EdgeReject,
                    format!("Edge {}-{}: node {} already settled", u, v, v),
                    state.snapshot(Some(edge)),
                    state.visited.len() as f64 / n as f64,
                )?;
                continue;
            }

            let candidate = d + w;
            let improved = state.dist[v].map_or(true, |cur| candidate < cur);
            if improved {
                state.dist[v] = Some(candidate);
                parent_edge[v] = Some(edge);
                state.tree_edges = parent_edge.iter().flatten().copied().collect();
                heap.push(Reverse((candidate, v)));
                state.frontier = pending_nodes(&heap, &settled);
                push_step(
                    &mut rec,
                    StepKind::EdgeAccept,
                    format!("Edge {}-{}: relax node {} to distance {}", u, v, v, candidate),
                    state.snapshot(Some(edge)),
                    state.visited.len() as f64 / n as f64,
                )?;
            } else {
                push_step(
                    &mut rec,
                    StepKind::EdgeReject,
                    format!(
                        "Edge {}-{}: no improvement over distance {}",
                        u,
                        v,
                        state.dist[v].unwrap_or(0)
                    ),
                    state.snapshot(Some(edge)),
                    state.visited.len() as f64 / n as f64,
                )?;
            }
        }
    }

    push_step(
        &mut rec,
        StepKind::Final,
        format!("Shortest paths from {} computed", start),
        state.snapshot(None),
        1.0,
    )?;
    Ok(rec.into_trace(graph_delays()))
}

/// Prim's minimum spanning tree grown from `start`.
pub fn prim(graph: &GraphInput, start: usize) -> Result<Trace, ProduceError> {
    check_start(graph, start)?;

    let n = graph.node_count;
    let adj = graph.adjacency();
    let mut rec = StepRecorder::new(DEFAULT_STEP_LIMIT);
    let mut state = GraphState::new(n);
    let mut in_tree = vec![false; n];
    let mut heap: BinaryHeap<Reverse<(u64, usize, usize)>> = BinaryHeap::new();

    in_tree[start] = true;
    state.dist[start] = Some(0);
    state.visited.push(start);
    push_step(
        &mut rec,
        StepKind::Visit,
        format!("Grow tree from node {}", start),
        state.snapshot(None),
        1.0 / n as f64,
    )?;
    for &(v, w) in &adj[start] {
        heap.push(Reverse((w, start, v)));
    }

    while let Some(Reverse((w, u, v))) = heap.pop() {
        let edge = Edge { from: u, to: v, weight: w };
        state.frontier = pending_prim(&heap, &in_tree);

        if in_tree[v] {
            push_step(
                &mut rec,
                StepKind::EdgeReject,
                format!("Edge {}-{} (weight {}): node {} already in tree", u, v, w, v),
                state.snapshot(Some(edge)),
                state.visited.len() as f64 / n as f64,
            )?;
            continue;
        }

        in_tree[v] = true;
        state.dist[v] = Some(w);
        state.tree_edges.push(edge);
        state.visited.push(v);
        push_step(
            &mut rec,
            StepKind::EdgeAccept,
            format!("Edge {}-{} (weight {}): attach node {}", u, v, w, v),
            state.snapshot(Some(edge)),
            state.visited.len() as f64 / n as f64,
        )?;

        for &(next, nw) in &adj[v] {
            if !in_tree[next] {
                heap.push(Reverse((nw, v, next)));
            }
        }
    }

    let total: u64 = state.tree_edges.iter().map(|e| e.weight).sum();
    push_step(
        &mut rec,
        StepKind::Final,
        format!(
            "Minimum spanning tree complete: {} edges, total weight {}",
            state.tree_edges.len(),
            total
        ),
        state.snapshot(None),
        1.0,
    )?;
    Ok(rec.into_trace(graph_delays()))
}

/// Kruskal's minimum spanning tree: edges by ascending weight, cycles
/// rejected through union-find.
pub fn kruskal(graph: &GraphInput) -> Result<Trace, ProduceError> {
    let n = graph.node_count;
    let mut rec = StepRecorder::new(DEFAULT_STEP_LIMIT);
    let mut state = GraphState::new(n);
    let mut uf = UnionFind::new(n);

    let mut edges = graph.edges.clone();
    edges.sort_unstable_by_key(|e| (e.weight, e.from, e.to));
    let m = edges.len();

    for (i, edge) in edges.iter().enumerate() {
        if uf.union(edge.from, edge.to) {
            state.tree_edges.push(*edge);
            for node in [edge.from, edge.to] {
                if !state.visited.contains(&node) {
                    state.visited.push(node);
                }
            }
            push_step(
                &mut rec,
                StepKind::EdgeAccept,
                format!(
                    "Edge {}-{} (weight {}): joins two components",
                    edge.from, edge.to, edge.weight
                ),
                state.snapshot(Some(*edge)),
                (i + 1) as f64 / m as f64,
            )?;
        } else {
            push_step(
                &mut rec,
                StepKind::EdgeReject,
                format!(
                    "Edge {}-{} (weight {}): would form a cycle",
                    edge.from, edge.to, edge.weight
                ),
                state.snapshot(Some(*edge)),
                (i + 1) as f64 / m as f64,
            )?;
        }

        if state.tree_edges.len() == n - 1 {
            break;
        }
    }

    let total: u64 = state.tree_edges.iter().map(|e| e.weight).sum();
    let spanning = state.tree_edges.len() == n - 1;
    push_step(
        &mut rec,
        StepKind::Final,
        if spanning {
            format!(
                "Minimum spanning tree complete: {} edges, total weight {}",
                state.tree_edges.len(),
                total
            )
        } else {
            format!(
                "Graph is disconnected: spanning forest of {} edges, total weight {}",
                state.tree_edges.len(),
                total
            )
        },
        state.snapshot(None),
        1.0,
    )?;
    Ok(rec.into_trace(graph_delays()))
}

/// Nodes still pending in a Dijkstra heap, sorted for stable display.
fn pending_nodes(heap: &BinaryHeap<Reverse<(u64, usize)>>, settled: &[bool]) -> Vec<usize> {
    let mut nodes: Vec<usize> = heap
        .iter()
        .map(|Reverse((_, v))| *v)
        .filter(|v| !settled[*v])
        .collect();
    nodes.sort_unstable();
    nodes.dedup();
    nodes
}

/// Nodes reachable through a Prim heap edge, sorted for stable display.
fn pending_prim(heap: &BinaryHeap<Reverse<(u64, usize, usize)>>, in_tree: &[bool]) -> Vec<usize> {
    let mut nodes: Vec<usize> = heap
        .iter()
        .map(|Reverse((_, _, v))| *v)
        .filter(|v| !in_tree[*v])
        .collect();
    nodes.sort_unstable();
    nodes.dedup();
    nodes
}

/// Union-find with path halving and union by rank.
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        UnionFind {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Returns false if both nodes were already in the same component.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse_graph;

    fn diamond() -> GraphInput {
        // 0-1 (4), 0-2 (1), 2-1 (2), 1-3 (1), 3-4 (3)
        parse_graph("5\n0 1 4\n0 2 1\n2 1 2\n1 3 1\n3 4 3\n").unwrap()
    }

    fn final_snapshot(trace: &Trace) -> (Vec<usize>, Vec<Option<u64>>, Vec<Edge>) {
        match &trace.steps.last().unwrap().snapshot {
            Snapshot::Graph {
                visited,
                dist,
                tree_edges,
                ..
            } => (visited.clone(), dist.clone(), tree_edges.clone()),
            other => panic!("Expected graph snapshot, got {:?}", other),
        }
    }

    #[test]
    fn test_bfs_visits_in_hop_order() {
        let trace = bfs(&diamond(), 0).unwrap();
        let (visited, dist, _) = final_snapshot(&trace);
        assert_eq!(visited, vec![0, 1, 2, 3, 4]);
        assert_eq!(dist[4], Some(3));
        assert_eq!(trace.steps[0].kind, StepKind::Visit);
    }

    #[test]
    fn test_dfs_descends_lowest_index_first() {
        let trace = dfs(&diamond(), 0).unwrap();
        let (visited, _, _) = final_snapshot(&trace);
        assert_eq!(visited, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_dijkstra_distances() {
        let trace = dijkstra(&diamond(), 0).unwrap();
        let (_, dist, _) = final_snapshot(&trace);
        // 0 -> 2 (1) -> 1 (3) -> 3 (4) -> 4 (7)
        assert_eq!(dist, vec![Some(0), Some(3), Some(1), Some(4), Some(7)]);
    }

    #[test]
    fn test_dijkstra_records_rejections() {
        let trace = dijkstra(&diamond(), 0).unwrap();
        assert!(trace.steps.iter().any(|s| s.kind == StepKind::EdgeReject));
    }

    #[test]
    fn test_prim_mst_weight() {
        let trace = prim(&diamond(), 0).unwrap();
        let (_, _, tree) = final_snapshot(&trace);
        let total: u64 = tree.iter().map(|e| e.weight).sum();
        assert_eq!(tree.len(), 4);
        assert_eq!(total, 7); // 0-2 (1), 2-1 (2), 1-3 (1), 3-4 (3)
    }

    #[test]
    fn test_kruskal_matches_prim_weight() {
        let trace = kruskal(&diamond()).unwrap();
        let (_, _, tree) = final_snapshot(&trace);
        let total: u64 = tree.iter().map(|e| e.weight).sum();
        assert_eq!(total, 7);
    }

    #[test]
    fn test_kruskal_reports_disconnected_graph() {
        let graph = parse_graph("4\n0 1\n2 3\n").unwrap();
        let trace = kruskal(&graph).unwrap();
        assert!(trace
            .steps
            .last()
            .unwrap()
            .description
            .contains("disconnected"));
    }

    #[test]
    fn test_bfs_rejects_bad_start() {
        assert!(matches!(
            bfs(&diamond(), 9),
            Err(ProduceError::BadParameter { .. })
        ));
    }

    #[test]
    fn test_graph_traces_are_deterministic() {
        let g = diamond();
        assert_eq!(bfs(&g, 0).unwrap(), bfs(&g, 0).unwrap());
        assert_eq!(dijkstra(&g, 0).unwrap(), dijkstra(&g, 0).unwrap());
        assert_eq!(kruskal(&g).unwrap(), kruskal(&g).unwrap());
    }
}
