//! Step data model for recorded algorithm traces
//!
//! A producer runs its algorithm to completion and records a [`Step`] at every
//! semantically meaningful point.  Each step carries a [`Snapshot`] of the full
//! state needed to render that moment, so the playback layer never has to
//! re-derive anything.  The finished sequence, together with the per-kind
//! [`DelayTable`], forms a [`Trace`].
//!
//! Steps are recorded through a [`StepRecorder`], which assigns ordinal
//! indices, clamps progress estimates, and enforces a step-count limit so a
//! runaway search fails loudly instead of exhausting memory.

use std::time::Duration;

/// Classification of a recorded step.
///
/// The kind selects the base replay delay (see [`DelayTable`]) and tells the
/// view which visual diff to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    /// Two elements (or candidate nodes) are being compared
    Compare,
    /// Two array positions exchanged their values
    Swap,
    /// A single value was written into place (shift, merge write, pivot drop)
    Overwrite,
    /// A quicksort pivot reached its final position
    Partition,
    /// Two sorted sub-ranges (or two forest nodes) were combined
    Merge,
    /// A short informational sub-step, e.g. "new minimum found"
    Probe,
    /// A graph node was taken from the frontier and expanded
    Visit,
    /// An examined edge was accepted (tree edge, successful relaxation)
    EdgeAccept,
    /// An examined edge was rejected (cycle, already visited, no improvement)
    EdgeReject,
    /// A backtracking placement attempt or successful placement
    Place,
    /// A backtracking removal after a dead end
    Backtrack,
    /// The search space is exhausted without a solution (terminal)
    NoSolution,
    /// The algorithm finished (terminal)
    Final,
}

impl StepKind {
    /// Number of distinct kinds, used to size the delay table.
    pub(crate) const COUNT: usize = 13;

    /// Dense index of this kind into a [`DelayTable`] slot.
    pub(crate) fn slot(self) -> usize {
        match self {
            StepKind::Compare => 0,
            StepKind::Swap => 1,
            StepKind::Overwrite => 2,
            StepKind::Partition => 3,
            StepKind::Merge => 4,
            StepKind::Probe => 5,
            StepKind::Visit => 6,
            StepKind::EdgeAccept => 7,
            StepKind::EdgeReject => 8,
            StepKind::Place => 9,
            StepKind::Backtrack => 10,
            StepKind::NoSolution => 11,
            StepKind::Final => 12,
        }
    }

    /// Whether this kind ends a trace.
    pub fn is_terminal(self) -> bool {
        matches!(self, StepKind::Final | StepKind::NoSolution)
    }
}

/// Outcome of comparing a probed element against the search target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Less,
    Greater,
    Equal,
}

/// A weighted edge between two node indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub weight: u64,
}

/// One node of a Huffman forest arena.
///
/// Leaves carry a symbol; internal nodes carry child indices into the arena.
#[derive(Debug, Clone, PartialEq)]
pub struct ForestNode {
    pub weight: u64,
    pub symbol: Option<String>,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

/// Renderable state captured at one step.
///
/// Tagged by algorithm family; every variant is self-contained so replaying
/// the snapshots in order reconstructs the algorithm's visible behavior.
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    /// Flat array state for comparison sorts
    Array {
        values: Vec<i64>,
        /// Indices currently under comparison or exchange
        focus: Vec<usize>,
        /// Active sub-range (inclusive) for recursive sorts
        region: Option<(usize, usize)>,
        /// Contiguous region (inclusive) currently known to be sorted
        sorted_region: Option<(usize, usize)>,
        /// Recursion depth of the active sub-range
        depth: usize,
    },

    /// Merge sort state: two source sub-ranges and the partially merged buffer
    ArrayMerge {
        values: Vec<i64>,
        left: (usize, usize),
        right: (usize, usize),
        buffer: Vec<i64>,
        depth: usize,
    },

    /// Binary search bracket at one probe
    SearchBracket {
        values: Vec<i64>,
        low: usize,
        high: usize,
        mid: usize,
        outcome: ProbeOutcome,
    },

    /// Linear search position at one probe
    SearchScan {
        values: Vec<i64>,
        current: usize,
        outcome: ProbeOutcome,
    },

    /// Graph search / MST state at one frontier or edge decision
    Graph {
        /// Nodes in visit order
        visited: Vec<usize>,
        /// Queue, stack, or priority-queue contents at this moment
        frontier: Vec<usize>,
        /// The edge under consideration, if any
        current_edge: Option<Edge>,
        /// Tentative distances (hop counts for BFS, weights for Dijkstra/Prim)
        dist: Vec<Option<u64>>,
        /// Edges accepted into the tree so far
        tree_edges: Vec<Edge>,
    },

    /// N-Queens board: one queen column per filled row
    Board {
        size: usize,
        queens: Vec<usize>,
        /// Cell currently being tried, (row, col)
        attempt: Option<(usize, usize)>,
    },

    /// Sudoku grid, row-major, 0 = empty
    Grid {
        cells: Vec<u8>,
        attempt: Option<(usize, usize)>,
    },

    /// Huffman forest arena plus the pair being merged
    Forest {
        nodes: Vec<ForestNode>,
        /// Arena indices of the current roots, in creation order
        roots: Vec<usize>,
        /// Arena indices of the two roots being combined
        merging: Option<(usize, usize)>,
    },
}

/// One recorded, renderable moment of an algorithm's execution.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Ordinal position in the trace, assigned by the recorder
    pub index: usize,
    pub kind: StepKind,
    /// Human-readable explanation of this moment
    pub description: String,
    pub snapshot: Snapshot,
    /// Completion estimate in `0..=1`, reported by the algorithm.
    /// Not guaranteed monotonic: backtracking estimates regress when a
    /// branch is abandoned.
    pub progress: f64,
}

/// Base replay delay per [`StepKind`], in milliseconds.
///
/// Producers supply the table alongside their steps; the playback controller
/// divides the base delay by the current speed multiplier.  Timing constants
/// are configuration, not behavior — exact cadence is non-normative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayTable {
    millis: [u64; StepKind::COUNT],
}

impl DelayTable {
    /// Create a table with the same base delay for every kind.
    pub fn uniform(millis: u64) -> Self {
        DelayTable {
            millis: [millis; StepKind::COUNT],
        }
    }

    /// Override the base delay for one kind, builder style.
    pub fn with(mut self, kind: StepKind, millis: u64) -> Self {
        self.millis[kind.slot()] = millis;
        self
    }

    /// Base delay for a step of the given kind.
    pub fn base_delay(&self, kind: StepKind) -> Duration {
        Duration::from_millis(self.millis[kind.slot()])
    }
}

impl Default for DelayTable {
    fn default() -> Self {
        DelayTable::uniform(600)
    }
}

/// A finished step sequence with its replay timing.
///
/// For a fixed input the sequence is deterministic; it is always finite, and
/// the last step's snapshot reconstructs the algorithm's final result.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub steps: Vec<Step>,
    pub delays: DelayTable,
}

impl Trace {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Records steps on behalf of a producer.
///
/// Assigns strictly increasing indices, clamps progress into `0..=1`, and
/// rejects recording beyond a configurable step limit.
#[derive(Debug)]
pub struct StepRecorder {
    steps: Vec<Step>,
    limit: usize,
}

impl StepRecorder {
    pub fn new(limit: usize) -> Self {
        StepRecorder {
            steps: Vec::new(),
            limit,
        }
    }

    /// Record one step.
    pub fn record(
        &mut self,
        kind: StepKind,
        description: String,
        snapshot: Snapshot,
        progress: f64,
    ) -> Result<(), String> {
        if self.steps.len() >= self.limit {
            return Err(format!(
                "Step limit exceeded: {} steps recorded, limit is {}",
                self.steps.len(),
                self.limit
            ));
        }

        self.steps.push(Step {
            index: self.steps.len(),
            kind,
            description,
            snapshot,
            progress: progress.clamp(0.0, 1.0),
        });
        Ok(())
    }

    /// Number of steps recorded so far.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Configured step limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Finish recording and pair the steps with their replay timing.
    pub fn into_trace(self, delays: DelayTable) -> Trace {
        Trace {
            steps: self.steps,
            delays,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_snapshot() -> Snapshot {
        Snapshot::Array {
            values: vec![1, 2],
            focus: vec![],
            region: None,
            sorted_region: None,
            depth: 0,
        }
    }

    #[test]
    fn test_recorder_assigns_increasing_indices() {
        let mut rec = StepRecorder::new(10);
        rec.record(StepKind::Compare, "a".into(), dummy_snapshot(), 0.0)
            .unwrap();
        rec.record(StepKind::Swap, "b".into(), dummy_snapshot(), 0.5)
            .unwrap();
        rec.record(StepKind::Final, "c".into(), dummy_snapshot(), 1.0)
            .unwrap();

        let trace = rec.into_trace(DelayTable::default());
        let indices: Vec<usize> = trace.steps.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_recorder_clamps_progress() {
        let mut rec = StepRecorder::new(10);
        rec.record(StepKind::Compare, "a".into(), dummy_snapshot(), -0.5)
            .unwrap();
        rec.record(StepKind::Final, "b".into(), dummy_snapshot(), 1.5)
            .unwrap();

        let trace = rec.into_trace(DelayTable::default());
        assert_eq!(trace.steps[0].progress, 0.0);
        assert_eq!(trace.steps[1].progress, 1.0);
    }

    #[test]
    fn test_recorder_enforces_limit() {
        let mut rec = StepRecorder::new(2);
        rec.record(StepKind::Compare, "a".into(), dummy_snapshot(), 0.0)
            .unwrap();
        rec.record(StepKind::Compare, "b".into(), dummy_snapshot(), 0.0)
            .unwrap();

        let result = rec.record(StepKind::Compare, "c".into(), dummy_snapshot(), 0.0);
        assert!(result.is_err());
        assert_eq!(rec.len(), 2);
    }

    #[test]
    fn test_delay_table_overrides() {
        let table = DelayTable::uniform(500).with(StepKind::Final, 1200);
        assert_eq!(table.base_delay(StepKind::Compare), Duration::from_millis(500));
        assert_eq!(table.base_delay(StepKind::Final), Duration::from_millis(1200));
    }

    #[test]
    fn test_terminal_kinds() {
        assert!(StepKind::Final.is_terminal());
        assert!(StepKind::NoSolution.is_terminal());
        assert!(!StepKind::Place.is_terminal());
    }
}
