//! Step producers for each algorithm family
//!
//! A producer runs its algorithm synchronously to completion, recording a
//! step at every semantically meaningful point, and returns the finished
//! [`Trace`](crate::step::Trace).  Recursion is never suspended; only the
//! replay of the recorded steps is pausable, which keeps cancellation safe
//! and instantaneous.
//!
//! Producers are pure: the same input and parameters yield a byte-for-byte
//! identical step sequence.  Tie-breaks are fixed (lowest node index first,
//! leftmost column first, row-major first-empty cell, lowest weight then
//! lowest arena id), and no randomness source exists anywhere in this
//! module.
//!
//! # Producer Modules
//!
//! - [`sorting`]: bubble, selection, insertion, quicksort, merge sort
//! - [`searching`]: linear and binary search
//! - [`graph`]: BFS, DFS, Dijkstra, Prim, Kruskal
//! - [`backtracking`]: N-Queens and Sudoku
//! - [`huffman`]: greedy Huffman tree construction

pub mod backtracking;
pub mod graph;
pub mod huffman;
pub mod searching;
pub mod sorting;

use crate::input::InputError;
use std::fmt;

/// Default cap on recorded steps per trace.
///
/// Generous for every deterministic producer; only a pathological
/// backtracking input can reach it.
pub const DEFAULT_STEP_LIMIT: usize = 200_000;

/// Errors surfaced synchronously from `produce`.
///
/// A failed produce call never returns a partial trace.
#[derive(Debug, Clone, PartialEq)]
pub enum ProduceError {
    /// Malformed or unsatisfiable input
    Input(InputError),

    /// The recorder's step cap was hit mid-search
    TraceLimitExceeded { steps: usize, limit: usize },

    /// A parameter outside the producer's supported range
    BadParameter { message: String },
}

impl fmt::Display for ProduceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProduceError::Input(e) => write!(f, "Invalid input: {}", e),
            ProduceError::TraceLimitExceeded { steps, limit } => {
                write!(
                    f,
                    "Trace limit exceeded: {} steps recorded, limit is {}",
                    steps, limit
                )
            }
            ProduceError::BadParameter { message } => {
                write!(f, "Bad parameter: {}", message)
            }
        }
    }
}

impl std::error::Error for ProduceError {}

impl From<InputError> for ProduceError {
    fn from(e: InputError) -> Self {
        ProduceError::Input(e)
    }
}

/// Record one step, mapping a recorder overflow into a [`ProduceError`].
pub(crate) fn push_step(
    recorder: &mut crate::step::StepRecorder,
    kind: crate::step::StepKind,
    description: String,
    snapshot: crate::step::Snapshot,
    progress: f64,
) -> Result<(), ProduceError> {
    let result = recorder.record(kind, description, snapshot, progress);
    result.map_err(|_| ProduceError::TraceLimitExceeded {
        steps: recorder.len(),
        limit: recorder.limit(),
    })
}
