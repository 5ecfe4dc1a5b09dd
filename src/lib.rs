//! # Introduction
//!
//! algotty runs a classical algorithm to completion, recording a
//! [`step::Step`] at every semantically meaningful moment, then replays the
//! recorded trace under user control (play, pause, resume, reset, variable
//! speed) through a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Input text → Parser → Producer → Trace → Playback Controller → Sink (TUI)
//! ```
//!
//! 1. [`input`] — parses arrays, search targets, graph specs, Sudoku boards,
//!    and symbol weights, rejecting anything malformed before a trace exists.
//! 2. [`producer`] — simulates the chosen algorithm synchronously, recording
//!    one [`step::Step`] per comparison, swap, probe, edge decision,
//!    placement, backtrack, or merge.
//! 3. [`step`] — the trace data model: step kinds, renderable snapshots, and
//!    the per-kind replay delay table.
//! 4. [`playback`] — the cooperative scheduler: at most one run at a time,
//!    deadline-polled advances, steps emitted to the subscribed sink exactly
//!    once and in order.
//! 5. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! ## Supported algorithms
//!
//! Sorting: bubble, selection, insertion, quicksort, merge sort.
//! Searching: linear, binary.
//! Graphs: BFS, DFS, Dijkstra, Prim, Kruskal.
//! Backtracking: N-Queens, Sudoku.
//! Greedy: Huffman tree construction.

pub mod input;
pub mod playback;
pub mod producer;
pub mod step;
pub mod ui;
