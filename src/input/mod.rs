//! Input parsing for algorithm visualizations
//!
//! This module transforms plain text into validated algorithm inputs:
//! - [`array`]: comma/whitespace-separated integer lists and search targets
//! - [`graph`]: node-count header plus `u v w` edge lines
//! - [`board`]: 81-character Sudoku boards with a contradiction check
//!
//! Parsing never panics and never produces partial values: every failure is
//! an [`InputError`] carrying the offending position, and a producer is only
//! ever handed fully validated input.

pub mod array;
pub mod board;
pub mod graph;

pub use array::{parse_array, parse_target, parse_weights, VALUE_MAX, VALUE_MIN};
pub use board::parse_board;
pub use graph::{parse_graph, GraphInput};

use std::fmt;

/// Errors produced while parsing visualization input.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// The input contained no entries at all
    Empty,

    /// An entry could not be parsed as a number
    BadEntry {
        text: String,
        /// 1-based position of the entry within the list
        position: usize,
    },

    /// A value falls outside the range the views can display
    ValueOutOfRange {
        value: i64,
        position: usize,
    },

    /// The search target falls outside the declared value range
    TargetOutOfRange {
        target: i64,
    },

    /// A malformed line in a graph specification
    BadEdgeLine {
        line: usize,
        message: String,
    },

    /// An edge endpoint references a node index that does not exist
    NodeOutOfBounds {
        line: usize,
        node: usize,
        count: usize,
    },

    /// A structurally invalid board (wrong length, bad character)
    BadBoard {
        message: String,
    },

    /// The board's givens contradict each other before any search begins
    Contradiction {
        row: usize,
        col: usize,
        value: u8,
    },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Empty => {
                write!(f, "Input is empty")
            }
            InputError::BadEntry { text, position } => {
                write!(f, "Entry {} ('{}') is not a valid integer", position, text)
            }
            InputError::ValueOutOfRange { value, position } => {
                write!(
                    f,
                    "Entry {} ({}) is outside the displayable range {}..={}",
                    position,
                    value,
                    array::VALUE_MIN,
                    array::VALUE_MAX
                )
            }
            InputError::TargetOutOfRange { target } => {
                write!(
                    f,
                    "Target {} is outside the declared range {}..={}",
                    target,
                    array::VALUE_MIN,
                    array::VALUE_MAX
                )
            }
            InputError::BadEdgeLine { line, message } => {
                write!(f, "Bad edge on line {}: {}", line, message)
            }
            InputError::NodeOutOfBounds { line, node, count } => {
                write!(
                    f,
                    "Node {} on line {} is out of bounds for {} nodes",
                    node, line, count
                )
            }
            InputError::BadBoard { message } => {
                write!(f, "Bad board: {}", message)
            }
            InputError::Contradiction { row, col, value } => {
                write!(
                    f,
                    "Board givens contradict: {} at row {}, column {} conflicts with another given",
                    value,
                    row + 1,
                    col + 1
                )
            }
        }
    }
}

impl std::error::Error for InputError {}
