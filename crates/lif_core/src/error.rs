//! Engine invariant failures.
//!
//! None of these are recoverable: they mean the simulation state no longer
//! describes a valid lattice and the run must stop.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The incrementally maintained count disagrees with a full recount.
    #[error("neighbor index diverged at ({x}, {y}): expected {expected}, found {actual}")]
    NeighborIndexDiverged {
        x: usize,
        y: usize,
        expected: usize,
        actual: usize,
    },

    /// Settlement or exchange was reached for a cell with no live neighbor.
    #[error("no live neighbor at ({x}, {y}) although the rule requires one")]
    NoLiveNeighbors { x: usize, y: usize },

    /// Applying a death delta would take a count below zero.
    #[error("neighbor count underflow at location {loc}")]
    NeighborCountUnderflow { loc: usize },
}

pub type Result<T> = std::result::Result<T, EngineError>;
