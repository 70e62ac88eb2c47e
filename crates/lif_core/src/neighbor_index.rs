use crate::error::{EngineError, Result};
use crate::grid::Grid;
use crate::topology::Topology;

/// A liveness flip at `loc`: `+1` for a birth or settlement, `-1` for a death.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NeighborDelta {
    pub loc: usize,
    pub change: i8,
}

impl NeighborDelta {
    pub fn born(loc: usize) -> Self {
        Self { loc, change: 1 }
    }

    pub fn died(loc: usize) -> Self {
        Self { loc, change: -1 }
    }
}

/// Live-neighbor count of every location.
///
/// At the start of each generation `count_at(loc)` equals the number of alive
/// cells among `topology.neighbors(loc)`. A generation never mutates the index
/// it reads from: deltas are folded into a copy, which becomes the next
/// generation's index once every cell has been evaluated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NeighborIndex {
    counts: Vec<u16>,
}

impl NeighborIndex {
    /// Index of an all-empty lattice.
    pub fn new(len: usize) -> Self {
        Self {
            counts: vec![0; len],
        }
    }

    /// Brute-force recount from the grid.
    pub fn rebuild(grid: &Grid, topology: &Topology) -> Self {
        let counts = (0..topology.len())
            .map(|loc| {
                topology
                    .neighbors(loc)
                    .iter()
                    .filter(|&&n| grid.is_alive(n))
                    .count() as u16
            })
            .collect();
        Self { counts }
    }

    #[inline]
    pub fn count_at(&self, loc: usize) -> usize {
        self.counts[loc] as usize
    }

    pub fn counts(&self) -> &[u16] {
        &self.counts
    }

    /// Alive neighbors of `loc` in `grid`, with multiplicity.
    pub fn live_neighbors(&self, loc: usize, grid: &Grid, topology: &Topology) -> Vec<usize> {
        topology
            .neighbors(loc)
            .iter()
            .copied()
            .filter(|&n| grid.is_alive(n))
            .collect()
    }

    /// Builds the next generation's index from this one.
    pub fn apply(&self, deltas: &[NeighborDelta], topology: &Topology) -> Result<Self> {
        let mut next = self.clone();
        next.apply_in_place(deltas, topology)?;
        Ok(next)
    }

    /// Folds deltas into this index.
    ///
    /// Each delta shifts the count of every location that has `delta.loc` in
    /// its neighborhood. Neighborhoods are symmetric, so those are exactly the
    /// entries of `topology.neighbors(delta.loc)`. On error the counts are
    /// left partially updated.
    pub fn apply_in_place(&mut self, deltas: &[NeighborDelta], topology: &Topology) -> Result<()> {
        for delta in deltas {
            for &n in topology.neighbors(delta.loc) {
                let slot = &mut self.counts[n];
                *slot = if delta.change >= 0 {
                    slot.saturating_add(delta.change as u16)
                } else {
                    slot.checked_sub(delta.change.unsigned_abs() as u16)
                        .ok_or(EngineError::NeighborCountUnderflow { loc: n })?
                };
            }
        }
        Ok(())
    }

    /// Compares against a full recount and reports the first divergence.
    pub fn verify(&self, grid: &Grid, topology: &Topology) -> Result<()> {
        let expected = Self::rebuild(grid, topology);
        match self
            .counts
            .iter()
            .zip(&expected.counts)
            .position(|(a, e)| a != e)
        {
            Some(loc) => {
                let (x, y) = topology.coords(loc);
                Err(EngineError::NeighborIndexDiverged {
                    x,
                    y,
                    expected: expected.counts[loc] as usize,
                    actual: self.counts[loc] as usize,
                })
            }
            None => Ok(()),
        }
    }
}
