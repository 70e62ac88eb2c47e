use crate::data::event::GenerationEvent;
use crate::data::stasis::StasisSet;
use serde::{Deserialize, Serialize};
use std::fmt;

const LINEAGE_LETTERS: &[u8; 52] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Identity shared by a de-novo-born cell and all of its descendants.
///
/// Issued once per birth from a counter owned by the simulation; never reused.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct LineageId(pub u64);

impl LineageId {
    /// First identifier handed out by a fresh simulation.
    pub const FIRST: Self = Self(1);

    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }

    /// Shifts a locally numbered id onto a global base.
    #[inline]
    pub fn offset(self, base: u64) -> Self {
        Self(self.0 + base)
    }

    /// Single-character tag used by terminal views.
    pub fn letter(self) -> char {
        LINEAGE_LETTERS[(self.0 % 52) as usize] as char
    }
}

impl fmt::Display for LineageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// State of one lattice location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty { stasis: StasisSet },
    Alive { stasis: StasisSet, lineage: LineageId },
}

impl Default for Cell {
    fn default() -> Self {
        Cell::empty()
    }
}

impl Cell {
    /// An empty cell that is stable under every neighbor count.
    pub const fn empty() -> Self {
        Cell::Empty {
            stasis: StasisSet::FULL,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        matches!(self, Cell::Alive { .. })
    }

    #[inline]
    pub fn stasis(&self) -> StasisSet {
        match *self {
            Cell::Empty { stasis } | Cell::Alive { stasis, .. } => stasis,
        }
    }

    #[inline]
    pub fn lineage(&self) -> Option<LineageId> {
        match *self {
            Cell::Alive { lineage, .. } => Some(lineage),
            Cell::Empty { .. } => None,
        }
    }
}

/// Everything a renderer needs about one location.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellView {
    pub alive: bool,
    pub stasis: StasisSet,
    pub lineage: Option<LineageId>,
    pub event: GenerationEvent,
}

impl CellView {
    pub fn new(cell: &Cell, event: GenerationEvent) -> Self {
        Self {
            alive: cell.is_alive(),
            stasis: cell.stasis(),
            lineage: cell.lineage(),
            event,
        }
    }
}
