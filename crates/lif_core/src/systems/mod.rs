//! Per-generation systems: the cell transition rule and the statistics pass.

pub mod recombination;
pub mod stats;
pub mod transition;
