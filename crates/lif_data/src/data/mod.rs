//! Core data structures for the Lif simulation.

pub mod cell;
pub mod event;
pub mod history;
pub mod stasis;
pub mod stats;
