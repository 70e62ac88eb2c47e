//! # Lif Core
//!
//! The transition engine of Lif, a Game-of-Life variant in which every cell
//! carries its own rule.
//!
//! This crate contains the deterministic simulation logic, including:
//! - Stasis-set genetics (loss, mutation, recombination)
//! - The per-cell transition rule with settlement and exchange
//! - An incrementally maintained live-neighbor index
//! - Population statistics and lineage tracking
//! - Metrics collection and structured logging
//!
//! ## Architecture
//!
//! A [`Simulation`] owns the lattice of the current generation together with
//! its [`NeighborIndex`]. Each call to [`Simulation::advance`] evaluates all
//! rows in parallel against that snapshot, each row drawing from its own
//! seeded ChaCha stream, then merges the buffered neighbor deltas into a fresh
//! index. Runs with the same seed and configuration are reproducible
//! regardless of thread count.
//!
//! ## Example
//!
//! ```
//! use lif_core::config::{AppConfig, WorldConfig};
//! use lif_core::Simulation;
//!
//! let config = AppConfig {
//!     world: WorldConfig {
//!         width: 16,
//!         height: 16,
//!         seed: Some(42),
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//! let mut sim = Simulation::new(config).unwrap();
//! let stats = sim.advance().unwrap();
//! assert_eq!(stats.generation, 1);
//! ```

/// Configuration management for simulation parameters
pub mod config;
/// Engine invariant failures
pub mod error;
/// Flat cell lattice
pub mod grid;
/// Lineage population history
pub mod lineage_registry;
/// Performance metrics collection and logging
pub mod metrics;
/// Incrementally maintained live-neighbor counts
pub mod neighbor_index;
/// Random draws used by the rule
pub mod sampling;
/// Simulation driver
pub mod simulation;
/// Randomized genetics on stasis sets
pub mod stasis;
/// Per-generation systems (transition rule, statistics)
pub mod systems;
/// Precomputed Moore neighborhoods
pub mod topology;

pub use error::EngineError;
pub use grid::Grid;
pub use lineage_registry::{LineageRecord, LineageRegistry};
pub use metrics::{init_logging, Metrics};
pub use neighbor_index::NeighborIndex;
pub use simulation::Simulation;
pub use stasis::StasisLogic;
pub use topology::Topology;
