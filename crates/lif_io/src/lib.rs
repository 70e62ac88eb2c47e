//! # Lif IO
//!
//! Output collaborators of the Lif simulation.
//!
//! This crate provides:
//! - Structured error handling with custom error types
//! - The per-generation CSV statistics log
//! - JSONL run history (snapshots and extinctions)
//! - Lineage registry persistence

/// Error types and result aliases for I/O operations
pub mod error;
/// JSONL run history
pub mod history;
/// Gzip-compressed lineage registry files
pub mod lineage;
/// Per-generation CSV statistics
pub mod stats_log;

pub use error::{IoError, Result};
pub use history::HistoryLogger;
pub use lineage::{load_registry, save_registry};
pub use stats_log::StatsWriter;
