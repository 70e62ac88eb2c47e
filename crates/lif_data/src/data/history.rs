use crate::data::cell::LineageId;
use crate::data::stats::{EventTally, StatsRecord};
use serde::{Deserialize, Serialize};

/// Entry of the JSONL run history.
///
/// Serialised with `#[serde(tag = "event")]` for streaming output.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event")]
pub enum LiveEvent {
    /// Periodic summary of the population.
    Snapshot {
        generation: u64,
        stats: StatsRecord,
        events: EventTally,
        /// Largest lineages at the time of the snapshot.
        top_lineages: Vec<(LineageId, usize)>,
        /// Fingerprint of the rule parameters in effect.
        fingerprint: String,
        timestamp: String,
    },
    /// A lineage lost its last cell.
    Extinction {
        lineage: LineageId,
        generation: u64,
        peak_population: usize,
        timestamp: String,
    },
}

impl LiveEvent {
    pub fn generation(&self) -> u64 {
        match self {
            LiveEvent::Snapshot { generation, .. } | LiveEvent::Extinction { generation, .. } => {
                *generation
            }
        }
    }
}
