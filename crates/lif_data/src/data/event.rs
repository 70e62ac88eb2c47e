use serde::{Deserialize, Serialize};

/// What happened at a location during the generation that produced it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationEvent {
    #[default]
    None,
    /// De-novo birth in an empty cell with no live neighbors.
    Birth,
    /// A live cell outside its stasis set became empty.
    Death,
    /// An empty cell adopted a live neighbor's lineage and stasis set.
    Settlement,
    /// An empty, stable cell gave up one stasis member.
    HabitabilityLoss,
    /// Recombination with a same-lineage neighbor.
    ExchangeConspecific,
    /// Recombination with a neighbor of another lineage.
    ExchangeInterspecific,
}

impl GenerationEvent {
    /// Whether the event flips the location between empty and alive.
    pub fn flips_liveness(&self) -> bool {
        matches!(
            self,
            GenerationEvent::Birth | GenerationEvent::Death | GenerationEvent::Settlement
        )
    }

    pub fn is_exchange(&self) -> bool {
        matches!(
            self,
            GenerationEvent::ExchangeConspecific | GenerationEvent::ExchangeInterspecific
        )
    }
}
