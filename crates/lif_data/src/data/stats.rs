use crate::data::cell::LineageId;
use crate::data::event::GenerationEvent;
use crate::data::stasis::StasisSet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-generation counts of each event tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTally {
    pub births: usize,
    pub deaths: usize,
    pub settlements: usize,
    pub habitability_losses: usize,
    pub exchanges_conspecific: usize,
    pub exchanges_interspecific: usize,
}

impl EventTally {
    pub fn record(&mut self, event: GenerationEvent) {
        match event {
            GenerationEvent::None => {}
            GenerationEvent::Birth => self.births += 1,
            GenerationEvent::Death => self.deaths += 1,
            GenerationEvent::Settlement => self.settlements += 1,
            GenerationEvent::HabitabilityLoss => self.habitability_losses += 1,
            GenerationEvent::ExchangeConspecific => self.exchanges_conspecific += 1,
            GenerationEvent::ExchangeInterspecific => self.exchanges_interspecific += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.births
            + self.deaths
            + self.settlements
            + self.habitability_losses
            + self.exchanges_conspecific
            + self.exchanges_interspecific
    }
}

/// Population and genetics metrics for one generation.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PopulationStats {
    /// Generation these numbers describe.
    pub generation: u64,
    /// Number of alive cells.
    pub alive: usize,
    /// Number of distinct lineages among alive cells.
    pub species: usize,
    /// Mean stasis-set size over alive cells; absent when nothing is alive.
    pub alive_mean_stasis: Option<f64>,
    /// Mean stasis-set size over empty cells; absent when the grid is full.
    pub empty_mean_stasis: Option<f64>,
    /// Inequality of lineage population sizes.
    pub gini_species: Option<f64>,
    /// Inequality of genotype (exact stasis set) population sizes.
    pub gini_stasis: Option<f64>,
    /// Events that produced this generation.
    pub events: EventTally,
    /// Alive cells per lineage.
    pub lineage_counts: HashMap<LineageId, usize>,
    /// Alive cells per exact stasis set.
    pub genotype_counts: HashMap<StasisSet, usize>,
}

impl PopulationStats {
    /// Largest lineages first; ties broken by ascending id.
    pub fn top_lineages(&self, count: usize) -> Vec<(LineageId, usize)> {
        top_by_size(&self.lineage_counts, count)
    }

    /// Most common genotypes first; ties broken by ascending mask.
    pub fn top_genotypes(&self, count: usize) -> Vec<(StasisSet, usize)> {
        top_by_size(&self.genotype_counts, count)
    }

    pub fn record(&self) -> StatsRecord {
        StatsRecord::from(self)
    }
}

fn top_by_size<K: Copy + Ord>(counts: &HashMap<K, usize>, count: usize) -> Vec<(K, usize)> {
    let mut list: Vec<(K, usize)> = counts.iter().map(|(&k, &n)| (k, n)).collect();
    list.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    list.truncate(count);
    list
}

/// Flat per-generation row with a stable field order, consumed by the CSV
/// writer.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct StatsRecord {
    pub generation: u64,
    pub settlements: usize,
    pub exchanges_conspecific: usize,
    pub exchanges_interspecific: usize,
    pub alive: usize,
    pub species: usize,
    pub alive_mean_stasis: Option<f64>,
    pub empty_mean_stasis: Option<f64>,
    pub gini_species: Option<f64>,
    pub gini_stasis: Option<f64>,
}

impl StatsRecord {
    pub const FIELDS: [&'static str; 10] = [
        "generation",
        "settlements",
        "exchanges_conspecific",
        "exchanges_interspecific",
        "alive",
        "species",
        "alive_mean_stasis",
        "empty_mean_stasis",
        "gini_species",
        "gini_stasis",
    ];

    /// Field values in `FIELDS` order; absent values become empty strings.
    pub fn values(&self) -> [String; 10] {
        fn opt(v: Option<f64>) -> String {
            v.map(|x| x.to_string()).unwrap_or_default()
        }
        [
            self.generation.to_string(),
            self.settlements.to_string(),
            self.exchanges_conspecific.to_string(),
            self.exchanges_interspecific.to_string(),
            self.alive.to_string(),
            self.species.to_string(),
            opt(self.alive_mean_stasis),
            opt(self.empty_mean_stasis),
            opt(self.gini_species),
            opt(self.gini_stasis),
        ]
    }
}

impl From<&PopulationStats> for StatsRecord {
    fn from(stats: &PopulationStats) -> Self {
        Self {
            generation: stats.generation,
            settlements: stats.events.settlements,
            exchanges_conspecific: stats.events.exchanges_conspecific,
            exchanges_interspecific: stats.events.exchanges_interspecific,
            alive: stats.alive,
            species: stats.species,
            alive_mean_stasis: stats.alive_mean_stasis,
            empty_mean_stasis: stats.empty_mean_stasis,
            gini_species: stats.gini_species,
            gini_stasis: stats.gini_stasis,
        }
    }
}
