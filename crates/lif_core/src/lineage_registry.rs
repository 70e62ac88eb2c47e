use lif_data::LineageId;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

/// Lineages whose peak population stayed below this are forgotten once extinct.
pub const PRUNE_PEAK_THRESHOLD: usize = 3;

/// Extinct records kept after a prune. The largest lineages win, then the most
/// recently extinct.
pub const MAX_EXTINCT_RECORDS: usize = 1024;

/// Population history of one lineage.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LineageRecord {
    pub id: LineageId,
    pub first_generation: u64,
    pub current_population: usize,
    pub peak_population: usize,
    /// Cells the lineage ever gained through its founding birth or settlement.
    pub total_cells_produced: usize,
    pub is_extinct: bool,
    pub extinct_generation: Option<u64>,
}

impl LineageRecord {
    fn new(id: LineageId, generation: u64) -> Self {
        Self {
            id,
            first_generation: generation,
            current_population: 0,
            peak_population: 0,
            total_cells_produced: 0,
            is_extinct: false,
            extinct_generation: None,
        }
    }
}

/// Registry of every lineage that has appeared in the current run.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct LineageRegistry {
    pub lineages: HashMap<LineageId, LineageRecord>,
    /// Ids of the records that are not extinct.
    #[serde(default)]
    living: HashSet<LineageId>,
}

impl LineageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconciles the registry with one generation's population.
    ///
    /// `counts` holds the alive cells per lineage after the generation and
    /// `produced` the cells each lineage gained through birth or settlement
    /// during it. Returns the lineages that went extinct in this generation,
    /// in ascending id order. Only living records are visited.
    pub fn observe(
        &mut self,
        generation: u64,
        counts: &HashMap<LineageId, usize>,
        produced: &HashMap<LineageId, usize>,
    ) -> Vec<LineageId> {
        for (&id, &gained) in produced {
            self.lineages
                .entry(id)
                .or_insert_with(|| LineageRecord::new(id, generation))
                .total_cells_produced += gained;
        }

        let mut extinct = Vec::new();
        let lineages = &mut self.lineages;
        self.living.retain(|id| {
            let Some(record) = lineages.get_mut(id) else {
                return false;
            };
            let population = counts.get(id).copied().unwrap_or(0);
            record.current_population = population;
            record.peak_population = record.peak_population.max(population);
            if population == 0 {
                record.is_extinct = true;
                record.extinct_generation = Some(generation);
                extinct.push(*id);
                return false;
            }
            true
        });

        // Newcomers: founders of this generation, or cells placed by hand
        // before any production was recorded.
        for (&id, &population) in counts {
            if population == 0 || self.living.contains(&id) {
                continue;
            }
            let record = self
                .lineages
                .entry(id)
                .or_insert_with(|| LineageRecord::new(id, generation));
            if record.is_extinct {
                continue;
            }
            record.current_population = population;
            record.peak_population = record.peak_population.max(population);
            self.living.insert(id);
        }

        // Produced and gone within the same generation.
        for &id in produced.keys() {
            if self.living.contains(&id) {
                continue;
            }
            if let Some(record) = self.lineages.get_mut(&id) {
                if !record.is_extinct {
                    record.current_population = 0;
                    record.is_extinct = true;
                    record.extinct_generation = Some(generation);
                    extinct.push(id);
                }
            }
        }

        extinct.sort_unstable();
        extinct
    }

    /// Drops extinct lineages that never grew beyond a handful of cells, then
    /// caps the remaining extinct history at [`MAX_EXTINCT_RECORDS`].
    /// Returns the number of records removed.
    pub fn prune(&mut self) -> usize {
        let before = self.lineages.len();
        self.lineages
            .retain(|_, r| !r.is_extinct || r.peak_population >= PRUNE_PEAK_THRESHOLD);

        let extinct = self.lineages.len() - self.living.len();
        if extinct > MAX_EXTINCT_RECORDS {
            let mut ranked: Vec<_> = self
                .lineages
                .values()
                .filter(|r| r.is_extinct)
                .map(|r| (r.peak_population, r.extinct_generation, r.id))
                .collect();
            ranked.sort_unstable_by_key(|&key| Reverse(key));
            for &(_, _, id) in &ranked[MAX_EXTINCT_RECORDS..] {
                self.lineages.remove(&id);
            }
        }
        before - self.lineages.len()
    }

    /// Most productive lineages first; ties broken by ascending id.
    pub fn top_lineages(&self, count: usize) -> Vec<&LineageRecord> {
        let mut list: Vec<_> = self.lineages.values().collect();
        list.sort_by(|a, b| {
            b.total_cells_produced
                .cmp(&a.total_cells_produced)
                .then(a.id.cmp(&b.id))
        });
        list.truncate(count);
        list
    }

    pub fn get(&self, id: LineageId) -> Option<&LineageRecord> {
        self.lineages.get(&id)
    }

    pub fn living_count(&self) -> usize {
        self.living.len()
    }

    pub fn len(&self) -> usize {
        self.lineages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lineages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(u64, usize)]) -> HashMap<LineageId, usize> {
        entries.iter().map(|&(id, n)| (LineageId(id), n)).collect()
    }

    #[test]
    fn test_observe_tracks_population_and_peak() {
        let mut registry = LineageRegistry::new();
        registry.observe(1, &map(&[(1, 1)]), &map(&[(1, 1)]));
        registry.observe(2, &map(&[(1, 4)]), &map(&[(1, 3)]));
        registry.observe(3, &map(&[(1, 2)]), &map(&[]));

        let record = registry.get(LineageId(1)).unwrap();
        assert_eq!(record.first_generation, 1);
        assert_eq!(record.current_population, 2);
        assert_eq!(record.peak_population, 4);
        assert_eq!(record.total_cells_produced, 4);
        assert!(!record.is_extinct);
    }

    #[test]
    fn test_observe_reports_extinction_once() {
        let mut registry = LineageRegistry::new();
        registry.observe(1, &map(&[(1, 1), (2, 1)]), &map(&[(1, 1), (2, 1)]));
        let extinct = registry.observe(2, &map(&[(2, 1)]), &map(&[]));
        assert_eq!(extinct, vec![LineageId(1)]);
        assert_eq!(
            registry.get(LineageId(1)).unwrap().extinct_generation,
            Some(2)
        );
        assert!(registry.observe(3, &map(&[(2, 1)]), &map(&[])).is_empty());
        assert_eq!(registry.living_count(), 1);
    }

    #[test]
    fn test_prune_keeps_successful_extinct_lineages() {
        let mut registry = LineageRegistry::new();
        registry.observe(1, &map(&[(1, 1), (2, 5)]), &map(&[(1, 1), (2, 5)]));
        registry.observe(2, &map(&[]), &map(&[]));
        assert_eq!(registry.prune(), 1);
        assert!(registry.get(LineageId(1)).is_none());
        assert!(registry.get(LineageId(2)).is_some());
    }

    #[test]
    fn test_extinct_history_is_capped() {
        let mut registry = LineageRegistry::new();
        // A steady trickle of short bursts: every lineage peaks at 5 cells and
        // is gone one generation later. Lineage 0 lives throughout.
        for generation in 1..=5000u64 {
            let counts = map(&[(0, 1), (generation, 5)]);
            let extinct = registry.observe(generation, &counts, &map(&[(generation, 5)]));
            if generation > 1 {
                assert_eq!(extinct, vec![LineageId(generation - 1)]);
            }
            assert_eq!(registry.living_count(), 2);
            if generation % 100 == 0 {
                registry.prune();
                assert!(registry.len() <= MAX_EXTINCT_RECORDS + registry.living_count());
            }
        }
        assert!(registry.len() <= MAX_EXTINCT_RECORDS + 100 + registry.living_count());
        assert!(registry.get(LineageId(0)).is_some());
        assert!(registry.get(LineageId(4999)).is_some());
        assert!(registry.get(LineageId(1)).is_none());
    }

    #[test]
    fn test_prune_cap_prefers_large_lineages() {
        let mut registry = LineageRegistry::new();
        let big = MAX_EXTINCT_RECORDS as u64 + 10;
        registry.observe(1, &map(&[(big, 50)]), &map(&[(big, 50)]));
        for id in 1..big {
            registry.observe(id + 1, &map(&[(id, 4)]), &map(&[]));
        }
        registry.observe(big + 1, &map(&[]), &map(&[]));
        assert_eq!(registry.living_count(), 0);

        registry.prune();
        assert_eq!(registry.len(), MAX_EXTINCT_RECORDS);
        assert!(registry.get(LineageId(big)).is_some());
        assert!(registry.get(LineageId(1)).is_none());
    }

    #[test]
    fn test_same_generation_birth_and_death_is_extinct() {
        let mut registry = LineageRegistry::new();
        let extinct = registry.observe(4, &map(&[]), &map(&[(9, 1)]));
        assert_eq!(extinct, vec![LineageId(9)]);
        assert_eq!(registry.living_count(), 0);
        assert_eq!(registry.get(LineageId(9)).unwrap().extinct_generation, Some(4));
    }

    #[test]
    fn test_top_lineages_by_production() {
        let mut registry = LineageRegistry::new();
        registry.observe(
            1,
            &map(&[(1, 2), (2, 6), (3, 2)]),
            &map(&[(1, 2), (2, 6), (3, 2)]),
        );
        let top: Vec<_> = registry.top_lineages(2).iter().map(|r| r.id).collect();
        assert_eq!(top, vec![LineageId(2), LineageId(1)]);
    }
}
