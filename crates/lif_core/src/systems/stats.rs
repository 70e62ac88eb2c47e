use lif_data::{Cell, EventTally, GenerationEvent, PopulationStats};

/// Gini coefficient of a set of group sizes.
///
/// Sizes are sorted ascending and weighted by their 1-based rank:
/// `2·Σ(i·y_i) / (n·Σy) − (n+1)/n`. `None` for no groups; a single group
/// scores 0.
pub fn gini(sizes: impl IntoIterator<Item = usize>) -> Option<f64> {
    let mut ys: Vec<usize> = sizes.into_iter().collect();
    if ys.is_empty() {
        return None;
    }
    ys.sort_unstable();
    let n = ys.len() as f64;
    let total: f64 = ys.iter().map(|&y| y as f64).sum();
    if total == 0.0 {
        return Some(0.0);
    }
    let ranked: f64 = ys
        .iter()
        .enumerate()
        .map(|(i, &y)| (i + 1) as f64 * y as f64)
        .sum();
    Some(2.0 * ranked / (n * total) - (n + 1.0) / n)
}

fn mean(sum: usize, count: usize) -> Option<f64> {
    (count > 0).then(|| sum as f64 / count as f64)
}

/// Aggregates one generation's cells together with the events that produced
/// them.
pub fn compute_stats(
    generation: u64,
    cells: &[Cell],
    events: &[GenerationEvent],
) -> PopulationStats {
    let mut stats = PopulationStats {
        generation,
        ..Default::default()
    };
    let (mut alive_stasis, mut empty_stasis, mut empty) = (0usize, 0usize, 0usize);

    for cell in cells {
        match *cell {
            Cell::Alive { stasis, lineage } => {
                stats.alive += 1;
                alive_stasis += stasis.count();
                *stats.lineage_counts.entry(lineage).or_insert(0) += 1;
                *stats.genotype_counts.entry(stasis).or_insert(0) += 1;
            }
            Cell::Empty { stasis } => {
                empty += 1;
                empty_stasis += stasis.count();
            }
        }
    }

    let mut tally = EventTally::default();
    for &event in events {
        tally.record(event);
    }

    stats.species = stats.lineage_counts.len();
    stats.alive_mean_stasis = mean(alive_stasis, stats.alive);
    stats.empty_mean_stasis = mean(empty_stasis, empty);
    stats.gini_species = gini(stats.lineage_counts.values().copied());
    stats.gini_stasis = gini(stats.genotype_counts.values().copied());
    stats.events = tally;
    stats
}
