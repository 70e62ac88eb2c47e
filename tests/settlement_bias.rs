mod common;

use common::SimulationBuilder;
use lif_core::sampling::{weighted_choice, FitnessCosts};
use lif_data::{LineageId, StasisSet};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const DRAWS: usize = 10_000;

#[test]
fn test_small_stasis_wins_settlement_draws() {
    let costs = FitnessCosts::new(5.0);
    let weights = [
        costs.weight(StasisSet::from_members([1]).unwrap()),
        costs.weight(StasisSet::from_members([1, 2, 3, 4, 5]).unwrap()),
    ];
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let small = (0..DRAWS)
        .filter(|_| weighted_choice(&weights, &mut rng) == Some(0))
        .count();
    assert!(small * 100 > DRAWS * 99, "only {small} of {DRAWS} picked the small set");
}

#[test]
fn test_zero_cost_settles_evenly() {
    let costs = FitnessCosts::new(0.0);
    let weights = [
        costs.weight(StasisSet::EMPTY),
        costs.weight(StasisSet::FULL),
    ];
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let first = (0..DRAWS)
        .filter(|_| weighted_choice(&weights, &mut rng) == Some(0))
        .count();
    assert!((4_500..5_500).contains(&first));
}

#[test]
fn test_simulation_settles_from_fitter_neighbor() {
    let runs = 1_000;
    let fitter = (0..runs)
        .filter(|&seed| {
            let mut sim = SimulationBuilder::new(5, 5)
                .bounded()
                .quiet()
                .with_seed(seed)
                .empty(2, 2, &[])
                .alive(1, 2, &[1], 1)
                .alive(3, 2, &[1, 2, 3, 4, 5], 2)
                .build();
            sim.advance().unwrap();
            sim.cell_view(2, 2).lineage == Some(LineageId(1))
        })
        .count() as u64;
    assert!(fitter * 100 > runs * 99);
}
