mod common;

use common::SimulationBuilder;
use proptest::prelude::*;

fn check_every_generation(mut builder: SimulationBuilder, generations: usize) {
    builder = builder.with_evolution(|e| e.exchange_r = 0.05);
    let mut sim = builder.build();
    assert_index_exact!(sim);
    for _ in 0..generations {
        let before: Vec<bool> = sim.grid().iter().map(|c| c.is_alive()).collect();
        sim.advance().unwrap();
        assert_index_exact!(sim);

        // Exactly the flagged events flip liveness.
        for (loc, event) in sim.events().iter().enumerate() {
            assert_eq!(
                event.flips_liveness(),
                before[loc] != sim.grid().is_alive(loc),
                "event {event:?} at {loc} disagrees with the grid"
            );
        }
    }
}

#[test]
fn test_index_exact_on_torus() {
    check_every_generation(SimulationBuilder::new(24, 18).with_seed(3), 50);
}

#[test]
fn test_index_exact_on_bounded_grid() {
    check_every_generation(SimulationBuilder::new(24, 18).with_seed(3).bounded(), 50);
}

#[test]
fn test_index_exact_radius_two() {
    check_every_generation(SimulationBuilder::new(20, 20).with_seed(8).radius(2), 30);
    check_every_generation(
        SimulationBuilder::new(20, 20).with_seed(8).radius(2).bounded(),
        30,
    );
}

#[test]
fn test_index_exact_on_degenerate_torus() {
    check_every_generation(SimulationBuilder::new(2, 3).with_seed(5), 40);
    check_every_generation(SimulationBuilder::new(1, 1).with_seed(5), 10);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_index_exact_for_any_seed(
        seed in any::<u64>(),
        width in 1u16..16,
        height in 1u16..16,
        toroidal in any::<bool>(),
    ) {
        let mut builder = SimulationBuilder::new(width, height).with_seed(seed);
        if !toroidal {
            builder = builder.bounded();
        }
        check_every_generation(builder, 15);
    }
}
