mod common;

use common::{set, SimulationBuilder};
use lif_data::{Cell, GenerationEvent, HabitabilityPolicy, LineageId, StasisSet};

#[test]
fn test_habitability_loss_on_small_torus() {
    let mut sim = SimulationBuilder::new(3, 3)
        .with_evolution(|e| {
            e.goh_r = 1.0;
            e.goh_policy = HabitabilityPolicy::Max;
        })
        .build();
    let stats = sim.advance().unwrap();

    let expected = Cell::Empty {
        stasis: set(&[0, 1, 2, 3, 4, 5, 6, 7]),
    };
    for y in 0..3 {
        for x in 0..3 {
            assert_cell!(sim, x, y, expected, GenerationEvent::HabitabilityLoss);
        }
    }
    assert_eq!(stats.events.habitability_losses, 9);
    assert_eq!(stats.empty_mean_stasis, Some(8.0));
}

#[test]
fn test_min_policy_strips_from_below() {
    let mut sim = SimulationBuilder::new(3, 3)
        .with_evolution(|e| e.goh_policy = HabitabilityPolicy::Min)
        .build();
    sim.advance().unwrap();
    // 0 is gone, so every cell now gives birth.
    assert_eq!(sim.grid().get_cell(1, 1).stasis(), set(&[1, 2, 3, 4, 5, 6, 7, 8]));
    let stats = sim.advance().unwrap();
    assert_eq!(stats.events.births, 9);
    assert_alive!(sim, 9);
}

#[test]
fn test_isolated_cell_dies_to_full_empty() {
    let mut sim = SimulationBuilder::new(5, 5)
        .bounded()
        .quiet()
        .alive(2, 2, &[3], 4)
        .build();
    sim.advance().unwrap();
    assert_cell!(sim, 2, 2, Cell::empty(), GenerationEvent::Death);
    assert_cell!(sim, 1, 1, Cell::empty(), GenerationEvent::None);
    assert_alive!(sim, 0);
    assert_index_exact!(sim);
}

#[test]
fn test_stable_cell_survives_unchanged() {
    let mut sim = SimulationBuilder::new(5, 5)
        .bounded()
        .quiet()
        .alive(2, 2, &[0], 4)
        .build();
    for _ in 0..5 {
        sim.advance().unwrap();
    }
    let expected = Cell::Alive {
        stasis: set(&[0]),
        lineage: LineageId(4),
    };
    assert_cell!(sim, 2, 2, expected, GenerationEvent::None);
}

#[test]
fn test_settlement_copies_parent_without_mutation() {
    for seed in 0..50 {
        let mut sim = SimulationBuilder::new(5, 5)
            .bounded()
            .quiet()
            .with_seed(seed)
            .empty(2, 2, &[])
            .alive(1, 2, &[1, 2], 7)
            .alive(3, 2, &[2, 5, 6], 9)
            .build();
        sim.advance().unwrap();

        let view = sim.cell_view(2, 2);
        assert_eq!(view.event, GenerationEvent::Settlement);
        let parent = match view.lineage {
            Some(LineageId(7)) => set(&[1, 2]),
            Some(LineageId(9)) => set(&[2, 5, 6]),
            other => panic!("settler from unexpected lineage {other:?}"),
        };
        assert_eq!(view.stasis, parent);
    }
}

#[test]
fn test_barren_cell_without_neighbors_is_born() {
    let mut sim = SimulationBuilder::new(5, 5)
        .bounded()
        .quiet()
        .with_evolution(|e| e.alive_p = 1.0)
        .empty(0, 0, &[])
        .build();
    sim.advance().unwrap();
    assert_cell!(
        sim,
        0,
        0,
        Cell::Alive {
            stasis: StasisSet::FULL,
            lineage: LineageId::FIRST,
        },
        GenerationEvent::Birth
    );
}

#[test]
fn test_exchange_prefers_kin() {
    let mut sim = SimulationBuilder::new(3, 1)
        .bounded()
        .with_evolution(|e| {
            e.exchange_r = 1.0;
            e.mut_p = 0.0;
            e.goh_r = 0.0;
        })
        .alive(0, 0, &[1], 3)
        .alive(1, 0, &[1, 2], 3)
        .alive(2, 0, &[1, 8], 5)
        .build();
    sim.advance().unwrap();

    assert_eq!(sim.cell_view(1, 0).event, GenerationEvent::ExchangeConspecific);
    assert_eq!(sim.cell_view(2, 0).event, GenerationEvent::ExchangeInterspecific);
    // Recombination keeps shared members and the own lineage.
    let middle = sim.cell_view(1, 0);
    assert!(middle.stasis.contains(1));
    assert_eq!(middle.lineage, Some(LineageId(3)));
}
