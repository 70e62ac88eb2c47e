pub mod macros;

use lif_core::config::{AppConfig, EvolutionConfig, WorldConfig};
use lif_core::Simulation;
use lif_data::{Cell, LineageId, StasisSet};

#[allow(dead_code)]
pub struct SimulationBuilder {
    config: AppConfig,
    cells: Vec<(usize, usize, Cell)>,
}

#[allow(dead_code)]
impl SimulationBuilder {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            config: AppConfig {
                world: WorldConfig {
                    width,
                    height,
                    seed: Some(0),
                    verify_index: true,
                    ..Default::default()
                },
                ..Default::default()
            },
            cells: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn bounded(mut self) -> Self {
        self.config.world.toroidal = false;
        self
    }

    pub fn radius(mut self, radius: u8) -> Self {
        self.config.world.radius = radius;
        self
    }

    pub fn with_evolution<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut EvolutionConfig),
    {
        modifier(&mut self.config.evolution);
        self
    }

    /// Switches off mutation, exchange and habitability loss.
    pub fn quiet(self) -> Self {
        self.with_evolution(|e| {
            e.mut_p = 0.0;
            e.exchange_r = 0.0;
            e.goh_r = 0.0;
        })
    }

    pub fn alive(mut self, x: usize, y: usize, members: &[u8], lineage: u64) -> Self {
        self.cells.push((
            x,
            y,
            Cell::Alive {
                stasis: set(members),
                lineage: LineageId(lineage),
            },
        ));
        self
    }

    pub fn empty(mut self, x: usize, y: usize, members: &[u8]) -> Self {
        self.cells.push((
            x,
            y,
            Cell::Empty {
                stasis: set(members),
            },
        ));
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn build(self) -> Simulation {
        let mut sim =
            Simulation::new(self.config).expect("Failed to create simulation in test builder");
        for (x, y, cell) in self.cells {
            sim.set_cell(x, y, cell).expect("Failed to place cell");
        }
        sim
    }
}

#[allow(dead_code)]
pub fn set(members: &[u8]) -> StasisSet {
    StasisSet::from_members(members.iter().copied()).expect("member out of range")
}
