use crate::config::{AppConfig, EvolutionConfig};
use crate::error::EngineError;
use crate::grid::Grid;
use crate::lineage_registry::LineageRegistry;
use crate::neighbor_index::{NeighborDelta, NeighborIndex};
use crate::systems::stats::compute_stats;
use crate::systems::transition::{evaluate_row, RowOutcome, TransitionContext};
use crate::topology::Topology;
use lif_data::{Cell, CellView, GenerationEvent, LineageId, PopulationStats};
use rayon::prelude::*;
use std::collections::HashMap;

/// Largest lineage id `set_cell` accepts; the rest of the range is left to
/// de-novo births.
pub const MAX_PLACED_LINEAGE: u64 = u64::MAX / 2;

/// One run of the automaton: the lattice of generation `g`, its neighbor
/// index and everything needed to produce generation `g + 1`.
pub struct Simulation {
    config: AppConfig,
    topology: Topology,
    grid: Grid,
    index: NeighborIndex,
    events: Vec<GenerationEvent>,
    generation: u64,
    seed: u64,
    next_lineage: u64,
    registry: LineageRegistry,
    last_extinctions: Vec<LineageId>,
}

impl Simulation {
    /// Validates the configuration and builds an all-empty lattice.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let width = config.world.width as usize;
        let height = config.world.height as usize;
        let topology = Topology::new(
            width,
            height,
            config.world.toroidal,
            config.world.radius as usize,
        );
        let seed = config.world.seed.unwrap_or_else(rand::random);

        tracing::info!(
            width = width,
            height = height,
            toroidal = config.world.toroidal,
            radius = config.world.radius,
            seed = seed,
            fingerprint = %config.fingerprint(),
            "Simulation initialized"
        );

        Ok(Self {
            grid: Grid::new(width, height),
            index: NeighborIndex::new(topology.len()),
            events: vec![GenerationEvent::None; topology.len()],
            topology,
            config,
            generation: 0,
            seed,
            next_lineage: LineageId::FIRST.get(),
            registry: LineageRegistry::new(),
            last_extinctions: Vec::new(),
        })
    }

    /// Computes the next generation.
    ///
    /// Rows are evaluated in parallel against the current lattice; nothing is
    /// committed unless every row succeeds and the new index is consistent.
    pub fn advance(&mut self) -> anyhow::Result<PopulationStats> {
        let (seed, generation) = (self.seed, self.generation);
        let rows: Vec<RowOutcome> = {
            let ctx = TransitionContext::new(
                &self.grid,
                &self.index,
                &self.topology,
                &self.config.evolution,
            );
            (0..self.topology.height())
                .into_par_iter()
                .map(|y| evaluate_row(&ctx, y, seed, generation))
                .collect::<Result<Vec<_>, EngineError>>()?
        };

        let len = self.topology.len();
        let mut cells = Vec::with_capacity(len);
        let mut events = Vec::with_capacity(len);
        let mut deltas: Vec<NeighborDelta> = Vec::new();
        let mut next_lineage = self.next_lineage;
        for mut row in rows {
            for &x in &row.births {
                if let Cell::Alive { lineage, .. } = &mut row.cells[x] {
                    *lineage = lineage.offset(next_lineage);
                }
            }
            next_lineage += row.births.len() as u64;
            cells.append(&mut row.cells);
            events.append(&mut row.events);
            deltas.append(&mut row.deltas);
        }

        let index = self.index.apply(&deltas, &self.topology)?;
        let grid = Grid {
            width: self.topology.width(),
            height: self.topology.height(),
            cells,
        };
        if cfg!(debug_assertions) || self.config.world.verify_index {
            index.verify(&grid, &self.topology)?;
        }

        let generation = self.generation + 1;
        let stats = compute_stats(generation, &grid.cells, &events);
        let produced = produced_by_lineage(&grid.cells, &events);
        let was_alive = self.grid.alive_count() > 0;

        self.last_extinctions = self
            .registry
            .observe(generation, &stats.lineage_counts, &produced);
        self.grid = grid;
        self.index = index;
        self.events = events;
        self.generation = generation;
        self.next_lineage = next_lineage;

        tracing::debug!(
            generation = generation,
            alive = stats.alive,
            species = stats.species,
            births = stats.events.births,
            deaths = stats.events.deaths,
            settlements = stats.events.settlements,
            exchanges = stats.events.exchanges_conspecific + stats.events.exchanges_interspecific,
            "Generation complete"
        );
        if was_alive && stats.alive == 0 {
            tracing::warn!(generation = generation, "Population collapsed to zero");
        }

        Ok(stats)
    }

    /// Statistics of the current generation paired with the events that
    /// produced it. Generation 0 has no events.
    pub fn stats(&self) -> PopulationStats {
        compute_stats(self.generation, &self.grid.cells, &self.events)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn events(&self) -> &[GenerationEvent] {
        &self.events
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn neighbor_index(&self) -> &NeighborIndex {
        &self.index
    }

    pub fn cell_view(&self, x: usize, y: usize) -> CellView {
        let loc = self.topology.index(x, y);
        CellView::new(self.grid.get(loc), self.events[loc])
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn evolution(&self) -> &EvolutionConfig {
        &self.config.evolution
    }

    /// Replaces the rule parameters from the next generation on.
    pub fn set_evolution(&mut self, evolution: EvolutionConfig) -> anyhow::Result<()> {
        evolution.validate()?;
        tracing::debug!(?evolution, "Evolution parameters updated");
        self.config.evolution = evolution;
        Ok(())
    }

    /// Overwrites one location and keeps the neighbor index exact.
    ///
    /// Placing a lineage at or beyond the counter moves the counter past it, so
    /// later births never reuse the id.
    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) -> anyhow::Result<()> {
        anyhow::ensure!(
            x < self.topology.width() && y < self.topology.height(),
            "Location ({x}, {y}) is outside the {}x{} lattice",
            self.topology.width(),
            self.topology.height()
        );
        if let Some(lineage) = cell.lineage() {
            anyhow::ensure!(
                lineage.get() <= MAX_PLACED_LINEAGE,
                "Lineage {} leaves no room for later births",
                lineage.get()
            );
        }
        let loc = self.topology.index(x, y);
        let delta = match (self.grid.is_alive(loc), cell.is_alive()) {
            (false, true) => Some(NeighborDelta::born(loc)),
            (true, false) => Some(NeighborDelta::died(loc)),
            _ => None,
        };
        if let Some(delta) = delta {
            self.index.apply_in_place(&[delta], &self.topology)?;
        }
        if let Some(lineage) = cell.lineage() {
            self.next_lineage = self.next_lineage.max(lineage.get() + 1);
        }
        self.grid.set(loc, cell);
        Ok(())
    }

    /// Lineage id the next de-novo birth will receive.
    pub fn next_lineage(&self) -> LineageId {
        LineageId(self.next_lineage)
    }

    pub fn lineage_registry(&self) -> &LineageRegistry {
        &self.registry
    }

    /// Lineages that went extinct in the latest generation.
    pub fn last_extinctions(&self) -> &[LineageId] {
        &self.last_extinctions
    }

    pub fn prune_lineages(&mut self) -> usize {
        let removed = self.registry.prune();
        if removed > 0 {
            tracing::debug!(removed = removed, "Pruned short-lived lineages");
        }
        removed
    }
}

/// Cells each lineage gained through birth or settlement this generation.
fn produced_by_lineage(cells: &[Cell], events: &[GenerationEvent]) -> HashMap<LineageId, usize> {
    let mut produced = HashMap::new();
    for (cell, event) in cells.iter().zip(events) {
        if matches!(event, GenerationEvent::Birth | GenerationEvent::Settlement) {
            if let Some(lineage) = cell.lineage() {
                *produced.entry(lineage).or_insert(0) += 1;
            }
        }
    }
    produced
}
