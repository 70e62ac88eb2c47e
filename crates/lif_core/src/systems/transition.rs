use crate::config::EvolutionConfig;
use crate::error::Result;
use crate::grid::Grid;
use crate::neighbor_index::{NeighborDelta, NeighborIndex};
use crate::sampling::{chance, iid_set, FitnessCosts};
use crate::stasis::StasisLogic;
use crate::systems::recombination::{exchange, settle};
use crate::topology::Topology;
use lif_data::{Cell, GenerationEvent, LineageId};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Read-only view of generation `g` shared by every row evaluation.
pub struct TransitionContext<'a> {
    pub grid: &'a Grid,
    pub index: &'a NeighborIndex,
    pub topology: &'a Topology,
    pub evolution: &'a EvolutionConfig,
    pub costs: FitnessCosts,
}

impl<'a> TransitionContext<'a> {
    pub fn new(
        grid: &'a Grid,
        index: &'a NeighborIndex,
        topology: &'a Topology,
        evolution: &'a EvolutionConfig,
    ) -> Self {
        Self {
            grid,
            index,
            topology,
            evolution,
            costs: FitnessCosts::new(evolution.fit_cost),
        }
    }
}

/// Issues lineage ids for de-novo births.
pub trait LineageSource {
    fn next_lineage(&mut self) -> LineageId;
}

/// Row-local numbering starting at zero. The driver later shifts these ids
/// onto the simulation counter in row order.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalLineages {
    issued: u64,
}

impl LocalLineages {
    pub fn issued(&self) -> u64 {
        self.issued
    }
}

impl LineageSource for LocalLineages {
    fn next_lineage(&mut self) -> LineageId {
        let id = LineageId(self.issued);
        self.issued += 1;
        id
    }
}

/// Applies the transition rule to the cell at `loc`.
///
/// The rate draw of a stable cell always comes first; branch-specific draws
/// follow it on the same generator.
pub fn step_cell<R: Rng, L: LineageSource>(
    ctx: &TransitionContext<'_>,
    loc: usize,
    rng: &mut R,
    lineages: &mut L,
) -> Result<(Cell, GenerationEvent)> {
    let cell = *ctx.grid.get(loc);
    let n = ctx.index.count_at(loc);
    let evolution = ctx.evolution;

    if cell.stasis().contains(n) {
        return match cell {
            Cell::Empty { stasis } => {
                if chance(evolution.goh_r, rng) && !stasis.is_empty() {
                    Ok((
                        Cell::Empty {
                            stasis: stasis.lose_by(evolution.goh_policy, rng),
                        },
                        GenerationEvent::HabitabilityLoss,
                    ))
                } else {
                    Ok((cell, GenerationEvent::None))
                }
            }
            Cell::Alive { stasis, lineage } => {
                if n > 0 && chance(evolution.exchange_r, rng) {
                    exchange(ctx, loc, stasis, lineage, rng)
                } else {
                    Ok((cell, GenerationEvent::None))
                }
            }
        };
    }

    match cell {
        Cell::Empty { .. } if n == 0 => Ok((
            Cell::Alive {
                stasis: iid_set(evolution.alive_p, rng),
                lineage: lineages.next_lineage(),
            },
            GenerationEvent::Birth,
        )),
        Cell::Empty { .. } => settle(ctx, loc, rng),
        Cell::Alive { .. } => Ok((Cell::empty(), GenerationEvent::Death)),
    }
}

/// Next-generation state of one lattice row.
#[derive(Debug, Clone, Default)]
pub struct RowOutcome {
    pub cells: Vec<Cell>,
    pub events: Vec<GenerationEvent>,
    pub deltas: Vec<NeighborDelta>,
    /// Column of every de-novo birth, whose lineage is still row-local.
    pub births: Vec<usize>,
}

/// SplitMix64 finalizer; a bijection that spreads every input bit.
#[inline]
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Seed of the generator that drives row `row` of generation `generation`.
///
/// Each input is folded in after the previous ones went through the
/// finalizer, so neighboring seeds never share a stream at shifted
/// generations.
pub fn row_seed(world_seed: u64, generation: u64, row: usize) -> u64 {
    let seed = mix(world_seed.wrapping_add(0x9E3779B97F4A7C15));
    let seed = mix(seed ^ generation.wrapping_mul(0x517CC1B727220A95));
    mix(seed ^ (row as u64).wrapping_mul(0x9E3779B97F4A7C15))
}

/// Evaluates every cell of row `y` against generation `generation`.
pub fn evaluate_row(
    ctx: &TransitionContext<'_>,
    y: usize,
    world_seed: u64,
    generation: u64,
) -> Result<RowOutcome> {
    let width = ctx.topology.width();
    let mut rng = ChaCha8Rng::seed_from_u64(row_seed(world_seed, generation, y));
    let mut lineages = LocalLineages::default();
    let mut out = RowOutcome {
        cells: Vec::with_capacity(width),
        events: Vec::with_capacity(width),
        ..Default::default()
    };

    for x in 0..width {
        let loc = ctx.topology.index(x, y);
        let (cell, event) = step_cell(ctx, loc, &mut rng, &mut lineages)?;
        match (ctx.grid.is_alive(loc), cell.is_alive()) {
            (false, true) => out.deltas.push(NeighborDelta::born(loc)),
            (true, false) => out.deltas.push(NeighborDelta::died(loc)),
            _ => {}
        }
        if event == GenerationEvent::Birth {
            out.births.push(x);
        }
        out.cells.push(cell);
        out.events.push(event);
    }
    Ok(out)
}
