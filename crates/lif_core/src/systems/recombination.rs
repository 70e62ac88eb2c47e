use crate::error::{EngineError, Result};
use crate::sampling::{uniform_index, weighted_choice};
use crate::stasis::StasisLogic;
use crate::systems::transition::TransitionContext;
use lif_data::{Cell, GenerationEvent, LineageId, StasisSet};
use rand::Rng;

/// Recombines a stable live cell with one of its live neighbors.
///
/// A same-lineage neighbor is preferred when one exists. The child keeps the
/// original cell's lineage.
pub fn exchange<R: Rng>(
    ctx: &TransitionContext<'_>,
    loc: usize,
    stasis: StasisSet,
    lineage: LineageId,
    rng: &mut R,
) -> Result<(Cell, GenerationEvent)> {
    let live = ctx.index.live_neighbors(loc, ctx.grid, ctx.topology);
    let kin: Vec<usize> = live
        .iter()
        .copied()
        .filter(|&n| ctx.grid.get(n).lineage() == Some(lineage))
        .collect();

    let (pool, event) = if kin.is_empty() {
        (&live, GenerationEvent::ExchangeInterspecific)
    } else {
        (&kin, GenerationEvent::ExchangeConspecific)
    };
    let partner = uniform_index(pool.len(), rng)
        .map(|i| pool[i])
        .ok_or_else(|| no_live_neighbors(ctx, loc))?;

    let child = stasis
        .recombine(ctx.grid.get(partner).stasis(), rng)
        .mutate(ctx.evolution.mut_p, rng);
    Ok((
        Cell::Alive {
            stasis: child,
            lineage,
        },
        event,
    ))
}

/// Colonizes an empty cell from a fitness-weighted live neighbor.
pub fn settle<R: Rng>(
    ctx: &TransitionContext<'_>,
    loc: usize,
    rng: &mut R,
) -> Result<(Cell, GenerationEvent)> {
    let live = ctx.index.live_neighbors(loc, ctx.grid, ctx.topology);
    let settler = pick_settler(&live, ctx, rng)
        .ok_or_else(|| no_live_neighbors(ctx, loc))?;

    match *ctx.grid.get(settler) {
        Cell::Alive { stasis, lineage } => Ok((
            Cell::Alive {
                stasis: stasis.mutate(ctx.evolution.mut_p, rng),
                lineage,
            },
            GenerationEvent::Settlement,
        )),
        Cell::Empty { .. } => Err(no_live_neighbors(ctx, loc)),
    }
}

fn pick_settler<R: Rng>(
    live: &[usize],
    ctx: &TransitionContext<'_>,
    rng: &mut R,
) -> Option<usize> {
    let weights: Vec<f64> = live
        .iter()
        .map(|&n| ctx.costs.weight(ctx.grid.get(n).stasis()))
        .collect();
    weighted_choice(&weights, rng).map(|i| live[i])
}

fn no_live_neighbors(ctx: &TransitionContext<'_>, loc: usize) -> EngineError {
    let (x, y) = ctx.topology.coords(loc);
    EngineError::NoLiveNeighbors { x, y }
}
