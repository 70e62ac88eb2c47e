use crate::recorder::Recorder;
use anyhow::Result;
use lif_core::{Metrics, Simulation};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Advances until `generations` have run or the shutdown flag is raised.
/// Returns the last generation reached.
pub fn run_headless<W: Write>(
    sim: &mut Simulation,
    recorder: &mut Recorder<W>,
    generations: Option<u64>,
    shutdown: &AtomicBool,
) -> Result<u64> {
    let metrics = Metrics::new();
    recorder.begin(sim)?;
    let outcome = advance_all(sim, recorder, &metrics, generations, shutdown);
    let finished = recorder.finish(sim);
    outcome?;
    finished?;

    tracing::info!(
        generation = sim.generation(),
        elapsed_ms = metrics.elapsed().as_millis() as u64,
        "Headless run finished"
    );
    Ok(sim.generation())
}

fn advance_all<W: Write>(
    sim: &mut Simulation,
    recorder: &mut Recorder<W>,
    metrics: &Metrics,
    generations: Option<u64>,
    shutdown: &AtomicBool,
) -> Result<()> {
    while generations.is_none_or(|limit| sim.generation() < limit) {
        if shutdown.load(Ordering::SeqCst) {
            tracing::info!(generation = sim.generation(), "Shutdown requested");
            break;
        }
        let started = Instant::now();
        let stats = sim.advance()?;
        metrics.record_generation(started.elapsed(), stats.alive, stats.species);
        recorder.record(sim, &stats)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lif_core::config::{AppConfig, WorldConfig};
    use lif_io::{HistoryLogger, StatsWriter};

    fn setup() -> (Simulation, Recorder<Vec<u8>>) {
        let config = AppConfig {
            world: WorldConfig {
                width: 12,
                height: 12,
                seed: Some(21),
                ..Default::default()
            },
            ..Default::default()
        };
        let sim = Simulation::new(config.clone()).unwrap();
        let recorder = Recorder::new(
            StatsWriter::new(Vec::new()),
            HistoryLogger::new_dummy(),
            &config,
        );
        (sim, recorder)
    }

    #[test]
    fn test_runs_requested_generations() {
        let (mut sim, mut recorder) = setup();
        let reached = run_headless(&mut sim, &mut recorder, Some(15), &AtomicBool::new(false))
            .unwrap();
        assert_eq!(reached, 15);
        assert_eq!(recorder.rows(), 16);
    }

    #[test]
    fn test_shutdown_stops_before_first_generation() {
        let (mut sim, mut recorder) = setup();
        let reached = run_headless(&mut sim, &mut recorder, None, &AtomicBool::new(true)).unwrap();
        assert_eq!(reached, 0);
        assert_eq!(recorder.rows(), 1);
    }
}
