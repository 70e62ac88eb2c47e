use crate::recorder::Recorder;
use anyhow::Result;
use lif_core::config::AppConfig;
use lif_core::{Metrics, Simulation};
use lif_data::PopulationStats;
use lif_tui::DisplayMode;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::Instant;

pub struct App<W: Write = BufWriter<File>> {
    pub running: bool,
    pub paused: bool,
    pub sim: Simulation,
    /// Configuration a restart starts from; rule parameters come from `sim`.
    pub config: AppConfig,
    pub recorder: Recorder<W>,
    pub metrics: Metrics,
    pub stats: PopulationStats,
    pub display_mode: DisplayMode,
    pub empty_digits: bool,
    pub time_scale: f64,
    pub restarts: u64,
    pub generation_limit: Option<u64>,
}

impl App {
    pub fn new(config: AppConfig, generation_limit: Option<u64>) -> Result<Self> {
        let recorder = Recorder::open(&config)?;
        Self::with_recorder(config, recorder, generation_limit)
    }
}

impl<W: Write> App<W> {
    pub fn with_recorder(
        config: AppConfig,
        mut recorder: Recorder<W>,
        generation_limit: Option<u64>,
    ) -> Result<Self> {
        let sim = Simulation::new(config.clone())?;
        let stats = recorder.begin(&sim)?;
        Ok(Self {
            running: true,
            paused: false,
            sim,
            config,
            recorder,
            metrics: Metrics::new(),
            stats,
            display_mode: DisplayMode::default(),
            empty_digits: false,
            time_scale: 1.0,
            restarts: 0,
            generation_limit,
        })
    }

    /// Advances one generation and records it.
    pub fn step(&mut self) -> Result<()> {
        let started = Instant::now();
        let stats = self.sim.advance()?;
        self.metrics
            .record_generation(started.elapsed(), stats.alive, stats.species);
        self.recorder.record(&mut self.sim, &stats)?;
        self.stats = stats;

        if self
            .generation_limit
            .is_some_and(|limit| self.sim.generation() >= limit)
        {
            self.running = false;
        }
        Ok(())
    }

    /// Starts over from an empty lattice with the current rule parameters.
    ///
    /// A fixed seed is offset by the restart count, so every restart of a
    /// seeded run is a different but reproducible world. The CSV keeps
    /// growing and the generation counter starts again at 0.
    pub fn restart(&mut self) -> Result<()> {
        self.restarts += 1;
        let mut config = self.config.clone();
        config.evolution = self.sim.evolution().clone();
        config.world.seed = config
            .world
            .seed
            .map(|seed| seed.wrapping_add(self.restarts));

        self.sim = Simulation::new(config)?;
        self.stats = self.recorder.begin(&self.sim)?;
        self.metrics.reset();
        tracing::info!(restarts = self.restarts, "Simulation restarted");
        Ok(())
    }

    pub fn shutdown(&mut self) -> Result<()> {
        self.recorder.finish(&self.sim)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lif_core::config::WorldConfig;
    use lif_io::{HistoryLogger, StatsWriter};

    pub(crate) fn test_app(limit: Option<u64>) -> App<Vec<u8>> {
        let config = AppConfig {
            world: WorldConfig {
                width: 10,
                height: 8,
                seed: Some(4),
                ..Default::default()
            },
            ..Default::default()
        };
        let recorder = Recorder::new(
            StatsWriter::new(Vec::new()),
            HistoryLogger::new_dummy(),
            &config,
        );
        App::with_recorder(config, recorder, limit).unwrap()
    }

    #[test]
    fn test_step_updates_stats() {
        let mut app = test_app(None);
        app.step().unwrap();
        assert_eq!(app.stats.generation, 1);
        assert_eq!(app.metrics.generation_count(), 1);
        assert_eq!(app.recorder.rows(), 2);
    }

    #[test]
    fn test_generation_limit_stops_app() {
        let mut app = test_app(Some(2));
        app.step().unwrap();
        assert!(app.running);
        app.step().unwrap();
        assert!(!app.running);
    }

    #[test]
    fn test_restart_resets_generation_keeps_csv() {
        let mut app = test_app(None);
        for _ in 0..3 {
            app.step().unwrap();
        }
        app.restart().unwrap();
        assert_eq!(app.sim.generation(), 0);
        assert_eq!(app.sim.seed(), 5);
        assert_eq!(app.recorder.rows(), 5);
    }
}
