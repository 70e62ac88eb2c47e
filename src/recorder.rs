//! Writes what a run produces: the per-generation CSV, history snapshots and
//! the lineage registry.

use anyhow::{Context, Result};
use lif_core::config::{AppConfig, OutputConfig};
use lif_core::Simulation;
use lif_data::PopulationStats;
use lif_io::{save_registry, HistoryLogger, StatsWriter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

pub const REGISTRY_FILE: &str = "lineages.json.gz";

pub struct Recorder<W: Write> {
    stats: StatsWriter<W>,
    history: HistoryLogger,
    output: OutputConfig,
    fingerprint: String,
}

impl Recorder<BufWriter<File>> {
    /// Opens the files named by the output section.
    pub fn open(config: &AppConfig) -> Result<Self> {
        let stats = StatsWriter::create(&config.output.stats_path)
            .with_context(|| format!("creating {}", config.output.stats_path))?;
        let history = HistoryLogger::new_at(&config.output.log_dir)
            .with_context(|| format!("opening log dir {}", config.output.log_dir))?;
        Ok(Self::new(stats, history, config))
    }
}

impl<W: Write> Recorder<W> {
    pub fn new(stats: StatsWriter<W>, history: HistoryLogger, config: &AppConfig) -> Self {
        Self {
            stats,
            history,
            output: config.output.clone(),
            fingerprint: config.fingerprint(),
        }
    }

    /// Records the initial lattice of a (re)started simulation.
    pub fn begin(&mut self, sim: &Simulation) -> Result<PopulationStats> {
        let stats = sim.stats();
        self.stats.write_stats(&stats)?;
        self.history.log_snapshot(&stats, &self.fingerprint)?;
        Ok(stats)
    }

    /// Records a freshly advanced generation and prunes the registry when due.
    pub fn record(&mut self, sim: &mut Simulation, stats: &PopulationStats) -> Result<()> {
        self.stats.write_stats(stats)?;
        let generation = stats.generation;
        if generation.is_multiple_of(self.output.snapshot_interval) {
            self.history.log_snapshot(stats, &self.fingerprint)?;
        }
        self.history.log_extinctions(
            generation,
            sim.last_extinctions(),
            sim.lineage_registry(),
        )?;
        let prune = self.output.lineage_prune_interval;
        if prune > 0 && generation.is_multiple_of(prune) {
            sim.prune_lineages();
        }
        Ok(())
    }

    /// Flushes the CSV and stores the registry next to the history log.
    pub fn finish(&mut self, sim: &Simulation) -> Result<()> {
        self.stats.flush()?;
        if let Some(path) = self.registry_path() {
            save_registry(sim.lineage_registry(), &path)
                .with_context(|| format!("saving {}", path.display()))?;
            tracing::info!(
                path = %path.display(),
                lineages = sim.lineage_registry().len(),
                "Lineage registry saved"
            );
        }
        Ok(())
    }

    /// `None` when history goes nowhere.
    pub fn registry_path(&self) -> Option<PathBuf> {
        let dir = self.history.log_dir();
        (!dir.as_os_str().is_empty()).then(|| dir.join(REGISTRY_FILE))
    }

    pub fn rows(&self) -> u64 {
        self.stats.rows()
    }

    pub fn history(&self) -> &HistoryLogger {
        &self.history
    }

    pub fn into_stats_writer(self) -> StatsWriter<W> {
        self.stats
    }
}
