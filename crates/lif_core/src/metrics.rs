//! Performance metrics collection for the simulation.
//!
//! Provides structured logging and throughput tracking for long headless
//! runs.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Generations between throughput log lines.
const LOG_EVERY: u64 = 1000;

/// Run-wide counters shared by the driver loops.
pub struct Metrics {
    generation_count: AtomicU64,
    alive_count: AtomicU64,
    species_count: AtomicU64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            generation_count: AtomicU64::new(0),
            alive_count: AtomicU64::new(0),
            species_count: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Records a completed generation with its duration.
    pub fn record_generation(&self, duration: Duration, alive: usize, species: usize) {
        let generation = self.generation_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.alive_count.store(alive as u64, Ordering::Relaxed);
        self.species_count.store(species as u64, Ordering::Relaxed);

        if generation.is_multiple_of(LOG_EVERY) {
            let elapsed = self.elapsed().as_secs_f64();
            let rate = if elapsed > 0.0 {
                generation as f64 / elapsed
            } else {
                0.0
            };
            tracing::info!(
                generation = generation,
                alive = alive,
                species = species,
                duration_us = duration.as_micros() as u64,
                generations_per_sec = rate,
                "Simulation throughput"
            );
        }
    }

    /// Forgets the count after a restart while keeping the clock.
    pub fn reset(&self) {
        self.generation_count.store(0, Ordering::Relaxed);
    }

    #[must_use]
    pub fn generation_count(&self) -> u64 {
        self.generation_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn alive_count(&self) -> u64 {
        self.alive_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn species_count(&self) -> u64 {
        self.species_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Initialize tracing subscriber for logging.
///
/// Honors `RUST_LOG` and falls back to `info`. Only headless runs call this,
/// since log lines would tear the terminal UI.
pub fn init_logging() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .ok();
}
