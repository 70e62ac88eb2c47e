//! Configuration management for simulation parameters.
//!
//! Strongly-typed configuration structures that map to the `config.toml`
//! file. Every field has a default matching the classic Lif setup, so a file
//! only needs to name what it changes.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. `config.toml` file (overrides defaults)
//! 3. Command line flags (applied by the binary)
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! width = 120
//! height = 60
//! toroidal = true
//! seed = 42
//!
//! [evolution]
//! mut_p = 0.001
//! goh_policy = "random"
//! fit_cost = 2.5
//! ```

use lif_data::HabitabilityPolicy;
use serde::{Deserialize, Serialize};

/// Lattice shape and run-wide switches.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub width: u16,
    pub height: u16,
    /// Wrap neighbor coordinates at the edges.
    pub toroidal: bool,
    /// Moore neighborhood radius; 1 gives the classic 8 neighbors.
    pub radius: u8,
    /// Fixed RNG seed. `None` draws a fresh seed at initialization.
    pub seed: Option<u64>,
    /// Recount the neighbor index from scratch after every generation, even
    /// in release builds.
    pub verify_index: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 80,
            toroidal: true,
            radius: 1,
            seed: None,
            verify_index: false,
        }
    }
}

/// Rates and costs of the transition rule.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Per-bit inclusion probability of a de-novo stasis set.
    pub alive_p: f64,
    /// Per-bit flip probability applied after settlement and exchange.
    pub mut_p: f64,
    /// Probability that a stable live cell recombines with a neighbor.
    pub exchange_r: f64,
    /// Probability that a stable empty cell loses a stasis member.
    pub goh_r: f64,
    pub goh_policy: HabitabilityPolicy,
    /// Settlement weight is `exp(-fit_cost * |stasis|)`.
    pub fit_cost: f64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            alive_p: 0.1,
            mut_p: 0.0001,
            exchange_r: 0.001,
            goh_r: 1.0,
            goh_policy: HabitabilityPolicy::Max,
            fit_cost: 5.0,
        }
    }
}

impl EvolutionConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, p) in [
            ("alive_p", self.alive_p),
            ("mut_p", self.mut_p),
            ("exchange_r", self.exchange_r),
            ("goh_r", self.goh_r),
        ] {
            anyhow::ensure!(
                p.is_finite() && (0.0..=1.0).contains(&p),
                "{name} must be in [0.0, 1.0] (got {p})"
            );
        }
        anyhow::ensure!(
            self.fit_cost.is_finite() && self.fit_cost >= 0.0,
            "fit_cost must be finite and non-negative (got {})",
            self.fit_cost
        );
        Ok(())
    }
}

/// Where the outer collaborators write their artifacts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub stats_path: String,
    pub log_dir: String,
    /// Generations between JSONL snapshots.
    pub snapshot_interval: u64,
    /// Generations between lineage registry prunes; 0 disables pruning.
    pub lineage_prune_interval: u64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            stats_path: "lif_stats.csv".to_string(),
            log_dir: "logs".to_string(),
            snapshot_interval: 100,
            lineage_prune_interval: 1000,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub evolution: EvolutionConfig,
    pub output: OutputConfig,
    pub target_fps: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            evolution: EvolutionConfig::default(),
            output: OutputConfig::default(),
            target_fps: 30,
        }
    }
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    ///
    /// # Validation Rules
    /// - Grid dimensions must be positive and reasonable (<= 1000)
    /// - Neighborhood radius must be 1..=3
    /// - Probabilities must be in [0.0, 1.0]; the fitness cost non-negative
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.world.width > 0, "Grid width must be positive");
        anyhow::ensure!(self.world.width <= 1000, "Grid width too large (max 1000)");
        anyhow::ensure!(self.world.height > 0, "Grid height must be positive");
        anyhow::ensure!(self.world.height <= 1000, "Grid height too large (max 1000)");
        anyhow::ensure!(
            (1..=3).contains(&self.world.radius),
            "Neighborhood radius must be in 1..=3"
        );

        self.evolution.validate()?;

        anyhow::ensure!(
            self.output.snapshot_interval > 0,
            "Snapshot interval must be positive"
        );
        anyhow::ensure!(self.target_fps > 0, "Target FPS must be positive");
        anyhow::ensure!(self.target_fps <= 240, "Target FPS too high (max 240)");

        Ok(())
    }

    /// Parses and validates a `config.toml` document.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Stable hash of everything that shapes the dynamics. Two runs with the
    /// same fingerprint and seed produce the same history.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(
            format!(
                "{}x{}:{}:{}",
                self.world.width, self.world.height, self.world.toroidal, self.world.radius
            )
            .as_bytes(),
        );
        hasher.update(format!("{:?}", self.evolution).as_bytes());
        hex::encode(hasher.finalize())
    }
}
