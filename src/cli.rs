use clap::Parser;
use lif_core::config::AppConfig;
use lif_data::HabitabilityPolicy;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "A Game of Life where every cell carries its own rule", long_about = None)]
pub struct Args {
    /// Lattice width in cells
    pub width: Option<u16>,

    /// Lattice height in cells
    pub height: Option<u16>,

    /// Mode to run the simulation in
    #[arg(short, long, value_enum, default_value = "standard")]
    pub mode: Mode,

    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Per-bit inclusion probability of a de-novo stasis set
    #[arg(long)]
    pub alive_p: Option<f64>,

    /// Per-bit mutation probability
    #[arg(long)]
    pub mut_p: Option<f64>,

    /// Exchange probability of a stable live cell
    #[arg(long)]
    pub exchange_r: Option<f64>,

    /// Habitability-loss probability of a stable empty cell
    #[arg(long)]
    pub goh_r: Option<f64>,

    /// Member removed on habitability loss (max, min, random)
    #[arg(long)]
    pub pick: Option<HabitabilityPolicy>,

    /// Fitness cost per stasis member
    #[arg(long)]
    pub fit_cost: Option<f64>,

    /// Use a bounded lattice instead of a torus
    #[arg(long)]
    pub nontoroidal: bool,

    /// Fixed RNG seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// CSV file receiving one statistics row per generation
    #[arg(short, long)]
    pub output: Option<String>,

    /// Stop after this many generations
    #[arg(short, long)]
    pub generations: Option<u64>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Standard,
    Headless,
}

impl Args {
    /// Layers the command-line flags over a loaded configuration.
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(width) = self.width {
            config.world.width = width;
        }
        if let Some(height) = self.height {
            config.world.height = height;
        }
        if self.nontoroidal {
            config.world.toroidal = false;
        }
        if self.seed.is_some() {
            config.world.seed = self.seed;
        }

        let evolution = &mut config.evolution;
        if let Some(p) = self.alive_p {
            evolution.alive_p = p;
        }
        if let Some(p) = self.mut_p {
            evolution.mut_p = p;
        }
        if let Some(r) = self.exchange_r {
            evolution.exchange_r = r;
        }
        if let Some(r) = self.goh_r {
            evolution.goh_r = r;
        }
        if let Some(policy) = self.pick {
            evolution.goh_policy = policy;
        }
        if let Some(cost) = self.fit_cost {
            evolution.fit_cost = cost;
        }

        if let Some(ref path) = self.output {
            config.output.stats_path = path.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "lif",
            "40",
            "20",
            "--pick",
            "random",
            "--fit-cost",
            "2.5",
            "--nontoroidal",
            "--seed",
            "7",
            "--output",
            "out.csv",
        ]);
        let mut config = AppConfig::default();
        args.apply_to(&mut config);
        assert_eq!((config.world.width, config.world.height), (40, 20));
        assert!(!config.world.toroidal);
        assert_eq!(config.world.seed, Some(7));
        assert_eq!(config.evolution.goh_policy, HabitabilityPolicy::Random);
        assert_eq!(config.evolution.fit_cost, 2.5);
        assert_eq!(config.output.stats_path, "out.csv");
        assert_eq!(args.mode, Mode::Standard);
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let args = Args::parse_from(["lif", "--mode", "headless"]);
        let mut config = AppConfig::default();
        args.apply_to(&mut config);
        assert_eq!(config, AppConfig::default());
        assert_eq!(args.mode, Mode::Headless);
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        assert!(Args::try_parse_from(["lif", "--pick", "median"]).is_err());
    }
}
