use anyhow::{Context, Result};
use clap::Parser;
use lif_core::config::AppConfig;
use lif_core::{init_logging, Simulation};
use lif_lib::app::App;
use lif_lib::cli::{Args, Mode};
use lif_lib::headless::run_headless;
use lif_lib::recorder::Recorder;
use lif_tui::Tui;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

fn load_config(args: &Args) -> Result<AppConfig> {
    let path = Path::new(&args.config);
    let mut config = if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        AppConfig::from_toml(&content).with_context(|| format!("parsing {}", path.display()))?
    } else if args.config == "config.toml" {
        AppConfig::default()
    } else {
        anyhow::bail!("Config file {} not found", path.display());
    };
    args.apply_to(&mut config);
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    match args.mode {
        Mode::Headless => {
            init_logging();
            let mut sim = Simulation::new(config.clone())?;
            let mut recorder = Recorder::open(&config)?;

            let shutdown = Arc::new(AtomicBool::new(false));
            let shutdown_clone = shutdown.clone();
            tokio::spawn(async move {
                tokio::signal::ctrl_c().await.ok();
                shutdown_clone.store(true, Ordering::SeqCst);
            });

            let generations = args.generations;
            tokio::task::spawn_blocking(move || {
                run_headless(&mut sim, &mut recorder, generations, &shutdown)
            })
            .await??;
        }
        Mode::Standard => {
            let mut app = App::new(config, args.generations)?;

            let mut tui = Tui::new()?;
            tui.init()?;
            let res = app.run(&mut tui).await;
            tui.exit()?;

            if let Err(e) = res {
                eprintln!("Application error: {e:#}");
            }
        }
    }

    Ok(())
}
