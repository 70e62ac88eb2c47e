pub mod input;
pub mod render;
pub mod state;

pub use state::App;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use lif_tui::Tui;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

impl<W: Write> App<W> {
    /// Drives the interactive loop until quit, Ctrl-C or the generation limit.
    /// Outputs are finalized even when the loop fails.
    pub async fn run(&mut self, tui: &mut Tui) -> Result<()> {
        let outcome = self.run_loop(tui).await;
        self.close(outcome)
    }

    async fn run_loop(&mut self, tui: &mut Tui) -> Result<()> {
        let mut last_tick = Instant::now();
        let tick_rate = Duration::from_secs_f64(1.0 / self.config.target_fps as f64);

        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            tokio::signal::ctrl_c().await.ok();
            shutdown_clone.store(true, Ordering::SeqCst);
        });

        while self.running && !shutdown.load(Ordering::SeqCst) {
            tui.terminal.draw(|f| self.draw(f))?;

            // Short poll keeps the loop responsive without spinning.
            while event::poll(Duration::from_millis(1))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key)?;
                    }
                }
            }

            let effective_tick_rate = tick_rate.div_f64(self.time_scale);
            if last_tick.elapsed() >= effective_tick_rate {
                if !self.paused && self.running {
                    self.step()?;
                }
                last_tick = Instant::now();
            } else {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        }
        Ok(())
    }

    /// Finalizes outputs and reports the first failure: the loop's, else the
    /// shutdown's.
    pub fn close(&mut self, outcome: Result<()>) -> Result<()> {
        let finished = self.shutdown();
        if let Err(e) = &outcome {
            tracing::error!(error = %e, "Interactive loop failed");
        }
        outcome.and(finished)
    }
}
