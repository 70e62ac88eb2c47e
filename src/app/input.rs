use crate::app::state::App;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use lif_core::config::EvolutionConfig;
use lif_data::HabitabilityPolicy;
use std::io::Write;

/// Factor applied by the arrow keys.
const TWEAK: f64 = 0.9;

impl<W: Write> App<W> {
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char(' ') => self.display_mode = self.display_mode.next(),
            KeyCode::Char('p') => self.empty_digits = !self.empty_digits,
            KeyCode::Char('s') => self.paused = !self.paused,
            KeyCode::Char('r') => self.restart()?,
            KeyCode::Char('1') => self.tweak(|e| e.goh_policy = HabitabilityPolicy::Min),
            KeyCode::Char('2') => self.tweak(|e| e.goh_policy = HabitabilityPolicy::Random),
            KeyCode::Char('3') => self.tweak(|e| e.goh_policy = HabitabilityPolicy::Max),
            KeyCode::Up => self.tweak(|e| e.fit_cost /= TWEAK),
            KeyCode::Down => self.tweak(|e| e.fit_cost *= TWEAK),
            KeyCode::Left => self.tweak(|e| e.exchange_r *= TWEAK),
            KeyCode::Right => self.tweak(|e| e.exchange_r = (e.exchange_r / TWEAK).min(1.0)),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.time_scale = (self.time_scale * 2.0).min(16.0)
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                self.time_scale = (self.time_scale / 2.0).max(0.125)
            }
            _ => {}
        }
        Ok(())
    }

    /// Applies a live parameter change. A change the configuration rejects
    /// leaves the previous parameters in place.
    fn tweak<F>(&mut self, modifier: F)
    where
        F: FnOnce(&mut EvolutionConfig),
    {
        let mut evolution = self.sim.evolution().clone();
        modifier(&mut evolution);
        if let Err(e) = self.sim.set_evolution(evolution) {
            tracing::warn!(error = %e, "Rejected parameter change");
        }
    }
}
