use crate::app::state::App;
use lif_tui::{GridWidget, StatusWidget};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;
use std::io::Write;

/// Status rows plus borders.
const STATUS_HEIGHT: u16 = 8;

impl<W: Write> App<W> {
    pub fn draw(&self, f: &mut Frame) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(STATUS_HEIGHT), Constraint::Min(0)])
            .split(f.area());

        f.render_widget(
            StatusWidget {
                stats: &self.stats,
                evolution: self.sim.evolution(),
                mode: self.display_mode,
                paused: self.paused,
            },
            layout[0],
        );
        f.render_widget(
            GridWidget::new(&self.sim, self.display_mode, self.empty_digits),
            layout[1],
        );
    }
}
