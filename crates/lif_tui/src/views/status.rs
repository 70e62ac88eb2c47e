use crate::renderer::DisplayMode;
use lif_core::config::EvolutionConfig;
use lif_data::PopulationStats;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

/// Entries shown in the genotype and lineage rankings.
const TOP_ENTRIES: usize = 8;

pub struct StatusWidget<'a> {
    pub stats: &'a PopulationStats,
    pub evolution: &'a EvolutionConfig,
    pub mode: DisplayMode,
    pub paused: bool,
}

fn format_mean(mean: Option<f64>) -> String {
    mean.map_or_else(|| "-".to_string(), |m| format!("{m:.2}"))
}

impl<'a> StatusWidget<'a> {
    pub fn mode_line(&self) -> String {
        format!(
            "Lif/{}  Disp: {}  Exchange prob.: {:.2e}  Fit. cost: {:.2e}{}",
            self.evolution.goh_policy,
            self.mode.label(),
            self.evolution.exchange_r,
            self.evolution.fit_cost,
            if self.paused { "  [PAUSED]" } else { "" }
        )
    }

    pub fn genotype_line(&self) -> String {
        self.stats
            .top_genotypes(TOP_ENTRIES)
            .iter()
            .map(|(set, n)| format!("{set}:{n}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn lineage_line(&self) -> String {
        self.stats
            .top_lineages(TOP_ENTRIES)
            .iter()
            .map(|(id, n)| format!("{}:{n}", id.letter()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<'a> Widget for StatusWidget<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let block = Block::default().borders(Borders::ALL).title("Population");
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1); 6])
            .split(inner);

        Paragraph::new(self.mode_line())
            .style(Style::default().add_modifier(Modifier::BOLD))
            .render(rows[0], buf);

        let events = &self.stats.events;
        Paragraph::new(format!(
            "Generation: {}  Alive: {}  Species: {}",
            self.stats.generation, self.stats.alive, self.stats.species
        ))
        .style(Style::default().fg(Color::Cyan))
        .render(rows[1], buf);

        Paragraph::new(format!(
            "Alive mean #(stasis): {}  Empty mean #(stasis): {}",
            format_mean(self.stats.alive_mean_stasis),
            format_mean(self.stats.empty_mean_stasis)
        ))
        .render(rows[2], buf);

        Paragraph::new(format!(
            "Births: {}  Deaths: {}  Settled: {}  Exchanged: {}/{}",
            events.births,
            events.deaths,
            events.settlements,
            events.exchanges_conspecific,
            events.exchanges_interspecific
        ))
        .style(Style::default().fg(Color::Yellow))
        .render(rows[3], buf);

        Paragraph::new(format!("Fitness: {}", self.genotype_line())).render(rows[4], buf);
        Paragraph::new(format!("Offspring: {}", self.lineage_line()))
            .style(Style::default().fg(Color::Green))
            .render(rows[5], buf);
    }
}
