use lif_core::Simulation;
use lif_data::{CellView, GenerationEvent, LineageId};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Widget};

/// What the glyph of a live cell shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayMode {
    /// Size of the stasis set.
    #[default]
    Stasis,
    /// Letter derived from the lineage id.
    Lineage,
    /// Largest stasis member.
    Max,
    /// Smallest stasis member.
    Min,
}

impl DisplayMode {
    pub fn next(self) -> Self {
        match self {
            DisplayMode::Stasis => DisplayMode::Lineage,
            DisplayMode::Lineage => DisplayMode::Max,
            DisplayMode::Max => DisplayMode::Min,
            DisplayMode::Min => DisplayMode::Stasis,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DisplayMode::Stasis => "stasis",
            DisplayMode::Lineage => "lineage",
            DisplayMode::Max => "max",
            DisplayMode::Min => "min",
        }
    }
}

pub struct GridWidget<'a> {
    sim: &'a Simulation,
    mode: DisplayMode,
    empty_digits: bool,
}

impl<'a> GridWidget<'a> {
    pub fn new(sim: &'a Simulation, mode: DisplayMode, empty_digits: bool) -> Self {
        Self {
            sim,
            mode,
            empty_digits,
        }
    }

    pub fn get_inner_area(area: Rect) -> Rect {
        Block::default().borders(Borders::ALL).inner(area)
    }

    fn digit(n: Option<u8>) -> char {
        n.and_then(|d| char::from_digit(d as u32, 10)).unwrap_or('x')
    }

    /// Glyph for a location. Empty cells are blank unless `empty_digits`
    /// asks for their stasis size.
    pub fn symbol_for(view: &CellView, mode: DisplayMode, empty_digits: bool) -> char {
        if !view.alive {
            return if empty_digits {
                Self::digit(Some(view.stasis.count() as u8))
            } else {
                ' '
            };
        }
        match (mode, view.lineage) {
            (DisplayMode::Lineage, Some(lineage)) => lineage.letter(),
            (DisplayMode::Max, _) => Self::digit(view.stasis.max()),
            (DisplayMode::Min, _) => Self::digit(view.stasis.min()),
            _ => Self::digit(Some(view.stasis.count() as u8)),
        }
    }

    pub fn color_for_lineage(lineage: LineageId) -> Color {
        // Index 0 is the terminal's black.
        Color::Indexed((lineage.get() % 255) as u8 + 1)
    }

    pub fn style_for(view: &CellView) -> Style {
        let Some(lineage) = view.lineage else {
            return Style::default().fg(Color::DarkGray);
        };
        let style = Style::default().fg(Self::color_for_lineage(lineage));
        match view.event {
            GenerationEvent::Settlement => style.add_modifier(Modifier::BOLD),
            e if e.is_exchange() => style.add_modifier(Modifier::REVERSED),
            _ => style,
        }
    }
}

impl<'a> Widget for GridWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(format!("Lif (Generation: {})", self.sim.generation()))
            .borders(Borders::ALL)
            .render(area, buf);

        let inner = Self::get_inner_area(area);
        let grid = self.sim.grid();
        let cols = grid.width.min(inner.width as usize);
        let rows = grid.height.min(inner.height as usize);

        for y in 0..rows {
            for x in 0..cols {
                let view = self.sim.cell_view(x, y);
                let cell = &mut buf[(inner.x + x as u16, inner.y + y as u16)];
                cell.set_char(Self::symbol_for(&view, self.mode, self.empty_digits));
                cell.set_style(Self::style_for(&view));
            }
        }
    }
}
