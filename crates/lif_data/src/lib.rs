pub mod data;

pub use data::cell::{Cell, CellView, LineageId};
pub use data::event::GenerationEvent;
pub use data::history::LiveEvent;
pub use data::stasis::{HabitabilityPolicy, StasisSet, STASIS_DOMAIN};
pub use data::stats::{EventTally, PopulationStats, StatsRecord};
