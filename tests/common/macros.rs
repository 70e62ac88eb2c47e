/// Asserts the neighbor index matches a brute-force recount.
#[macro_export]
macro_rules! assert_index_exact {
    ($sim:expr) => {
        let rebuilt = lif_core::NeighborIndex::rebuild($sim.grid(), $sim.topology());
        assert_eq!(
            $sim.neighbor_index(),
            &rebuilt,
            "Neighbor index diverged at generation {}",
            $sim.generation()
        );
    };
}

/// Asserts the cell at `(x, y)` and the event that produced it.
#[macro_export]
macro_rules! assert_cell {
    ($sim:expr, $x:expr, $y:expr, $cell:expr, $event:expr) => {
        let view = $sim.cell_view($x, $y);
        assert_eq!(
            $sim.grid().get_cell($x, $y),
            &$cell,
            "Unexpected cell at ({}, {})",
            $x,
            $y
        );
        assert_eq!(view.event, $event, "Unexpected event at ({}, {})", $x, $y);
    };
}

/// Asserts the number of alive cells.
#[macro_export]
macro_rules! assert_alive {
    ($sim:expr, $count:expr) => {
        assert_eq!($sim.grid().alive_count(), $count, "Alive count mismatch");
    };
}
