use lif_data::Cell;
use serde::{Deserialize, Serialize};

/// Flat lattice of cells indexed by `y * width + x`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Cell>,
}

impl Grid {
    /// A lattice of empty cells stable under every neighbor count.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::empty(); width * height],
        }
    }

    #[inline(always)]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn get(&self, loc: usize) -> &Cell {
        &self.cells[loc]
    }

    pub fn get_cell(&self, x: usize, y: usize) -> &Cell {
        &self.cells[self.index(x, y)]
    }

    pub fn set(&mut self, loc: usize, cell: Cell) {
        self.cells[loc] = cell;
    }

    #[inline]
    pub fn is_alive(&self, loc: usize) -> bool {
        self.cells[loc].is_alive()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Cells of row `y`.
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lif_data::{LineageId, StasisSet};

    #[test]
    fn test_new_grid_is_empty_and_fully_stable() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.len(), 12);
        assert_eq!(grid.alive_count(), 0);
        assert!(grid.iter().all(|c| c.stasis() == StasisSet::FULL));
    }

    #[test]
    fn test_set_and_row() {
        let mut grid = Grid::new(4, 3);
        let loc = grid.index(2, 1);
        grid.set(
            loc,
            Cell::Alive {
                stasis: StasisSet::EMPTY,
                lineage: LineageId(1),
            },
        );
        assert!(grid.is_alive(loc));
        assert!(grid.get_cell(2, 1).is_alive());
        assert_eq!(grid.row(1).iter().filter(|c| c.is_alive()).count(), 1);
        assert_eq!(grid.alive_count(), 1);
    }
}
