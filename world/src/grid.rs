//! Dense cell storage backing a level.

use ghost_catcher_core::{grid_index, CellState, GridView, Position};

/// Fixed-size grid of cell states.
///
/// Every operation is total: reads outside the grid return
/// [`CellState::Empty`] and writes outside the grid are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<CellState>,
}

impl Grid {
    /// Creates an empty grid with the provided dimensions.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![CellState::Empty; capacity],
        }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the position lies inside the grid.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.index(position).is_some()
    }

    /// Returns the state of the cell, or [`CellState::Empty`] when out of bounds.
    #[must_use]
    pub fn get(&self, position: Position) -> CellState {
        self.view().get(position)
    }

    /// Overwrites the cell when it lies inside the grid.
    pub fn set(&mut self, position: Position, state: CellState) {
        if let Some(index) = self.index(position) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = state;
            }
        }
    }

    /// Returns every cell to [`CellState::Empty`].
    pub fn reset(&mut self) {
        self.cells.fill(CellState::Empty);
    }

    /// Reports whether a talisman may be placed on the cell.
    #[must_use]
    pub fn is_valid_placement(&self, position: Position) -> bool {
        self.view().is_valid_placement(position)
    }

    /// Borrows the grid as a read-only view for systems.
    #[must_use]
    pub fn view(&self) -> GridView<'_> {
        GridView::new(&self.cells, self.columns, self.rows)
    }

    fn index(&self, position: Position) -> Option<usize> {
        grid_index(position, self.columns, self.rows)
    }
}
