//! Grid dimensions and per-cell state
//!
//! The state is allocated once and overwritten in place on every scan.
//! Cells are addressed either by `(row, col)` or by the flat row-major
//! index `row * COLS + col` used on the wire.

pub use softsense_protocol::{CellState, CELL_COUNT, COL_COUNT, ROW_COUNT};

/// State of the sensor grid
pub type TouchGrid = GridState<ROW_COUNT, COL_COUNT>;

/// Per-cell touch state of a `ROWS` x `COLS` matrix
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GridState<const ROWS: usize, const COLS: usize> {
    cells: [[CellState; COLS]; ROWS],
}

impl<const ROWS: usize, const COLS: usize> Default for GridState<ROWS, COLS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const ROWS: usize, const COLS: usize> GridState<ROWS, COLS> {
    /// Number of cells in the grid
    pub const CELLS: usize = ROWS * COLS;

    /// Create a grid with every cell untouched
    pub const fn new() -> Self {
        Self {
            cells: [[CellState::Untouched; COLS]; ROWS],
        }
    }

    /// Flat row-major index of `(row, col)`
    pub const fn index(row: usize, col: usize) -> usize {
        row * COLS + col
    }

    /// `(row, col)` of a flat index
    pub const fn position(index: usize) -> (usize, usize) {
        (index / COLS, index % COLS)
    }

    /// State of the cell at `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> Option<CellState> {
        self.cells.get(row)?.get(col).copied()
    }

    /// State of the cell at a flat index
    pub fn get_index(&self, index: usize) -> Option<CellState> {
        if index >= Self::CELLS {
            return None;
        }
        let (row, col) = Self::position(index);
        self.get(row, col)
    }

    /// Overwrite the cell at `(row, col)`
    ///
    /// Out-of-range coordinates are ignored.
    pub fn set(&mut self, row: usize, col: usize, state: CellState) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = state;
        }
    }

    /// Reset every cell to untouched
    pub fn clear(&mut self) {
        for row in self.cells.iter_mut() {
            row.fill(CellState::Untouched);
        }
    }

    /// Cells in row-major (wire) order
    pub fn iter(&self) -> impl Iterator<Item = CellState> + '_ {
        self.cells.iter().flat_map(|row| row.iter().copied())
    }

    /// Number of touched cells
    pub fn touched_count(&self) -> usize {
        self.iter().filter(|cell| cell.is_touched()).count()
    }

    /// Copy every cell from `other`
    pub fn copy_from(&mut self, other: &Self) {
        self.cells = other.cells;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_untouched() {
        let grid = TouchGrid::new();
        assert_eq!(grid.iter().count(), CELL_COUNT);
        assert!(grid.iter().all(|c| c == CellState::Untouched));
        assert_eq!(grid.touched_count(), 0);
    }

    #[test]
    fn test_row_major_index() {
        assert_eq!(TouchGrid::index(0, 0), 0);
        assert_eq!(TouchGrid::index(2, 3), 13);
        assert_eq!(TouchGrid::index(4, 4), 24);
        assert_eq!(TouchGrid::position(13), (2, 3));
    }

    #[test]
    fn test_set_and_iter_order() {
        let mut grid = TouchGrid::new();
        grid.set(2, 3, CellState::Touched);

        let touched: Vec<usize> = grid
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_touched())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(touched, [13]);
        assert_eq!(grid.get_index(13), Some(CellState::Touched));
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut grid = GridState::<2, 2>::new();
        grid.set(2, 0, CellState::Touched);
        grid.set(0, 2, CellState::Touched);

        assert_eq!(grid.touched_count(), 0);
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get_index(4), None);
    }

    #[test]
    fn test_clear() {
        let mut grid = GridState::<2, 3>::new();
        grid.set(1, 2, CellState::Touched);
        grid.set(0, 0, CellState::Touched);
        assert_eq!(grid.touched_count(), 2);

        grid.clear();
        assert_eq!(grid.touched_count(), 0);
    }
}
