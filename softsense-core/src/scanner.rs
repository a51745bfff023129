//! Row-driven, column-sensed matrix scanner
//!
//! Each row is pulled LOW in turn while every other row is held HIGH, and
//! all columns are sampled while that row is the only active driver. A
//! column reads LOW only through a closed contact on the active row, so
//! the sampled level maps directly onto the cell at `(row, col)`.

use embedded_hal::delay::DelayNs;
use softsense_hal::{InputPin, OutputPin};

use crate::grid::{CellState, GridState};

/// Matrix scanner owning the row and column lines
pub struct MatrixScanner<R, C, const ROWS: usize, const COLS: usize> {
    rows: [R; ROWS],
    cols: [C; COLS],
    /// Wait after asserting a row, in microseconds (0 = read immediately)
    settle_us: u32,
    state: GridState<ROWS, COLS>,
}

impl<R, C, const ROWS: usize, const COLS: usize> MatrixScanner<R, C, ROWS, COLS>
where
    R: OutputPin,
    C: InputPin,
{
    /// Take ownership of the lines and park every row at the inactive level
    ///
    /// Column inputs must already be configured with pull-ups.
    pub fn new(mut rows: [R; ROWS], cols: [C; COLS]) -> Self {
        for row in rows.iter_mut() {
            row.set_high();
        }

        Self {
            rows,
            cols,
            settle_us: 0,
            state: GridState::new(),
        }
    }

    /// Wait `settle_us` after asserting each row before sampling columns
    pub fn with_settle_us(mut self, settle_us: u32) -> Self {
        self.settle_us = settle_us;
        self
    }

    /// Scan every row once and return the updated state
    ///
    /// Rows are visited in index order and each is restored HIGH before
    /// the next one is asserted, so at most one row is ever active.
    pub fn scan<D: DelayNs>(&mut self, delay: &mut D) -> &GridState<ROWS, COLS> {
        for (r, row) in self.rows.iter_mut().enumerate() {
            row.set_low();
            if self.settle_us > 0 {
                delay.delay_us(self.settle_us);
            }

            for (c, col) in self.cols.iter().enumerate() {
                self.state
                    .set(r, c, CellState::from_column_high(col.is_high()));
            }

            row.set_high();
        }

        &self.state
    }

    /// State from the most recent scan
    pub fn state(&self) -> &GridState<ROWS, COLS> {
        &self.state
    }

    /// Give the lines back
    pub fn release(self) -> ([R; ROWS], [C; COLS]) {
        (self.rows, self.cols)
    }
}
