//! Line encoding for grid reports
//!
//! Line format:
//! - one digit per cell, `0` touched or `1` untouched, in row-major order
//! - cells separated by a single comma, no trailing comma
//! - terminated by a single `\n`
//!
//! A report of `n` cells is therefore always `2n` bytes long.

use crate::cell::CellState;
use crate::{CELL_COUNT, SEPARATOR, TERMINATOR};

/// Maximum encoded line size for the sensor grid (digits + commas + newline)
pub const MAX_LINE_LEN: usize = line_len(CELL_COUNT);

/// Errors that can occur while encoding or decoding a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Buffer too small for encoding
    BufferTooSmall,
    /// Line carried no tokens
    Empty,
    /// Token count does not match the grid
    WrongCellCount { expected: usize, found: usize },
    /// Token is not a single `0` or `1`
    InvalidToken { index: usize },
    /// Line exceeded the decoder buffer before a terminator arrived
    LineTooLong,
    /// Line bytes are not valid UTF-8
    InvalidUtf8,
}

/// Encoded length of a report with `cells` cells, terminator included
pub const fn line_len(cells: usize) -> usize {
    if cells == 0 {
        1
    } else {
        cells * 2
    }
}

/// Encode cells into `buffer` as one report line
///
/// Returns the number of bytes written. Cells are written in iteration
/// order, so callers pass them row-major.
pub fn encode_line<I>(cells: I, buffer: &mut [u8]) -> Result<usize, LineError>
where
    I: IntoIterator<Item = CellState>,
{
    let mut len = 0;
    let mut push = |byte: u8, len: &mut usize| -> Result<(), LineError> {
        let slot = buffer.get_mut(*len).ok_or(LineError::BufferTooSmall)?;
        *slot = byte;
        *len += 1;
        Ok(())
    };

    for (i, cell) in cells.into_iter().enumerate() {
        if i > 0 {
            push(SEPARATOR, &mut len)?;
        }
        push(cell.to_byte(), &mut len)?;
    }
    push(TERMINATOR, &mut len)?;

    Ok(len)
}
