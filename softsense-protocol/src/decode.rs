//! Host-side decoding of grid report lines.
//!
//! [`LineDecoder`] splits a raw serial byte stream into lines and
//! [`GridFrame`] validates one line and rebuilds the grid from it. A line
//! is accepted only if it carries exactly one `0`/`1` token per cell.

use core::fmt;

use heapless::{String, Vec};

use crate::cell::CellState;
use crate::line::{LineError, MAX_LINE_LEN};
use crate::{COL_COUNT, ROW_COUNT, SEPARATOR, TERMINATOR};

/// Splits an incoming byte stream on `\n`
///
/// Bytes are accumulated until the terminator. A line that outgrows the
/// buffer is dropped in full and reported once as [`LineError::LineTooLong`]
/// when its terminator finally arrives, so the decoder resynchronises on
/// the next line.
#[derive(Debug, Clone, Default)]
pub struct LineDecoder<const N: usize = MAX_LINE_LEN> {
    buffer: Vec<u8, N>,
    overflowed: bool,
}

impl<const N: usize> LineDecoder<N> {
    /// Create a new line decoder
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflowed: false,
        }
    }

    /// Reset the decoder state, dropping any partial line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }

    /// Number of bytes buffered for the current partial line
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Feed a single byte to the decoder
    ///
    /// Returns `Ok(Some(line))` when a terminator completes a line (without
    /// the terminator), `Ok(None)` when more bytes are needed, or `Err` for
    /// an overlong or non-UTF-8 line.
    pub fn feed(&mut self, byte: u8) -> Result<Option<String<N>>, LineError> {
        if byte == TERMINATOR {
            if self.overflowed {
                self.reset();
                return Err(LineError::LineTooLong);
            }
            let bytes = core::mem::take(&mut self.buffer);
            return String::from_utf8(bytes)
                .map(Some)
                .map_err(|_| LineError::InvalidUtf8);
        }

        if !self.overflowed && self.buffer.push(byte).is_err() {
            self.overflowed = true;
            self.buffer.clear();
        }
        Ok(None)
    }

    /// Feed multiple bytes to the decoder
    ///
    /// Returns the first complete line found, if any, together with the
    /// number of bytes consumed. Bytes after that line are left to the
    /// caller.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> (usize, Result<Option<String<N>>, LineError>) {
        for (i, &byte) in bytes.iter().enumerate() {
            match self.feed(byte) {
                Ok(None) => {}
                other => return (i + 1, other),
            }
        }
        (bytes.len(), Ok(None))
    }
}

/// A validated grid report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GridFrame<const ROWS: usize = ROW_COUNT, const COLS: usize = COL_COUNT> {
    cells: [[CellState; COLS]; ROWS],
}

impl<const ROWS: usize, const COLS: usize> Default for GridFrame<ROWS, COLS> {
    fn default() -> Self {
        Self {
            cells: [[CellState::Untouched; COLS]; ROWS],
        }
    }
}

impl<const ROWS: usize, const COLS: usize> GridFrame<ROWS, COLS> {
    /// Parse and validate one report line
    ///
    /// Surrounding whitespace, including a `\r` left by CRLF senders, is
    /// ignored.
    pub fn parse(line: &str) -> Result<Self, LineError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(LineError::Empty);
        }

        let expected = ROWS * COLS;
        let found = line.split(SEPARATOR as char).count();
        if found != expected {
            return Err(LineError::WrongCellCount { expected, found });
        }

        let mut frame = Self::default();
        for (index, token) in line.split(SEPARATOR as char).enumerate() {
            let state = match token.as_bytes() {
                [byte] => CellState::from_byte(*byte),
                _ => None,
            }
            .ok_or(LineError::InvalidToken { index })?;
            frame.cells[index / COLS][index % COLS] = state;
        }

        Ok(frame)
    }

    /// State of the cell at `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> Option<CellState> {
        self.cells.get(row)?.get(col).copied()
    }

    /// All cells, row by row
    pub fn rows(&self) -> &[[CellState; COLS]; ROWS] {
        &self.cells
    }

    /// Coordinates of every touched cell in row-major order
    pub fn touched(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| cell.is_touched())
                .map(move |(c, _)| (r, c))
        })
    }

    /// True if no cell is touched
    pub fn is_idle(&self) -> bool {
        self.touched().next().is_none()
    }
}

/// ASCII view, one text row per grid row: `█` touched, `░` untouched
impl<const ROWS: usize, const COLS: usize> fmt::Display for GridFrame<ROWS, COLS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            if r > 0 {
                f.write_str("\n")?;
            }
            for (c, cell) in row.iter().enumerate() {
                if c > 0 {
                    f.write_str(" ")?;
                }
                f.write_str(if cell.is_touched() { "█" } else { "░" })?;
            }
        }
        Ok(())
    }
}
