//! Matrix pin mapping
//!
//! Rows are driven outputs, columns are pulled-up inputs. Pin numbers are
//! plain GPIO indices; the valid range is supplied by the board at
//! validation time so this module stays chip-agnostic.

use crate::grid::{COL_COUNT, ROW_COUNT};

/// Default row pins (outputs, idle HIGH)
pub const DEFAULT_ROW_PINS: [u8; ROW_COUNT] = [2, 3, 4, 5, 6];

/// Default column pins (inputs with pull-up, active LOW)
pub const DEFAULT_COL_PINS: [u8; COL_COUNT] = [7, 8, 9, 10, 11];

/// Errors from pin mapping validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMapError {
    /// Pin number beyond the board's GPIO range
    OutOfRange { pin: u8 },
    /// Same pin used twice across rows and columns
    Duplicate { pin: u8 },
    /// Pin is claimed by another peripheral (e.g. UART TX)
    Reserved { pin: u8 },
}

/// Ordered row and column pin assignment
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinMap {
    /// Row pins, index = row
    pub rows: [u8; ROW_COUNT],
    /// Column pins, index = column
    pub cols: [u8; COL_COUNT],
}

impl Default for PinMap {
    fn default() -> Self {
        Self::new(DEFAULT_ROW_PINS, DEFAULT_COL_PINS)
    }
}

impl PinMap {
    pub const fn new(rows: [u8; ROW_COUNT], cols: [u8; COL_COUNT]) -> Self {
        Self { rows, cols }
    }

    /// All pins, rows first
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.rows.iter().chain(self.cols.iter()).copied()
    }

    /// Check the mapping against a board
    ///
    /// # Arguments
    /// - `gpio_count`: number of GPIOs on the target (pins `0..gpio_count` are valid)
    /// - `reserved`: pins already taken by other peripherals
    pub fn validate(&self, gpio_count: u8, reserved: &[u8]) -> Result<(), PinMapError> {
        let mut seen: u64 = 0;

        for pin in self.iter() {
            if pin >= gpio_count || pin >= 64 {
                return Err(PinMapError::OutOfRange { pin });
            }
            if reserved.contains(&pin) {
                return Err(PinMapError::Reserved { pin });
            }
            let mask = 1u64 << pin;
            if seen & mask != 0 {
                return Err(PinMapError::Duplicate { pin });
            }
            seen |= mask;
        }

        Ok(())
    }
}
