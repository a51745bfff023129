//! Touch Grid Serial Protocol
//!
//! This crate defines the text line the scanner streams to its host, and
//! the pieces a host needs to read it back.
//!
//! # Protocol Overview
//!
//! One ASCII line per report, cells in row-major order:
//! ```text
//! ┌────┬───┬────┬───┬─────┬───┬─────┬────┐
//! │ v0 │ , │ v1 │ , │ ... │ , │ v24 │ \n │
//! └────┴───┴────┴───┴─────┴───┴─────┴────┘
//! ```
//!
//! Each `vi` is `0` (contact) or `1` (no contact), for the cell at
//! `row * COL_COUNT + col`. There is no framing beyond the newline, no
//! checksum, and no acknowledgement from the host.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod cell;
pub mod decode;
pub mod line;

pub use cell::CellState;
pub use decode::{GridFrame, LineDecoder};
pub use line::{encode_line, line_len, LineError, MAX_LINE_LEN};

/// Number of driven row lines on the sensor
pub const ROW_COUNT: usize = 5;

/// Number of sensed column lines on the sensor
pub const COL_COUNT: usize = 5;

/// Total cells reported per line
pub const CELL_COUNT: usize = ROW_COUNT * COL_COUNT;

/// Token separator
pub const SEPARATOR: u8 = b',';

/// Line terminator
pub const TERMINATOR: u8 = b'\n';
