//! Board-agnostic core logic for the touch grid firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Grid dimensions and the owned per-cell state
//! - Pin mapping, validation and the embedded config parser
//! - Row-driven, column-sensed matrix scanning
//! - Report policy (every scan, or on change with heartbeat)
//! - The scan cycle: scan, decide, encode, transmit

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod cycle;
pub mod grid;
pub mod report;
pub mod scanner;

pub use cycle::{CycleError, CycleOutcome, ScanCycle};
pub use grid::{GridState, TouchGrid, CELL_COUNT, COL_COUNT, ROW_COUNT};
pub use report::{EmitReason, Reporter};
pub use scanner::MatrixScanner;
