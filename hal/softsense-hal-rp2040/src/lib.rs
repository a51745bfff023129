//! RP2040-specific HAL for the touch grid firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `softsense-hal` traits, plus RP2040-specific functionality:
//!
//! - GPIO pin bank for config-driven pin assignment
//! - Row (push-pull output) and column (pulled-up input) line wrappers
//! - Blocking UART transmitter for the serial link

#![no_std]

pub mod gpio;
pub mod pins;
pub mod uart;

pub use gpio::{ColumnPin, RowPin, GPIO_COUNT};
pub use pins::{PinBank, PinBankPeripherals, PinError, RemainingPeripherals};
pub use uart::{gpio_to_uart, open_serial_tx, SerialTx, UartId};
