//! SoftSense Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the scanner core is written
//! against. Chip-specific HALs implement them for their own pin and UART
//! types, so the scan logic runs unchanged on the target and under test
//! doubles on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  softsense-core (scanner, scan cycle)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  softsense-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ softsense-hal-│
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Row drivers and column sense lines
//! - [`uart::UartTx`] - Serial transmit for the grid report line

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod uart;

pub use gpio::{InputPin, Level, OutputPin};
pub use uart::{UartConfig, UartTx, DEFAULT_BAUDRATE};
