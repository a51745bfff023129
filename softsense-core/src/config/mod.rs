//! Configuration types
//!
//! Board-agnostic configuration for the scanner, parsed from the TOML file
//! embedded into the firmware image.

pub mod pins;
pub mod toml;
pub mod types;

pub use pins::{PinMap, PinMapError};
pub use toml::{parse_config, ParseError};
pub use types::*;
