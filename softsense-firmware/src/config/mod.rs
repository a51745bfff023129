//! Configuration loading
//!
//! The configuration is the `grid.toml` compiled into the image, parsed by
//! the `no_std` parser in `softsense-core`.

pub mod loader;

pub use loader::load_config;
