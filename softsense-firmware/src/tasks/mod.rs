//! Embassy async tasks
//!
//! A single task owns the matrix and the serial link for the lifetime of
//! the firmware.

pub mod scan;

pub use scan::scan_task;
