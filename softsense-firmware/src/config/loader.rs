//! Embedded configuration loader

use defmt::*;

use softsense_core::config::{parse_config, ScannerConfig};
use softsense_hal_rp2040::GPIO_COUNT;

/// Embedded configuration (compiled into firmware)
/// Edit grid.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../grid.toml");

/// Parse and validate the embedded configuration
///
/// An invalid configuration is a build mistake, so this halts with a
/// diagnostic instead of falling back to defaults.
pub fn load_config() -> ScannerConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => defmt::panic!("grid.toml parse error: {:?}", e),
    };

    if let Err(e) = config.validate(GPIO_COUNT) {
        defmt::panic!("grid.toml rejected: {:?}", e);
    }

    info!(
        "Config: interval={}ms settle={}us report={:?} (~{} Hz)",
        config.scan.interval_ms,
        config.scan.settle_us,
        config.scan.report,
        config.scan.nominal_rate_hz()
    );

    config
}
