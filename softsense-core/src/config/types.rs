//! Scanner configuration types

use softsense_hal::UartConfig;

use super::pins::{PinMap, PinMapError};

/// Pause after each scan cycle (~20 Hz)
pub const DEFAULT_INTERVAL_MS: u32 = 50;

/// Cycles between forced resends under [`ReportMode::OnChange`]
pub const DEFAULT_HEARTBEAT_SCANS: u16 = 50;

/// Default UART TX pin (UART0 on RP2040)
pub const DEFAULT_TX_PIN: u8 = 0;

/// Longest accepted pause between cycles
pub const MAX_INTERVAL_MS: u32 = 10_000;

/// Longest accepted row settle time
pub const MAX_SETTLE_US: u32 = 1_000;

/// When a completed scan is transmitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportMode {
    /// Send a line after every scan
    #[default]
    EveryScan,
    /// Send on the first scan, on any cell change, and on heartbeat
    OnChange,
}

/// Scan loop timing and reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanConfig {
    /// Pause after each cycle in milliseconds
    pub interval_ms: u32,
    /// Wait after asserting a row before reading columns, in microseconds
    pub settle_us: u32,
    /// Report policy
    pub report: ReportMode,
    /// Cycles without a transmission before an unchanged grid is resent
    pub heartbeat_scans: u16,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            settle_us: 0,
            report: ReportMode::EveryScan,
            heartbeat_scans: DEFAULT_HEARTBEAT_SCANS,
        }
    }
}

impl ScanConfig {
    /// Nominal report rate in Hz, ignoring scan and transmit time
    pub fn nominal_rate_hz(&self) -> u32 {
        1000 / self.interval_ms.max(1)
    }
}

/// Serial link configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialConfig {
    /// Framing and baud rate
    pub uart: UartConfig,
    /// GPIO used for TX
    pub tx_pin: u8,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            uart: UartConfig::default(),
            tx_pin: DEFAULT_TX_PIN,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pin mapping is invalid
    Pins(PinMapError),
    /// Serial TX pin outside the board's GPIO range
    InvalidTxPin { pin: u8 },
    /// Baud rate is zero
    InvalidBaudrate,
    /// Scan interval is zero or above [`MAX_INTERVAL_MS`]
    InvalidInterval,
    /// Settle time above [`MAX_SETTLE_US`]
    InvalidSettle,
    /// Heartbeat of zero cycles
    InvalidHeartbeat,
}

impl From<PinMapError> for ConfigError {
    fn from(e: PinMapError) -> Self {
        ConfigError::Pins(e)
    }
}

/// Complete scanner configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScannerConfig {
    pub pins: PinMap,
    pub serial: SerialConfig,
    pub scan: ScanConfig,
}

impl ScannerConfig {
    /// Validate the configuration for a board with `gpio_count` GPIOs
    pub fn validate(&self, gpio_count: u8) -> Result<(), ConfigError> {
        if self.serial.tx_pin >= gpio_count {
            return Err(ConfigError::InvalidTxPin {
                pin: self.serial.tx_pin,
            });
        }
        self.pins.validate(gpio_count, &[self.serial.tx_pin])?;

        if self.serial.uart.baudrate == 0 {
            return Err(ConfigError::InvalidBaudrate);
        }
        if self.scan.interval_ms == 0 || self.scan.interval_ms > MAX_INTERVAL_MS {
            return Err(ConfigError::InvalidInterval);
        }
        if self.scan.settle_us > MAX_SETTLE_US {
            return Err(ConfigError::InvalidSettle);
        }
        if self.scan.report == ReportMode::OnChange && self.scan.heartbeat_scans == 0 {
            return Err(ConfigError::InvalidHeartbeat);
        }

        Ok(())
    }
}
