//! UART serial communication abstractions
//!
//! The scanner only ever transmits, so only the TX half is modelled.

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been queued or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    ///
    /// Blocks until the last byte has left the shift register.
    fn flush(&mut self) -> Result<(), Self::Error>;
}

impl<T: UartTx + ?Sized> UartTx for &mut T {
    type Error = T::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        T::write_blocking(self, data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        T::flush(self)
    }
}

/// Baud rate the host side expects
pub const DEFAULT_BAUDRATE: u32 = 115_200;

/// UART configuration
///
/// Framing is fixed at 8 data bits, no parity, one stop bit; the host
/// reader assumes 8-N-1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
}

impl UartConfig {
    pub const fn with_baudrate(baudrate: u32) -> Self {
        Self { baudrate }
    }
}

impl Default for UartConfig {
    fn default() -> Self {
        Self::with_baudrate(DEFAULT_BAUDRATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_baudrate() {
        assert_eq!(UartConfig::default().baudrate, 115_200);
        assert_eq!(UartConfig::with_baudrate(9600).baudrate, 9600);
    }
}
