//! Serial link transmitter
//!
//! RP2040 has two UART peripherals (UART0 and UART1), each reachable from
//! a fixed set of GPIOs. The grid line only flows device to host, so just
//! the TX half is configured.

use embassy_rp::uart::{self, Blocking};
use softsense_hal::{UartConfig, UartTx};

use crate::pins::{PinBankPeripherals, PinError, RemainingPeripherals};

/// UART peripheral identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartId {
    Uart0,
    Uart1,
}

/// Determine which UART can transmit on a given GPIO pin
pub fn gpio_to_uart(gpio: u8) -> Option<UartId> {
    // UART0 TX: GPIO 0, 12, 16, 28
    // UART1 TX: GPIO 4, 8, 20, 24
    match gpio {
        0 | 12 | 16 | 28 => Some(UartId::Uart0),
        4 | 8 | 20 | 24 => Some(UartId::Uart1),
        _ => None,
    }
}

/// 8-N-1 at the configured baud rate
fn to_embassy_config(config: &UartConfig) -> uart::Config {
    let mut cfg = uart::Config::default();
    cfg.baudrate = config.baudrate;
    cfg.data_bits = uart::DataBits::DataBits8;
    cfg.parity = uart::Parity::ParityNone;
    cfg.stop_bits = uart::StopBits::STOP1;
    cfg
}

/// Blocking UART transmitter
pub struct SerialTx {
    tx: uart::UartTx<'static, Blocking>,
    id: UartId,
}

impl SerialTx {
    pub fn id(&self) -> UartId {
        self.id
    }
}

impl UartTx for SerialTx {
    type Error = uart::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.tx.blocking_write(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.tx.blocking_flush()
    }
}

/// Open the transmitter on `tx_pin`
///
/// Takes the typed TX pin out of `pins`, so call this before building the
/// [`crate::PinBank`] from the rest. The owning UART is picked from the pin.
pub fn open_serial_tx(
    pins: &mut PinBankPeripherals,
    uarts: RemainingPeripherals,
    tx_pin: u8,
    config: &UartConfig,
) -> Result<SerialTx, PinError> {
    let cfg = to_embassy_config(config);
    let taken = PinError::AlreadyTaken { pin: tx_pin };

    let tx = match tx_pin {
        0 => uart::UartTx::new_blocking(uarts.uart0, pins.pin0.take().ok_or(taken)?, cfg),
        12 => uart::UartTx::new_blocking(uarts.uart0, pins.pin12.take().ok_or(taken)?, cfg),
        16 => uart::UartTx::new_blocking(uarts.uart0, pins.pin16.take().ok_or(taken)?, cfg),
        28 => uart::UartTx::new_blocking(uarts.uart0, pins.pin28.take().ok_or(taken)?, cfg),
        4 => uart::UartTx::new_blocking(uarts.uart1, pins.pin4.take().ok_or(taken)?, cfg),
        8 => uart::UartTx::new_blocking(uarts.uart1, pins.pin8.take().ok_or(taken)?, cfg),
        20 => uart::UartTx::new_blocking(uarts.uart1, pins.pin20.take().ok_or(taken)?, cfg),
        24 => uart::UartTx::new_blocking(uarts.uart1, pins.pin24.take().ok_or(taken)?, cfg),
        pin => return Err(PinError::NotUartTx { pin }),
    };

    let id = gpio_to_uart(tx_pin).ok_or(PinError::NotUartTx { pin: tx_pin })?;
    Ok(SerialTx { tx, id })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpio_to_uart() {
        assert_eq!(gpio_to_uart(0), Some(UartId::Uart0));
        assert_eq!(gpio_to_uart(16), Some(UartId::Uart0));
        assert_eq!(gpio_to_uart(4), Some(UartId::Uart1));
        assert_eq!(gpio_to_uart(24), Some(UartId::Uart1));
        // RX-only and non-UART pins
        assert_eq!(gpio_to_uart(1), None);
        assert_eq!(gpio_to_uart(2), None);
    }
}
