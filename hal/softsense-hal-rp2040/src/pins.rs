//! Dynamic pin allocation for config-driven hardware setup
//!
//! Provides a way to get GPIO pins by number at runtime, so the row and
//! column assignment comes from `grid.toml` rather than being hardcoded.

use embassy_rp::gpio::AnyPin;
use embassy_rp::Peri;
use embassy_rp::Peripherals;
use heapless::Vec;

use crate::gpio::{ColumnPin, RowPin, GPIO_COUNT};

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin { pin: u8 },
    /// Pin already taken
    AlreadyTaken { pin: u8 },
    /// Pin has no UART TX function
    NotUartTx { pin: u8 },
}

/// Pin bank that holds the free GPIO pins and hands them out by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT as usize],
}

impl PinBank {
    /// Create a pin bank from whatever pins are still left
    ///
    /// Pins already taken out of `p` (e.g. the UART TX pin) stay
    /// unavailable. After this call, pins must be obtained through `take()`.
    pub fn new(p: &mut PinBankPeripherals) -> Self {
        Self {
            pins: [
                p.pin0.take().map(|p| p.into()),
                p.pin1.take().map(|p| p.into()),
                p.pin2.take().map(|p| p.into()),
                p.pin3.take().map(|p| p.into()),
                p.pin4.take().map(|p| p.into()),
                p.pin5.take().map(|p| p.into()),
                p.pin6.take().map(|p| p.into()),
                p.pin7.take().map(|p| p.into()),
                p.pin8.take().map(|p| p.into()),
                p.pin9.take().map(|p| p.into()),
                p.pin10.take().map(|p| p.into()),
                p.pin11.take().map(|p| p.into()),
                p.pin12.take().map(|p| p.into()),
                p.pin13.take().map(|p| p.into()),
                p.pin14.take().map(|p| p.into()),
                p.pin15.take().map(|p| p.into()),
                p.pin16.take().map(|p| p.into()),
                p.pin17.take().map(|p| p.into()),
                p.pin18.take().map(|p| p.into()),
                p.pin19.take().map(|p| p.into()),
                p.pin20.take().map(|p| p.into()),
                p.pin21.take().map(|p| p.into()),
                p.pin22.take().map(|p| p.into()),
                p.pin23.take().map(|p| p.into()),
                p.pin24.take().map(|p| p.into()),
                p.pin25.take().map(|p| p.into()),
                p.pin26.take().map(|p| p.into()),
                p.pin27.take().map(|p| p.into()),
                p.pin28.take().map(|p| p.into()),
                p.pin29.take().map(|p| p.into()),
            ],
        }
    }

    /// Take a pin by number
    pub fn take(&mut self, pin: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        if pin >= GPIO_COUNT {
            return Err(PinError::InvalidPin { pin });
        }
        self.pins[pin as usize]
            .take()
            .ok_or(PinError::AlreadyTaken { pin })
    }

    /// Take every row line in order, each parked HIGH
    pub fn take_rows<const N: usize>(&mut self, pins: &[u8; N]) -> Result<[RowPin; N], PinError> {
        let mut rows: Vec<RowPin, N> = Vec::new();
        for &pin in pins {
            // Capacity is N and we push N times
            let _ = rows.push(RowPin::new(self.take(pin)?));
        }
        Ok(rows.into_array().unwrap_or_else(|_| unreachable!()))
    }

    /// Take every column line in order, each with its pull-up enabled
    pub fn take_columns<const N: usize>(
        &mut self,
        pins: &[u8; N],
    ) -> Result<[ColumnPin; N], PinError> {
        let mut cols: Vec<ColumnPin, N> = Vec::new();
        for &pin in pins {
            let _ = cols.push(ColumnPin::new(self.take(pin)?));
        }
        Ok(cols.into_array().unwrap_or_else(|_| unreachable!()))
    }
}

/// GPIO pins waiting to be moved into the [`PinBank`]
///
/// Using Option allows taking typed pins individually (e.g. for a UART)
/// before the rest are handed to the bank by number.
pub struct PinBankPeripherals {
    pub pin0: Option<Peri<'static, embassy_rp::peripherals::PIN_0>>,
    pub pin1: Option<Peri<'static, embassy_rp::peripherals::PIN_1>>,
    pub pin2: Option<Peri<'static, embassy_rp::peripherals::PIN_2>>,
    pub pin3: Option<Peri<'static, embassy_rp::peripherals::PIN_3>>,
    pub pin4: Option<Peri<'static, embassy_rp::peripherals::PIN_4>>,
    pub pin5: Option<Peri<'static, embassy_rp::peripherals::PIN_5>>,
    pub pin6: Option<Peri<'static, embassy_rp::peripherals::PIN_6>>,
    pub pin7: Option<Peri<'static, embassy_rp::peripherals::PIN_7>>,
    pub pin8: Option<Peri<'static, embassy_rp::peripherals::PIN_8>>,
    pub pin9: Option<Peri<'static, embassy_rp::peripherals::PIN_9>>,
    pub pin10: Option<Peri<'static, embassy_rp::peripherals::PIN_10>>,
    pub pin11: Option<Peri<'static, embassy_rp::peripherals::PIN_11>>,
    pub pin12: Option<Peri<'static, embassy_rp::peripherals::PIN_12>>,
    pub pin13: Option<Peri<'static, embassy_rp::peripherals::PIN_13>>,
    pub pin14: Option<Peri<'static, embassy_rp::peripherals::PIN_14>>,
    pub pin15: Option<Peri<'static, embassy_rp::peripherals::PIN_15>>,
    pub pin16: Option<Peri<'static, embassy_rp::peripherals::PIN_16>>,
    pub pin17: Option<Peri<'static, embassy_rp::peripherals::PIN_17>>,
    pub pin18: Option<Peri<'static, embassy_rp::peripherals::PIN_18>>,
    pub pin19: Option<Peri<'static, embassy_rp::peripherals::PIN_19>>,
    pub pin20: Option<Peri<'static, embassy_rp::peripherals::PIN_20>>,
    pub pin21: Option<Peri<'static, embassy_rp::peripherals::PIN_21>>,
    pub pin22: Option<Peri<'static, embassy_rp::peripherals::PIN_22>>,
    pub pin23: Option<Peri<'static, embassy_rp::peripherals::PIN_23>>,
    pub pin24: Option<Peri<'static, embassy_rp::peripherals::PIN_24>>,
    pub pin25: Option<Peri<'static, embassy_rp::peripherals::PIN_25>>,
    pub pin26: Option<Peri<'static, embassy_rp::peripherals::PIN_26>>,
    pub pin27: Option<Peri<'static, embassy_rp::peripherals::PIN_27>>,
    pub pin28: Option<Peri<'static, embassy_rp::peripherals::PIN_28>>,
    pub pin29: Option<Peri<'static, embassy_rp::peripherals::PIN_29>>,
}

impl PinBankPeripherals {
    /// Split Embassy Peripherals into GPIOs and the UARTs
    pub fn from_peripherals(p: Peripherals) -> (Self, RemainingPeripherals) {
        let pins = Self {
            pin0: Some(p.PIN_0),
            pin1: Some(p.PIN_1),
            pin2: Some(p.PIN_2),
            pin3: Some(p.PIN_3),
            pin4: Some(p.PIN_4),
            pin5: Some(p.PIN_5),
            pin6: Some(p.PIN_6),
            pin7: Some(p.PIN_7),
            pin8: Some(p.PIN_8),
            pin9: Some(p.PIN_9),
            pin10: Some(p.PIN_10),
            pin11: Some(p.PIN_11),
            pin12: Some(p.PIN_12),
            pin13: Some(p.PIN_13),
            pin14: Some(p.PIN_14),
            pin15: Some(p.PIN_15),
            pin16: Some(p.PIN_16),
            pin17: Some(p.PIN_17),
            pin18: Some(p.PIN_18),
            pin19: Some(p.PIN_19),
            pin20: Some(p.PIN_20),
            pin21: Some(p.PIN_21),
            pin22: Some(p.PIN_22),
            pin23: Some(p.PIN_23),
            pin24: Some(p.PIN_24),
            pin25: Some(p.PIN_25),
            pin26: Some(p.PIN_26),
            pin27: Some(p.PIN_27),
            pin28: Some(p.PIN_28),
            pin29: Some(p.PIN_29),
        };
        let remaining = RemainingPeripherals {
            uart0: p.UART0,
            uart1: p.UART1,
        };
        (pins, remaining)
    }
}

/// Non-GPIO peripherals the firmware uses
pub struct RemainingPeripherals {
    pub uart0: Peri<'static, embassy_rp::peripherals::UART0>,
    pub uart1: Peri<'static, embassy_rp::peripherals::UART1>,
}
