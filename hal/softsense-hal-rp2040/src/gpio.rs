//! Row and column line wrappers
//!
//! Thin newtypes over the embassy-rp GPIO drivers that implement the
//! `softsense-hal` pin traits for the matrix scanner.

use embassy_rp::gpio::{AnyPin, Input, Level, Output, Pull};
use embassy_rp::Peri;
use softsense_hal::{InputPin, OutputPin};

/// Number of user GPIOs on RP2040 (GPIO0-GPIO29)
pub const GPIO_COUNT: u8 = 30;

/// Row drive line
///
/// Push-pull output, parked HIGH (inactive) from construction.
pub struct RowPin(Output<'static>);

impl RowPin {
    pub fn new(pin: Peri<'static, AnyPin>) -> Self {
        Self(Output::new(pin, Level::High))
    }
}

impl OutputPin for RowPin {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Column sense line
///
/// Input with the internal pull-up enabled, so an open contact reads HIGH.
pub struct ColumnPin(Input<'static>);

impl ColumnPin {
    pub fn new(pin: Peri<'static, AnyPin>) -> Self {
        Self(Input::new(pin, Pull::Up))
    }
}

impl InputPin for ColumnPin {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}
