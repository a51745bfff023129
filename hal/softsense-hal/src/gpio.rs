//! GPIO pin abstractions
//!
//! Row lines of the matrix are driven through [`OutputPin`], column lines
//! are sampled through [`InputPin`].

/// Logic level of a digital line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Level from a boolean, `true` meaning high
    pub const fn from_high(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }

    /// Returns true for [`Level::High`]
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }
}

/// Digital output pin
///
/// Implementations drive the actual pad of the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Drive the pin to a specific level
    fn set_level(&mut self, level: Level) {
        match level {
            Level::High => self.set_high(),
            Level::Low => self.set_low(),
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }

    /// Sample the pin level
    fn level(&self) -> Level {
        Level::from_high(self.is_high())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockOutput {
        high: bool,
    }

    impl OutputPin for MockOutput {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    struct MockInput(bool);

    impl InputPin for MockInput {
        fn is_high(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_set_level() {
        let mut pin = MockOutput { high: false };

        pin.set_level(Level::High);
        assert!(pin.is_set_high());

        pin.set_level(Level::Low);
        assert!(pin.is_set_low());
    }

    #[test]
    fn test_input_level() {
        assert_eq!(MockInput(true).level(), Level::High);
        assert_eq!(MockInput(false).level(), Level::Low);
        assert!(MockInput(false).is_low());
    }

    #[test]
    fn test_level_from_high() {
        assert!(Level::from_high(true).is_high());
        assert!(!Level::from_high(false).is_high());
    }
}
