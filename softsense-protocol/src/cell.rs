//! Per-cell touch state and its wire digit

/// State of one grid cell as sampled in a single scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CellState {
    /// Column read HIGH (pull-up idle)
    #[default]
    Untouched,
    /// Column pulled LOW through the contact
    Touched,
}

// Wire format values
const WIRE_TOUCHED: u8 = b'0';
const WIRE_UNTOUCHED: u8 = b'1';

impl CellState {
    /// State from the column level read while the row was active
    pub const fn from_column_high(high: bool) -> Self {
        if high {
            CellState::Untouched
        } else {
            CellState::Touched
        }
    }

    /// Parse a state from its wire digit
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            WIRE_TOUCHED => Some(CellState::Touched),
            WIRE_UNTOUCHED => Some(CellState::Untouched),
            _ => None,
        }
    }

    /// Convert to the wire digit
    pub const fn to_byte(self) -> u8 {
        match self {
            CellState::Touched => WIRE_TOUCHED,
            CellState::Untouched => WIRE_UNTOUCHED,
        }
    }

    /// Numeric value as sent on the wire (0 = touch, 1 = no touch)
    pub const fn value(self) -> u8 {
        match self {
            CellState::Touched => 0,
            CellState::Untouched => 1,
        }
    }

    pub const fn is_touched(self) -> bool {
        matches!(self, CellState::Touched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_digits() {
        assert_eq!(CellState::Touched.to_byte(), b'0');
        assert_eq!(CellState::Untouched.to_byte(), b'1');
        assert_eq!(CellState::from_byte(b'0'), Some(CellState::Touched));
        assert_eq!(CellState::from_byte(b'1'), Some(CellState::Untouched));
        assert_eq!(CellState::from_byte(b'2'), None);
        assert_eq!(CellState::from_byte(b' '), None);
    }

    #[test]
    fn test_active_low_mapping() {
        assert_eq!(CellState::from_column_high(true), CellState::Untouched);
        assert_eq!(CellState::from_column_high(false), CellState::Touched);
    }

    #[test]
    fn test_default_is_untouched() {
        assert_eq!(CellState::default(), CellState::Untouched);
        assert_eq!(CellState::default().value(), 1);
    }
}
