//! Simple TOML parser for scanner configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! the grid config. It does NOT support full TOML syntax.
//!
//! Supported features:
//! - Key = value pairs (string, integer)
//! - [section] headers
//! - Single-line arrays of pins: rows = ["gpio2", "gpio3", 4]
//! - Comments (# ...), whole-line or trailing
//! - `_` separators in integers
//!
//! Arrays must fit on one line. Any other line is an error.
//!
//! Keys not listed below are ignored. Missing keys keep their defaults.
//!
//! ```toml
//! [matrix]
//! rows = ["gpio2", "gpio3", "gpio4", "gpio5", "gpio6"]
//! cols = ["^gpio7", "^gpio8", "^gpio9", "^gpio10", "^gpio11"]
//!
//! [serial]
//! baud = 115200
//! tx_pin = "gpio0"
//!
//! [scan]
//! interval_ms = 50
//! settle_us = 0
//! report = "every_scan"
//! heartbeat_scans = 50
//! ```

use heapless::{String, Vec};

use super::types::{ReportMode, ScannerConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Invalid value type
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
    /// Pin array length does not match the grid dimension
    WrongPinCount { expected: usize, found: usize },
    /// Unknown report mode
    InvalidReportMode,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Matrix,
    Serial,
    Scan,
}

/// Parse TOML configuration into a [`ScannerConfig`]
///
/// Starts from [`ScannerConfig::default`]; the result is not validated
/// against a board, call [`ScannerConfig::validate`] for that.
pub fn parse_config(input: &str) -> Result<ScannerConfig, ParseError> {
    let mut config = ScannerConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        // Anything else must be a complete single-line `key = value`
        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

/// Cut a trailing `# comment`, ignoring `#` inside quoted strings
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "matrix" => Ok(Section::Matrix),
        "serial" => Ok(Section::Serial),
        "scan" => Ok(Section::Scan),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line (comments already stripped)
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        // Allow unquoted strings for simple values
        value
    }
}

/// Parse an integer value
///
/// Accepts `_` between digits (`115_200`), as TOML does.
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    let mut digits: String<20> = String::new();
    let mut prev_digit = false;

    for ch in value.chars() {
        if ch == '_' {
            if !prev_digit {
                return Err(ParseError::InvalidValue);
            }
            prev_digit = false;
            continue;
        }
        prev_digit = ch.is_ascii_digit();
        digits.push(ch).map_err(|_| ParseError::InvalidValue)?;
    }

    // Trailing `_`
    if !prev_digit {
        return Err(ParseError::InvalidValue);
    }

    digits.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a pin like "gpio7", "^gpio7" or a bare number
///
/// `^` (pull-up) is accepted for readability; column inputs are always
/// pulled up. `!` (inverted) has no meaning on matrix lines and is rejected.
fn parse_pin(value: &str) -> Result<u8, ParseError> {
    let s = parse_string(value.trim());
    let s = s.strip_prefix('^').unwrap_or(s);

    if s.starts_with('!') {
        return Err(ParseError::InvalidPin);
    }

    let num = s.strip_prefix("gpio").unwrap_or(s);
    num.parse().map_err(|_| ParseError::InvalidPin)
}

/// Parse a pin array into exactly `N` pins
fn parse_pin_array<const N: usize>(value: &str) -> Result<[u8; N], ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    let mut pins: Vec<u8, N> = Vec::new();
    let mut found = 0;
    for item in inner.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let pin = parse_pin(item)?;
        found += 1;
        // Keep counting past capacity so the error reports the real length
        let _ = pins.push(pin);
    }

    if found != N {
        return Err(ParseError::WrongPinCount { expected: N, found });
    }

    pins.into_array().map_err(|_| ParseError::InvalidValue)
}

fn parse_report_mode(value: &str) -> Result<ReportMode, ParseError> {
    match parse_string(value) {
        "every_scan" => Ok(ReportMode::EveryScan),
        "on_change" => Ok(ReportMode::OnChange),
        _ => Err(ParseError::InvalidReportMode),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut ScannerConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Matrix => match key {
            "rows" => config.pins.rows = parse_pin_array(value)?,
            "cols" | "columns" => config.pins.cols = parse_pin_array(value)?,
            _ => {} // Ignore unknown keys
        },
        Section::Serial => match key {
            "baud" | "baud_rate" => config.serial.uart.baudrate = parse_int(value)?,
            "tx_pin" => config.serial.tx_pin = parse_pin(value)?,
            _ => {}
        },
        Section::Scan => match key {
            "interval_ms" => config.scan.interval_ms = parse_int(value)?,
            "settle_us" => config.scan.settle_us = parse_int(value)?,
            "report" => config.scan.report = parse_report_mode(value)?,
            "heartbeat_scans" => config.scan.heartbeat_scans = parse_int(value)?,
            _ => {}
        },
        Section::Root => {
            // No root-level keys
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanConfig;

    #[test]
    fn test_parse_pin() {
        assert_eq!(parse_pin("gpio11"), Ok(11));
        assert_eq!(parse_pin("\"^gpio7\""), Ok(7));
        assert_eq!(parse_pin("4"), Ok(4));
        assert_eq!(parse_pin("!gpio12"), Err(ParseError::InvalidPin));
        assert_eq!(parse_pin("pin11"), Err(ParseError::InvalidPin));
        assert_eq!(parse_pin("gpio"), Err(ParseError::InvalidPin));
    }

    #[test]
    fn test_parse_pin_array() {
        let pins: [u8; 5] = parse_pin_array(r#"["gpio3", "gpio4", "gpio5", "gpio6", "gpio2",]"#).unwrap();
        assert_eq!(pins, [3, 4, 5, 6, 2]);

        let result: Result<[u8; 5], _> = parse_pin_array("[2, 3, 4]");
        assert_eq!(
            result,
            Err(ParseError::WrongPinCount {
                expected: 5,
                found: 3
            })
        );

        let result: Result<[u8; 2], _> = parse_pin_array("[2, 3, 4]");
        assert_eq!(
            result,
            Err(ParseError::WrongPinCount {
                expected: 2,
                found: 3
            })
        );

        let result: Result<[u8; 1], _> = parse_pin_array("2");
        assert_eq!(result, Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_parse_section_header() {
        assert_eq!(parse_section_header("matrix"), Ok(Section::Matrix));
        assert_eq!(parse_section_header(" scan "), Ok(Section::Scan));
        assert_eq!(parse_section_header("display"), Err(ParseError::InvalidSection));
    }

    #[test]
    fn test_parse_full_config() {
        let config_str = r#"
# Pico wiring
[matrix]
rows = ["gpio3", "gpio4", "gpio5", "gpio6", "gpio2"]
cols = ["^gpio8", "^gpio9", "^gpio10", "^gpio11", "^gpio7"]

[serial]
baud = 115200   # 8-N-1
tx_pin = "gpio0"

[scan]
interval_ms = 20
settle_us = 10
report = "on_change"
heartbeat_scans = 50
"#;

        let config = parse_config(config_str).unwrap();
        assert_eq!(config.pins.rows, [3, 4, 5, 6, 2]);
        assert_eq!(config.pins.cols, [8, 9, 10, 11, 7]);
        assert_eq!(config.serial.uart.baudrate, 115_200);
        assert_eq!(config.serial.tx_pin, 0);
        assert_eq!(
            config.scan,
            ScanConfig {
                interval_ms: 20,
                settle_us: 10,
                report: ReportMode::OnChange,
                heartbeat_scans: 50,
            }
        );
        assert_eq!(config.validate(30), Ok(()));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("# nothing here\n").unwrap();
        assert_eq!(config, ScannerConfig::default());
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            parse_config("[scan]\ninterval_ms = fast\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[scan]\nreport = \"sometimes\"\n"),
            Err(ParseError::InvalidReportMode)
        );
        assert_eq!(parse_config("[leds]\n"), Err(ParseError::InvalidSection));
    }

    #[test]
    fn test_section_header_with_trailing_comment() {
        let config = parse_config("[matrix] # wiring\nrows = [12, 13, 14, 15, 16]\n").unwrap();
        assert_eq!(config.pins.rows, [12, 13, 14, 15, 16]);
    }

    #[test]
    fn test_hash_inside_string_is_not_a_comment() {
        assert_eq!(strip_comment(r#"report = "on#change" # note"#), r#"report = "on#change" "#);
        assert_eq!(
            parse_config("[scan]\nreport = \"on#change\"\n"),
            Err(ParseError::InvalidReportMode)
        );
    }

    #[test]
    fn test_integer_digit_separators() {
        let config = parse_config("[serial]\nbaud = 115_200\n").unwrap();
        assert_eq!(config.serial.uart.baudrate, 115_200);

        assert_eq!(parse_int::<u32>("1_000"), Ok(1000));
        assert_eq!(parse_int::<u32>("_100"), Err(ParseError::InvalidValue));
        assert_eq!(parse_int::<u32>("100_"), Err(ParseError::InvalidValue));
        assert_eq!(parse_int::<u32>("1__0"), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_multiline_array_rejected() {
        let config_str = "[matrix]\nrows = [\n  \"gpio2\",\n  \"gpio3\",\n]\n";
        assert_eq!(parse_config(config_str), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_stray_line_rejected() {
        assert_eq!(
            parse_config("[scan]\ninterval_ms\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(parse_config("[scan]\nsettle_us =\n"), Err(ParseError::InvalidValue));
        assert_eq!(parse_config("[matrix\n"), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_firmware_grid_toml_parses() {
        let config = parse_config(include_str!("../../../softsense-firmware/grid.toml")).unwrap();
        assert_eq!(config, ScannerConfig::default());
        assert_eq!(config.validate(30), Ok(()));
    }
}
