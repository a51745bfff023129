//! Build script for softsense-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates grid.toml at compile time, both as TOML and with the
//!   firmware's own parser

use std::collections::BTreeSet;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use softsense_core::{COL_COUNT, ROW_COUNT};

/// GPIOs on RP2040
const GPIO_COUNT: i64 = 30;

/// Pins that can carry UART TX
const UART_TX_PINS: [i64; 8] = [0, 4, 8, 12, 16, 20, 24, 28];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate grid.toml configuration at compile time
fn validate_config() {
    // Re-run if grid.toml changes
    println!("cargo:rerun-if-changed=grid.toml");

    let config_path = Path::new("grid.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: grid.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a grid.toml configuration file.           ║\n\
            ║  Please create one in the softsense-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read grid.toml                                 ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in grid.toml                         ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    let tx_pin = validate_serial(&config, &mut errors);
    validate_matrix(&config, tx_pin, &mut errors);
    validate_scan(&config, &mut errors);
    validate_with_firmware_parser(&config_content, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid grid.toml                                        ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(&errors.join("\n"))
        );
    }

    println!("cargo:warning=grid.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only the known sections are accepted
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        return;
    };
    for (name, value) in table {
        match name.as_str() {
            "matrix" | "serial" | "scan" => {
                if !value.is_table() {
                    errors.push(format!("[{}] must be a table", name));
                }
            }
            other => errors.push(format!("Unknown section [{}]", other)),
        }
    }
}

/// Parse "gpioN", "^gpioN", or a bare integer
fn pin_number(value: &toml::Value) -> Option<i64> {
    match value {
        toml::Value::Integer(n) => Some(*n),
        toml::Value::String(s) => {
            let s = s.trim();
            let s = s.strip_prefix('^').unwrap_or(s);
            if s.starts_with('!') {
                return None;
            }
            s.strip_prefix("gpio").unwrap_or(s).parse().ok()
        }
        _ => None,
    }
}

fn validate_serial(config: &toml::Value, errors: &mut Vec<String>) -> i64 {
    let Some(serial) = config.get("serial") else {
        return 0;
    };

    if let Some(baud) = serial.get("baud").or_else(|| serial.get("baud_rate")) {
        match baud.as_integer() {
            Some(b) if b > 0 && b <= u32::MAX as i64 => {}
            _ => errors.push(format!("serial.baud: invalid value {}", baud)),
        }
    }

    match serial.get("tx_pin") {
        None => 0,
        Some(value) => match pin_number(value) {
            Some(pin) if UART_TX_PINS.contains(&pin) => pin,
            Some(pin) => {
                errors.push(format!("serial.tx_pin: GPIO{} has no UART TX function", pin));
                pin
            }
            None => {
                errors.push(format!("serial.tx_pin: invalid pin {}", value));
                0
            }
        },
    }
}

fn validate_matrix(config: &toml::Value, tx_pin: i64, errors: &mut Vec<String>) {
    let matrix = config.get("matrix");
    let rows = pin_list(matrix, "rows", ROW_COUNT, &[2, 3, 4, 5, 6], errors);
    let cols = pin_list(matrix, "cols", COL_COUNT, &[7, 8, 9, 10, 11], errors);

    let mut seen = BTreeSet::new();
    for pin in rows.iter().chain(cols.iter()) {
        if *pin < 0 || *pin >= GPIO_COUNT {
            errors.push(format!("matrix: GPIO{} out of range (0-{})", pin, GPIO_COUNT - 1));
        } else if *pin == tx_pin {
            errors.push(format!("matrix: GPIO{} is the serial TX pin", pin));
        } else if !seen.insert(*pin) {
            errors.push(format!("matrix: GPIO{} used more than once", pin));
        }
    }
}

fn pin_list(
    matrix: Option<&toml::Value>,
    key: &str,
    expected: usize,
    default: &[i64],
    errors: &mut Vec<String>,
) -> Vec<i64> {
    let value = matrix.and_then(|m| m.get(key)).or_else(|| {
        if key == "cols" {
            matrix.and_then(|m| m.get("columns"))
        } else {
            None
        }
    });

    let Some(value) = value else {
        return default.to_vec();
    };
    let Some(items) = value.as_array() else {
        errors.push(format!("matrix.{}: expected an array of pins", key));
        return Vec::new();
    };
    if items.len() != expected {
        errors.push(format!(
            "matrix.{}: expected {} pins, found {}",
            key,
            expected,
            items.len()
        ));
    }

    items
        .iter()
        .filter_map(|item| {
            let pin = pin_number(item);
            if pin.is_none() {
                errors.push(format!("matrix.{}: invalid pin {}", key, item));
            }
            pin
        })
        .collect()
}

fn validate_scan(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(scan) = config.get("scan") else {
        return;
    };

    if let Some(v) = scan.get("interval_ms") {
        match v.as_integer() {
            Some(ms) if (1..=10_000).contains(&ms) => {}
            _ => errors.push(format!("scan.interval_ms: must be 1-10000, got {}", v)),
        }
    }
    if let Some(v) = scan.get("settle_us") {
        match v.as_integer() {
            Some(us) if (0..=1_000).contains(&us) => {}
            _ => errors.push(format!("scan.settle_us: must be 0-1000, got {}", v)),
        }
    }

    let on_change = match scan.get("report").map(|v| v.as_str()) {
        None => false,
        Some(Some("every_scan")) => false,
        Some(Some("on_change")) => true,
        Some(_) => {
            errors.push("scan.report: must be \"every_scan\" or \"on_change\"".to_string());
            false
        }
    };

    if let Some(v) = scan.get("heartbeat_scans") {
        match v.as_integer() {
            Some(0) if on_change => {
                errors.push("scan.heartbeat_scans: must be at least 1 with on_change".to_string())
            }
            Some(n) if (0..=u16::MAX as i64).contains(&n) => {}
            _ => errors.push(format!("scan.heartbeat_scans: invalid value {}", v)),
        }
    }
}

/// Run the parser the firmware uses at boot
///
/// The firmware reads a TOML subset (single-line arrays, no tables beyond
/// the three sections), so a file the `toml` crate accepts can still be
/// rejected or read differently on the board.
fn validate_with_firmware_parser(content: &str, errors: &mut Vec<String>) {
    match softsense_core::config::parse_config(content) {
        Ok(config) => {
            if let Err(e) = config.validate(GPIO_COUNT as u8) {
                errors.push(format!("firmware validation: {:?}", e));
            }
        }
        Err(e) => errors.push(format!(
            "firmware parser: {:?} (arrays must fit on one line)",
            e
        )),
    }
}
