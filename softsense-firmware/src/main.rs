//! SoftSense - Touch Grid Scanner Firmware
//!
//! Main firmware binary for RP2040-based boards. Scans a 5x5 row-driven,
//! column-sensed contact matrix and streams one line of cell states per
//! cycle over UART.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use {defmt_rtt as _, panic_probe as _};

use softsense_core::ScanCycle;
use softsense_hal_rp2040::{open_serial_tx, PinBank, PinBankPeripherals};

mod config;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("SoftSense firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Embedded grid.toml, validated against the board
    let config = config::load_config();

    let (mut pins, uarts) = PinBankPeripherals::from_peripherals(p);

    // The TX pin is taken as a typed pin before the rest go into the bank
    let tx = match open_serial_tx(&mut pins, uarts, config.serial.tx_pin, &config.serial.uart) {
        Ok(tx) => tx,
        Err(e) => defmt::panic!("Serial link unavailable: {:?}", e),
    };
    info!(
        "Serial link on {:?} TX=GPIO{} at {} baud",
        tx.id(),
        config.serial.tx_pin,
        config.serial.uart.baudrate
    );

    let mut bank = PinBank::new(&mut pins);
    let rows = match bank.take_rows(&config.pins.rows) {
        Ok(rows) => rows,
        Err(e) => defmt::panic!("Row pin setup failed: {:?}", e),
    };
    let cols = match bank.take_columns(&config.pins.cols) {
        Ok(cols) => cols,
        Err(e) => defmt::panic!("Column pin setup failed: {:?}", e),
    };
    info!(
        "Matrix ready: rows={} cols={}",
        config.pins.rows,
        config.pins.cols
    );

    let cycle = ScanCycle::from_config(rows, cols, &config.scan);
    unwrap!(spawner.spawn(tasks::scan_task(cycle, tx, config.scan.interval_ms)));

    info!("Scan task spawned, firmware running");
}
