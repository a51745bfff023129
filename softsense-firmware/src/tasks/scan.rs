//! Matrix scan task
//!
//! Runs the scan cycle forever. The pause after each cycle is a plain
//! timed wait, so the real period is the interval plus scan and write time.

use defmt::*;
use embassy_time::{Delay, Timer};

use softsense_core::{CycleError, CycleOutcome, ScanCycle};
use softsense_hal_rp2040::{ColumnPin, RowPin, SerialTx};

/// Scan task - scans the grid and reports it every `interval_ms`
#[embassy_executor::task]
pub async fn scan_task(
    mut cycle: ScanCycle<RowPin, ColumnPin>,
    mut tx: SerialTx,
    interval_ms: u32,
) {
    info!("Scan task started ({} ms interval)", interval_ms);

    let mut delay = Delay;

    loop {
        match cycle.run(&mut delay, &mut tx) {
            Ok(CycleOutcome::Sent { len, reason }) => {
                trace!(
                    "Cycle {}: sent {} bytes ({:?}), {} touched",
                    cycle.cycles(),
                    len,
                    reason,
                    cycle.grid().touched_count()
                );
            }
            Ok(CycleOutcome::Skipped) => {
                trace!("Cycle {}: unchanged", cycle.cycles());
            }
            Err(CycleError::Write(e)) => {
                warn!("Failed to send grid line: {:?}", e);
            }
            Err(CycleError::Encode(e)) => {
                warn!("Failed to encode grid line: {:?}", e);
            }
        }

        Timer::after_millis(interval_ms as u64).await;
    }
}
